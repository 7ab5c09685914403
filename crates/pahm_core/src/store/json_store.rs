//! File-backed record store.
//!
//! Layout inside the data directory:
//! - sessions.jsonl, notes.jsonl: append-only JSON lines
//! - questionnaire.json, self_assessment.json: written once
//! - progress_state.json: completion flags and PAHM hours, replaced atomically
//!
//! A missing file means "no records". Malformed lines are skipped.

use super::RecordSource;
use crate::error::Result;
use crate::records::{EmotionalNote, PracticeSession, Questionnaire, SelfAssessment};
use crate::tracker::ProgressState;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SESSIONS_FILE: &str = "sessions.jsonl";
const NOTES_FILE: &str = "notes.jsonl";
const QUESTIONNAIRE_FILE: &str = "questionnaire.json";
const SELF_ASSESSMENT_FILE: &str = "self_assessment.json";
const STATE_FILE: &str = "progress_state.json";

/// JSON/JSONL store rooted at a data directory
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn append_session(&self, session: &PracticeSession) -> Result<()> {
        self.append_line(SESSIONS_FILE, session)
    }

    pub fn append_note(&self, note: &EmotionalNote) -> Result<()> {
        self.append_line(NOTES_FILE, note)
    }

    pub fn save_questionnaire(&self, questionnaire: &Questionnaire) -> Result<()> {
        self.write_atomic(QUESTIONNAIRE_FILE, questionnaire)
    }

    pub fn save_self_assessment(&self, assessment: &SelfAssessment) -> Result<()> {
        self.write_atomic(SELF_ASSESSMENT_FILE, assessment)
    }

    pub fn save_progress_state(&self, state: &ProgressState) -> Result<()> {
        self.write_atomic(STATE_FILE, state)
    }

    /// Read-modify-write of the persisted progress state
    pub fn update_progress_state(&self, update: impl FnOnce(&mut ProgressState)) -> Result<ProgressState> {
        let mut state = self.progress_state()?;
        update(&mut state);
        self.save_progress_state(&state)?;
        Ok(state)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn append_line<T: Serialize>(&self, name: &str, record: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(name))?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        file.sync_all()?;
        Ok(())
    }

    fn read_lines<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.path(name);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path)?);
        let mut records = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(file = name, line = number + 1, error = %e, "skipping malformed record"),
            }
        }
        debug!(file = name, count = records.len(), "records loaded");
        Ok(records)
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.path(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Write to a temp file then rename over the target
    fn write_atomic<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let target = self.path(name);
        let temp = target.with_extension("json.tmp");
        {
            let mut file = File::create(&temp)?;
            file.write_all(serde_json::to_string_pretty(value)?.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp, &target)?;
        Ok(())
    }
}

impl RecordSource for JsonStore {
    fn practice_sessions(&self) -> Result<Vec<PracticeSession>> {
        self.read_lines(SESSIONS_FILE)
    }

    fn emotional_notes(&self) -> Result<Vec<EmotionalNote>> {
        self.read_lines(NOTES_FILE)
    }

    fn questionnaire(&self) -> Result<Option<Questionnaire>> {
        self.read_json(QUESTIONNAIRE_FILE)
    }

    fn self_assessment(&self) -> Result<Option<SelfAssessment>> {
        self.read_json(SELF_ASSESSMENT_FILE)
    }

    fn progress_state(&self) -> Result<ProgressState> {
        Ok(self.read_json(STATE_FILE)?.unwrap_or_default())
    }
}
