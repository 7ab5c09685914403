//! Command implementations for pahmctl

use crate::display;
use crate::{Cli, Commands, LevelTarget};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use pahm_core::config::{config_path, default_data_dir};
use pahm_core::tracker::PahmStageProgress;
use pahm_core::{
    EmotionalNote, JsonStore, PahmConfig, PahmStage, PracticeSession, ProgressEngine, TLevel,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Load the config named on the command line, or the one in the data dir
pub fn load_config(cli: &Cli) -> Result<PahmConfig> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => config_path(&cli.data_dir.clone().unwrap_or_else(default_data_dir)),
    };
    PahmConfig::load_or_default(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}

/// Data directory: flag first, then config, then the platform default
pub fn resolve_data_dir(cli: &Cli, config: &PahmConfig) -> PathBuf {
    cli.data_dir
        .clone()
        .unwrap_or_else(|| config.store.effective_data_dir())
}

struct Output {
    json: bool,
}

impl Output {
    fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct StageReport {
    current: PahmStage,
    display_name: &'static str,
    all_t_levels_complete: bool,
    stages: Vec<PahmStageProgress>,
}

#[derive(Serialize)]
struct AccessReport {
    target: String,
    #[serde(flatten)]
    decision: pahm_core::AccessDecision,
}

pub fn run(cli: Cli, config: PahmConfig) -> Result<()> {
    let data_dir = resolve_data_dir(&cli, &config);
    debug!(dir = %data_dir.display(), "using data directory");
    let store = JsonStore::new(&data_dir);
    let engine = ProgressEngine::new(store.clone(), config.engine.clone());
    let out = Output { json: cli.json };

    match cli.command {
        Commands::Progress => out.emit(&engine.compute_progress(), display::print_progress),

        Commands::Streak => out.emit(&engine.streak_stats()?, display::print_streak),

        Commands::Levels => out.emit(&engine.stage_progress()?, display::print_levels),

        Commands::Stage => {
            let progress = engine.stage_progress()?;
            let current = pahm_core::access::current_accessible_stage(&progress);
            let report = StageReport {
                current,
                display_name: current.display_name(),
                all_t_levels_complete: progress.all_t_levels_complete(),
                stages: progress.pahm_stages.clone(),
            };
            out.emit(&report, |_| display::print_stage(current, &progress))
        }

        Commands::Access { target } => {
            let (label, decision) = match target {
                LevelTarget::T { level } => (level.to_string(), engine.check_t_level_access(level)?),
                LevelTarget::Pahm { stage } => {
                    (stage.to_string(), engine.check_pahm_stage_access(stage)?)
                }
            };
            let report = AccessReport {
                target: label,
                decision,
            };
            out.emit(&report, |r| display::print_access(&r.target, &r.decision))
        }

        Commands::LogSession {
            minutes,
            rating,
            level,
            kind,
            at,
        } => {
            let mut session = PracticeSession::new(at.unwrap_or_else(Utc::now))
                .with_duration(minutes)
                .with_kind(kind.into());
            if let Some(rating) = rating {
                session = session.with_rating(rating);
            }
            if let Some(level) = level {
                if TLevel::from_label(&level).is_none() {
                    bail!("unrecognized level label: {}", level);
                }
                session = session.with_level(&level);
            }
            store.append_session(&session).context("failed to record session")?;
            info!(minutes, kind = %session.kind, "session logged");
            out.emit(&session, |s| {
                display::print_ok(&format!("Logged {:.0} min {} session", minutes, s.kind))
            })
        }

        Commands::LogNote {
            mood,
            energy,
            stress,
            at,
        } => {
            let note = EmotionalNote::new(at.unwrap_or_else(Utc::now))
                .with_mood(mood)
                .with_energy(energy)
                .with_stress(stress);
            store.append_note(&note).context("failed to record note")?;
            out.emit(&note, |_| display::print_ok("Logged emotional note"))
        }

        Commands::Complete { target } => {
            if matches!(target, LevelTarget::Pahm { stage } if stage.is_baseline()) {
                bail!("the baseline stage has nothing to complete");
            }
            let decision = match target {
                LevelTarget::T { level } => engine.check_t_level_access(level)?,
                LevelTarget::Pahm { stage } => engine.check_pahm_stage_access(stage)?,
            };
            if !decision.allowed {
                bail!(
                    "level is locked: {}",
                    decision.requirement_message.unwrap_or_default()
                );
            }

            let label = match target {
                LevelTarget::T { level } => level.to_string(),
                LevelTarget::Pahm { stage } => stage.to_string(),
            };
            let state = store
                .update_progress_state(|state| match target {
                    LevelTarget::T { level } => state.mark_t_level_complete(level),
                    LevelTarget::Pahm { stage } => state.mark_pahm_stage_complete(stage),
                })
                .context("failed to save progress state")?;
            info!(level = %label, "marked complete");
            out.emit(&state, |_| display::print_ok(&format!("{} marked complete", label)))
        }

        Commands::Hours { stage, hours } => {
            if stage.is_baseline() {
                bail!("the baseline stage does not track hours");
            }
            let decision = engine.check_pahm_stage_access(stage)?;
            if !decision.allowed {
                bail!(
                    "stage is locked: {}",
                    decision.requirement_message.unwrap_or_default()
                );
            }
            let state = store
                .update_progress_state(|state| state.add_pahm_hours(stage, hours))
                .context("failed to save progress state")?;
            let recorded = state.pahm_stage(stage);
            out.emit(&recorded, |r| {
                display::print_ok(&format!(
                    "{}: {:.1} hours{}",
                    stage,
                    r.accumulated_hours,
                    if r.completed { ", complete" } else { "" }
                ))
            })
        }
    }
}
