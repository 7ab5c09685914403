//! pahmctl library - CLI surface exposed for tests

pub mod commands;
pub mod display;

use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use pahm_core::{PahmStage, SessionKind, TLevel};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pahmctl")]
#[command(about = "PAHM practice tracker - progress, streaks and level access", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory holding the record files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <data-dir>/pahm.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the full progress snapshot
    Progress,

    /// Show the current and best practice streak
    Streak,

    /// Show T-level completion
    Levels,

    /// Show PAHM stages and the current accessible stage
    Stage,

    /// Check whether a level or stage may be entered
    Access {
        #[command(subcommand)]
        target: LevelTarget,
    },

    /// Record a practice session
    LogSession {
        /// Session length in minutes
        #[arg(long, value_parser = parse_non_negative)]
        minutes: f64,

        /// Quality rating (1-5)
        #[arg(long, value_parser = parse_rating)]
        rating: Option<f64>,

        /// Level label, e.g. "t1"
        #[arg(long)]
        level: Option<String>,

        #[arg(long, value_enum, default_value_t = KindArg::Meditation)]
        kind: KindArg,

        /// Timestamp (RFC 3339), default now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Record an emotional note (each value 1-10)
    LogNote {
        #[arg(long, value_parser = parse_note_value)]
        mood: f64,

        #[arg(long, value_parser = parse_note_value)]
        energy: f64,

        #[arg(long, value_parser = parse_note_value)]
        stress: f64,

        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Mark a level or stage complete
    Complete {
        #[command(subcommand)]
        target: LevelTarget,
    },

    /// Add practice hours to a PAHM stage
    Hours {
        #[arg(value_parser = parse_pahm_stage)]
        stage: PahmStage,

        #[arg(value_parser = parse_non_negative)]
        hours: f64,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelTarget {
    /// A T-level (T1-T5)
    T {
        #[arg(value_parser = parse_t_level)]
        level: TLevel,
    },
    /// A PAHM stage (1-6)
    Pahm {
        #[arg(value_parser = parse_pahm_stage)]
        stage: PahmStage,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Meditation,
    MindRecovery,
}

impl From<KindArg> for SessionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Meditation => SessionKind::Meditation,
            KindArg::MindRecovery => SessionKind::MindRecovery,
        }
    }
}

fn parse_t_level(s: &str) -> Result<TLevel, String> {
    s.parse::<TLevel>().map_err(|e| e.to_string())
}

fn parse_pahm_stage(s: &str) -> Result<PahmStage, String> {
    let n: u8 = s.parse().map_err(|_| format!("not a stage number: {}", s))?;
    PahmStage::new(n).map_err(|e| e.to_string())
}

fn parse_finite(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("not a number: {}", s)),
    }
}

fn parse_non_negative(s: &str) -> Result<f64, String> {
    let v = parse_finite(s)?;
    if v < 0.0 {
        return Err("must not be negative".to_string());
    }
    Ok(v)
}

fn parse_in_range(s: &str, min: f64, max: f64) -> Result<f64, String> {
    let v = parse_finite(s)?;
    if !(min..=max).contains(&v) {
        return Err(format!("must be between {} and {}", min, max));
    }
    Ok(v)
}

fn parse_rating(s: &str) -> Result<f64, String> {
    parse_in_range(s, 1.0, 5.0)
}

fn parse_note_value(s: &str) -> Result<f64, String> {
    parse_in_range(s, 1.0, 10.0)
}
