//! Progress and access-control engine for a mindfulness practice tracker.
//!
//! Turns raw practice records (sessions, emotional notes, an onboarding
//! questionnaire, a sense-attachment self-assessment) into a composite
//! well-being score with an eight-component breakdown, a PAHM developmental
//! stage and the unlock state of the T-level and PAHM-stage ladders.

pub mod access;
pub mod aggregate;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod invariants;
pub mod levels;
pub mod normalize;
pub mod pahm;
pub mod questionnaire;
pub mod records;
pub mod store;
pub mod streak;
pub mod sufficiency;
pub mod tracker;

pub use access::{AccessDecision, MissingKind};
pub use aggregate::UserLevel;
pub use components::{Component, ComponentBreakdown};
pub use config::{EngineSettings, PahmConfig};
pub use engine::{evaluate, ProgressEngine, ProgressListener, UserProgress};
pub use error::{PahmError, Result};
pub use levels::{PahmStage, TLevel};
pub use pahm::{DevelopmentStage, PahmAnalysis};
pub use records::{
    AttachmentLevel, EmotionalNote, PracticeSession, Questionnaire, RecordSnapshot, SelfAssessment,
    SenseCategory, SessionKind,
};
pub use store::{JsonStore, MemoryStore, RecordSource};
pub use streak::StreakStats;
pub use sufficiency::DataCompleteness;
pub use tracker::{ProgressState, StageProgress};
