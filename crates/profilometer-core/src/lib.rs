//! # Profilometer Core
//!
//! Core types and algorithms for the virtual contact profilometer lab.
//! Provides the workpiece model, procedural surface profiles, roughness
//! statistics, quiz scoring, and the event/listener plumbing used by the
//! rig state machine.

pub mod core;
pub mod data;
pub mod error;
pub mod generator;
pub mod quiz;
pub mod roughness;
pub mod types;
pub mod units;

pub use crate::core::{
    event::{EventDispatcher, RigEvent},
    RigListener, RigListenerHandle,
};

pub use data::{
    Profile, ProfileSample, RigPhase, ScanResult, ScanStep, SurfacePattern, WorkpieceClass,
    WorkpieceInfo, INITIAL_STYLUS_POSITION, REFERENCE_STYLUS_POSITION, SCAN_END_POSITION,
};

pub use error::{Error, ProfileError, QuizError, Result, RigError};

pub use generator::{
    generate_profile, ProfileSource, RandomProfileSource, SeededProfileSource,
    DEFAULT_SAMPLE_COUNT,
};

pub use quiz::{
    score, standard_key, AnswerMap, QuestionOutcome, QuizAnswerKey, QuizAttempt, QuizQuestion,
    QuizScore,
};

pub use roughness::{compute_roughness, Roughness};

pub use units::{format_height, format_micrometres, MeasurementSystem};

pub use types::{
    thread_safe_none, thread_safe_rw, thread_safe_rw_map, ThreadSafeOption, ThreadSafeRw,
    ThreadSafeRwMap,
};
