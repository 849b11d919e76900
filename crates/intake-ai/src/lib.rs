//! Core library for the financial-assistance intake application.
//!
//! The crate orchestrates the multi-step intake form: per-step validation with
//! localized error resolution, draft persistence to a local key-value store,
//! the stepper state machine gating navigation and submission, and the
//! AI-assisted drafting pipeline with its deterministic offline fallback.
//! Rendering, routing, and the i18n string tables live outside this crate;
//! only their contracts (`Translator`, focus requests) are consumed here.

pub mod config;
pub mod language;
pub mod storage;
pub mod workflows;
