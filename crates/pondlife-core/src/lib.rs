//! Rule engine, event detection, and tick orchestration for the Pondlife
//! simulation.
//!
//! A pond is nine bounded quantities advanced by a fixed, deterministic
//! update order. Each committed snapshot is checked against configured
//! thresholds to raise narrative events and to pick a presentation theme.
//!
//! # Modules
//!
//! - [`rules`] -- Initial snapshot, transition function, runoff, and the
//!   health score.
//! - [`engine`] -- [`SimulationEngine`], the single owner of the live
//!   snapshot and remediation flags.
//! - [`condition`] -- Threshold bounds compiled from `<field>Min` /
//!   `<field>Max` keys.
//! - [`events`] -- Event triggers, cooldowns, and detection.
//! - [`theme`] -- Healthy / polluted / collapsed classification.
//! - [`catalogue`] -- Localized event text loaded from JSON.
//! - [`config`] -- Configuration loading from `pondlife-config.yaml`.
//! - [`session`] -- [`PondSession`], stage progression and history.
//! - [`control`] -- Commands delivered to a running session.
//! - [`runner`] -- The async real-time loop.
//!
//! [`SimulationEngine`]: engine::SimulationEngine
//! [`PondSession`]: session::PondSession

pub mod catalogue;
pub mod condition;
pub mod config;
pub mod control;
pub mod engine;
pub mod events;
pub mod rules;
pub mod runner;
pub mod session;
pub mod theme;
