//! Shared type definitions for the Pondlife simulation.
//!
//! This crate is the single source of truth for the data that crosses
//! between the simulation core and its presentation layer. Types flow
//! downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`enums`] -- Field tags, event keys, severities, themes, stages, speeds
//! - [`structs`] -- The biome snapshot, remediation flags, and event items

pub mod enums;
pub mod structs;

pub use enums::{BiomeField, EventKey, GameStage, Severity, SpeedMode, Theme};
pub use structs::{BiomeState, EngineFlags, EventItem, FIELD_MAX, FIELD_MIN, clamp_field};
