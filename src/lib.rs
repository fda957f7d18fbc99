//! # Wakearc Library
//!
//! Timeline arc engine: the interaction core behind a circular daily
//! schedule view, mapping clock times onto a bounded arc and back.
//!
//! ## Architecture
//!
//! The library is organized into several layers:
//!
//! - **Entry Point**: `ArcEngine` struct ties the store, clock, and gesture
//!   machinery together behind one surface
//! - **Geometry**: `geometry` module for the time-to-angle mapping, range
//!   validation, and nap overlap detection
//! - **Interaction**: `drag` module with the gesture state machine and its
//!   session/feedback types
//! - **Rendering**: `render` module resolving stacking order for
//!   simultaneously visible entries
//! - **Schedule Model**: `schedule` module with the entry types and the
//!   store abstraction the engine works against
//! - **Configuration**: `config` module for TOML-based settings
//! - **Infrastructure**: injectable clock (`time`), logging, and shared
//!   constants

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Public API modules
pub mod common;
pub mod config;
pub mod drag;
pub mod engine;
pub mod geometry;
pub mod render;
pub mod schedule;
pub mod time;

// Re-export the entry point
pub use engine::ArcEngine;
