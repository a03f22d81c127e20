//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the player crates:
//! - Logging and tracing infrastructure
//! - Player configuration
//! - Current-value snapshot bus
//!
//! ## Overview
//!
//! Nothing in here knows about audio. The playback core builds on these
//! pieces to publish its state and to report what it is doing.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
