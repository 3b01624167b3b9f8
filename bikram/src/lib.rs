//! # bikram
//!
//! Bikram Sambat (BS) ⇄ Gregorian (AD) date conversion.
//!
//! This crate is a **façade**: it re-exports the workspace crates and adds
//! the [`Engine`], the single entry point page renderers and interactive
//! widgets call so that every caller gets byte-identical answers.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! bikram = "0.1"
//! ```
//!
//! ```rust
//! use bikram::data::{Loader, MemorySource};
//! use bikram::Engine;
//!
//! let engine = Engine::new(Loader::new(MemorySource::new()));
//! assert_eq!(engine.convert_bs_to_ad("2081-01-02").as_deref(), Some("2024-04-14"));
//! assert_eq!(engine.convert_ad_to_bs("2024-04-14").as_deref(), Some("2081-01-02"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, configuration, and error definitions.
pub use bs_core as core;

/// AD and BS date types.
pub use bs_time as time;

/// Month-length table, date index, and converter.
pub use bs_calendar as calendar;

/// Dataset sources, parsing, and the loader.
pub use bs_data as data;

/// The conversion engine.
pub mod engine;

/// Subscriber setup for binaries and tests.
pub mod logging;

pub use engine::{CalendarInfo, Engine, ValidationReport};
