//! Allowance - terminal-based personal allowance tracker
//!
//! This library provides the core functionality for the allowance tracker:
//! a running allowance, a log of expenses against it, and the spend totals
//! derived from that log. State is persisted as JSON documents under the
//! user's config directory and survives across sessions.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings, and the display timezone
//! - `error`: Custom error types
//! - `models`: Core data models (money, budget record, expenses)
//! - `storage`: Key-value persistence with a file-backed implementation
//! - `services`: The tracker (mutations) and spend aggregation
//! - `display`: Formatting for terminal output
//! - `audit`: Audit logging system
//! - `cli`: Command handlers for the binary
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use allowance::config::{paths::AllowancePaths, settings::Settings};
//! use allowance::services::Tracker;
//! use allowance::storage::Storage;
//!
//! let paths = AllowancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let tracker = Tracker::open(Storage::open(&paths)?)?.with_zone(settings.timezone);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::AllowanceError;
