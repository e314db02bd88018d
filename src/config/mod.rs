//! Configuration module for the allowance tracker
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Timezone selection for day/month boundaries

pub mod paths;
pub mod settings;
pub mod timezone;

pub use paths::AllowancePaths;
pub use settings::Settings;
pub use timezone::DisplayZone;
