//! Audit logging
//!
//! Records every committed mutation with before/after values in an
//! append-only JSONL file.
//!
//! - `AuditEntry`: one entry with timestamp, operation, entity information,
//!   and optional before/after values.
//! - `AuditLogger`: appends entries to the log file and reads them back. It
//!   implements `ChangeListener`, so subscribing it to a `Tracker` is all the
//!   wiring needed.
//!
//! # Example
//!
//! ```rust,ignore
//! use allowance::audit::AuditLogger;
//!
//! let mut tracker = Tracker::open(storage)?;
//! tracker.subscribe(Box::new(AuditLogger::new(paths.audit_log())));
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation, BUDGET_ENTITY_ID};
pub use logger::AuditLogger;
