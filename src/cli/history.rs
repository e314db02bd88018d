//! History CLI command

use crate::audit::AuditLogger;
use crate::error::AllowanceResult;

/// Print the most recent audit entries, oldest first
pub fn handle_history_command(logger: &AuditLogger, count: usize) -> AllowanceResult<()> {
    let entries = logger.read_recent(count)?;

    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
