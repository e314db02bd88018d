//! Status CLI command

use chrono::Utc;

use crate::config::settings::Settings;
use crate::display::{format_dashboard, header_date};
use crate::services::Tracker;
use crate::storage::KeyValueStore;

/// Print the dashboard
pub fn handle_status_command<S: KeyValueStore>(tracker: &Tracker<S>, settings: &Settings) {
    let now = Utc::now();
    let summary = tracker.summary_at(&now);

    print!(
        "{}",
        format_dashboard(
            &summary,
            &settings.currency_symbol,
            &header_date(&now, tracker.zone())
        )
    );
}
