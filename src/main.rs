use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use allowance::audit::AuditLogger;
use allowance::cli::{
    handle_allowance_command, handle_expense_command, handle_history_command,
    handle_reset_command, handle_status_command, AllowanceCommands, ExpenseCommands,
};
use allowance::config::paths::DATA_DIR_ENV;
use allowance::config::{paths::AllowancePaths, settings::Settings};
use allowance::services::Tracker;
use allowance::storage::Storage;

/// Environment variable holding the log filter (e.g. "debug", "allowance=info")
const LOG_ENV: &str = "ALLOWANCE_LOG";

#[derive(Parser)]
#[command(
    name = "allowance",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal allowance tracker",
    long_about = "Allowance keeps a running allowance and a log of what you spend \
                  against it. It shows how much is left, how much went out today and \
                  this month, and keeps everything on your own machine."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard
    Status,

    /// Allowance commands
    #[command(subcommand)]
    Allowance(AllowanceCommands),

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Clear the allowance and every expense
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = AllowancePaths::new()?;
    init_logging(&paths, matches!(cli.command, Some(Commands::Tui)))?;

    let settings = Settings::load_or_create(&paths)?;
    debug!(base = %paths.base_dir().display(), "resolved paths");

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing allowance tracker at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'allowance allowance add <AMOUNT>' to fund your allowance.");
        }
        Some(Commands::Config) => {
            println!("Allowance Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("(override with {})", DATA_DIR_ENV);
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Timezone:         {}", settings.timezone);
            println!("  Default category: {}", settings.default_category);
        }
        Some(Commands::History { count }) => {
            handle_history_command(&AuditLogger::new(paths.audit_log()), count)?;
        }
        command => {
            let mut tracker = open_tracker(&paths, &settings)?;

            match command {
                Some(Commands::Allowance(cmd)) => {
                    handle_allowance_command(&mut tracker, &settings, cmd)?;
                }
                Some(Commands::Expense(cmd)) => {
                    handle_expense_command(&mut tracker, &settings, cmd)?;
                }
                Some(Commands::Reset { yes }) => {
                    let stdin = io::stdin();
                    handle_reset_command(
                        &mut tracker,
                        &settings,
                        yes,
                        &mut stdin.lock(),
                        &mut io::stdout(),
                    )?;
                }
                Some(Commands::Tui) => {
                    allowance::tui::run_tui(tracker, settings)?;
                }
                _ => handle_status_command(&tracker, &settings),
            }
        }
    }

    Ok(())
}

/// Rehydrate the tracker and attach the audit trail
fn open_tracker(paths: &AllowancePaths, settings: &Settings) -> Result<Tracker> {
    let storage = Storage::open(paths)?;
    let mut tracker = Tracker::open(storage)?.with_zone(settings.timezone);
    tracker.subscribe(Box::new(AuditLogger::new(paths.audit_log())));
    Ok(tracker)
}

/// Log to stderr, or to a file while the TUI owns the terminal
fn init_logging(paths: &AllowancePaths, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_file {
        paths.ensure_directories()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths.log_file())?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}
