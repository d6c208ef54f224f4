//! CLI commands for viewing and changing settings

use clap::Subcommand;
use log::info;

use crate::config::settings::is_valid_date_format;
use crate::config::{GstrPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Precision, RangePolicy};

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Change one or more settings
    Set {
        /// Decimal places of distributed parts: 0 or 2
        #[arg(long)]
        precision: Option<Precision>,

        /// leading (use the first 30 days) or exact (require exactly 30 days)
        #[arg(long)]
        range_policy: Option<RangePolicy>,

        /// Currency symbol for terminal output
        #[arg(long)]
        currency: Option<String>,

        /// Date format for terminal output (strftime, e.g. %d/%m/%Y)
        #[arg(long)]
        date_format: Option<String>,

        /// Whether runs are recorded in the journal (true or false)
        #[arg(long, action = clap::ArgAction::Set)]
        journal: Option<bool>,
    },
}

/// Handle config commands; no subcommand shows the configuration
pub fn handle_config_command(
    paths: &GstrPaths,
    settings: &Settings,
    cmd: Option<ConfigCommands>,
) -> LedgerResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            print!("{}", format_config(paths, settings));
            Ok(())
        }
        ConfigCommands::Set {
            precision,
            range_policy,
            currency,
            date_format,
            journal,
        } => {
            let mut updated = settings.clone();

            if let Some(precision) = precision {
                updated.precision = precision;
            }
            if let Some(range_policy) = range_policy {
                updated.range_policy = range_policy;
            }
            if let Some(currency) = currency {
                updated.currency_symbol = currency;
            }
            if let Some(format) = date_format {
                if !is_valid_date_format(&format) {
                    return Err(LedgerError::Config(format!("Invalid date format: {}", format)));
                }
                updated.display_date_format = format;
            }
            if let Some(journal) = journal {
                updated.journal_enabled = journal;
            }

            if &updated == settings {
                println!("Nothing to change.");
                return Ok(());
            }

            updated.save(paths)?;
            info!("settings saved to {}", paths.settings_file().display());
            println!("Settings saved.");
            print!("{}", format_config(paths, &updated));
            Ok(())
        }
    }
}

fn format_config(paths: &GstrPaths, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str("gstr-ledger Configuration\n");
    output.push_str("=========================\n");
    output.push_str(&format!("Config directory: {}\n", paths.base_dir().display()));
    output.push_str(&format!("Settings file:    {}\n", paths.settings_file().display()));
    output.push_str(&format!("Journal file:     {}\n", paths.journal_file().display()));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!("  Precision:       {}\n", settings.precision));
    output.push_str(&format!("  Range policy:    {}\n", settings.range_policy));
    output.push_str(&format!("  Currency symbol: {}\n", settings.currency_symbol));
    output.push_str(&format!("  Date format:     {}\n", settings.display_date_format));
    output.push_str(&format!(
        "  Journal:         {}\n",
        if settings.journal_enabled { "enabled" } else { "disabled" }
    ));
    output
}
