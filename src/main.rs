use anyhow::Result;
use clap::{Parser, Subcommand};

use gstr_ledger::cli::{
    handle_config_command, handle_distribute_command, handle_journal_command,
    handle_purchase_command, handle_summary_command, ConfigCommands, DistributeArgs, JournalArgs,
    PurchaseCommands, SummaryArgs,
};
use gstr_ledger::config::{GstrPaths, Settings};

#[derive(Parser)]
#[command(
    name = "gstr",
    version,
    about = "GST bookkeeping helpers for small traders",
    long_about = "gstr splits a month's sale total into dated daily entries that sum \
                  exactly to the tax-adjusted amount, checks purchase invoices, and \
                  summarizes monthly purchase, wholesale and retail figures."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a sale amount into 300 dated entries (10 per day over 30 days)
    #[command(alias = "dist")]
    Distribute(DistributeArgs),

    /// Summarize monthly purchase, wholesale and retail amounts from a CSV file
    Summary(SummaryArgs),

    /// Purchase invoice commands
    #[command(subcommand)]
    Purchase(PurchaseCommands),

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Show recent runs
    Journal(JournalArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = GstrPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    log::debug!("using config directory {}", paths.base_dir().display());

    match cli.command {
        Some(Commands::Distribute(args)) => handle_distribute_command(&paths, &settings, args)?,
        Some(Commands::Summary(args)) => handle_summary_command(&paths, &settings, args)?,
        Some(Commands::Purchase(cmd)) => handle_purchase_command(&paths, &settings, cmd)?,
        Some(Commands::Config { command }) => handle_config_command(&paths, &settings, command)?,
        Some(Commands::Journal(args)) => handle_journal_command(&paths, args)?,
        None => {
            println!("gstr - GST bookkeeping helpers");
            println!();
            println!("Run 'gstr --help' for usage information.");
            println!(
                "Run 'gstr distribute --amount 10000 --from 2024-01-01 --to 2024-01-30' \
                 to split a sale."
            );
        }
    }

    Ok(())
}
