//! Quotedesk CLI - create, track and export customer quotes.
//!
//! # Usage
//!
//! ```bash
//! # Create a quote (missing fields are prompted for)
//! quotedesk new --customer "Acme" --product "Widget" --quantity 2 --price 10 --tax-rate 10
//!
//! # Live preview without saving
//! quotedesk preview --quantity 2 --price 10 --tax-rate 10
//!
//! # Dashboard with search and status filter
//! quotedesk list --search acme --status unpaid
//!
//! # Mark paid, delete, export
//! quotedesk pay 1709985600000
//! quotedesk delete 1709985600000
//! quotedesk export --out quotes.csv
//! ```
//!
//! # Commands
//!
//! - `new` / `preview` - Quote form and live totals
//! - `list` / `show` - Dashboard and single quote
//! - `pay` / `delete` - Quote lifecycle
//! - `export` - CSV export
//! - `seed` / `clear` - Demo data and reset
//! - `theme` - Light/dark preference

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use quotedesk_core::{AppState, LoadOutcome, OpenOptions, QuoteId, StatusFilter, Theme};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod console;
mod error;
mod render;
mod storage;

use commands::quote::Draft;
use commands::theme::ThemeAction;
use config::{Config, LogFormat};
use console::Console;
use error::CliError;
use storage::FileStorage;

#[derive(Parser)]
#[command(name = "quotedesk")]
#[command(author, version, about = "Quote and billing manager")]
struct Cli {
    /// Storage directory (overrides `QUOTEDESK_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new quote
    New {
        /// Customer name
        #[arg(long)]
        customer: Option<String>,

        /// Product or service name
        #[arg(long)]
        product: Option<String>,

        /// Quantity
        #[arg(long)]
        quantity: Option<String>,

        /// Price per unit
        #[arg(long)]
        price: Option<String>,

        /// Tax rate in percent
        #[arg(long)]
        tax_rate: Option<String>,

        /// Never prompt; missing fields fail validation
        #[arg(long)]
        no_input: bool,
    },
    /// Show totals for the given inputs without saving
    Preview {
        #[arg(long, default_value = "")]
        quantity: String,

        #[arg(long, default_value = "")]
        price: String,

        #[arg(long, default_value = "0")]
        tax_rate: String,
    },
    /// Dashboard: figures and filtered quotes
    List {
        /// Case-insensitive match on customer or product
        #[arg(short, long, default_value = "")]
        search: String,

        /// `all`, `paid` or `unpaid`
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show a single quote
    Show { id: QuoteId },
    /// Mark a quote as paid
    Pay { id: QuoteId },
    /// Delete a quote
    Delete {
        id: QuoteId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Export all quotes as CSV
    Export {
        /// Output file (default: quotes-YYYY-MM-DD.csv)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Replace all quotes with demo data
    Seed {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete all quotes
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },
}

#[derive(Subcommand)]
enum ThemeCommand {
    /// Print the current theme
    Show,
    /// Set the theme (`light` or `dark`)
    Set { theme: Theme },
    /// Switch between light and dark
    Toggle,
}

impl From<Option<ThemeCommand>> for ThemeAction {
    fn from(command: Option<ThemeCommand>) -> Self {
        match command {
            None | Some(ThemeCommand::Show) => Self::Show,
            Some(ThemeCommand::Set { theme }) => Self::Set(theme),
            Some(ThemeCommand::Toggle) => Self::Toggle,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Text);
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr so command output on stdout stays clean.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quotedesk_cli=info,quotedesk_core=info".into());

    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli, config: Config) -> Result<(), CliError> {
    let mut console = Console::stdio();

    if let Commands::Preview {
        quantity,
        price,
        tax_rate,
    } = &cli.command
    {
        return commands::quote::preview(&mut console, quantity, price, tax_rate);
    }

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let storage = FileStorage::open(&data_dir)?;
    let options = OpenOptions {
        seed_on_first_run: config.seed_on_first_run,
        now: Utc::now(),
    };
    let (mut state, outcome) = AppState::open(storage, options)?;

    if let LoadOutcome::Corrupt { reason, backed_up } = &outcome {
        let kept = if *backed_up {
            format!("A copy was kept in {}.", state.storage().dir().display())
        } else {
            "No copy could be kept; the next change will replace them.".to_owned()
        };
        console.notice(format!(
            "Saved quotes could not be read ({reason}); starting empty. {kept}"
        ))?;
    }

    match cli.command {
        Commands::New {
            customer,
            product,
            quantity,
            price,
            tax_rate,
            no_input,
        } => {
            let draft = Draft {
                customer_name: customer,
                product_name: product,
                quantity,
                price_per_unit: price,
                tax_rate,
            };
            commands::quote::create(
                &mut state,
                &mut console,
                draft,
                !no_input,
                config.submit_delay,
            )
            .await?;
        }
        // Answered above without opening storage.
        Commands::Preview { .. } => {}
        Commands::List {
            search,
            status,
            json,
        } => commands::dashboard::list(&mut state, &mut console, &search, status, json)?,
        Commands::Show { id } => commands::quote::show(&state, &mut console, id)?,
        Commands::Pay { id } => commands::quote::pay(&mut state, &mut console, id)?,
        Commands::Delete { id, yes } => {
            commands::quote::delete(&mut state, &mut console, id, yes)?;
        }
        Commands::Export { out } => {
            commands::export::run(&state, &mut console, out.as_deref())?;
        }
        Commands::Seed { yes } => commands::seed::seed(&mut state, &mut console, yes)?,
        Commands::Clear { yes } => commands::seed::clear(&mut state, &mut console, yes)?,
        Commands::Theme { action } => {
            commands::theme::run(&mut state, &mut console, action.into())?;
        }
    }
    Ok(())
}
