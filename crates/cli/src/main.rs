//! Wood & Whimsy CLI - browse the catalog, manage a cart and sign in.
//!
//! # Usage
//!
//! ```bash
//! # List in-stock living room products, cheapest first
//! ww-cli products --category living-room --in-stock --sort price-asc
//!
//! # Product detail with related products
//! ww-cli product 2
//!
//! # Cart
//! ww-cli cart add 2 --quantity 2
//! ww-cli cart show
//! ww-cli checkout --shipping express
//!
//! # Accounts
//! ww-cli auth login -e user@example.com -p password123
//! ww-cli auth whoami
//! ```
//!
//! Cart and session survive between invocations in `STOREFRONT_DATA_DIR`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use wood_whimsy_storefront::config::{LogFormat, StorefrontConfig};
use wood_whimsy_storefront::error::AppError;
use wood_whimsy_storefront::services::advisory::AdvisoryLog;
use wood_whimsy_storefront::state::AppState;

mod commands;

use commands::{CliError, Output};

#[derive(Parser)]
#[command(name = "ww-cli")]
#[command(author, version, about = "Wood & Whimsy storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(commands::catalog::ListArgs),
    /// Show one product and related products
    Product {
        /// Product ID
        id: String,
    },
    /// List categories
    Categories,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Price the cart with a shipping option
    Checkout {
        /// Shipping option (`free`, `standard`, `express`)
        #[arg(short, long, default_value = "free")]
        shipping: String,
    },
    /// Sign in, sign up, sign out
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Initialize tracing with `EnvFilter`, the chosen format, and Sentry.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wood_whimsy_storefront=info,ww_cli=info".into());

    let fmt_layer = match format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration is needed before tracing, so report failures directly
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);

    let mut out = Output::stdout();
    match run(cli, config, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    cli: Cli,
    config: StorefrontConfig,
    out: &mut Output<impl std::io::Write>,
) -> Result<(), CliError> {
    let state = AppState::from_config(config)?;
    let advisories = AdvisoryLog::new();
    let mut session = state.open_session(&advisories);
    session
        .auth
        .ensure_demo_accounts()
        .map_err(AppError::from)?;

    let result = match cli.command {
        Commands::Products(args) => commands::catalog::list(&state, &args, out),
        Commands::Product { id } => commands::catalog::show(&state, &id, out),
        Commands::Categories => commands::catalog::categories(&state, out),
        Commands::Cart { action } => commands::cart::run(&mut session, action, out),
        Commands::Checkout { shipping } => commands::cart::checkout(&session, &shipping, out),
        Commands::Auth { action } => commands::auth::run(&session, action, out).await,
    };

    out.advisories(&advisories.drain())?;
    result
}
