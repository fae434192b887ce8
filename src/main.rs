use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod commands;
mod domain;
mod services;

use cli::{Cli, Commands};
use commands::{handle_runtime_commands, handle_whitelist_commands, Menu, Session};
use domain::models::{InputError, SessionError};
use services::config::{resolve, RuntimeConfig};
use services::output::print_error;
use services::storage::audit_path;
use services::transport::AdbTransport;
use services::whitelist::WhitelistStore;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        print_error(cli.json, error_code(&err), format!("{:#}", err));
        std::process::exit(1);
    }
}

fn error_code(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<SessionError>().is_some() {
        "NO_DEVICE"
    } else if err.downcast_ref::<InputError>().is_some() {
        "INVALID_INPUT"
    } else {
        "ERROR"
    }
}

/// `RUST_LOG` wins over the configured level. Events go to stderr so stdout
/// stays parseable in `--json` mode.
fn init_logging(config: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = resolve(cli)?;
    init_logging(&config);

    let mut transport = AdbTransport::new(config.adb.clone());
    let store = WhitelistStore::new(config.whitelist_path.clone());
    let audit_log = audit_path().ok();

    match &cli.command {
        Some(Commands::Whitelist { command }) => handle_whitelist_commands(
            cli.json,
            command,
            &store,
            &mut transport,
            audit_log.as_deref(),
        ),
        Some(Commands::Menu) | None => {
            let mut session = Session::connect(&mut transport, store, audit_log)?;
            println!("Connected to: {}", session.identity);
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            Menu::new(&mut session, &mut input, &mut out).run()
        }
        Some(command) => {
            let mut session = Session::connect(&mut transport, store, audit_log)?;
            handle_runtime_commands(cli.json, command, &mut session)
        }
    }
}
