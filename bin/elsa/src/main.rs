use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use log::{debug, LevelFilter};

use elsa::cli::{Cli, Mode};
use elsa::{
    default_rc_files, edit_registry, Config, Controller, Edit, Registry, Result, SettleIntervals,
    ADDRESSES_VARIABLE,
};

#[tokio::main]
async fn main() -> ExitCode {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mode = cli.mode();
    debug!("running {mode:?}");

    match mode {
        Mode::Add(address) => update_registry(cli, Edit::Add, &address),
        Mode::Remove(address) => update_registry(cli, Edit::Remove, &address),
        Mode::List => {
            let (config, client) = connect()?;
            let controller = Controller::new(&client, &config.addresses, SettleIntervals::default());

            controller.list(&mut io::stdout().lock()).await?;
            Ok(())
        }
        Mode::Control { nickname, action } => {
            let (config, client) = connect()?;
            let controller = Controller::new(&client, &config.addresses, SettleIntervals::default());

            controller
                .control(&nickname, action, &mut io::stdout().lock())
                .await?;
            Ok(())
        }
        Mode::Help => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Reads the configuration before any device is contacted.
fn connect() -> Result<(Config, tapo::Client)> {
    let config = Config::from_env()?;
    let client = tapo::Client::new(&config.username, &config.password)?;

    Ok((config, client))
}

fn update_registry(cli: Cli, edit: Edit, address: &str) -> Result<()> {
    let paths = if cli.rc_files.is_empty() {
        default_rc_files()?
    } else {
        cli.rc_files
    };

    let registry = Registry::new(ADDRESSES_VARIABLE, paths);

    edit_registry(
        &registry,
        edit,
        address,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}
