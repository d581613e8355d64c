// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use runtime::{OfficeRuntime, RuntimeOptions, SystemClipboard};
use staffdesk_app::{AppState, ChatVisibility};
use staffdesk_store::Office;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `staffdesk --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    if options.print_log_path {
        println!("{}", config.log_path()?.display());
        return Ok(());
    }

    let reply_delay = config.chat_reply_delay()?;
    if options.check_only {
        logging::validate(&config)?;
        return Ok(());
    }

    let log_path = logging::init(&config)?;
    let office = if options.no_seed {
        Office::empty()
    } else {
        Office::seeded()
    };
    tracing::info!(
        config = %options.config_path.display(),
        log = ?log_path,
        seeded = !options.no_seed,
        "staffdesk starting"
    );

    let mut state = AppState {
        active_tab: config.start_tab(),
        ..AppState::default()
    };
    if config.start_minimized() {
        state.chat = ChatVisibility::Minimized;
    }

    let mut runtime = OfficeRuntime::new(
        office,
        RuntimeOptions {
            wallet_address: config.wallet_address().to_owned(),
            page_size: config.page_size(),
            reply_delay,
        },
        SystemClipboard::default(),
    );
    let result = staffdesk_tui::run_app(&mut state, &mut runtime);
    match &result {
        Ok(()) => tracing::info!("staffdesk exited"),
        Err(error) => tracing::error!(error = %format!("{error:#}"), "staffdesk exited with error"),
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_log_path: bool,
    print_example: bool,
    no_seed: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_log_path: false,
        print_example: false,
        no_seed: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-log-path" => {
                options.print_log_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--empty" => {
                options.no_seed = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("staffdesk: congressional staff dashboard");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-log-path         Print resolved log file path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --empty                  Start with no sample records");
    println!("  --check                  Validate config and exit");
    println!("  --help                   Show this help");
}
