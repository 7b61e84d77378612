//! TableFinder CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use tf_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use tf_cli::commands::{
    AppContext, run_add_guest, run_cleanup, run_columns, run_create, run_delete, run_edit,
    run_export, run_lookup, run_recovery, run_remove_guest, run_replace, run_show,
    run_update_guest,
};
use tf_cli::logging::{LogConfig, LogFormat, init_logging};
use tf_cli::settings::Settings;
use tf_cli::summary::{
    print_cleanup, print_columns, print_created, print_guest_list, print_lookup, print_meta,
    print_show,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Command::Columns(args) = &cli.command {
        print_columns(&run_columns(args)?);
        return Ok(());
    }

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let ctx = AppContext::open(settings, cli.store, cli.base_url)?;

    match cli.command {
        Command::Create(args) => print_created(&run_create(&ctx, &args)?),
        Command::Columns(_) => {}
        Command::Lookup(args) => print_lookup(&run_lookup(&ctx, &args)?),
        Command::Show(args) => print_show(&run_show(&ctx, &args)?),
        Command::Edit(args) => print_meta(&run_edit(&ctx, &args)?),
        Command::Replace(args) => print_guest_list(&run_replace(&ctx, &args)?),
        Command::AddGuest(args) => print_guest_list(&run_add_guest(&ctx, &args)?),
        Command::UpdateGuest(args) => print_guest_list(&run_update_guest(&ctx, &args)?),
        Command::RemoveGuest(args) => print_guest_list(&run_remove_guest(&ctx, &args)?),
        Command::Export(args) => {
            let path = run_export(&ctx, &args)?;
            println!("Guest list written to {}", path.display());
        }
        Command::Recovery(args) => {
            let path = run_recovery(&ctx, &args)?;
            println!("Admin recovery file written to {}", path.display());
        }
        Command::Delete(args) => {
            let objects = run_delete(&ctx, &args)?;
            println!("Deleted event {} ({objects} objects)", args.admin.event);
        }
        Command::Cleanup(args) => {
            let (today, report) = run_cleanup(&ctx, &args)?;
            print_cleanup(today, &report, args.dry_run);
        }
    }
    Ok(())
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
