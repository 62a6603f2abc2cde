mod cli;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::time::Instant;

use anyhow::{anyhow, Context};
use clap::{CommandFactory, Parser};
use cli::commands::{Cli, Commands};
use cli::progress::CliReporter;
use cli::render;
use colored::*;
use dotenv::dotenv;
use evidence_checker::{export, AppConfig, Session};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let guard = cli::logging::init_logger();

    let config = match evidence_checker::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let result = match args.command {
        Some(Commands::Check { folder, json }) => run_check(&config, &folder, json),
        Some(Commands::Inspect { folder, id }) => run_inspect(&config, &folder, &id),
        Some(Commands::Export { folder, output }) => run_export(&config, &folder, &output),
        Some(Commands::Watch { folder }) => run_watch(&config, &folder),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("Error: {:#}", err);
        // flush the file appender before exiting
        drop(guard);
        process::exit(1);
    }

    Ok(())
}

/// Select the folder and run the refresh it schedules.
fn load_session(config: &AppConfig, folder: &Path) -> anyhow::Result<Session> {
    let mut session = Session::new(config.clone());
    if !session.select_project(folder, Instant::now()) {
        return Err(anyhow!(session
            .message()
            .unwrap_or("Project folder could not be used")
            .to_string()));
    }

    if let Some(result) = session.run_pending_refresh(&CliReporter::new()) {
        result?;
    }

    Ok(session)
}

fn run_check(config: &AppConfig, folder: &Path, json: bool) -> anyhow::Result<()> {
    let session = load_session(config, folder)?;

    if json {
        println!("{}", export::to_json(session.inspections())?);
        return Ok(());
    }

    print!("{}", render::grid(session.inspections(), config.cards_per_row));
    println!();
    info!("{}", render::summary(session.inspections()));
    Ok(())
}

fn run_inspect(config: &AppConfig, folder: &Path, id: &str) -> anyhow::Result<()> {
    let session = load_session(config, folder)?;
    let (Some(inspection), Some(project)) = (session.inspection(id), session.project()) else {
        return Err(anyhow!("No record with ID {}", id.to_uppercase()));
    };

    print!("{}", render::detail(inspection, &project.evidence_root));
    Ok(())
}

fn run_export(config: &AppConfig, folder: &Path, output: &Path) -> anyhow::Result<()> {
    let session = load_session(config, folder)?;

    let file = File::create(output)
        .with_context(|| format!("Cannot create {}", output.display()))?;
    export::write_csv(file, session.inspections())?;

    info!(
        "Wrote {} inspections to {}",
        format!("{}", session.inspections().len()).green(),
        output.display()
    );
    Ok(())
}

/// Interactive loop: `refresh` reloads (guarded and cooled down), a single
/// letter shows that identifier, `quit` or end of input stops.
fn run_watch(config: &AppConfig, folder: &Path) -> anyhow::Result<()> {
    let reporter = CliReporter::new();
    let mut session = Session::new(config.clone());
    if !session.select_project(folder, Instant::now()) {
        return Err(anyhow!(session.message().unwrap_or_default().to_string()));
    }

    let mut input = String::new();

    loop {
        // a refresh requested on the previous tick runs now, after "Loading..." was shown
        if let Some(result) = session.run_pending_refresh(&reporter) {
            match result {
                Ok(_) => {
                    print!("{}", render::grid(session.inspections(), config.cards_per_row));
                    println!("{}", render::summary(session.inspections()));
                }
                Err(err) => println!("{}", err.to_string().red()),
            }
        }

        print!("[refresh | <ID> | quit]: ");
        io::stdout().flush()?;

        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "" => continue,
            "quit" => break,
            "refresh" => {
                if session.request_refresh(Instant::now()) {
                    println!("Loading...");
                } else {
                    println!("{}", "Refresh is not available yet.".yellow());
                }
            }
            id => match (session.inspection(id), session.project()) {
                (Some(inspection), Some(project)) => {
                    print!("{}", render::detail(inspection, &project.evidence_root));
                }
                _ => println!("No record with ID {}", id.to_uppercase()),
            },
        }
    }

    Ok(())
}
