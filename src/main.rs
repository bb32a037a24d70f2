mod form;
mod predict;
mod session;
#[cfg(test)]
mod testing;
mod web;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::form::{Field, FieldError};
use crate::session::{Session, SessionError};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "moid-predict")]
#[command(about = "Asteroid hazard prediction form")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the prediction form and JSON API
    Serve,
    /// Run a single prediction from the command line
    Predict {
        /// Override a form field, e.g. --set diameter=0.8
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// List form fields and their default values
    Fields,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Predict { set } => predict_once(config, &set).await,
        Commands::Fields => fields(),
    }
}

async fn serve(config: Config) -> ExitCode {
    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn predict_once(config: Config, overrides: &[String]) -> ExitCode {
    let session = match config.build_session() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error building client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for item in overrides {
        if let Err(e) = apply_override(&session, item) {
            eprintln!("Invalid override {:?}: {}", item, e);
            return ExitCode::FAILURE;
        }
    }

    let mut events = session.subscribe();
    match session.submit().await {
        Ok(result) => {
            println!("Predicted MOID:   {}", result.moid_display());
            println!("Risk:             {}", result.risk);
            println!("Risk label:       {}", result.risk_label);
            if let Some(probability) = result.probability_display() {
                println!("Risk probability: {}", probability);
            }
            ExitCode::SUCCESS
        }
        Err(SessionError::Predict(e)) => {
            if let Ok(note) = events.try_recv() {
                eprintln!("{}", note.message);
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn apply_override(session: &Session, item: &str) -> Result<(), FieldError> {
    let (name, raw) = item
        .split_once('=')
        .ok_or_else(|| FieldError::Unknown(item.to_string()))?;
    let field: Field = name.trim().parse()?;

    match session.set_field(field, raw) {
        Ok(_) => Ok(()),
        Err(e @ FieldError::Parse { .. }) => {
            log::warn!("Keeping previous value: {}", e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn fields() -> ExitCode {
    let defaults = form::AsteroidParameters::default();
    for field in Field::ALL {
        println!(
            "  {:<20} {:<26} {}",
            field.name(),
            field.label(),
            defaults.get(field)
        );
    }
    ExitCode::SUCCESS
}
