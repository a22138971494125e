mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use croprota::models::{validate_inputs, CandidateSpecies};
use croprota::{AdvisoryDocument, Config, Result, RotationEngine};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;

    match cli.command {
        Commands::Init => {
            Config::setup_interactive()?;
        }
        Commands::Advise {
            input,
            year,
            species,
            family,
            nitrogen,
            pretty,
        } => {
            let mut request = AdvisoryDocument::load(&input)?.into_request(year);
            if let Some(species_id) = species {
                request.candidate = Some(CandidateSpecies {
                    species_id,
                    family_id: family,
                    nitrogen_need: nitrogen,
                });
            }

            let config = Config::load(config_path)?;
            let engine = RotationEngine::with_settings(config.rotation);
            let advice = engine.advise(&request)?;

            let json = if pretty {
                serde_json::to_string_pretty(&advice)?
            } else {
                serde_json::to_string(&advice)?
            };
            println!("{}", json);
        }
        Commands::Families { input } => {
            let mut families = AdvisoryDocument::load(&input)?.families;
            families.sort_by(|a, b| a.id.cmp(&b.id));

            for family in &families {
                println!(
                    "{:<24} {:>2} years  {}",
                    family.id,
                    family.min_interval_years,
                    family.color_hint.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Check { input } => {
            Config::load(config_path)?;
            println!("Configuration: OK");
            if let Some(path) = input {
                check_input(&path)?;
            }
        }
    }

    Ok(())
}

fn check_input(path: &Path) -> Result<()> {
    let request = AdvisoryDocument::load(path)?.into_request(None);
    validate_inputs(
        request.target_year,
        &request.history,
        &request.families,
        request.candidate.as_ref(),
    )?;

    println!(
        "Input: OK (plot {}, {} plantings, {} families, target year {})",
        request.plot_id,
        request.history.len(),
        request.families.len(),
        request.target_year
    );
    Ok(())
}
