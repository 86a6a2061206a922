// Survey Signals CLI
// Thin front-end over the text engine: reads arguments, prints JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use survey_signals::models::{SurveyPayload, VoiceContext};
use survey_signals::solutions::DefaultSolutions;
use survey_signals::telemetry::{init_tracing, LogFormat};
use survey_signals::TextEngine;

#[derive(Parser)]
#[command(name = "survey-signals")]
#[command(about = "Text intelligence for employee surveys", long_about = None)]
struct Cli {
    /// Log output format: pretty, json or bunyan
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize an insight from a survey payload file
    Insight {
        /// Path to the payload JSON
        payload: PathBuf,
    },
    /// Parse a voice command transcript
    Voice {
        transcript: String,
        /// UI context as JSON
        #[arg(short, long)]
        context: Option<String>,
        /// Include keywords and entity slots
        #[arg(short, long)]
        detailed: bool,
    },
    /// Analyse a single free-text answer
    Analyze { text: String },
    /// Print the normalized form of a text
    Normalize { text: String },
    /// Improvement suggestions for a leadership category
    Solutions {
        /// Category id, e.g. strategic-clarity
        category: Option<String>,
        /// Company name
        #[arg(short = 'C', long)]
        company: Option<String>,
        /// All categories (requires --company)
        #[arg(short, long)]
        all: bool,
    },
    /// Summary report with improvement areas
    Report {
        /// Path to the payload JSON
        payload: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    let engine = TextEngine::new().context("Failed to initialize the text engine")?;

    match cli.command {
        Commands::Insight { payload } => {
            info!("Command received: insight({})", payload.display());
            let payload = SurveyPayload::from_path(&payload)?;
            print_json(&engine.synthesize_payload(&payload))?;
        }
        Commands::Voice {
            transcript,
            context,
            detailed,
        } => {
            info!("Command received: voice({})", transcript);
            let context: Option<VoiceContext> = context
                .as_deref()
                .map(serde_json::from_str)
                .transpose()
                .context("Invalid --context JSON")?;
            if detailed {
                print_json(&engine.parse_voice_command_detailed(&transcript, context.as_ref()))?;
            } else {
                print_json(&engine.parse_voice_command(&transcript, context.as_ref()))?;
            }
        }
        Commands::Analyze { text } => {
            print_json(&engine.analyze_text(&text))?;
        }
        Commands::Normalize { text } => {
            println!("{}", engine.normalize(&text));
        }
        Commands::Solutions {
            category,
            company,
            all,
        } => {
            if all {
                let Some(company) = company else {
                    bail!("--all requires --company");
                };
                print_json(&engine.solutions_for_company(&DefaultSolutions, &company))?;
            } else {
                let Some(category) = category else {
                    bail!("A category is required unless --all is given");
                };
                print_json(&engine.solutions(&category, company.as_deref()))?;
            }
        }
        Commands::Report { payload } => {
            info!("Command received: report({})", payload.display());
            let payload = SurveyPayload::from_path(&payload)?;
            print_json(&engine.summary_report(&payload))?;
        }
    }

    Ok(())
}
