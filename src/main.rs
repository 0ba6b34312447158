use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sow_architect::config::Settings;
use sow_architect::generate::{GeminiTransport, GenerateError, Generator, RetryingGenerator};
use sow_architect::intake::{IntakeConfig, SYSTEM_INSTRUCTION, build_prompt};
use sow_architect::{BrandingRecord, output_file_name, write_sow_docx};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to ./sow-architect.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert already-generated SOW text into a branded DOCX
    Render {
        /// Generated text, or `-` for stdin
        #[arg(short, long, value_name = "FILE")]
        text: PathBuf,

        /// Offering name, used for the title and catalog lookups
        #[arg(long)]
        offering: String,

        /// Date label for the cover page (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Customer logo image (PNG or JPEG)
        #[arg(long, value_name = "FILE")]
        customer_logo: Option<PathBuf>,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print the generation prompt built from an intake file
    Prompt {
        #[arg(short, long, value_name = "FILE")]
        intake: PathBuf,
    },
    /// Generate SOW text from an intake file and write the DOCX
    Generate {
        #[arg(short, long, value_name = "FILE")]
        intake: PathBuf,

        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: String,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also save the raw generated text
        #[arg(long, value_name = "FILE")]
        save_text: Option<PathBuf>,
    },
    /// List the offerings in the catalog
    Offerings,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("Unable to load settings")?;

    match cli.command {
        Command::Render {
            text,
            offering,
            date,
            customer_logo,
            output,
        } => {
            let generated = read_text(&text)?;
            let date_label = date.unwrap_or_else(today_label);
            let branding = branding_for(&offering, date_label, customer_logo.as_deref())?;
            let output = output.unwrap_or_else(|| PathBuf::from(output_file_name(&offering)));
            write_sow_docx(&generated, &branding, &offering, &settings.catalog(), &output)
                .with_context(|| format!("Unable to write {}", output.display()))?;
            println!("{}", output.display());
        }
        Command::Prompt { intake } => {
            let intake = load_intake(&intake)?;
            println!("{}", build_prompt(&intake));
        }
        Command::Generate {
            intake,
            api_key,
            output,
            save_text,
        } => {
            let intake = load_intake(&intake)?;
            if api_key.trim().is_empty() {
                bail!("No API key given; pass --api-key or set GEMINI_API_KEY");
            }

            let transport = GeminiTransport::new(
                settings.generation.endpoint.as_str(),
                settings.generation.model.as_str(),
                api_key,
                SYSTEM_INSTRUCTION,
                settings.request_timeout(),
            )?;
            let generator = RetryingGenerator::new(transport, settings.retry_policy());
            let generated = match generator.generate(&build_prompt(&intake)) {
                Ok(text) => text,
                Err(e) => {
                    if let GenerateError::Malformed { raw, .. } = &e {
                        eprintln!("Raw response:\n{raw}");
                    }
                    return Err(e).context("Text generation failed");
                }
            };

            if let Some(path) = &save_text {
                std::fs::write(path, &generated)
                    .with_context(|| format!("Unable to write {}", path.display()))?;
            }

            let date_label = match intake.date {
                Some(d) => d.format("%d %B %Y").to_string(),
                None => today_label(),
            };
            let branding = branding_for(&intake.offering, date_label, intake.customer_logo.as_deref())?;
            let output =
                output.unwrap_or_else(|| PathBuf::from(output_file_name(&intake.offering)));
            write_sow_docx(
                &generated,
                &branding,
                &intake.offering,
                &settings.catalog(),
                &output,
            )
            .with_context(|| format!("Unable to write {}", output.display()))?;
            println!("{}", output.display());
        }
        Command::Offerings => {
            let catalog = settings.catalog();
            for name in catalog.names() {
                let diagram = match catalog.diagram_asset_for(name) {
                    Some(p) if p.exists() => "diagram",
                    Some(_) => "diagram missing",
                    None => "no diagram",
                };
                println!("{name}\t{diagram}");
            }
        }
    }

    Ok(())
}

fn today_label() -> String {
    chrono::Local::now().date_naive().format("%d %B %Y").to_string()
}

fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Unable to read generated text from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Unable to read {}", path.display()))
}

fn load_intake(path: &Path) -> Result<IntakeConfig> {
    IntakeConfig::load(path).with_context(|| format!("Invalid intake file {}", path.display()))
}

fn branding_for(offering: &str, date_label: String, customer_logo: Option<&Path>) -> Result<BrandingRecord> {
    let mut branding = BrandingRecord::new(offering, date_label);
    if let Some(path) = customer_logo {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Unable to read customer logo {}", path.display()))?;
        branding = branding.with_customer_logo(bytes);
    }
    Ok(branding)
}
