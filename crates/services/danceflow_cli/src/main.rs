// --- File: crates/services/danceflow_cli/src/main.rs ---
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use danceflow_common::{init_from_config, ClassDetails, Currency};
use danceflow_config::load_config;
use danceflow_ui::ButtonType;
use tracing::info;

mod commands;
mod service_factory;

use service_factory::ServiceFactory;

#[derive(Parser)]
#[command(name = "danceflow")]
#[command(about = "Dance school bookings: calendar, checkout and school profiles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Put a class on the school calendar
    Calendar {
        #[arg(long)]
        title: String,
        /// RFC 3339 timestamp or free text
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Attendee email, repeatable
        #[arg(long = "attendee")]
        attendees: Vec<String>,
    },
    /// Start a hosted checkout
    Pay {
        /// Amount in minor units (cents)
        #[arg(long, allow_negative_numbers = true)]
        amount: i64,
        /// USD, EUR, TRY or GBP
        #[arg(long)]
        currency: Option<Currency>,
    },
    /// Show a dance school profile
    School { id: String },
    /// Print button markup
    Button {
        text: String,
        #[arg(long)]
        variant: Option<String>,
        #[arg(long)]
        full_width: bool,
        #[arg(long = "type", default_value = "button")]
        button_type: ButtonType,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Rendering needs no configuration.
    let command = match cli.command {
        Command::Button {
            text,
            variant,
            full_width,
            button_type,
        } => {
            println!(
                "{}",
                commands::render_button(&text, variant.as_deref(), full_width, button_type)
            );
            return Ok(ExitCode::SUCCESS);
        }
        other => other,
    };

    let config = load_config().context("Failed to load config")?;
    let _log_guard = init_from_config(&config.logging);
    info!("Configuration loaded");

    let factory = ServiceFactory::new(&config)?;

    match command {
        Command::Calendar {
            title,
            start,
            end,
            description,
            location,
            attendees,
        } => {
            let mut details = ClassDetails::new(title, start, end);
            if let Some(description) = description {
                details = details.with_description(description);
            }
            if let Some(location) = location {
                details = details.with_location(location);
            }
            if !attendees.is_empty() {
                details = details.with_attendees(attendees);
            }

            let calendar = factory.calendar()?;
            let body = commands::add_class(&calendar, &details).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Command::Pay { amount, currency } => {
            let payment = factory.payment()?;
            let currency = commands::resolve_currency(currency, config.stripe.as_ref())?;
            let (json, success) = commands::pay(&payment, amount, currency).await?;
            println!("{}", json);
            if !success {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::School { id } => {
            let firebase = factory.firebase()?;
            let school = commands::show_school(&firebase.db, &id).await?;
            println!("{}", serde_json::to_string_pretty(&school)?);
        }
        Command::Button { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}
