//! # vendor-cli
//!
//! Command-line front end for viewing and updating vendor contact
//! information.
//!
//! Each invocation mounts one form session against a JSON vendor store,
//! applies the requested action and prints the resulting notification.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vendor_form::{FormController, FormSnapshot, LoadOutcome, Severity, SubmitOutcome};
use vendor_gateway::FileGateway;
use vendor_model::{ContactField, VendorContactRecord, sample_vendor};

use crate::config::AppConfig;

/// Record failed validation
const EXIT_INVALID: u8 = 2;
/// Gateway call failed
const EXIT_GATEWAY: u8 = 1;

#[derive(Parser)]
#[command(name = "vendor-contact")]
#[command(about = "View and update vendor store contact information")]
#[command(version)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Vendor store file, overrides the config file
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// Vendor to operate on, overrides the config file
    #[arg(short, long, global = true)]
    vendor: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the demo vendor into the store
    Seed,

    /// Load the vendor and print its contact information
    Show {
        /// Print the form snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a vendor record JSON file without saving it
    Validate {
        /// Record file path
        input: PathBuf,
    },

    /// Load the vendor, apply edits and save
    Update {
        /// Field assignment such as `city=Springfield`; repeatable
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
        assignments: Vec<(ContactField, String)>,

        /// Print the form snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_assignment(raw: &str) -> Result<(ContactField, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = name.trim().parse::<ContactField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config =
        AppConfig::load(cli.config.as_deref())?.with_overrides(cli.store, cli.vendor);

    match cli.command {
        Commands::Seed => seed(&config).await,
        Commands::Show { json } => show(&config, json).await,
        Commands::Validate { input } => validate(&input),
        Commands::Update { assignments, json } => update(&config, assignments, json).await,
    }
}

async fn seed(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let mut record = sample_vendor();
    record.id.clone_from(&config.vendor_id);
    FileGateway::seed(&config.store, &record)
        .await
        .with_context(|| format!("Failed to seed {}", config.store.display()))?;
    tracing::info!(store = %config.store.display(), vendor_id = %record.id, "seeded store");
    println!("Seeded vendor {} into {}", record.id, config.store.display());
    Ok(ExitCode::SUCCESS)
}

async fn mount(config: &AppConfig) -> anyhow::Result<(FormController<FileGateway>, LoadOutcome)> {
    let gateway = FileGateway::new(&config.store, config.gateway());
    let mut form = FormController::new(gateway, config.form());
    let outcome = form.initialize().await?;
    Ok((form, outcome))
}

async fn show(config: &AppConfig, json: bool) -> anyhow::Result<ExitCode> {
    let (form, outcome) = mount(config).await?;
    let snapshot = form.snapshot();

    if json {
        print_json(&snapshot)?;
    } else {
        print_notification(&snapshot);
        print_profile(&snapshot);
    }

    Ok(match outcome {
        LoadOutcome::Loaded => ExitCode::SUCCESS,
        LoadOutcome::Failed(error) => {
            tracing::warn!(%error, "showing blank form");
            ExitCode::from(EXIT_GATEWAY)
        }
    })
}

fn validate(input: &std::path::Path) -> anyhow::Result<ExitCode> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read record {}", input.display()))?;
    let record: VendorContactRecord = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse record {}", input.display()))?;

    let errors = vendor_validation::validate(&record);
    println!("Errors: {}", errors.len());
    for (field, message) in errors.iter() {
        println!("  {field}: {message}");
    }

    if errors.is_empty() {
        println!("Record is valid.");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_INVALID))
    }
}

async fn update(
    config: &AppConfig,
    assignments: Vec<(ContactField, String)>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let (mut form, outcome) = mount(config).await?;
    if let LoadOutcome::Failed(error) = outcome {
        tracing::warn!(%error, "editing blank form");
    }

    for (field, value) in assignments {
        form.edit_field(field, value)?;
    }
    let outcome = form.submit().await;
    let snapshot = form.snapshot();

    if json {
        print_json(&snapshot)?;
    } else {
        for (field, message) in snapshot.errors.iter() {
            println!("  {field}: {message}");
        }
        print_notification(&snapshot);
    }

    Ok(match outcome {
        SubmitOutcome::Saved => ExitCode::SUCCESS,
        SubmitOutcome::Invalid(_) => ExitCode::from(EXIT_INVALID),
        SubmitOutcome::Failed(_) | SubmitOutcome::Ignored => ExitCode::from(EXIT_GATEWAY),
    })
}

fn print_json(snapshot: &FormSnapshot) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("Failed to encode snapshot")?;
    println!("{json}");
    Ok(())
}

fn print_notification(snapshot: &FormSnapshot) {
    let notification = &snapshot.notification;
    if !notification.visible {
        return;
    }
    let tag = match notification.severity {
        Severity::Success => "success",
        Severity::Error => "error",
        Severity::Info => "info",
    };
    println!("[{tag}] {}", notification.message);
}

fn print_profile(snapshot: &FormSnapshot) {
    println!("{}", snapshot.header);
    println!("Vendor ID: {}", snapshot.vendor_id);
    println!("Phone: {}", snapshot.record.phone);
    println!("Email: {}", snapshot.record.email);
    println!("Address: {}", snapshot.address_line);
    println!();
    for view in &snapshot.fields {
        let marker = if view.required { "*" } else { " " };
        println!("{marker} {}: {}", view.label, view.value);
    }
}
