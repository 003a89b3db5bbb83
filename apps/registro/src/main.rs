mod config;
mod input;

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    display_label, submission::success_message, FeedbackState, PageController, PostgrestClient,
    SubmitError, SubmitReport,
};
use shared::domain::ProcesoId;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::input::{fill_form, read_rows, AcreedorInput, PartyInput};

#[derive(Parser, Debug)]
#[command(name = "registro", about = "Register deudores and acreedores against a proceso")]
struct Args {
    /// TOML file with Supabase settings; environment variables take precedence.
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the available procesos, newest first.
    List,
    /// Fill both forms from JSON files and submit them concurrently.
    Submit {
        /// Defaults to the newest proceso.
        #[arg(long)]
        proceso: Option<String>,
        #[arg(long)]
        deudores: Option<PathBuf>,
        #[arg(long)]
        acreedores: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let settings = config::load_settings(&args.config);
    settings.validate()?;
    let client = PostgrestClient::with_timeout(
        &settings.supabase_url,
        &settings.supabase_anon_key,
        settings.request_timeout(),
    )?;
    info!(rest_url = %client.rest_url(), "connecting");

    let page = PageController::new(Arc::new(client));
    page.activate().await;
    if let Some(err) = page.selector().error() {
        page.teardown();
        bail!(err);
    }

    let outcome = match args.command {
        Command::List => {
            list(&page);
            Ok(())
        }
        Command::Submit {
            proceso,
            deudores,
            acreedores,
        } => submit(&page, proceso, deudores, acreedores).await,
    };
    page.teardown();
    outcome
}

fn list(page: &PageController) {
    let procesos = page.selector().procesos();
    if procesos.is_empty() {
        println!("No hay procesos registrados.");
        return;
    }
    for proceso in procesos {
        println!("{}\t{}", proceso.id, display_label(&proceso));
    }
}

async fn submit(
    page: &PageController,
    proceso: Option<String>,
    deudores: Option<PathBuf>,
    acreedores: Option<PathBuf>,
) -> Result<()> {
    if deudores.is_none() && acreedores.is_none() {
        bail!("nothing to submit: pass --deudores and/or --acreedores");
    }

    if let Some(id) = proceso {
        page.selector().select(Some(ProcesoId::new(id.clone())));
        if page.selector().selected().is_none() {
            bail!("proceso '{id}' not found");
        }
    }
    if let Some(selected) = page.selector().selected() {
        println!("Proceso: {}", display_label(&selected));
    }

    if let Some(path) = &deudores {
        let rows: Vec<PartyInput> = read_rows(path)?;
        let filled = fill_form(page.deudores(), &rows);
        info!(filled, path = %path.display(), "loaded deudor rows");
    }
    if let Some(path) = &acreedores {
        let rows: Vec<AcreedorInput> = read_rows(path)?;
        let filled = fill_form(page.acreedores(), &rows);
        info!(filled, path = %path.display(), "loaded acreedor rows");
    }

    let (deudores_outcome, acreedores_outcome) = tokio::join!(
        async {
            match deudores {
                Some(_) => Some(page.submit_deudores().await),
                None => None,
            }
        },
        async {
            match acreedores {
                Some(_) => Some(page.submit_acreedores().await),
                None => None,
            }
        }
    );

    let mut failed = false;
    if let Some(outcome) = deudores_outcome {
        failed |= report("Deudores", outcome, page.deudores().feedback());
    }
    if let Some(outcome) = acreedores_outcome {
        failed |= report("Acreedores", outcome, page.acreedores().feedback());
    }
    if failed {
        bail!("one or more forms failed");
    }
    Ok(())
}

/// Prints one form's feedback; returns true when the form failed.
fn report(
    label: &str,
    outcome: std::result::Result<SubmitReport, SubmitError>,
    feedback: FeedbackState,
) -> bool {
    match outcome {
        Ok(report) => {
            let message = feedback
                .success()
                .map(str::to_string)
                .unwrap_or_else(|| success_message(report.kind, report.registered));
            println!("{label}: {message}");
            false
        }
        Err(err) => {
            let message = feedback
                .error()
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            eprintln!("{label}: {message}");
            true
        }
    }
}
