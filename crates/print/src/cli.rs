use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use revline_core::YearMonth;
use revline_records::{JsonFileSource, RecordSource, TaskSheet};
use revline_render::{
    Artifact, AssetStore, DocumentBackend, PdfBackend, RenderConfig, Renderer, TranscriptBackend,
};

use crate::http::{API_URL_ENV, AUTH_TOKEN_ENV, HttpSource};

#[derive(Parser, Debug)]
#[command(name = "revline-print", version, about = "Print RevLine invoices, payslips and task sheets")]
pub struct Cli {
    /// Record source: `file:<path>` or `http:<base url>` (default: $REVLINE_API_URL)
    #[arg(long, global = true)]
    pub source: Option<SourceSpec>,

    /// Directory the document is written to
    #[arg(long, global = true, default_value = ".")]
    pub out: PathBuf,

    /// Write a plain-text listing of the layout instead of a PDF
    #[arg(long, global = true)]
    pub transcript: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Service invoice for one order
    Invoice {
        #[arg(long)]
        order: String,
    },
    /// Monthly payslip for one employee
    Payslip {
        #[arg(long)]
        employee: String,
        /// Month as YYYY-MM
        #[arg(long)]
        month: YearMonth,
    },
    /// Checklist of open orders. Every open order is printed unless `--order` narrows it
    Tasks {
        /// Open order to include; repeat for several. Omit to print every open order
        #[arg(long = "order")]
        orders: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    File(PathBuf),
    Http(String),
}

impl FromStr for SourceSpec {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(path) = raw.strip_prefix("file:") {
            return Ok(SourceSpec::File(PathBuf::from(path)));
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Ok(SourceSpec::Http(raw.to_string()));
        }
        if let Some(url) = raw.strip_prefix("http:") {
            return Ok(SourceSpec::Http(url.to_string()));
        }
        Err(format!("expected file:<path> or http:<url>, got {raw:?}"))
    }
}

impl SourceSpec {
    /// Explicit `--source`, else the API URL from the environment.
    pub fn resolve(explicit: Option<SourceSpec>) -> Result<Self> {
        match explicit {
            Some(spec) => Ok(spec),
            None => match std::env::var(API_URL_ENV) {
                Ok(url) if !url.trim().is_empty() => Ok(SourceSpec::Http(url)),
                _ => bail!("no record source: pass --source or set {API_URL_ENV}"),
            },
        }
    }

    pub fn open(&self) -> Box<dyn RecordSource> {
        match self {
            SourceSpec::File(path) => Box::new(JsonFileSource::new(path.clone())),
            SourceSpec::Http(url) => {
                let source = HttpSource::new(url.clone());
                match std::env::var(AUTH_TOKEN_ENV) {
                    Ok(token) if !token.is_empty() => Box::new(source.with_token(token)),
                    _ => {
                        tracing::warn!("{AUTH_TOKEN_ENV} not set; requesting without credentials");
                        Box::new(source)
                    }
                }
            }
        }
    }
}

/// Fetch, render and write one document. Returns where it was written.
pub async fn run(cli: Cli) -> Result<PathBuf> {
    let config = RenderConfig::from_env().context("loading render config")?;
    let spec = SourceSpec::resolve(cli.source)?;
    let source = spec.open();

    let backend: Box<dyn DocumentBackend> = if cli.transcript {
        Box::new(TranscriptBackend)
    } else {
        Box::new(PdfBackend)
    };
    let assets = AssetStore::load(&config);
    let renderer = Renderer::new(backend, config, assets);

    let artifact = produce(&cli.command, source.as_ref(), &renderer).await?;

    if !artifact.skipped_assets.is_empty() {
        tracing::warn!(skipped = ?artifact.skipped_assets, "document produced without some images");
    }

    std::fs::create_dir_all(&cli.out).with_context(|| format!("creating {}", cli.out.display()))?;
    let path = artifact
        .write_to(&cli.out)
        .with_context(|| format!("writing {} to {}", artifact.filename, cli.out.display()))?;
    Ok(path)
}

async fn produce<B: DocumentBackend>(
    command: &Command,
    source: &dyn RecordSource,
    renderer: &Renderer<B>,
) -> Result<Artifact> {
    let artifact = match command {
        Command::Invoice { order } => {
            let record = source
                .fetch_order(order)
                .await
                .with_context(|| format!("fetching order {order}"))?;
            renderer
                .render_invoice(&record)
                .with_context(|| format!("rendering invoice for order {order}"))?
        }
        Command::Payslip { employee, month } => {
            let record = source
                .fetch_salary(employee, *month)
                .await
                .with_context(|| format!("fetching salary for employee {employee}"))?;
            renderer
                .render_payslip(&record)
                .with_context(|| format!("rendering payslip for employee {employee}"))?
        }
        Command::Tasks { orders } => {
            let open = source.fetch_open_orders().await.context("fetching open orders")?;
            let sheet = TaskSheet::select(&open, orders);
            if sheet.is_empty() {
                tracing::info!("no open orders match; task sheet will be empty");
            }
            renderer.render_task_sheet(&sheet).context("rendering task sheet")?
        }
    };
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn source_specs() {
        assert_eq!(
            "file:/tmp/dash.json".parse::<SourceSpec>().unwrap(),
            SourceSpec::File(PathBuf::from("/tmp/dash.json"))
        );
        assert_eq!(
            "http:https://api.revline.test".parse::<SourceSpec>().unwrap(),
            SourceSpec::Http("https://api.revline.test".into())
        );
        assert_eq!(
            "https://api.revline.test".parse::<SourceSpec>().unwrap(),
            SourceSpec::Http("https://api.revline.test".into())
        );
        assert!("ftp://nope".parse::<SourceSpec>().is_err());
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from([
            "revline-print",
            "payslip",
            "--employee",
            "7",
            "--month",
            "2026-09",
            "--transcript",
        ])
        .unwrap();
        assert!(cli.transcript);
        assert!(matches!(cli.command, Command::Payslip { ref employee, .. } if employee == "7"));

        let cli = Cli::try_parse_from(["revline-print", "tasks", "--order", "1", "--order", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Tasks { ref orders } if orders.len() == 2));

        assert!(Cli::try_parse_from(["revline-print", "payslip", "--employee", "7", "--month", "2026-13"]).is_err());
    }

    #[test]
    fn tasks_without_orders_selects_every_open_order() {
        let cli = Cli::try_parse_from(["revline-print", "tasks"]).unwrap();
        assert!(matches!(cli.command, Command::Tasks { ref orders } if orders.is_empty()));

        let command = Cli::command();
        let tasks = command.find_subcommand("tasks").unwrap();
        let about = tasks.get_about().unwrap().to_string();
        assert!(about.contains("Every open order is printed"));

        let order_arg = tasks.get_arguments().find(|a| a.get_id() == "orders").unwrap();
        let help = order_arg.get_help().unwrap().to_string();
        assert!(help.contains("Omit to print every open order"));
    }
}
