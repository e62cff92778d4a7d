//! evalctl - administrative CLI for a scheduler's evaluation records
//!
//! ## Commands
//!
//! - `eval delete`: delete evaluations by ID or by filter (broker must be paused)
//! - `eval list`: list evaluations, optionally by filter

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use evalctl_core::{
    list_evaluations, render_eval_json, render_eval_table, EvalDeleteCommand, ExitStatus, Reporter,
};
use evalctl_state::{ClusterConfig, EvaluationStore, HttpClusterClient, SchedulerOperator};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "evalctl")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage a job scheduler's evaluation records", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Control plane address [env: EVALCTL_ADDR, default: http://127.0.0.1:4646]
    #[arg(long, global = true)]
    address: Option<String>,

    /// ACL token [env: EVALCTL_TOKEN]
    #[arg(long, global = true)]
    token: Option<String>,

    /// Region to forward requests to [env: EVALCTL_REGION]
    #[arg(long, global = true)]
    region: Option<String>,

    /// Namespace to query [env: EVALCTL_NAMESPACE]
    #[arg(long, global = true)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interact with evaluations
    Eval {
        #[command(subcommand)]
        action: EvalAction,
    },
}

#[derive(Subcommand)]
enum EvalAction {
    /// Delete evaluations by ID or by filter expression
    ///
    /// The eval broker must be paused first. Deleting an evaluation the
    /// scheduler is working on would otherwise race with it.
    Delete {
        /// Evaluation ID to delete (mutually exclusive with --filter)
        ids: Vec<String>,

        /// Delete every evaluation matching this filter expression
        #[arg(long, default_value = "")]
        filter: String,
    },

    /// List evaluations
    List {
        /// Only list evaluations matching this filter expression
        #[arg(long, default_value = "")]
        filter: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging; stdout stays reserved for command output
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    evalctl_core::init_tracing(cli.json, level);

    let code = match run(cli).await {
        Ok(status) => status.code(),
        Err(e) => {
            eprintln!("Error: {e}");
            for cause in e.chain().skip(1) {
                eprintln!("  caused by: {cause}");
            }
            ExitStatus::Failure.code()
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<ExitStatus> {
    let config = cluster_config(&cli);
    debug!(address = %config.address, "Using control plane");
    let client = HttpClusterClient::new(config).context("Failed to create cluster client")?;

    match cli.command {
        Commands::Eval { action } => match action {
            EvalAction::Delete { ids, filter } => {
                Ok(cmd_eval_delete(&client, &ids, &filter).await)
            }
            EvalAction::List { filter, format } => cmd_eval_list(&client, &filter, format).await,
        },
    }
}

/// Environment first, then any flags given on the command line.
fn cluster_config(cli: &Cli) -> ClusterConfig {
    let mut config = ClusterConfig::from_env();
    if let Some(address) = &cli.address {
        config.address = address.clone();
    }
    if let Some(token) = &cli.token {
        config = config.with_token(token);
    }
    if let Some(region) = &cli.region {
        config = config.with_region(region);
    }
    if let Some(namespace) = &cli.namespace {
        config = config.with_namespace(namespace);
    }
    config
}

/// Delete evaluations and report to stdout/stderr
async fn cmd_eval_delete<C>(cluster: &C, ids: &[String], filter: &str) -> ExitStatus
where
    C: SchedulerOperator + EvaluationStore,
{
    let cmd = EvalDeleteCommand::new(cluster);
    let mut reporter = Reporter::new(std::io::stdout(), std::io::stderr());
    cmd.run_and_report(ids, filter, &mut reporter).await
}

/// List evaluations
async fn cmd_eval_list(
    store: &dyn EvaluationStore,
    filter: &str,
    format: OutputFormat,
) -> Result<ExitStatus> {
    let records = list_evaluations(store, filter)
        .await
        .context("Error querying evaluations")?;

    match format {
        OutputFormat::Table => print!("{}", render_eval_table(&records)),
        OutputFormat::Json => println!("{}", render_eval_json(&records)?),
    }
    Ok(ExitStatus::Success)
}
