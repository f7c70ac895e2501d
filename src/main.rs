use clap::{Parser, Subcommand};
use loan_admin::application::screen::AdminScreen;
use loan_admin::config::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, FetchOrdering, ScreenConfig, ServiceConfig,
};
use loan_admin::domain::intent::Decision;
use loan_admin::domain::ports::LoanServiceRef;
use loan_admin::domain::projection::Projection;
use loan_admin::domain::state::FetchState;
use loan_admin::error::AdminError;
use loan_admin::infrastructure::http::HttpLoanService;
use loan_admin::infrastructure::in_memory::InMemoryLoanService;
use loan_admin::interfaces::csv::decision_reader::DecisionReader;
use loan_admin::interfaces::terminal::AdminView;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Review and decide loans pending validation", long_about = None)]
struct Cli {
    /// Base URL of the loan API
    #[arg(long, env = "LOAN_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Bearer token sent to the loan API
    #[arg(long, env = "LOAN_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "LOAN_API_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Serve pending loans from a JSON file instead of the loan API
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Which outcome wins when fetches overlap
    #[arg(long, value_enum, default_value_t = FetchOrdering::LastResolved)]
    fetch_ordering: FetchOrdering,

    /// Reload the pending list after a successful decision
    #[arg(long)]
    refresh_after_decision: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the loans pending validation
    List {
        /// Print the projection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Approve a pending loan
    Approve { loan_id: String },
    /// Reject a pending loan
    Reject { loan_id: String },
    /// Apply decisions from a `loan_id,decision` CSV file
    Apply { input: PathBuf },
}

impl Cli {
    fn service(&self) -> Result<LoanServiceRef> {
        if let Some(fixture) = &self.fixture {
            let service = InMemoryLoanService::from_path(fixture).into_diagnostic()?;
            return Ok(Arc::new(service));
        }
        let config = ServiceConfig::new(self.api_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_api_token(self.api_token.clone());
        let service = HttpLoanService::new(&config).into_diagnostic()?;
        Ok(Arc::new(service))
    }

    fn screen_config(&self) -> ScreenConfig {
        ScreenConfig::default()
            .with_fetch_ordering(self.fetch_ordering)
            .with_refresh_after_decision(self.refresh_after_decision)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "loan_admin=debug,info"
    } else {
        "loan_admin=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let service = cli.service()?;
    let config = cli.screen_config();

    // Decision commands never load the list up front; they fetch only with
    // --refresh-after-decision, once the decision succeeded.
    match cli.command {
        None => list(&AdminScreen::activate(service, config), false).await,
        Some(Command::List { json }) => list(&AdminScreen::activate(service, config), json).await,
        Some(Command::Approve { ref loan_id }) => {
            let screen = AdminScreen::attach(service, config);
            decide(&screen, loan_id, Decision::Approve, cli.refresh_after_decision).await
        }
        Some(Command::Reject { ref loan_id }) => {
            let screen = AdminScreen::attach(service, config);
            decide(&screen, loan_id, Decision::Reject, cli.refresh_after_decision).await
        }
        Some(Command::Apply { ref input }) => {
            apply(&AdminScreen::attach(service, config), input).await
        }
    }
}

async fn list(screen: &AdminScreen, json: bool) -> Result<()> {
    let state = screen.settled().await.into_diagnostic()?;
    render(&state, json)?;

    if let FetchState::Failed(error) = state {
        return Err(AdminError::FetchFailed(error)).into_diagnostic();
    }
    Ok(())
}

fn render(state: &FetchState, json: bool) -> Result<()> {
    let projection = Projection::of(state);
    let stdout = io::stdout();
    if json {
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &projection).into_diagnostic()?;
        writeln!(out).into_diagnostic()?;
    } else {
        AdminView::new(stdout.lock())
            .render(&projection)
            .into_diagnostic()?;
    }
    Ok(())
}

async fn decide(
    screen: &AdminScreen,
    loan_id: &str,
    decision: Decision,
    refresh: bool,
) -> Result<()> {
    screen
        .dispatcher()
        .request_decision(loan_id, decision)
        .into_diagnostic()?
        .completion()
        .await
        .into_diagnostic()?;
    println!("{}", confirmation(loan_id, decision));

    if refresh {
        let state = screen.settled().await.into_diagnostic()?;
        render(&state, false)?;
    }
    Ok(())
}

async fn apply(screen: &AdminScreen, input: &Path) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let reader = DecisionReader::new(file);

    for record in reader.decisions() {
        match record {
            Ok(record) => {
                let loan_id = record.loan_id.to_string();
                let decision = record.decision;
                let handle = screen.dispatcher().dispatch(record.into_intent());
                match handle.completion().await {
                    Ok(()) => println!("{}", confirmation(&loan_id, decision)),
                    Err(e) => eprintln!("Error applying decision: {}", e),
                }
            }
            Err(e) => {
                eprintln!("Error reading decision: {}", e);
            }
        }
    }
    Ok(())
}

fn confirmation(loan_id: &str, decision: Decision) -> String {
    match decision {
        Decision::Approve => format!("Approved loan {loan_id}"),
        Decision::Reject => format!("Rejected loan {loan_id}"),
    }
}
