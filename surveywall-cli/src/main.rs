//! Surveywall CLI - Command-line interface
//!
//! This binary runs one availability check against the survey endpoint and
//! exits with a status code reflecting the outcome. Useful for verifying a
//! publisher configuration without embedding the SDK in an application.

use clap::Parser;
use std::process;
use std::sync::Arc;
use surveywall::availability::AvailabilityOutcome;
use surveywall::logging::{default_log_dir, default_log_file, init_logging};
use surveywall::options::SurveyOptions;
use surveywall::orchestrator::{DebugSink, SurveyOrchestrator};

#[derive(Parser)]
#[command(name = "surveywall")]
#[command(about = "Check survey availability for a publisher", long_about = None)]
struct Args {
    /// Publisher identifier (UUID)
    #[arg(long)]
    publisher: String,

    /// Content name reported with the check
    #[arg(long)]
    content_name: Option<String>,

    /// Explicit postal code to send (implies --send-postal-code)
    #[arg(long)]
    postal_code: Option<String>,

    /// Resolve and send a postal code with the check
    #[arg(long)]
    send_postal_code: bool,

    /// Availability endpoint override (staging, mock server)
    #[arg(long)]
    endpoint: Option<String>,

    /// Print SDK trace lines while checking
    #[arg(long)]
    verbose: bool,
}

/// Sink printing SDK trace lines to stdout.
struct StdoutSink;

impl DebugSink for StdoutSink {
    fn emit(&self, line: &str) {
        println!("[surveywall] {}", line);
    }
}

fn main() {
    let args = Args::parse();

    let _logging_guard = match init_logging(default_log_dir(), default_log_file()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging unavailable: {}", e);
            None
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            process::exit(2);
        }
    };

    let outcome = runtime.block_on(run(args));
    match outcome {
        AvailabilityOutcome::Available => {
            println!("Survey available");
            process::exit(0);
        }
        AvailabilityOutcome::NotAvailable => {
            println!("No survey available");
            process::exit(1);
        }
        AvailabilityOutcome::Error => {
            eprintln!("Availability check failed");
            process::exit(2);
        }
    }
}

async fn run(args: Args) -> AvailabilityOutcome {
    let mut options =
        SurveyOptions::new(args.publisher).with_send_postal_code(args.send_postal_code);
    if let Some(content_name) = args.content_name {
        options = options.with_content_name(content_name);
    }
    if let Some(postal_code) = args.postal_code {
        options = options
            .with_postal_code(postal_code)
            .with_send_postal_code(true);
    }

    let built = match args.endpoint {
        Some(endpoint) => SurveyOrchestrator::with_endpoint(options, endpoint),
        None => SurveyOrchestrator::new(options),
    };
    let orchestrator = match built {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            eprintln!("Error: {}", e);
            return AvailabilityOutcome::Error;
        }
    };
    let orchestrator = orchestrator
        .with_verbose(args.verbose)
        .with_debug_sink(Arc::new(StdoutSink));

    orchestrator.check_availability().await
}
