//! abacus — calculator CLI client
//!
//! Sends one `Calculate` call to abacusd and prints the result.

use std::process::ExitCode;

use clap::Parser;
use abacus::client::ServiceClient;
use abacus::{CalculateRequest, CalculateResponse, CalculatorApi, Operation};

/// Abacus CLI client
#[derive(Parser)]
#[command(name = "abacus")]
#[command(version = abacus::PKG_VERSION)]
#[command(about = "Evaluate `<left> <op> <right>` on an abacusd server")]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Server address
    #[arg(
        short,
        long,
        env = "ABACUSD_URL",
        default_value = "http://127.0.0.1:8081"
    )]
    address: String,

    /// Left operand
    left: f64,

    /// Operation: + - * / x, add, sub, mul, div, or OPERATION_* names
    operation: Operation,

    /// Right operand
    right: f64,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let client = match ServiceClient::connect(&args.address).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let request = CalculateRequest::new(args.left, args.operation, args.right);
    let outcome = client.calculate(request).await;

    match report(&request, outcome) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(line) => {
            eprintln!("{line}");
            ExitCode::FAILURE
        }
    }
}

/// Render a call's outcome as one line.
///
/// Protocol errors and errors embedded in the response print the same way,
/// so the output does not depend on the server's division-by-zero policy.
fn report(
    request: &CalculateRequest,
    outcome: abacus::Result<CalculateResponse>,
) -> Result<String, String> {
    match outcome {
        Ok(CalculateResponse {
            error: Some(error), ..
        }) => Err(format!("error: {error}")),
        Ok(response) => Ok(format!(
            "{} {} {} = {}",
            request.left_operand,
            request.operation.symbol(),
            request.right_operand,
            response.result
        )),
        Err(e) => Err(format!("error: {e}")),
    }
}
