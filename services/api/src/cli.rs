use crate::demo::{run_batch, run_check, run_demo, BatchArgs, CheckArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use green_eligibility::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Green Eligibility",
    about = "Decide renewable-energy program eligibility over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single customer and print the response payload
    Check(CheckArgs),
    /// Evaluate every row of a CSV export
    Batch(BatchArgs),
    /// Walk through the reference customers and their verdicts
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo => run_demo(),
    }
}
