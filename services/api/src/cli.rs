use crate::commands::{run_catalog, run_recommend, CatalogArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use cots_selector::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "COTS Component Selector",
    about = "Score off-the-shelf mechanical components against engineering requirements",
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
    /// Evaluate one category of the catalog against requirement fields
    Recommend(RecommendArgs),
    /// List catalog records, optionally filtered
    Catalog(CatalogArgs),
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
        Command::Recommend(args) => run_recommend(args),
        Command::Catalog(args) => run_catalog(args),
    }
}
