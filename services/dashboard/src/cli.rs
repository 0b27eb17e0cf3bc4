use crate::demo::{run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use freshscore::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "FreshScore Dashboard",
    about = "Serve the FreshScore cold chain dashboard or score a reading from the terminal",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP dashboard (default command)
    Serve(ServeArgs),
    /// Score a single reading and print the result
    Score(ScoreArgs),
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
        Command::Score(args) => run_score(args),
    }
}
