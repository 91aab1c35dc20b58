use crate::demo::{run_demo, run_match, run_score, DemoArgs, MatchArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use persona_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Persona Match",
    about = "Score personality quizzes and compare profiles from the command line",
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
    /// Score a completed questionnaire
    Score(ScoreArgs),
    /// Compute compatibility between two profiles
    Match(MatchArgs),
    /// Walk through quiz, diagnosis, matching and bucketing with sample data
    Demo(DemoArgs),
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
        Command::Match(args) => run_match(args),
        Command::Demo(args) => run_demo(args),
    }
}
