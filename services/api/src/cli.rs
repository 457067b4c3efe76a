use crate::demo::{run_demo, run_evaluate, DemoArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pitch_eval::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Pitch Evaluator",
    about = "Score startup pitch questionnaires and serve the evaluation API",
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
    /// Evaluate a submission JSON file and print the score card
    Evaluate(EvaluateArgs),
    /// Run an in-memory evaluate, pay and unlock cycle
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["pitch-eval-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_evaluate_flags() {
        let cli = Cli::try_parse_from([
            "pitch-eval-api",
            "evaluate",
            "--input",
            "submission.json",
            "--no-anti-gaming-clock",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.input.to_str(), Some("submission.json"));
                assert!(args.no_anti_gaming_clock);
            }
            other => panic!("expected evaluate, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_requires_an_input() {
        assert!(Cli::try_parse_from(["pitch-eval-api", "evaluate"]).is_err());
    }
}
