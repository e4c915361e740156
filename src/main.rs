use clap::Parser;
use talk_similarity::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Score(args) => cli::score::run(args).await,
        Command::Status(args) => cli::status::run(args).await,
    }
}
