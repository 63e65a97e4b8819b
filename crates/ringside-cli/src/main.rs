use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "ringside", version, about = "Ringside workout timers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available timers
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Standard timer: a single fixed countdown
    Standard(commands::run::StandardArgs),
    /// Round timer: the same round duration repeated multiple times
    Round(commands::run::RoundArgs),
    /// Interval timer: a set of custom intervals repeated multiple times
    Interval(commands::run::IntervalArgs),
    /// Alert settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr so countdown output and --json stay parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::List { json } => commands::list::run(json),
        Commands::Standard(args) => commands::run::standard(args).await,
        Commands::Round(args) => commands::run::round(args).await,
        Commands::Interval(args) => commands::run::interval(args).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
