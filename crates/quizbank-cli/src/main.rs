//! quizbank CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizbank", version, about = "Practice exams from CSV question banks")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available question banks
    List,

    /// Check a question bank for format errors and authoring mistakes
    Validate {
        /// Bank name from the catalog, or a path to a .csv file
        #[arg(long)]
        bank: String,
    },

    /// Show exam details before starting
    Preface {
        /// Bank name from the catalog, or a path to a .csv file
        #[arg(long)]
        bank: String,

        /// Max questions per exam (blank = no limit)
        #[arg(long)]
        max_questions: Option<String>,
    },

    /// Take an exam interactively
    Take {
        /// Bank name from the catalog, or a path to a .csv file
        #[arg(long)]
        bank: String,

        /// Max questions per exam (blank = no limit)
        #[arg(long)]
        max_questions: Option<String>,

        /// Seed for question selection order
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to save a JSON exam report into
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Score a JSON answer file against a bank, in file order
    Score {
        /// Bank name from the catalog, or a path to a .csv file
        #[arg(long)]
        bank: String,

        /// JSON object mapping 0-based question positions to options 1-4
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and a sample question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizbank=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::List => commands::list::execute(config),
        Commands::Validate { bank } => commands::validate::execute(bank, config).await,
        Commands::Preface {
            bank,
            max_questions,
        } => commands::preface::execute(bank, max_questions, config).await,
        Commands::Take {
            bank,
            max_questions,
            seed,
            output,
        } => commands::take::execute(bank, max_questions, seed, output, config).await,
        Commands::Score {
            bank,
            answers,
            format,
        } => commands::score::execute(bank, answers, format, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
