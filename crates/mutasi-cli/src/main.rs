mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use mutasi_core::error::MutasiError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mutasi",
    version,
    about = "Convert BCA e-statement PDFs into text for the transaction parser"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TemplateArgs {
    /// Predefined statement template
    #[arg(short, long, default_value = "bca")]
    preset: String,

    /// Custom JSON template file (overrides --preset)
    #[arg(short, long, value_name = "FILE")]
    template: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert statement PDFs (or directories of PDFs) to text
    Convert {
        /// PDF files or directories to search for PDFs
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (only with a single PDF input; default: input with .txt/.json extension)
        #[arg(short = 'o', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        format: String,

        #[command(flatten)]
        template: TemplateArgs,
    },
    /// Dump the positioned words pdftotext extracts from a PDF, as JSON
    Words {
        /// Path to PDF
        input_file: PathBuf,

        /// Only this page (1-based)
        #[arg(long)]
        page: Option<usize>,
    },
    /// Manage and inspect statement templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },
}

#[derive(Subcommand)]
enum TemplateAction {
    /// List predefined templates
    List,
    /// Print a predefined template as JSON
    Show {
        /// Preset name
        #[arg(default_value = "bca")]
        preset: String,
    },
    /// Validate a custom template file
    Validate {
        /// Path to JSON template file
        file: PathBuf,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            inputs,
            out,
            format,
            template,
        } => commands::convert::run(
            inputs,
            out,
            &format,
            &template.preset,
            template.template.as_deref(),
        )
        .map(|summary| summary.failed == 0),
        Commands::Words { input_file, page } => {
            commands::words::run(&input_file, page).map(|_| true)
        }
        Commands::Template { action } => match action {
            TemplateAction::List => commands::template::list(),
            TemplateAction::Show { preset } => commands::template::show(&preset),
            TemplateAction::Validate { file } => commands::template::validate(&file),
        }
        .map(|_| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", error_message(&e));
            std::process::exit(1);
        }
    }
}

fn error_message(e: &MutasiError) -> String {
    format!("Error: {e}")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
