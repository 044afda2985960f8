mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Extract structured entities from tabletop rulebook PDFs with a local LLM"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads a rulebook.
#[derive(Args, Clone)]
struct DocumentArgs {
    /// Rulebook PDF, or pre-extracted .txt with form-feed page breaks
    document: PathBuf,

    /// Keep the physical page layout when extracting PDF text
    #[arg(long)]
    layout: bool,

    /// First page of the table of contents [default: 3]
    #[arg(long, value_name = "PAGE")]
    toc_start: Option<usize>,

    /// Last page of the table of contents [default: 6]
    #[arg(long, value_name = "PAGE")]
    toc_end: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sections found in the table of contents
    Sections {
        #[command(flatten)]
        doc: DocumentArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Split a section into entities without calling the model
    Split {
        #[command(flatten)]
        doc: DocumentArgs,

        /// Section slug or part of its name (e.g. "racas", "magias")
        section: String,

        /// Entity type; inferred from the section name when omitted
        entity_type: Option<String>,

        /// Custom JSON header-pattern file
        #[arg(long, value_name = "FILE")]
        patterns: Option<PathBuf>,

        /// Characters of content to preview per entity
        #[arg(long, default_value = "120")]
        preview: usize,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Extract a section's entities to JSON files with the model
    Extract {
        #[command(flatten)]
        doc: DocumentArgs,

        /// Section slug or part of its name
        section: String,

        /// Entity type; inferred from the section name when omitted
        entity_type: Option<String>,

        /// Model name [default: mistral]
        #[arg(short, long)]
        model: Option<String>,

        /// Root directory for records; files go to <DIR>/<entity_type>/ [default: json]
        #[arg(short = 'd', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Only list the entities that would be extracted
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Retries per entity after the first attempt [default: 2]
        #[arg(long)]
        retries: Option<u32>,

        /// Ollama base URL [default: http://localhost:11434]
        #[arg(long, env = "OLLAMA_HOST")]
        ollama_url: Option<String>,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Custom JSON header-pattern file
        #[arg(long, value_name = "FILE")]
        patterns: Option<PathBuf>,

        /// Output format for the final report: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print the text between two patterns (case-insensitive regex)
    Find {
        /// Rulebook PDF or .txt
        document: PathBuf,

        /// Pattern where the text starts
        start: String,

        /// Pattern before which the text ends
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        layout: bool,
    },
    /// List entity types with their pattern and prompt coverage
    Types {
        /// Custom JSON header-pattern file
        #[arg(long, value_name = "FILE")]
        patterns: Option<PathBuf>,
    },
    /// List the models installed on the backend
    Models {
        /// Ollama base URL [default: http://localhost:11434]
        #[arg(long, env = "OLLAMA_HOST")]
        ollama_url: Option<String>,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Re-validate extracted record files
    Check {
        /// Directory of <id>.json records (named after the entity type)
        dir: PathBuf,

        /// Entity type; defaults to the directory name
        #[arg(short, long)]
        entity_type: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sections { doc, output } => commands::sections::run(&doc.into(), &output),
        Commands::Split {
            doc,
            section,
            entity_type,
            patterns,
            preview,
            output,
        } => commands::split::run(
            &doc.into(),
            &section,
            entity_type.as_deref(),
            patterns.as_deref(),
            preview,
            &output,
        ),
        Commands::Extract {
            doc,
            section,
            entity_type,
            model,
            output_dir,
            dry_run,
            retries,
            ollama_url,
            config,
            patterns,
            output,
        } => commands::extract::run(commands::extract::ExtractArgs {
            doc: doc.into(),
            section,
            entity_type,
            model,
            output_dir,
            dry_run,
            retries,
            ollama_url,
            config,
            patterns,
            output,
        }),
        Commands::Find {
            document,
            start,
            end,
            layout,
        } => commands::find::run(&document, &start, end.as_deref(), layout),
        Commands::Types { patterns } => commands::types::run(patterns.as_deref()),
        Commands::Models { ollama_url, config } => {
            commands::models::run(ollama_url, config.as_deref())
        }
        Commands::Check { dir, entity_type } => commands::check::run(&dir, entity_type.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

impl From<DocumentArgs> for commands::DocumentOptions {
    fn from(args: DocumentArgs) -> Self {
        commands::DocumentOptions {
            path: args.document,
            layout: args.layout,
            toc_start: args.toc_start,
            toc_end: args.toc_end,
        }
    }
}
