use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use rbiam::common::write_string_to_file;
use rbiam::config::ExportConfig;
use rbiam::export::ExportFileType;
use rbiam::reference::Kind;
use rbiam::services::ExportService;
use rbiam::{AccessGraph, Trace};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Raw,
    Dot,
    All,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a trace against a dumped access graph
    Export {
        #[clap(short, long)]
        store: PathBuf,
        #[clap(short, long)]
        trace: PathBuf,
        #[clap(short, long, value_enum, default_value = "all")]
        format: Format,
        #[clap(short, long)]
        config: Option<PathBuf>,
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Print per-kind entity counts of a dumped access graph
    Inspect {
        #[clap(short, long)]
        store: PathBuf,
    },
    /// Write the default export configuration
    Init {
        #[clap(short, long, default_value = "rbiam.yaml")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Export {
            store,
            trace,
            format,
            config,
            output_dir,
        } => {
            let mut config = match config {
                Some(path) => ExportConfig::load(&path)?,
                None => ExportConfig::default(),
            };
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }

            let graph = AccessGraph::load(&store)?;
            let trace = Trace::parse(&fs::read_to_string(&trace)?)?;
            info!("Loaded {} trace entries ({})", trace.len(), graph.stats());

            let service = ExportService::new(&graph, config);
            let formats: &[ExportFileType] = match format {
                Format::Raw => &[ExportFileType::Raw],
                Format::Dot => &[ExportFileType::Dot],
                Format::All => &[ExportFileType::Raw, ExportFileType::Dot],
            };
            for format in formats {
                let path = service.export(&trace, *format)?;
                println!("{}", path.display());
            }
        }
        Commands::Inspect { store } => {
            let graph = AccessGraph::load(&store)?;
            for kind in Kind::ALL {
                println!("{}: {}", kind, graph.count(kind));
            }
        }
        Commands::Init { config } => {
            info!("Initializing config: {}", config.display());
            write_string_to_file(&config, &ExportConfig::default().to_yaml()?)?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("handlebars=off,{}", log_level)))
        .without_time()
        .init();
}
