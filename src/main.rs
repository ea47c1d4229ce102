use catgraph_api::RestApi;
use catgraph_core::{AnalysisConfig, Analyzer, CatalogSnapshot};
use catgraph_storage::{
    analyze_snapshot, AnalyzeError, ReportExporter, StorageManager, DEFAULT_REPORT_FILE,
};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Category similarity graph analysis
#[derive(Parser, Debug)]
#[command(name = "catgraph")]
#[command(about = "Find rabbit islands and the longest rabbit hole in a category catalog", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Refuse to analyze graphs with more categories than this
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Refuse to analyze graphs with more similarity pairs than this
    #[arg(long)]
    max_edges: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze the similarity graph and write the report
    Analyze {
        /// Analyze this snapshot file instead of the catalog in the data directory
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Where to write the report
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load categories and similarities from a snapshot file into the catalog
    Import {
        snapshot: PathBuf,
    },

    /// Serve the REST API
    Serve {
        /// HTTP API port
        #[arg(long, default_value_t = 8000)]
        http_port: u16,
    },
}

fn read_snapshot(path: &Path) -> anyhow::Result<CatalogSnapshot> {
    let file = File::open(path)?;
    Ok(CatalogSnapshot::from_reader(BufReader::new(file))?)
}

fn analyze(
    args: &Args,
    config: AnalysisConfig,
    snapshot: Option<&PathBuf>,
    output: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let result = match snapshot {
        Some(path) => {
            info!("Snapshot file: {:?}", path);
            let snapshot = read_snapshot(path)?;
            let exporter = ReportExporter::new(output.cloned().unwrap_or_else(|| DEFAULT_REPORT_FILE.into()));
            analyze_snapshot(&snapshot, &Analyzer::new(config), &exporter)
        }
        None => {
            let mut storage = StorageManager::with_config(&args.data_dir, config)?;
            if let Some(output) = output {
                storage = storage.with_report_path(output);
            }
            storage.analyze()
        }
    };

    match result {
        Ok((path, report)) => {
            println!("\nGraph analysis saved to: {}\n", path.display());
            println!("{}", ReportExporter::to_document(&report)?);
            Ok(())
        }
        Err(AnalyzeError::Export { report, source, path }) => {
            warn!("Could not write {:?}: {}", path, source);
            println!("{}", ReportExporter::to_document(&report)?);
            Err(source.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn import(args: &Args, path: &Path) -> anyhow::Result<()> {
    let snapshot = read_snapshot(path)?;
    let storage = StorageManager::new(&args.data_dir)?;
    let catalog = storage.catalog();

    let added = catalog.import(snapshot)?;
    info!(
        categories = catalog.category_count(),
        similarities = catalog.similarity_count(),
        "Imported {} new similarity pairs",
        added
    );
    Ok(())
}

async fn serve(args: &Args, config: AnalysisConfig, http_port: u16) -> anyhow::Result<()> {
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", http_port);

    let storage = Arc::new(StorageManager::with_config(&args.data_dir, config)?);
    info!("Storage initialized");

    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(storage, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/api/", http_port);
    info!("Graph report: http://localhost:{}/admin/export-graph-report/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting catgraph v{}", env!("CARGO_PKG_VERSION"));

    let config = AnalysisConfig {
        max_nodes: args.max_nodes,
        max_edges: args.max_edges,
    };

    match &args.command {
        Command::Analyze { snapshot, output } => {
            analyze(&args, config, snapshot.as_ref(), output.as_ref())
        }
        Command::Import { snapshot } => import(&args, snapshot),
        Command::Serve { http_port } => serve(&args, config, *http_port).await,
    }
}
