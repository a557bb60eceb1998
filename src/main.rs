use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use wordspace_api::RestApi;
use wordspace_core::{VectorStore, WordCollection};
use wordspace_explore::{Explorer, ExplorerConfig};
use wordspace_store::{RemoteStore, StoreConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StoreKind {
    /// Load vectors from a text file into memory
    Memory,
    /// Query a Qdrant-compatible vector store over HTTP
    Remote,
}

/// Explore a word-embedding space over HTTP
#[derive(Parser, Debug)]
#[command(name = "wordspace")]
#[command(about = "Semantic neighbors, analogies, paths and projections over word embeddings", long_about = None)]
struct Args {
    /// HTTP API port
    #[arg(long, env = "WORDSPACE_HTTP_PORT", default_value_t = 8000)]
    http_port: u16,

    /// Log level
    #[arg(long, env = "WORDSPACE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Which vector store backs the queries
    #[arg(long, env = "WORDSPACE_STORE", value_enum, default_value_t = StoreKind::Memory)]
    store: StoreKind,

    /// Text embedding file ("word v1 v2 ... vD" per line) for the memory store
    #[arg(long, env = "WORDSPACE_VECTORS")]
    vectors: Option<PathBuf>,

    /// Base URL of the remote store
    #[arg(long, env = "WORDSPACE_STORE_URL", default_value = "http://localhost:6333")]
    store_url: String,

    /// Collection holding the word vectors
    #[arg(long, env = "WORDSPACE_COLLECTION", default_value = "words")]
    collection: String,

    /// API key sent to the remote store
    #[arg(long, env = "WORDSPACE_STORE_API_KEY")]
    store_api_key: Option<String>,

    /// Attempts per remote operation before giving up
    #[arg(long, env = "WORDSPACE_RETRY_ATTEMPTS", default_value_t = 3)]
    retry_attempts: u32,

    /// Fixed delay between attempts
    #[arg(long, env = "WORDSPACE_RETRY_DELAY_MS", default_value_t = 1000)]
    retry_delay_ms: u64,

    /// Per-request timeout against the remote store
    #[arg(long, env = "WORDSPACE_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Fixed PCA seed for reproducible coordinates
    #[arg(long, env = "WORDSPACE_PROJECTION_SEED")]
    projection_seed: Option<u64>,
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
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting wordspace v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn VectorStore> = match args.store {
        StoreKind::Memory => {
            let path = args
                .vectors
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("--vectors is required for the memory store"))?;
            Arc::new(WordCollection::load_text(path)?)
        }
        StoreKind::Remote => {
            let config = StoreConfig {
                url: args.store_url.clone(),
                collection: args.collection.clone(),
                api_key: args.store_api_key.clone(),
                retry_attempts: args.retry_attempts,
                retry_delay_ms: args.retry_delay_ms,
                request_timeout_secs: args.request_timeout_secs,
            };
            info!("Remote store: {} (collection '{}')", config.url, config.collection);
            let remote = RemoteStore::new(config);
            // Warm the connection; a failure here is retried on first use
            if let Err(e) = remote.connect().await {
                tracing::warn!("Store not reachable yet: {}", e);
            }
            Arc::new(remote)
        }
    };
    info!("Store initialized: {}", store.store_name());

    let config = ExplorerConfig {
        projection_seed: args.projection_seed,
        ..ExplorerConfig::default()
    };
    let explorer = Explorer::with_config(store, config);

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(explorer, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/api", http_port);

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
