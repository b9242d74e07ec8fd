use chrono::Utc;
use clap::{Parser, Subcommand};
use doc_context_core::{
    ContextProvider, DocsLookupProvider, IndexLoader, ItemParams, RemoteSearchEngine,
    SearchEngine, TermScanEngine,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "doc-context", version)]
struct Cli {
    /// Corpus index locator (file:// or http(s)://).
    #[arg(long, env = "DOC_CONTEXT_INDEX")]
    index: String,

    /// Remote search service endpoint; the bundled term-scan engine is used when unset.
    #[arg(long)]
    search_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the provider capability descriptor as JSON.
    Capabilities,
    /// Return context items for an optional query.
    Items {
        /// Free-text query; omit to list the whole corpus.
        #[arg(long)]
        query: Option<String>,
        /// Emit the items as a JSON array instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Print full document content in the text output.
        #[arg(long, default_value_t = false)]
        include_content: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "doc-context boot"
    );

    let index = IndexLoader::new()
        .load(&cli.index)
        .await
        .map_err(|error| anyhow::anyhow!(error.to_string()))?;

    match cli.search_url {
        Some(endpoint) => {
            let provider = DocsLookupProvider::new(index, RemoteSearchEngine::new(endpoint));
            run(&provider, cli.command).await
        }
        None => {
            let engine = TermScanEngine::from_index(&index);
            let provider = DocsLookupProvider::new(index, engine);
            run(&provider, cli.command).await
        }
    }
}

async fn run<S>(provider: &DocsLookupProvider<S>, command: Command) -> anyhow::Result<()>
where
    S: SearchEngine + Send + Sync,
{
    match command {
        Command::Capabilities => {
            let capabilities = provider.capabilities();
            println!("{}", serde_json::to_string_pretty(&capabilities)?);
        }
        Command::Items {
            query,
            json,
            include_content,
        } => {
            let items = provider
                .items(&ItemParams { query })
                .await
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
                return Ok(());
            }

            for item in &items {
                println!("title: {}", item.title);
                if let Some(url) = &item.url {
                    println!("  url={url}");
                }
                if let Some(preview) = &item.preview {
                    println!("  preview: {preview}");
                }
                if include_content {
                    if let Some(content) = &item.content {
                        println!("  content:\n{content}");
                    }
                }
            }
            println!("{} item(s)", items.len());
        }
    }

    Ok(())
}
