use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use shakesearch::api::HttpSearchService;
use shakesearch::config::{CONFIG, Config};
use shakesearch::data_models::SearchUpdate;
use shakesearch::emphasis::ANSI_MARKERS;
use shakesearch::preview_controller::PreviewController;
use shakesearch::query_controller::QueryController;
use shakesearch::terminal::TerminalRenderer;

#[derive(Parser, Debug)]
#[command(name = "shakesearch", about = "Search the complete works from the terminal")]
struct Cli {
    /// Scheme and host of the search service
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Path prefix of the search service
    #[arg(long, global = true)]
    base_path: Option<String>,

    /// Log requests and session changes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one query and print a page of results
    Search {
        query: String,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Results per page
        #[arg(long)]
        length: Option<u32>,
    },
    /// Print the full text of one result
    Preview { id: String },
    /// Line-driven session: type a query, `:p N` for page N, `:v N` to preview row N, `:q` to quit
    Interactive,
}

type Terminal = TerminalRenderer<Stdout>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let mut config: Config = CONFIG.clone();
    if let Some(origin) = cli.origin {
        config.origin = origin;
    }
    if let Some(base_path) = cli.base_path {
        config.base_path = base_path;
    }

    let service = Arc::new(
        HttpSearchService::from_config(&config).context("Failed to set up search client")?,
    );
    let renderer = Arc::new(TerminalRenderer::new(io::stdout()));
    let queries = QueryController::new(service.clone(), renderer.clone(), config.controller);
    let previews =
        PreviewController::new(service, renderer.clone()).with_markers(ANSI_MARKERS);

    match cli.command {
        Command::Search {
            query,
            page,
            length,
        } => {
            let mut update = SearchUpdate::submit(query).with_page(page.saturating_sub(1));
            if let Some(length) = length {
                update = update.with_page_length(length);
            }
            queries.search(update).await?;
        }
        Command::Preview { id } => {
            previews.preview(id).await?;
        }
        Command::Interactive => {
            interactive(&queries, &previews, &renderer).await?;
        }
    }
    Ok(())
}

async fn interactive(
    queries: &QueryController<HttpSearchService, Terminal>,
    previews: &PreviewController<HttpSearchService, Terminal>,
    renderer: &Terminal,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));

        let pending = match cmd {
            "" => continue,
            ":q" => break,
            ":p" => match arg.trim().parse::<u64>() {
                Ok(label) => renderer.click_page(label),
                Err(_) => None,
            },
            ":v" => arg
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|row| renderer.row_id(row))
                .map(|id| previews.preview(id)),
            _ => Some(queries.submit(line)),
        };

        match pending {
            Some(handle) => handle.await?,
            None => eprintln!("nothing to do for {line:?}"),
        }
    }
    Ok(())
}
