mod api;
mod app;
mod config;
mod input;
mod player;
mod storage;
mod tui;

use anyhow::Context;
use api::{HttpApi, LyricsApi};
use clap::{Parser, Subcommand};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lyrebird", version, about = "Song lyrics browser for the terminal")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui {
        /// Search for this artist on startup.
        #[arg(long)]
        artist: Option<String>,
    },
    /// Search an artist's songs and print them (headless).
    Search { artist: String },
    /// Print artist details and top tracks (headless).
    Artist { artist: String },
    /// Print the lyrics of a song page (headless).
    Lyrics { url: String },
    /// Print an English translation of a song's lyrics (headless).
    Translate { url: String },
    /// Print an explanation of a song's lyrics (headless).
    Explain { url: String },
    /// List recent searches.
    Recent {
        /// Forget all recent searches.
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let command = cli.command.unwrap_or(Command::Tui { artist: None });

    init_logging(&cfg, matches!(command, Command::Tui { .. }))?;

    match command {
        Command::Tui { artist } => {
            let cfg_path = match cli.config.clone() {
                Some(p) => p,
                None => config::default_config_path().context("default config path")?,
            };
            let mut app = app::App::new(cfg.clone(), cfg_path)?;
            let initial = app.startup_artist(artist);
            let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            app.run(terminal.terminal_mut(), initial).await?;
        }
        Command::Search { artist } => {
            let term = artist.trim();
            if term.is_empty() {
                anyhow::bail!("artist name is empty");
            }
            let api = HttpApi::new(&cfg.api)?;
            let found = api.search_artist(term).await.context("search artist")?;

            if found.songs.is_empty() {
                println!("No songs found for {term}");
                return Ok(());
            }

            let store = storage::Storage::open(&cfg.database_path()).context("open storage")?;
            let mut recent = storage::RecentSearches::load(store, cfg.search.recent_limit);
            recent.add(term);

            for (i, song) in found.songs.iter().enumerate() {
                println!("{:03}. {}  ({})", i + 1, song.title, song.url);
            }
        }
        Command::Artist { artist } => {
            let api = HttpApi::new(&cfg.api)?;
            let enriched = api.enhanced_search(artist.trim()).await.context("enhanced search")?;
            match &enriched.metadata {
                Some(meta) => {
                    println!("{}", meta.name);
                    println!(
                        "{} followers, popularity {}/100",
                        app::profile::group_thousands(meta.followers),
                        meta.popularity
                    );
                    println!("{}", app::profile::genres_line(meta));
                }
                None => println!("No artist details for {artist}"),
            }
            for (i, t) in enriched
                .top_tracks
                .iter()
                .take(app::profile::MAX_TOP_TRACKS)
                .enumerate()
            {
                let preview = if t.preview_url.is_some() { "" } else { "  (no preview)" };
                println!("{:02}. {} ({}){}", i + 1, t.name, t.album_name, preview);
            }
        }
        Command::Lyrics { url } => {
            let api = HttpApi::new(&cfg.api)?;
            let lyrics = api.fetch_lyrics(&url).await.context("fetch lyrics")?;
            println!("{lyrics}");
        }
        Command::Translate { url } => {
            let api = HttpApi::new(&cfg.api)?;
            let lyrics = api.fetch_lyrics(&url).await.context("fetch lyrics")?;
            let text = api.translate(&lyrics).await.context("translate")?;
            println!("{text}");
        }
        Command::Explain { url } => {
            let api = HttpApi::new(&cfg.api)?;
            let lyrics = api.fetch_lyrics(&url).await.context("fetch lyrics")?;
            let text = api.explain(&lyrics).await.context("explain")?;
            println!("{text}");
        }
        Command::Recent { clear } => {
            let store = storage::Storage::open(&cfg.database_path()).context("open storage")?;
            let mut recent = storage::RecentSearches::load(store, cfg.search.recent_limit);
            if clear {
                recent.clear();
                println!("Cleared recent searches.");
            } else if recent.is_empty() {
                println!("No recent searches.");
            } else {
                for term in recent.terms() {
                    println!("{term}");
                }
            }
        }
    }

    Ok(())
}

/// TUI mode logs to a file so output never lands on the alternate screen.
fn init_logging(cfg: &config::Config, tui_mode: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if tui_mode {
        let path = cfg.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
