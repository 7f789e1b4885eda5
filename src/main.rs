//! openshelf command-line shell.
//!
//! Wires the repositories and a screen controller for the chosen
//! command, fires the initial intent, and renders view-state snapshots
//! until the screen settles. Rendering is a pure function of the latest
//! snapshot; the only way back into the controllers is an intent call.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use openshelf::config::{Config, ConfigStore};
use openshelf::data::{
    AccountRepository, ArchiveClient, FavoritesRepository, ItemRepository, MediaType,
    RecentSearchRepository,
};
use openshelf::navigation;
use openshelf::screens::{
    HomeData, HomepageController, ItemDetailController, ItemDetailData, LibraryController,
    LibraryData, SearchController, SearchData,
};
use openshelf::state::{MessageId, ViewState};

/// How long the state must stay unchanged before a screen counts as
/// settled.
const QUIET_PERIOD: Duration = Duration::from_millis(400);

#[derive(Parser)]
#[command(
    name = "openshelf",
    about = "Terminal client for an open content archive",
    version
)]
struct Cli {
    /// Path to an alternate config file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the catalog.
    Search { keyword: String },
    /// Show one item's metadata and files.
    Item { id: String },
    /// Show the featured homepage feed.
    Home,
    /// Show the library of favorites.
    Library {
        /// Toggle this item's favorite status first.
        #[arg(long)]
        toggle: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let (config, path) = match &cli.config {
        Some(path) => (Config::load_from(path)?, path.clone()),
        None => (Config::load()?, Config::config_path()),
    };
    let store = ConfigStore::new(config, path);

    let api = Arc::new(ArchiveClient::new(&store.api()).context("building catalog client")?);
    let items = ItemRepository::new();
    let favorites = FavoritesRepository::new();
    let recent = RecentSearchRepository::new();
    let account = AccountRepository::new();
    let (navigator, _events) = navigation::channel();

    match cli.command {
        Command::Search { keyword } => {
            let controller = SearchController::new(api, items, recent, navigator);
            controller.search(&keyword);
            let last = drive(controller.state(), render_search).await;
            if let Some(id) = message_id(&last) {
                controller.dismiss_message(id);
            }
            controller.close();
        }
        Command::Item { id } => {
            let controller = ItemDetailController::new(&id, api, items, favorites, navigator);
            controller.refresh();
            let last = drive(controller.state(), render_detail).await;
            if let Some(id) = message_id(&last) {
                controller.dismiss_message(id);
            }
            controller.close();
        }
        Command::Home => {
            let controller = HomepageController::new(api, items, account, navigator);
            controller.refresh();
            let last = drive(controller.state(), render_home).await;
            if let Some(id) = message_id(&last) {
                controller.dismiss_message(id);
            }
            controller.close();
        }
        Command::Library { toggle } => {
            if let Some(item_id) = toggle {
                // The item has to be in the local catalog before it can
                // be favorited; fetch it the way the detail screen does.
                let detail = ItemDetailController::new(
                    &item_id,
                    api,
                    items.clone(),
                    favorites.clone(),
                    navigator.clone(),
                );
                detail.refresh();
                drive(detail.state(), |_: &ItemDetailData| {}).await;
                detail.toggle_favorite();
                drive(detail.state(), |_: &ItemDetailData| {}).await;
                detail.close();
            }
            let controller = LibraryController::new(items, favorites, navigator);
            let last = drive(controller.state(), render_library).await;
            if let Some(id) = message_id(&last) {
                controller.dismiss_message(id);
            }
            controller.close();
        }
    }

    Ok(())
}

fn message_id<T>(state: &ViewState<T>) -> Option<MessageId> {
    state.message.as_ref().map(|message| message.id)
}

/// Render snapshots until the screen settles: not loading, and no state
/// change for a quiet period. Returns the final snapshot.
async fn drive<T: Clone>(
    mut state: watch::Receiver<ViewState<T>>,
    render_data: impl Fn(&T),
) -> ViewState<T> {
    let mut shown_message: Option<MessageId> = None;
    loop {
        let snapshot = state.borrow_and_update().clone();
        if let Some(message) = &snapshot.message {
            if shown_message != Some(message.id) {
                println!("! {}", message.text);
                shown_message = Some(message.id);
            }
        }
        match tokio::time::timeout(QUIET_PERIOD, state.changed()).await {
            Ok(Ok(())) => continue,
            // The state task is gone; render what we have.
            Ok(Err(_)) => {
                if let Some(data) = &snapshot.data {
                    render_data(data);
                }
                return snapshot;
            }
            Err(_) if snapshot.is_loading => continue,
            Err(_) => {
                if let Some(data) = &snapshot.data {
                    render_data(data);
                }
                return snapshot;
            }
        }
    }
}

fn media_tag(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Texts => "text",
        MediaType::Audio => "audio",
    }
}

fn render_search(data: &SearchData) {
    if !data.recent_searches.is_empty() {
        println!("recent: {}", data.recent_searches.join(", "));
    }
    println!("{} result(s)", data.results.len());
    for item in &data.results {
        let creator = item.creator.as_deref().unwrap_or("unknown");
        println!("  [{:5}] {}  ({creator})  {}", media_tag(item.media_type), item.title, item.id);
    }
}

fn render_detail(data: &ItemDetailData) {
    let Some(detail) = &data.detail else {
        println!("no detail loaded");
        return;
    };
    let favorite = if data.is_favorite { " ★" } else { "" };
    println!("{}{favorite}", detail.title);
    if let Some(creator) = &detail.creator {
        println!("by {creator}");
    }
    if !detail.description.is_empty() {
        let mut description: String = detail.description.chars().take(240).collect();
        if description.len() < detail.description.len() {
            description.push('…');
        }
        println!("{description}");
    }
    println!("{} file(s):", detail.files.len());
    for file in &detail.files {
        println!("  {} ({})", file.name, file.format);
    }
    if !data.by_creator.is_empty() {
        println!("more by this creator:");
        for item in &data.by_creator {
            println!("  {}  {}", item.title, item.id);
        }
    }
}

fn render_home(data: &HomeData) {
    match &data.user {
        Some(user) => println!("signed in as {}", user.display_name),
        None => println!("browsing anonymously"),
    }
    for rail in &data.homepage.rails {
        println!("{}:", rail.title);
        for item in &rail.items {
            println!("  [{:5}] {}  {}", media_tag(item.media_type), item.title, item.id);
        }
    }
    if !data.homepage.recent.is_empty() {
        println!("recently opened:");
        for item in &data.homepage.recent {
            println!("  {}  {}", item.title, item.id);
        }
    }
}

fn render_library(data: &LibraryData) {
    println!("{} favorite(s)", data.favorites.len());
    for item in &data.favorites {
        let creator = item.creator.as_deref().unwrap_or("unknown");
        println!("  [{:5}] {}  ({creator})  {}", media_tag(item.media_type), item.title, item.id);
    }
}
