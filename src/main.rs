use std::env;
use std::str::FromStr;
use std::time::Duration;
use tokio::fs;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::trace;
use tracing::warn;
use tracing::Level;

use market_panel::config::{Config, ConfigError};
use market_panel::market::fetcher::CoinCapClient;
use market_panel::market::req_consumer::consume_asset_list_requests;
use market_panel::news::curation::{render_editors_picks, render_trending, FrontPage, LoadMore};
use market_panel::news::post::read_posts;
use market_panel::panel::runner::{join_task, spawn_panel, PanelHandle, PanelUpdate};

const DEFAULT_CONFIG_PATH: &str = "app_config.json";

async fn read_config(file_path: &str) -> Result<Config, ConfigError> {
    let config_string = fs::read_to_string(file_path).await?;
    Config::from_json(config_string.as_str())
}

async fn print_news_sidebar(posts_path: &str) {
    let posts = match read_posts(posts_path).await {
        Ok(posts) => posts,
        Err(error) => {
            warn!("Error reading posts from {}, skipping news sidebar: {}", posts_path, error);
            return;
        }
    };

    let front_page = FrontPage::from_posts(&posts);
    debug!(
        "Front page: {} latest, {} featured, {} editor's picks, {} trending",
        front_page.latest.len(),
        front_page.featured.len(),
        front_page.editors_picks.len(),
        front_page.trending.len()
    );

    let pager = LoadMore::default();
    println!("Latest News");
    for post in pager.visible(&front_page.latest) {
        println!("  [{}] {} /post/{}", post.category.to_uppercase(), post.title, post.id);
    }
    if pager.has_more(front_page.latest.len()) {
        println!("  ({} more)", front_page.latest.len() - pager.visible(&front_page.latest).len());
    }

    println!("{}", render_trending(&front_page.trending));
    if let Some(picks) = render_editors_picks(&front_page.editors_picks) {
        println!("{}", picks);
    }
}

fn display_update(update: &PanelUpdate) {
    println!("[{}]\n{}", update.panel, update.view.to_text(update.kind));
}

#[tokio::main]
async fn main() {
    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = read_config(&config_path).await;

    let level = config
        .as_ref()
        .ok()
        .and_then(|config| config.log_level.as_deref())
        .and_then(|level| Level::from_str(level).ok())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = match config {
        Ok(config) => config,
        Err(error) => {
            error!("Error reading config file {}: {}", config_path, error);
            return;
        }
    };

    let market_client = match CoinCapClient::new(
        &config.market_api_url,
        config.market_api_key.clone(),
        Duration::from_secs(config.request_timeout_secs),
    ) {
        Ok(client) => client,
        Err(error) => {
            error!("Error creating market data client: {}", error);
            return;
        }
    };

    if let Some(posts_path) = &config.posts_path {
        print_news_sidebar(posts_path).await;
    }

    let (asset_req_sender, asset_req_receiver) = mpsc::unbounded_channel();
    let (view_sender, mut view_receiver) = mpsc::unbounded_channel();

    trace!("Starting asset list request consumer...");
    let consumer_task = tokio::spawn(async move {
        consume_asset_list_requests(asset_req_receiver, market_client).await;
    });

    let display_task = tokio::spawn(async move {
        while let Some(update) = view_receiver.recv().await {
            display_update(&update);
        }
    });

    let mut panels: Vec<PanelHandle> = Vec::new();
    for panel_config in config.panels {
        debug!(
            "Loaded config for panel: {}, kind {:?}, {} assets every {}s, rotating every {}s",
            panel_config.name,
            panel_config.kind,
            panel_config.limit(),
            panel_config.refresh_secs(),
            panel_config.rotate_secs()
        );
        panels.push(spawn_panel(
            panel_config,
            asset_req_sender.clone(),
            view_sender.clone(),
        ));
    }
    drop(asset_req_sender);
    drop(view_sender);

    if panels.is_empty() {
        warn!("No panels configured, nothing to display");
    }

    trace!("Waiting for Ctrl+C signal...");
    if let Err(error) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C, stopping: {}", error);
    } else {
        info!("Ctrl+C pressed. Stopping...");
    }

    for panel in panels {
        let name = panel.name().to_string();
        panel.teardown().await;
        info!("Panel {} torn down", name);
    }

    // every request sender is gone once the panels are down, so the consumer ends too
    join_task("Asset list consumer", consumer_task).await;
    join_task("Display", display_task).await;
    info!("All panels finished.");
}
