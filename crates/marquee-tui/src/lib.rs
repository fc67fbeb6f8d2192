//! marquee TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use app::FeedHandles;
use marquee_core::config::Config;
use marquee_core::FeedList;
use tokio::sync::mpsc;

/// Start the TUI: spawn the two fetch tasks on a private tokio runtime and
/// run the event loop on the calling thread until quit.
pub fn run(config: Config) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let _enter = runtime.enter();

    let client = reqwest::Client::new();

    let (popular_pub, popular_rx) = marquee_core::state::channel();
    let (top_pub, top_rx) = marquee_core::state::channel();
    let (refresh_popular, popular_refresh_rx) = mpsc::channel(1);
    let (refresh_top, top_refresh_rx) = mpsc::channel(1);

    marquee_feeds::spawn(
        client.clone(),
        marquee_feeds::feed_url(&config.feed.country, config.feed.popular_limit),
        FeedList::Popular,
        popular_pub,
        popular_refresh_rx,
    );
    marquee_feeds::spawn(
        client,
        marquee_feeds::feed_url(&config.feed.country, config.feed.top_limit),
        FeedList::TopTen,
        top_pub,
        top_refresh_rx,
    );

    let feeds = FeedHandles {
        popular_rx,
        top_rx,
        refresh_popular,
        refresh_top,
    };

    let theme = theme::Theme::load_default();
    App::new(config, theme, feeds).run()
}
