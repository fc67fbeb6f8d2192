use clap::Parser;

#[derive(Parser)]
#[command(name = "marquee", about = "Terminal browser for the iTunes top-movies feed")]
struct Cli {
    /// Write debug logs to /tmp/marquee-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Storefront country code for the feed URL (overrides the config file).
    #[arg(long)]
    country: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/marquee-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("marquee debug log started — tail -f /tmp/marquee-debug.log");
    }

    let mut config = marquee_core::config::Config::load()
        .unwrap_or_else(|_| marquee_core::config::Config::defaults());
    if let Some(country) = cli.country {
        config.feed.country = country;
    }

    marquee_tui::run(config)
}
