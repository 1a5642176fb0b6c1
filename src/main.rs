mod crawler;
mod fetcher;
mod parser;
mod settings;
mod store;

use std::time::Instant;

use clap::{CommandFactory, Parser};
use tracing::info;

use crawler::Crawler;
use fetcher::HttpFetcher;
use parser::markup::Markup;
use settings::Settings;

const ABOUT: &str = "Collect this year's Filmarks reviews of this year's movies into a CSV";
const LONG_ABOUT: &str = "\
Collect this year's Filmarks reviews of this year's movies into a CSV.

Walks the user's review listing on https://filmarks.com/ newest-first and keeps
reviews posted this year of movies released this year. Results are written to
{filmarks_username}_reviews.csv when at least one review qualifies.

Filmarks（https://filmarks.com/）のユーザー名を指定すると、今年公開の映画に
今年投稿したレビューを取得して CSV に保存します。";

#[derive(Parser, Debug)]
#[command(name = "filmarks_reviews", about = ABOUT, long_about = LONG_ABOUT)]
struct Cli {
    /// Filmarks username whose reviews to collect
    filmarks_username: String,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "filmarks_reviews=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let Some(cli) = parse_cli(std::env::args_os()) else {
        return Ok(());
    };

    let t0 = Instant::now();
    let settings = Settings::load()?;
    let markup = Markup::compile(&settings.profile)?;
    let year = settings.target_year();
    info!(
        "Scraping {} reviews from {} (profile {})",
        year, cli.filmarks_username, markup.name
    );

    let fetcher = HttpFetcher::new();
    let result = Crawler::new(&fetcher, &markup, settings.base_url(), &year)
        .with_max_pages(settings.max_pages)
        .scrape(&cli.filmarks_username)
        .await;
    info!(
        "Scanned {} pages, kept {} reviews (stopped: {:?})",
        result.pages,
        result.reviews.len(),
        result.reason
    );

    if result.reviews.is_empty() {
        return Ok(());
    }

    let path = store::output_path(settings.output_dir.as_deref(), &cli.filmarks_username);
    store::save_reviews(&path, &result.reviews)?;
    println!("Data saved to {}", path.display());
    info!(
        "Wrote {} rows in {:.1}s",
        result.reviews.len(),
        t0.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Parse arguments. Help requests and usage errors print the long help and
/// yield `None`, so the caller exits with status 0.
fn parse_cli<I, T>(args: I) -> Option<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Some(cli),
        Err(_) => {
            let _ = Cli::command().print_long_help();
            None
        }
    }
}
