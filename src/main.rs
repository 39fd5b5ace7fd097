use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::{info, warn};

use privacy_sweep::export;
use privacy_sweep::fetcher::{FetchOptions, Fetcher};
use privacy_sweep::identity;
use privacy_sweep::profile::Profile;
use privacy_sweep::settings::{secs, Settings};
use privacy_sweep::sites;
use privacy_sweep::sweep::{sweep, SweepOptions};
use privacy_sweep::ResultItem;

#[derive(Parser)]
#[command(name = "privacy-sweep", about = "People/broker discovery + opt-out helpers")]
struct Cli {
    /// Free-form string with a name and any of: city/state, phone, email
    #[arg(long)]
    query: Option<String>,
    /// Comma-separated site keys or groups (peoplecore,google,startpage,brokers_plus,more_people) or 'all'
    #[arg(long, default_value = "peoplecore")]
    sites: String,
    /// Fetch search pages and extract candidate profile URLs (best-effort, no JS)
    #[arg(long)]
    scrape: bool,
    /// Open generated search URLs in the default browser
    #[arg(long)]
    open: bool,
    /// Max number of tabs to open
    #[arg(long, default_value_t = 999)]
    limit_open: usize,
    /// Save --query as the default profile
    #[arg(long)]
    save_profile: bool,
    /// Use the saved profile when --query is omitted
    #[arg(long)]
    use_profile: bool,
    /// Print opt-out links for the selected sites
    #[arg(long)]
    optout: bool,
    /// Open opt-out links in the browser
    #[arg(long)]
    open_optout: bool,
    /// Only output discovery links (Google/Startpage); never generate or open broker URLs
    #[arg(long)]
    safe_discovery: bool,
    /// With --open, only open Google/Startpage links
    #[arg(long)]
    no_open_non_google: bool,
    /// Write CSV to this path
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write JSON to this path
    #[arg(long = "json")]
    json_out: Option<PathBuf>,
    /// Delay between sites when scraping, in seconds
    #[arg(long)]
    delay: Option<f64>,
    /// Per-request timeout when scraping, in seconds
    #[arg(long)]
    timeout: Option<f64>,
    /// Settings file (toml/json/yaml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    let result = run(cli, settings).await;

    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "done");
    result
}

async fn run(cli: Cli, settings: Settings) -> Result<()> {
    let profile_path = settings.profile_path();
    let mut profile = Profile::load(&profile_path);

    let mut query = cli.query.clone();
    if cli.use_profile && query.is_none() {
        query = Some(profile.default_query.clone().unwrap_or_default());
    }
    let has_query = query.as_deref().is_some_and(|q| !q.is_empty()) || cli.use_profile;

    if !has_query && !(cli.optout || cli.open_optout) {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "Provide --query or use --use-profile after saving one with --save-profile.",
            )
            .exit();
    }

    if cli.save_profile {
        match query.as_deref().filter(|q| !q.is_empty()) {
            Some(q) => {
                profile.default_query = Some(q.to_string());
                profile.save(&profile_path)?;
                println!("Saved profile to {}", profile_path.display());
            }
            None => warn!("--save-profile needs --query"),
        }
    }

    let site_arg = if cli.safe_discovery {
        sites::safe_discovery_sites(&cli.sites)
    } else {
        cli.sites.clone()
    };

    let identity = identity::parse(query.as_deref().unwrap_or(""));
    if has_query {
        println!("Parsed query: {}", serde_json::to_string(&identity)?);
    }

    let catalog = sites::search_urls(&identity);
    let wanted = sites::expand_sites(&site_arg);
    let mut selected = sites::select(&catalog, &wanted);
    if cli.safe_discovery {
        selected.retain(|s| sites::is_discovery(&s.site));
    }

    if cli.optout || cli.open_optout {
        print_optouts(&wanted, cli.open_optout, cli.limit_open);
        if !has_query {
            return Ok(());
        }
    }

    println!("\nSearch URLs:");
    let mut opened = 0;
    for target in &selected {
        println!("- {:<22} {}", target.site, target.url);
        if cli.open && opened < cli.limit_open {
            if cli.no_open_non_google && !sites::is_discovery(&target.site) {
                continue;
            }
            if open_in_browser(&target.url) {
                opened += 1;
            }
        }
    }
    println!();

    let mut rows: Vec<ResultItem> = Vec::new();
    if cli.scrape && !selected.is_empty() {
        let fetcher = Fetcher::new(&FetchOptions {
            user_agent: settings.user_agent.clone(),
        });
        if fetcher.is_available() {
            let opts = SweepOptions {
                timeout: cli.timeout.map(secs).unwrap_or_else(|| settings.timeout()),
                delay: cli.delay.map(secs).unwrap_or_else(|| settings.delay()),
            };
            rows = sweep(&selected, &identity, &fetcher, opts).await;
        } else {
            println!("Scrape requested, but this build has no HTTP/HTML support (enable the `scrape` feature).");
        }
    }

    if !rows.is_empty() {
        println!("\nCandidates:");
        for item in &rows {
            println!("{}", export::render_candidate(item));
        }
    } else if cli.scrape {
        println!("No scraped candidates (site may require JS/captcha; link-generation mode still useful).");
    }

    if let Some(path) = &cli.out {
        export::write_csv(path, &rows)?;
        println!("Wrote CSV: {}", path.display());
    }
    if let Some(path) = &cli.json_out {
        export::write_json(path, &rows)?;
        println!("Wrote JSON: {}", path.display());
    }

    Ok(())
}

/// Opt-out endpoints for the requested site keys; `all` lists the whole table.
fn print_optouts(wanted: &[String], open: bool, limit: usize) {
    let keys: Vec<&str> = if wanted.iter().any(|w| w == "all") {
        sites::OPT_OUT_LINKS.iter().map(|(k, _)| *k).collect()
    } else {
        wanted.iter().map(String::as_str).collect()
    };

    println!("\nOpt-out links:");
    let mut opened = 0;
    for key in keys {
        let Some(url) = sites::opt_out_url(key) else {
            continue;
        };
        println!("- {:<18} {}", key, url);
        if open && opened < limit && open_in_browser(url) {
            opened += 1;
        }
    }
    println!();
}

fn open_in_browser(url: &str) -> bool {
    match open::that(url) {
        Ok(()) => true,
        Err(e) => {
            warn!(url, error = %e, "could not open browser");
            false
        }
    }
}
