mod cli;

use linkmeta::{config, LinkResolver};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "linkmeta=trace,linkmeta_common=trace,reqwest=debug".to_string()
        } else {
            "linkmeta=info,linkmeta_common=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve { url, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(resolve_url(&url, cli.config.as_deref(), json))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("linkmeta {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn resolve_url(url: &str, config_path: Option<&std::path::Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    if url.trim().is_empty() {
        anyhow::bail!("URL cannot be empty");
    }

    let resolver = LinkResolver::new(&config);
    let resolution = resolver.resolve_detailed(url).await;

    if json {
        let output = serde_json::json!({
            "title": resolution.triple.title,
            "favicon": resolution.triple.favicon,
            "summary": resolution.triple.summary,
            "provenance": resolution.provenance.as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Title:      {}", resolution.triple.title);
        println!("Favicon:    {}", resolution.triple.favicon);
        println!("Summary:    {}", resolution.triple.summary);
        println!("Provenance: {}", resolution.provenance);
    }

    Ok(())
}

fn validate_config(config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    println!("Configuration is valid");
    println!("  Fetch timeout: {}s", config.fetch.timeout_secs);
    println!("  Retries: {}", config.fetch.retries);
    println!("  Max redirects: {}", config.fetch.max_redirects);
    println!(
        "  Backoff window: {}-{}ms",
        config.fetch.backoff_min_ms, config.fetch.backoff_max_ms
    );
    println!("  Summary endpoint: {}", config.summary.endpoint);
    Ok(())
}
