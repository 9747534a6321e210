mod cli;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

use tplserve::config::{Config, ConfigError};
use tplserve::request::Request;
use tplserve::site::Site;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let config = load_config(args.config)?;
            let address = args.address.unwrap_or(config.server.bind_addr);
            tplserve::api::run(config, address).await?;
        }
        Commands::Render(args) => {
            let config = load_config(args.config)?;
            render(config, &args.path)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Status line goes to stderr, the body to stdout.
fn render(config: Config, path: &str) -> Result<(), AnyError> {
    let site = Site::new(Arc::new(config))?;
    let req = Request::builder().path(path).build();
    let (ctx, resp) = site.serve(&req);

    eprintln!(
        "{} {} ({} bytes, request {})",
        resp.status().as_u16(),
        resp.error().unwrap_or("ok"),
        resp.size(),
        ctx.request_id()
    );

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(resp.body())?;
    stdout.flush()?;
    Ok(())
}
