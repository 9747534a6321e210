use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tplserve")]
#[command(about = "Template site server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Render one path through the pipeline and print the result
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to (overrides server.bind_addr)
    #[arg(long)]
    pub address: Option<SocketAddr>,

    /// Configuration file (defaults to $TPLSERVE_CONFIG or config/tplserve.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Request path, e.g. `/about`
    #[arg(default_value = "/")]
    pub path: String,

    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::parse_from(["tplserve", "serve", "--address", "127.0.0.1:9000"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.address, Some("127.0.0.1:9000".parse().unwrap()));
                assert!(args.config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_render_default_path() {
        let cli = Cli::parse_from(["tplserve", "render", "--config", "site.toml"]);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.path, "/");
                assert_eq!(args.config, Some(PathBuf::from("site.toml")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
