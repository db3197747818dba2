// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interceptor - deterministic specialist routing for deepfake screening.
//!
//! This is the binary entry point for the Interceptor service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod route;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use interceptor_config::InterceptorConfig;

/// Interceptor - deterministic specialist routing for deepfake screening.
#[derive(Parser, Debug)]
#[command(name = "interceptor", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Route a local file and print the routing report as JSON.
    Route {
        /// File to route.
        path: PathBuf,
        /// Filename to route under instead of the path's own name.
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => interceptor_config::load_and_validate_path(path),
        None => interceptor_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            interceptor_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Route { path, name }) => route::run_route(&config, &path, name.as_deref()),
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("interceptor: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_config(config: &InterceptorConfig) -> Result<(), interceptor_core::InterceptorError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| interceptor_core::InterceptorError::Config(e.to_string()))?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_route_with_name() {
        let cli = Cli::parse_from(["interceptor", "route", "/tmp/a.bin", "--name", "clip.webm"]);
        match cli.command {
            Some(Commands::Route { path, name }) => {
                assert_eq!(path, PathBuf::from("/tmp/a.bin"));
                assert_eq!(name.as_deref(), Some("clip.webm"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_accepts_global_config_flag() {
        let cli = Cli::parse_from(["interceptor", "serve", "--config", "/etc/x.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/x.toml")));
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn default_config_renders_as_toml() {
        let config = InterceptorConfig::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(rendered.contains("[server]"));
        assert!(rendered.contains("[routing]"));
        let reparsed = interceptor_config::load_and_validate_str(&rendered).unwrap();
        assert_eq!(
            reparsed.routing.baseline_model,
            config.routing.baseline_model
        );
    }
}
