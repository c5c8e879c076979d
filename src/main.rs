mod cli;

use tdarr_bridge::{
    config::{self, FileConfigStore, Settings},
    server, AppRef, QueueQuery, TdarrIntegration,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AppArgs, Cli, Commands};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "tdarr_bridge=debug,tower_http=debug".to_string()
        } else {
            "tdarr_bridge=info,tower_http=info".to_string()
        }
    });

    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut settings = config::load_settings_or_default(cli.config.as_deref())?;
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(server::start_server(settings))
        }
        Commands::Statistics { app } => {
            let integration = integration(cli.config.as_deref())?;
            let app = app_ref(app);
            run(async move { integration.statistics(&app).await })
        }
        Commands::Workers { app } => {
            let integration = integration(cli.config.as_deref())?;
            let app = app_ref(app);
            run(async move { integration.workers(&app).await })
        }
        Commands::Queue {
            app,
            health_checks,
            page_size,
            page,
        } => {
            let integration = integration(cli.config.as_deref())?;
            let query = QueueQuery {
                app_id: app.app_id,
                config_name: app.config_set,
                show_health_checks_in_queue: health_checks,
                page_size,
                page,
            };
            run(async move { integration.queue(&query).await })
        }
        Commands::Validate { file } => {
            let path = file.or(cli.config);
            validate(path.as_deref())
        }
        Commands::Version => {
            println!("tdarr-bridge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn integration(config_path: Option<&Path>) -> Result<TdarrIntegration> {
    let settings = config::load_settings_or_default(config_path)?;
    let store = FileConfigStore::new(settings.configs.dir);
    Ok(TdarrIntegration::new(Arc::new(store)))
}

fn app_ref(args: AppArgs) -> AppRef {
    AppRef {
        app_id: args.app_id,
        config_name: args.config_set,
    }
}

/// Run one operation and print its result as JSON
fn run<T, F>(operation: F) -> Result<()>
where
    T: Serialize,
    F: std::future::Future<Output = tdarr_bridge::Result<T>>,
{
    let rt = tokio::runtime::Runtime::new()?;
    let output = rt.block_on(operation)?;
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn validate(path: Option<&Path>) -> Result<()> {
    let settings: Settings = match path {
        Some(p) => {
            println!("Validating settings: {:?}", p);
            config::load_settings(p)?
        }
        None => {
            println!("Validating default settings");
            config::load_settings_or_default(None)?
        }
    };

    println!("Settings are valid!");
    println!("  Server: {}:{}", settings.server.host, settings.server.port);
    println!("  Config sets: {:?}", settings.configs.dir);

    let store = FileConfigStore::new(&settings.configs.dir);
    if settings.configs.dir.is_dir() {
        let rt = tokio::runtime::Runtime::new()?;
        let mut found = 0;
        for entry in std::fs::read_dir(&settings.configs.dir)? {
            let path = entry?.path();
            let Some(name) = path
                .extension()
                .filter(|ext| *ext == "json")
                .and_then(|_| path.file_stem())
                .and_then(|stem| stem.to_str())
            else {
                continue;
            };
            found += 1;
            match rt.block_on(config::ConfigStore::load(&store, name)) {
                Ok(set) => println!("  {}: {} app(s)", name, set.apps.len()),
                Err(e) => anyhow::bail!("Config set '{}' is invalid: {}", name, e),
            }
        }
        if found == 0 {
            println!("  No config sets found");
        }
    }

    Ok(())
}
