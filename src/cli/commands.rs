//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};

use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::{Event, Logger};
use crate::storage::JsonFileBackend;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            data_file,
        } => {
            let mut config = load_config(config.as_deref())?;
            apply_overrides(&mut config, port, data_file)?;
            serve(config)
        }
        Command::Init { config, data_file } => {
            let mut config = load_config(config.as_deref())?;
            apply_overrides(&mut config, None, data_file)?;
            init(&config)
        }
    }
}

/// Load configuration from an optional file, then the process environment
pub fn load_config(path: Option<&Path>) -> CliResult<ServerConfig> {
    load_config_with(path, |key| std::env::var(key).ok())
}

fn load_config_with<F>(path: Option<&Path>, lookup: F) -> CliResult<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
            })?;
            ServerConfig::from_json(&content).map_err(CliError::config_error)?
        }
        None => ServerConfig::default(),
    };

    config
        .apply_env_with(lookup)
        .map_err(CliError::config_error)?;
    Ok(config)
}

/// Apply CLI flags, validate, and configure logging
fn apply_overrides(
    config: &mut ServerConfig,
    port: Option<u16>,
    data_file: Option<PathBuf>,
) -> CliResult<()> {
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_file) = data_file {
        config.data_file = data_file;
    }

    config.validate().map_err(CliError::config_error)?;
    let severity = config.severity().map_err(CliError::config_error)?;
    Logger::set_min_severity(severity);

    let port = config.port.to_string();
    let data_file = config.data_file.display().to_string();
    Logger::info(
        Event::ConfigLoaded.as_str(),
        &[
            ("data_file", data_file.as_str()),
            ("environment", config.environment.as_str()),
            ("host", config.host.as_str()),
            ("port", port.as_str()),
        ],
    );
    Ok(())
}

/// Create an empty backing document if none exists
pub fn init(config: &ServerConfig) -> CliResult<()> {
    let backend = JsonFileBackend::new(config.data_file.clone());
    let created = backend.initialize()?;

    let data_file = config.data_file.display().to_string();
    let created_str = created.to_string();
    Logger::info(
        Event::DocumentInitialized.as_str(),
        &[
            ("created", created_str.as_str()),
            ("data_file", data_file.as_str()),
        ],
    );
    Ok(())
}

/// Run the HTTP server until Ctrl-C
pub fn serve(config: ServerConfig) -> CliResult<()> {
    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        CliError::serve_failed(format!("Failed to create tokio runtime: {}", e))
    })?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}
