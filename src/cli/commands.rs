//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::rest_api::RecordService;
use crate::store::{AnyStore, StoreKind};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Parse process arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Write a default config file. Fails if one is already there.
pub fn init(config_path: &Path) -> CliResult<()> {
    Config::default().write_new(config_path)?;
    println!("Wrote {}", config_path.display());
    Ok(())
}

/// Boot the store and serve HTTP until Ctrl-C
pub fn start(config_path: &Path) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = Config::load(config_path).map_err(boot_failed)?;
    let path = config_path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        boot_failed(CliError::boot_failed(format!(
            "Failed to create tokio runtime: {}",
            e
        )))
    })?;

    rt.block_on(async {
        let store = AnyStore::open(&config.store)
            .await
            .map_err(|e| boot_failed(CliError::from(e)))?;

        let kind = match store.kind() {
            StoreKind::Memory => "memory",
            StoreKind::File => "file",
        };
        log_event_with_fields(
            Event::StoreOpened,
            &[("kind", kind), ("table", config.store.table.as_str())],
        );

        let service = RecordService::new(Arc::new(store));
        HttpServer::new(config.http, service)
            .start()
            .await
            .map_err(|e| {
                boot_failed(CliError::boot_failed(format!("HTTP server failed: {}", e)))
            })
    })
}

fn boot_failed(err: CliError) -> CliError {
    log_event_with_fields(Event::BootFailed, &[("error", err.message())]);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dummydb.json");

        run_command(Command::Init { config: path.clone() }).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dummydb.json");

        init(&path).unwrap();
        let err = init(&path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::AlreadyInitialized);
    }

    #[test]
    fn test_start_without_config_fails() {
        let temp = TempDir::new().unwrap();
        let err = start(&temp.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_start_with_corrupt_store_fails() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("dummies.json");
        std::fs::write(&data, "not json").unwrap();

        let config_path = temp.path().join("dummydb.json");
        let body = serde_json::json!({
            "store": {"kind": "file", "path": data}
        });
        std::fs::write(&config_path, body.to_string()).unwrap();

        let err = start(&config_path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
    }
}
