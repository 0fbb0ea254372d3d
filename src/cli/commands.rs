//! CLI command implementations
//!
//! `serve` owns the tokio runtime for the lifetime of the server; `init`
//! and `check` run one storage operation on a short-lived runtime and
//! report JSON on stdout.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::catalog::duplicate_isbns;
use crate::http_server::{BookServer, ServerConfig};
use crate::store::{BookStore, JsonFileStore};

use super::args::{Command, ServeArgs};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(args),
        Command::Init { data_file } => init(&data_file),
        Command::Check { data_file } => check(&data_file),
    }
}

/// Merge defaults, the optional config file and flags/environment
pub fn build_config(args: ServeArgs) -> CliResult<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_file) = args.data_file {
        config.data_file = data_file;
    }
    if let Some(api_key) = args.api_key {
        config.api_key = Some(api_key);
    }
    if let Some(update_mode) = args.update_mode {
        config.update_mode = update_mode;
    }
    if args.allow_duplicate_isbn {
        config.unique_isbn = false;
    }

    config.validate()?;
    Ok(config)
}

/// Start the HTTP server
///
/// 1. Build configuration
/// 2. Open the collection file, creating an empty one if needed
/// 3. Serve until Ctrl-C
pub fn serve(args: ServeArgs) -> CliResult<()> {
    let config = build_config(args)?;
    info!(version = crate::VERSION, config = ?config, "starting bookshelf");

    let rt = runtime()?;
    rt.block_on(async move {
        let store = JsonFileStore::open(&config.data_file).await?;
        let server = BookServer::new(config, Arc::new(store))?;
        server.start().await.map_err(CliError::ServeFailed)
    })
}

/// Create an empty collection file. Fails if the file already exists.
pub fn init(data_file: &Path) -> CliResult<()> {
    if data_file.exists() {
        return Err(CliError::AlreadyInitialized(data_file.to_path_buf()));
    }

    let rt = runtime()?;
    rt.block_on(JsonFileStore::open(data_file))?;

    write_response(json!({
        "initialized": true,
        "data_file": data_file.display().to_string(),
    }))
}

/// Load the collection and report record count and duplicate ISBNs
pub fn check(data_file: &Path) -> CliResult<()> {
    let rt = runtime()?;
    let books = rt.block_on(JsonFileStore::new(data_file).load_all())?;
    let duplicates = duplicate_isbns(&books);

    write_response(json!({
        "data_file": data_file.display().to_string(),
        "books": books.len(),
        "duplicate_isbns": duplicates,
    }))
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UpdateMode;
    use crate::cli::errors::CliErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn args_with_key() -> ServeArgs {
        ServeArgs {
            api_key: Some("secret123".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(args_with_key()).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_key.as_deref(), Some("secret123"));
        assert!(config.unique_isbn);
    }

    #[test]
    fn test_build_config_requires_api_key() {
        let err = build_config(ServeArgs::default()).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bookshelf.json");
        fs::write(
            &path,
            r#"{"port": 4000, "api_key": "from-file", "data_file": "shelf.json"}"#,
        )
        .unwrap();

        let config = build_config(ServeArgs {
            config: Some(path),
            port: Some(5000),
            update_mode: Some(UpdateMode::Merge),
            allow_duplicate_isbn: true,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.data_file, Path::new("shelf.json"));
        assert_eq!(config.update_mode, UpdateMode::Merge);
        assert!(!config.unique_isbn);
    }

    #[test]
    fn test_init_creates_then_refuses() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");

        init(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");

        let err = init(&path).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::AlreadyInitialized);
    }

    #[test]
    fn test_check_reports_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        fs::write(&path, "[{").unwrap();

        let err = check(&path).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::StorageError);
    }

    #[test]
    fn test_check_accepts_valid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        fs::write(
            &path,
            r#"[{"title":"A","author":"a","isbn":"1"},{"title":"B","author":"b","isbn":"1"}]"#,
        )
        .unwrap();

        assert!(check(&path).is_ok());
    }
}
