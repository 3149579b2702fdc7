// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 TPDB Project

//! File-based structured logging.
//!
//! A single sink: the configured log file, appended to at the configured
//! level. `RUST_LOG` overrides the level filter and `LOG_FORMAT=json`
//! switches to JSON lines output.

use std::{
    fs::{File, OpenOptions},
    io,
    path::Path,
    sync::Arc,
};

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Open the log file for appending, creating it if absent.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global tracing subscriber writing to the configured file.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    let file = open_log_file(&config.file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false);

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn log_file_is_created_and_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.log");

        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "first").unwrap();
        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "second").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }
}
