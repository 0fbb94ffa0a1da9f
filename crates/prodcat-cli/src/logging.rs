// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::Config;
use anyhow::{Context, Result};
use std::env;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PRODCAT_LOG";

/// Installs the global subscriber writing to the configured log file.
/// Returns the file path, or `None` when logging is disabled.
pub fn init(config: &Config) -> Result<Option<PathBuf>> {
    if !config.log_enabled() {
        return Ok(None);
    }

    let path = config.log_path()?;
    let file = open_log_file(&path)?;
    let filter = resolve_filter(env::var(LOG_ENV).ok().as_deref(), config.log_level())?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init();
    // A subscriber may already be set when embedded or under test.
    if installed.is_err() {
        return Ok(None);
    }
    Ok(Some(path))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
            format!(
                "open log file {}; set [log].path or disable logging with [log].enabled = false",
                path.display()
            )
        })
}

fn resolve_filter(env_override: Option<&str>, configured: &str) -> Result<EnvFilter> {
    let (directive, source) = match env_override {
        Some(value) if !value.trim().is_empty() => (value, LOG_ENV),
        _ => (configured, "log.level"),
    };
    EnvFilter::try_new(directive)
        .with_context(|| format!("invalid {source} filter {directive:?}"))
}
