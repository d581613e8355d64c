// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::Config;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_LEVEL_ENV: &str = "STAFFDESK_LOG";

/// Installs the global file subscriber. The terminal belongs to the UI, so
/// events only ever go to the log file. Returns the file path when enabled.
pub fn init(config: &Config) -> Result<Option<PathBuf>> {
    if !config.log_enabled() {
        return Ok(None);
    }

    let filter = level_filter(env::var(LOG_LEVEL_ENV).ok().as_deref(), config.log_level())?;
    let path = config.log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| {
            format!(
                "open log file {}; set [log].path or disable logging with [log].enabled = false",
                path.display()
            )
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;
    Ok(Some(path))
}

/// Checks the configured filter without installing anything.
pub fn validate(config: &Config) -> Result<()> {
    level_filter(env::var(LOG_LEVEL_ENV).ok().as_deref(), config.log_level()).map(drop)
}

/// A non-blank env override wins over the configured directives.
fn level_filter(env_override: Option<&str>, configured: &str) -> Result<EnvFilter> {
    let directives = env_override
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(configured);
    EnvFilter::try_new(directives).with_context(|| {
        format!(
            "invalid log level {directives:?}; use error, warn, info, debug, trace or tracing filter directives"
        )
    })
}
