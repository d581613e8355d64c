// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use staffdesk_app::{DEFAULT_PAGE_SIZE, PAGE_SIZES, TabKind};
use staffdesk_store::DEFAULT_WALLET_ADDRESS;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "staffdesk";
const CONFIG_VERSION: i64 = 1;
const CONFIG_PATH_ENV: &str = "STAFFDESK_CONFIG_PATH";
const DEFAULT_REPLY_DELAY: &str = "1000ms";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub chat: Chat,
    #[serde(default)]
    pub donations: Donations,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            chat: Chat::default(),
            donations: Donations::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub start_tab: Option<String>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub reply_delay: Option<String>,
    pub start_minimized: Option<bool>,
}

impl Default for Chat {
    fn default() -> Self {
        Self {
            reply_delay: Some(DEFAULT_REPLY_DELAY.to_owned()),
            start_minimized: Some(false),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Donations {
    pub wallet_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub enabled: Option<bool>,
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version. Add `version = 1` and put values under [ui], [chat], [donations], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Regenerate it with --print-example-config",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(tab) = &self.ui.start_tab
            && TabKind::parse(tab).is_none()
        {
            let known = TabKind::ALL
                .iter()
                .map(|tab| tab.label())
                .collect::<Vec<_>>()
                .join(", ");
            bail!(
                "ui.start_tab in {} is {tab:?}; use one of: {known}",
                path.display()
            );
        }

        if let Some(size) = self.ui.page_size
            && !PAGE_SIZES.contains(&size)
        {
            bail!(
                "ui.page_size in {} must be one of {:?}, got {size}",
                path.display(),
                PAGE_SIZES
            );
        }

        if let Some(delay) = &self.chat.reply_delay {
            parse_duration(delay)
                .with_context(|| format!("chat.reply_delay in {}", path.display()))?;
        }

        if let Some(address) = &self.donations.wallet_address
            && address.trim().is_empty()
        {
            bail!(
                "donations.wallet_address in {} is blank; remove it to use the default",
                path.display()
            );
        }

        if let Some(log_path) = &self.log.path
            && log_path.trim().is_empty()
        {
            bail!(
                "log.path in {} is blank; remove it to use the default",
                path.display()
            );
        }

        Ok(())
    }

    pub fn start_tab(&self) -> TabKind {
        self.ui
            .start_tab
            .as_deref()
            .and_then(TabKind::parse)
            .unwrap_or(TabKind::Casework)
    }

    pub fn page_size(&self) -> usize {
        self.ui.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn chat_reply_delay(&self) -> Result<Duration> {
        parse_duration(
            self.chat
                .reply_delay
                .as_deref()
                .unwrap_or(DEFAULT_REPLY_DELAY),
        )
    }

    pub fn start_minimized(&self) -> bool {
        self.chat.start_minimized.unwrap_or(false)
    }

    pub fn wallet_address(&self) -> &str {
        self.donations
            .wallet_address
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_WALLET_ADDRESS)
    }

    pub fn log_enabled(&self) -> bool {
        self.log.enabled.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].path in the config file")
        })?;
        Ok(data_root.join(APP_NAME).join("staffdesk.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# staffdesk config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# One of: casework, legislation, schedule, constituents, budget, comms, donations\nstart_tab = \"casework\"\n# One of: 5, 10, 25\npage_size = {}\n\n[chat]\nreply_delay = \"{}\"\nstart_minimized = false\n\n[donations]\nwallet_address = \"{}\"\n\n[log]\nenabled = true\n# tracing filter directives; STAFFDESK_LOG overrides this\nlevel = \"{}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/staffdesk/staffdesk.log)\n# path = \"/absolute/path/to/staffdesk.log\"\n",
            path.display(),
            DEFAULT_PAGE_SIZE,
            DEFAULT_REPLY_DELAY,
            DEFAULT_WALLET_ADDRESS,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use <N>ms or <N>s (for example 1000ms or 2s)")
}

#[cfg(test)]
mod tests {
    use super::{Config, parse_duration};
    use anyhow::Result;
    use staffdesk_app::TabKind;
    use staffdesk_store::DEFAULT_WALLET_ADDRESS;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let (temp, path) = staffdesk_testkit::temp_config_path()?;
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let (_temp, path) = staffdesk_testkit::temp_config_path()?;
        let config = Config::load(&path)?;
        assert_eq!(config.version, 1);
        assert_eq!(config.start_tab(), TabKind::Casework);
        assert_eq!(config.page_size(), 5);
        assert_eq!(config.chat_reply_delay()?, Duration::from_millis(1000));
        assert!(!config.start_minimized());
        assert_eq!(config.wallet_address(), DEFAULT_WALLET_ADDRESS);
        assert!(config.log_enabled());
        assert_eq!(config.log_level(), "info");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\npage_size = 10\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[ui], [chat], [donations], and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[ui]\nstart_tab = \"budget\"\npage_size = 25\n[chat]\nreply_delay = \"250ms\"\nstart_minimized = true\n[donations]\nwallet_address = \"0xabc\"\n[log]\nenabled = false\nlevel = \"debug\"\npath = \"/tmp/staffdesk-test.log\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.start_tab(), TabKind::Budget);
        assert_eq!(config.page_size(), 25);
        assert_eq!(config.chat_reply_delay()?, Duration::from_millis(250));
        assert!(config.start_minimized());
        assert_eq!(config.wallet_address(), "0xabc");
        assert!(!config.log_enabled());
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_path()?, PathBuf::from("/tmp/staffdesk-test.log"));
        Ok(())
    }

    #[test]
    fn start_tab_accepts_headings() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstart_tab = \"Legislation Tracker\"\n")?;
        assert_eq!(Config::load(&path)?.start_tab(), TabKind::Legislation);
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 7\n")?;
        let error = Config::load(&path).expect_err("v7 config should fail");
        assert!(error.to_string().contains("unsupported config version 7"));
        Ok(())
    }

    #[test]
    fn unknown_start_tab_lists_choices() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstart_tab = \"inbox\"\n")?;
        let error = Config::load(&path).expect_err("unknown tab should fail");
        let message = error.to_string();
        assert!(message.contains("\"inbox\""));
        assert!(message.contains("casework, legislation"));
        Ok(())
    }

    #[test]
    fn page_size_must_be_an_offered_size() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\npage_size = 7\n")?;
        let error = Config::load(&path).expect_err("odd page size should fail");
        assert!(error.to_string().contains("must be one of [5, 10, 25]"));
        Ok(())
    }

    #[test]
    fn blank_wallet_address_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[donations]\nwallet_address = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank wallet should fail");
        assert!(error.to_string().contains("donations.wallet_address"));
        Ok(())
    }

    #[test]
    fn bad_reply_delay_names_the_key() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[chat]\nreply_delay = \"soon\"\n")?;
        let error = Config::load(&path).expect_err("bad delay should fail");
        let message = format!("{error:#}");
        assert!(message.contains("chat.reply_delay"));
        assert!(message.contains("invalid duration"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let (_temp, override_path) = staffdesk_testkit::temp_config_path()?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("STAFFDESK_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("STAFFDESK_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_log_path_ends_with_log_file() -> Result<()> {
        let config = Config::default();
        let path = config.log_path()?;
        assert!(path.ends_with("staffdesk/staffdesk.log"), "got {}", path.display());
        Ok(())
    }

    #[test]
    fn durations_parse_ms_and_seconds() -> Result<()> {
        assert_eq!(parse_duration("0ms")?, Duration::ZERO);
        assert_eq!(parse_duration("750ms")?, Duration::from_millis(750));
        assert_eq!(parse_duration("2s")?, Duration::from_secs(2));
        assert!(parse_duration("2m").is_err());
        Ok(())
    }

    #[test]
    fn example_config_round_trips() -> Result<()> {
        let (_temp, path) = staffdesk_testkit::temp_config_path()?;
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        for section in ["[ui]", "[chat]", "[donations]", "[log]"] {
            assert!(example.contains(section), "missing {section}");
        }

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.page_size(), 5);
        assert_eq!(config.wallet_address(), DEFAULT_WALLET_ADDRESS);
        Ok(())
    }
}
