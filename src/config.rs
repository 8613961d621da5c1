use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Mount paths tracked when none are given on the command line.
    pub filesystems: Vec<String>,
    /// History table location. None = platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Trailing window, in days, covered by the report and projection.
    pub window_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Label prefixed to the mail subject, e.g. "PROD".
    pub environment: String,
    /// Recipient address. Empty = mail delivery disabled.
    pub recipient: String,
    /// Envelope sender address.
    pub sender: String,
}

/// Effective settings for one run: config-file values with command-line
/// overrides already applied. The pipeline reads nothing beyond this
/// value, no globals and no environment peeking.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub filesystems: Vec<String>,
    pub history_file: PathBuf,
    pub window_days: u32,
    pub collect: bool,
    pub send: bool,
    pub quiet: bool,
    pub mail: MailConfig,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            report:  ReportConfig::default(),
            mail:    MailConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { filesystems: Vec::new(), history_file: None }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { window_days: 30 }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            environment: String::new(),
            recipient:   String::new(),
            sender:      "fsgrowth@localhost".to_string(),
        }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(_) => {
                // Write defaults on first run (best-effort)
                let _ = try_write_defaults();
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fsgrowth").join("fsgrowth.toml"))
    }

    pub fn history_path(&self) -> PathBuf {
        self.general
            .history_file
            .clone()
            .or_else(|| dirs::data_local_dir().map(|p| p.join("fsgrowth").join("history.json")))
            .unwrap_or_else(|| PathBuf::from("fsgrowth-history.json"))
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&text)?;
    Ok(cfg)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# fsgrowth configuration\n# Generated on first run — edit freely\n\n{}", text))?;
    Ok(())
}
