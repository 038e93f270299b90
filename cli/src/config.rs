use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use fastroute_core::Frontier;
use serde::Deserialize;

/// Default start node name for `route`.
pub const DEFAULT_START: &str = "HOME";

/// Default target node name for `route`.
pub const DEFAULT_TARGET: &str = "DEST";

/// How `route` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Frontier selection strategy, as spelled in config files and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FrontierKind {
    #[default]
    Heap,
    Linear,
}

impl From<FrontierKind> for Frontier {
    fn from(kind: FrontierKind) -> Self {
        match kind {
            FrontierKind::Heap => Frontier::Heap,
            FrontierKind::Linear => Frontier::Linear,
        }
    }
}

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    #[default]
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// 0 for Monday through 6 for Sunday.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

/// Resolved settings: built-in defaults, then the TOML file, then flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub start_node: String,
    pub target_node: String,
    pub format: OutputFormat,
    pub frontier: FrontierKind,
    pub first_day: Weekday,
    /// tracing filter directive, e.g. "debug" or "fastroute_core=trace".
    /// Unset falls back to RUST_LOG, then "warn".
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_node: DEFAULT_START.to_string(),
            target_node: DEFAULT_TARGET.to_string(),
            format: OutputFormat::default(),
            frontier: FrontierKind::default(),
            first_day: Weekday::default(),
            log_level: None,
        }
    }
}

/// Flag values that take precedence over the file. `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub start_node: Option<String>,
    pub target_node: Option<String>,
    pub format: Option<OutputFormat>,
    pub frontier: Option<FrontierKind>,
    pub first_day: Option<Weekday>,
    pub log_level: Option<String>,
}

impl Settings {
    /// Defaults, overlaid with the TOML file at `path` if one is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply flag overrides on top of the loaded settings.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(v) = overrides.start_node {
            self.start_node = v;
        }
        if let Some(v) = overrides.target_node {
            self.target_node = v;
        }
        if let Some(v) = overrides.format {
            self.format = v;
        }
        if let Some(v) = overrides.frontier {
            self.frontier = v;
        }
        if let Some(v) = overrides.first_day {
            self.first_day = v;
        }
        if overrides.log_level.is_some() {
            self.log_level = overrides.log_level;
        }
        self
    }
}
