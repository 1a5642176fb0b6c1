use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

const CONFIG_FILE: &str = "filmarks";
const ENV_PREFIX: &str = "FILMARKS";
const DEFAULT_BASE_URL: &str = "https://filmarks.com";

/// Run settings: defaults, then `filmarks.toml`, then `FILMARKS_*` env vars.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    /// Directory the CSV lands in (default: working directory).
    pub output_dir: Option<PathBuf>,
    /// Year to filter on instead of the current local year.
    pub year: Option<i32>,
    /// Unset means paginate until the site runs out of cards.
    pub max_pages: Option<u32>,
    pub profile: ProfileSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: None,
            year: None,
            max_pages: None,
            profile: ProfileSettings::default(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        debug!(settings = ?settings, "Loaded settings");
        Ok(settings)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The year reviews and releases must both fall in, as a 4-digit string.
    pub fn target_year(&self) -> String {
        self.year
            .unwrap_or_else(|| chrono::Local::now().year())
            .to_string()
    }
}

/// A tag name plus an optional class, e.g. `div.c-content-card`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SelectorSpec {
    pub tag: String,
    #[serde(default)]
    pub class: Option<String>,
}

impl SelectorSpec {
    fn new(tag: &str, class: &str) -> Self {
        SelectorSpec {
            tag: tag.to_string(),
            class: Some(class.to_string()),
        }
    }

    fn tag_only(tag: &str) -> Self {
        SelectorSpec {
            tag: tag.to_string(),
            class: None,
        }
    }
}

/// Markup of the target site. Bump `name` whenever the site changes its
/// templates and the selectors below are updated to match.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub name: String,
    pub card: SelectorSpec,
    pub rating: SelectorSpec,
    pub title: SelectorSpec,
    pub review_link: SelectorSpec,
    pub anchor: SelectorSpec,
    pub review_date: SelectorSpec,
    pub release_heading: SelectorSpec,
    pub release_label: String,
    /// Must capture the year in group 1.
    pub release_year: String,
    pub production_note: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        ProfileSettings {
            name: "filmarks".to_string(),
            card: SelectorSpec::new("div", "c-content-card"),
            rating: SelectorSpec::new("div", "c-rating__score"),
            title: SelectorSpec::new("h3", "c-content-card__title"),
            review_link: SelectorSpec::new("span", "c-content-card__readmore-review"),
            anchor: SelectorSpec::tag_only("a"),
            review_date: SelectorSpec::new("time", "c-media__date"),
            release_heading: SelectorSpec::new("h3", "p-content-detail__other-info-title"),
            release_label: "上映日：".to_string(),
            release_year: r"(\d{4})年".to_string(),
            production_note: r"\(\d{4}年製作の映画\)".to_string(),
        }
    }
}
