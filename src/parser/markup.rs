use anyhow::{Context, Result};
use regex::Regex;

use super::Query;
use crate::settings::{ProfileSettings, SelectorSpec};

/// A site profile compiled into queries and patterns, ready for extraction.
#[derive(Debug, Clone)]
pub struct Markup {
    pub name: String,
    pub card: Query,
    pub rating: Query,
    pub title: Query,
    pub review_link: Query,
    pub anchor: Query,
    pub review_date: Query,
    pub release_heading: Query,
    pub release_label: Regex,
    pub release_year: Regex,
    pub production_note: Regex,
}

impl Markup {
    pub fn compile(profile: &ProfileSettings) -> Result<Self> {
        let release_year = Regex::new(&profile.release_year)
            .with_context(|| format!("release_year pattern '{}'", profile.release_year))?;
        anyhow::ensure!(
            release_year.captures_len() > 1,
            "release_year pattern '{}' has no capture group",
            profile.release_year
        );

        Ok(Markup {
            name: profile.name.clone(),
            card: query(&profile.card)?,
            rating: query(&profile.rating)?,
            title: query(&profile.title)?,
            review_link: query(&profile.review_link)?,
            anchor: query(&profile.anchor)?,
            review_date: query(&profile.review_date)?,
            release_heading: query(&profile.release_heading)?,
            release_label: Regex::new(&regex::escape(&profile.release_label))?,
            release_year,
            production_note: Regex::new(&profile.production_note)
                .with_context(|| format!("production_note pattern '{}'", profile.production_note))?,
        })
    }

    /// The current Filmarks markup.
    #[cfg(test)]
    pub fn filmarks() -> Result<Self> {
        Self::compile(&ProfileSettings::default())
    }
}

fn query(spec: &SelectorSpec) -> Result<Query> {
    Query::new(&spec.tag, spec.class.as_deref())
}
