use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One accepted review, in output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Review Date")]
    pub review_date: String,
    #[serde(rename = "Review URL")]
    pub review_url: String,
    #[serde(rename = "Movie Title")]
    pub title: String,
}

/// `{username}_reviews.csv`, inside `dir` when one is configured.
pub fn output_path(dir: Option<&Path>, username: &str) -> PathBuf {
    let file = format!("{}_reviews.csv", username);
    match dir {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

/// Write reviews as UTF-8 CSV with a header row, in the given order.
pub fn save_reviews(path: &Path, reviews: &[Review]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for review in reviews {
        writer.serialize(review)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
pub fn load_reviews(path: &Path) -> Result<Vec<Review>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut reviews = Vec::new();
    for row in reader.deserialize() {
        reviews.push(row?);
    }
    Ok(reviews)
}
