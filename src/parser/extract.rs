use regex::Regex;

use super::markup::Markup;
use super::Fragment;

/// Strip every `(YYYY年製作の映画)` annotation and trim. Idempotent: removal
/// repeats until nothing matches, so nested annotations can't resurface.
pub fn clean_title(raw: &str, production_note: &Regex) -> String {
    let mut title = raw.to_string();
    loop {
        let next = production_note.replace_all(&title, "");
        if next.as_ref() == title.as_str() {
            break;
        }
        title = next.into_owned();
    }
    title.trim().to_string()
}

/// Posting date of a review page: the first token of the timestamp element,
/// e.g. `2024-05-01` out of `2024-05-01 19:30`.
pub fn extract_review_date<F: Fragment>(doc: &F, markup: &Markup) -> Option<String> {
    let stamp = doc.find_first(&markup.review_date)?;
    let text = stamp.text_content();
    text.trim().split(' ').next().map(str::to_string)
}

/// Release year from the first detail heading carrying the release label.
pub fn extract_release_year<F: Fragment>(doc: &F, markup: &Markup) -> Option<String> {
    let heading = doc
        .find_all(&markup.release_heading)
        .into_iter()
        .map(|h| h.text_content())
        .find(|text| markup.release_label.is_match(text))?;

    markup
        .release_year
        .captures(&heading)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
