pub mod entry;
pub mod extract;
pub mod markup;

#[cfg(test)]
pub mod synthetic;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Selector};

/// A tag + optional class lookup, precompiled to a CSS selector.
#[derive(Debug, Clone)]
pub struct Query {
    #[cfg(test)]
    tag: String,
    #[cfg(test)]
    class: Option<String>,
    css: Selector,
}

impl Query {
    pub fn new(tag: &str, class: Option<&str>) -> Result<Self> {
        let source = match class {
            Some(class) => format!("{}.{}", tag, class),
            None => tag.to_string(),
        };
        let css = Selector::parse(&source)
            .map_err(|e| anyhow!("Invalid selector '{}': {}", source, e))?;
        Ok(Query {
            #[cfg(test)]
            tag: tag.to_string(),
            #[cfg(test)]
            class: class.map(str::to_string),
            css,
        })
    }

    /// Match against a bare element description (used by non-DOM fragments).
    #[cfg(test)]
    pub fn matches<'a>(&self, tag: &str, mut classes: impl Iterator<Item = &'a str>) -> bool {
        if !self.tag.eq_ignore_ascii_case(tag) {
            return false;
        }
        match &self.class {
            Some(class) => classes.any(|c| c == class),
            None => true,
        }
    }
}

/// The traversal the extractors need from a document or a piece of one.
pub trait Fragment: Sized {
    fn find_all(&self, query: &Query) -> Vec<Self>;

    fn find_first(&self, query: &Query) -> Option<Self> {
        self.find_all(query).into_iter().next()
    }

    /// All descendant text, concatenated in document order.
    fn text_content(&self) -> String;

    fn attr(&self, name: &str) -> Option<String>;
}

impl<'a> Fragment for ElementRef<'a> {
    fn find_all(&self, query: &Query) -> Vec<Self> {
        self.select(&query.css).collect()
    }

    fn find_first(&self, query: &Query) -> Option<Self> {
        self.select(&query.css).next()
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }
}
