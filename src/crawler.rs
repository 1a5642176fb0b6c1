use tracing::info;

use crate::fetcher::Fetch;
use crate::parser::entry::{EntryProcessor, Outcome};
use crate::parser::markup::Markup;
use crate::parser::Fragment;
use crate::store::Review;

/// Why pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A listing page could not be fetched.
    FetchFailed,
    /// A listing page had no cards: past the last page.
    NoCards,
    /// A card fell outside the target year.
    Boundary,
    /// The configured page cap was reached.
    PageLimit,
}

/// Everything a run collected, in listing order.
#[derive(Debug)]
pub struct ScrapeResult {
    pub reviews: Vec<Review>,
    pub pages: u32,
    pub reason: StopReason,
}

/// Walks `/users/{username}?page=N` from page 1 until a stop condition.
pub struct Crawler<'a, P> {
    fetcher: &'a P,
    markup: &'a Markup,
    base_url: &'a str,
    year: &'a str,
    max_pages: Option<u32>,
}

impl<'a, P: Fetch> Crawler<'a, P> {
    pub fn new(fetcher: &'a P, markup: &'a Markup, base_url: &'a str, year: &'a str) -> Self {
        Crawler {
            fetcher,
            markup,
            base_url,
            year,
            max_pages: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn listing_url(&self, username: &str, page: u32) -> String {
        format!("{}/users/{}?page={}", self.base_url, username, page)
    }

    pub async fn scrape(&self, username: &str) -> ScrapeResult {
        let processor = EntryProcessor::new(self.fetcher, self.markup, self.base_url, self.year);
        let mut reviews = Vec::new();
        let mut page = 1u32;

        let reason = loop {
            if self.max_pages.is_some_and(|max| page > max) {
                break StopReason::PageLimit;
            }

            let url = self.listing_url(username, page);
            let Some(doc) = self.fetcher.fetch(&url).await else {
                break StopReason::FetchFailed;
            };

            let cards = doc.root_element().find_all(&self.markup.card);
            if cards.is_empty() {
                break StopReason::NoCards;
            }
            info!("Page {}: {} cards", page, cards.len());

            let mut boundary = false;
            for card in &cards {
                match processor.process(card).await {
                    Outcome::Accept(review) => reviews.push(review),
                    Outcome::Skip => {}
                    Outcome::Stop => {
                        boundary = true;
                        break;
                    }
                }
            }

            if boundary {
                break StopReason::Boundary;
            }
            page += 1;
        };

        let pages = match reason {
            StopReason::FetchFailed | StopReason::NoCards | StopReason::PageLimit => page - 1,
            StopReason::Boundary => page,
        };
        ScrapeResult {
            reviews,
            pages,
            reason,
        }
    }
}
