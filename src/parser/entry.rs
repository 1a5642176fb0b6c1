use super::extract::{clean_title, extract_release_year, extract_review_date};
use super::markup::Markup;
use super::Fragment;
use crate::fetcher::Fetch;
use crate::store::Review;

/// What one listing card amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Reviewed this year, released this year.
    Accept(Review),
    /// Unusable card, or a this-year review of an older movie.
    Skip,
    /// Review falls outside the target year. Listings are newest-first, so
    /// nothing after this card can qualify and pagination should end.
    Stop,
}

/// Turns listing cards into outcomes, fetching each card's review and movie pages.
pub struct EntryProcessor<'a, P> {
    fetcher: &'a P,
    markup: &'a Markup,
    base_url: &'a str,
    year: &'a str,
}

impl<'a, P: Fetch> EntryProcessor<'a, P> {
    pub fn new(fetcher: &'a P, markup: &'a Markup, base_url: &'a str, year: &'a str) -> Self {
        EntryProcessor {
            fetcher,
            markup,
            base_url,
            year,
        }
    }

    pub async fn process<F: Fragment>(&self, card: &F) -> Outcome {
        let m = self.markup;

        let (Some(rating), Some(title), Some(review_link)) = (
            card.find_first(&m.rating),
            card.find_first(&m.title),
            card.find_first(&m.review_link),
        ) else {
            return Outcome::Skip;
        };

        let rating = rating.text_content().trim().to_string();
        let movie_title = clean_title(title.text_content().trim(), &m.production_note);

        let review_href = review_link.find_first(&m.anchor).and_then(|a| a.attr("href"));
        let movie_href = title.find_first(&m.anchor).and_then(|a| a.attr("href"));
        let (Some(review_href), Some(movie_href)) = (review_href, movie_href) else {
            return Outcome::Skip;
        };

        let review_url = format!("{}{}", self.base_url, review_href);
        let movie_url = format!("{}{}", self.base_url, movie_href);

        let review_doc = self.fetcher.fetch(&review_url).await;
        let movie_doc = self.fetcher.fetch(&movie_url).await;
        let (Some(review_doc), Some(movie_doc)) = (review_doc, movie_doc) else {
            return Outcome::Skip;
        };

        let review_date = extract_review_date(&review_doc.root_element(), m);
        let release_year = extract_release_year(&movie_doc.root_element(), m);

        match review_date {
            Some(date) if date.starts_with(self.year) => {
                if release_year.as_deref() == Some(self.year) {
                    Outcome::Accept(Review {
                        rating,
                        review_date: date,
                        review_url,
                        title: movie_title,
                    })
                } else {
                    Outcome::Skip
                }
            }
            _ => Outcome::Stop,
        }
    }
}

#[cfg(test)]
pub mod fixtures {
    pub const BASE: &str = "https://filmarks.test";

    pub fn card(id: u32, rating: &str, title: &str) -> String {
        format!(
            r#"<div class="c-content-card">
                 <h3 class="c-content-card__title"><a href="/movies/{id}">{title}</a></h3>
                 <div class="c-rating__score">{rating}</div>
                 <span class="c-content-card__readmore-review"><a href="/movies/{id}/reviews/{id}0">続きを読む</a></span>
               </div>"#
        )
    }

    pub fn listing(cards: &[String]) -> String {
        format!("<html><body><div class=\"p-contents-grid\">{}</div></body></html>", cards.concat())
    }

    pub fn review_page(stamp: &str) -> String {
        format!(r#"<html><body><time class="c-media__date">{stamp}</time></body></html>"#)
    }

    pub fn movie_page(released: &str) -> String {
        format!(
            r#"<html><body>
                 <h3 class="p-content-detail__other-info-title">上映日：{released}</h3>
               </body></html>"#
        )
    }

    pub fn review_url(id: u32) -> String {
        format!("{BASE}/movies/{id}/reviews/{id}0")
    }

    pub fn movie_url(id: u32) -> String {
        format!("{BASE}/movies/{id}")
    }
}
