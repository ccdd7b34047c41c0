//! Habr listing scraper.
//!
//! This module walks the [Habr](https://habr.com/all/) "all articles" feed page
//! by page and collects the publication date and title of every preview.
//!
//! # Markup
//!
//! Two generations of listing markup are understood:
//!
//! | Part | Legacy | Current |
//! |------|--------|---------|
//! | Preview | `article.post_preview` | `article.tm-articles-list__item` |
//! | Title | `a.post__title_link` | `a.tm-title__link` |
//! | Date | `span.post__time` (text) | `time[datetime]` (RFC 3339) |
//! | Next page | `a#next_page` | `a#pagination-next-page` |
//!
//! # Paging
//!
//! Listing URLs look like `https://habr.com/all/page3/`. Paging stops when a
//! page has no next link, or when the next link points past the page limit.

use super::FetchError;
use crate::models::RawRecord;
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::time::Duration as StdDuration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

static PREVIEW: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("article.post_preview, article.tm-articles-list__item")
        .expect("constant selector parses")
});
static TITLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a.post__title_link, a.tm-title__link").expect("constant selector parses")
});
static DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.post__time, time").expect("constant selector parses"));
static NEXT_PAGE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a#next_page[href], a#pagination-next-page[href]")
        .expect("constant selector parses")
});
static PAGE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/page(\d+)/").expect("constant pattern compiles"));

/// What one listing page yields.
#[derive(Debug, Default)]
pub struct ListingPage {
    pub records: Vec<RawRecord>,
    /// Absolute URL of the following page, if any.
    pub next_page: Option<Url>,
    /// Previews dropped because their markup was incomplete.
    pub skipped: usize,
}

/// Connection parameters for a scrape.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub start_url: String,
    pub pages: u32,
    pub request_timeout: StdDuration,
    pub max_pacing: StdDuration,
}

/// The page number encoded in a listing URL (`/all/page7/` -> 7).
/// The first page carries no number.
pub fn page_number(url: &Url) -> Option<u32> {
    PAGE_NUMBER
        .captures(url.path())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract previews and the next-page link from a listing page.
pub fn parse_listing(html: &str, page_url: &Url) -> ListingPage {
    let document = Html::parse_document(html);
    let mut page = ListingPage::default();

    for preview in document.select(&PREVIEW) {
        match parse_preview(preview, page_url) {
            Ok(record) => page.records.push(record),
            Err(e) => {
                warn!(error = %e, "Skipping incomplete article preview");
                page.skipped += 1;
            }
        }
    }

    page.next_page = document
        .select(&NEXT_PAGE)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| page_url.join(href).ok());

    debug!(
        records = page.records.len(),
        skipped = page.skipped,
        next = ?page.next_page.as_ref().map(Url::as_str),
        "Parsed listing page"
    );
    page
}

fn parse_preview(preview: ElementRef<'_>, page_url: &Url) -> Result<RawRecord, FetchError> {
    let markup_error = |reason: &str| FetchError::Markup {
        url: page_url.to_string(),
        reason: reason.to_string(),
    };

    let title = preview
        .select(&TITLE)
        .next()
        .map(|a| a.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| markup_error("preview has no title"))?;

    let date = preview
        .select(&DATE)
        .next()
        .map(|el| match el.value().attr("datetime") {
            Some(timestamp) => timestamp.trim().to_string(),
            None => el.text().collect::<String>().trim().to_string(),
        })
        .filter(|d| !d.is_empty())
        .ok_or_else(|| markup_error(&format!("preview {title:?} has no date")))?;

    Ok(RawRecord { date, title })
}

/// Download one page after a random pause.
#[instrument(level = "info", skip_all, fields(url = %url))]
async fn fetch_page(
    client: &Client,
    url: &Url,
    max_pacing: StdDuration,
) -> Result<String, FetchError> {
    let ceiling = max_pacing.as_millis() as u64;
    let pause = rand::rng().random_range(0..=ceiling);
    sleep(StdDuration::from_millis(pause)).await;

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;
    info!(bytes = body.len(), pause_ms = pause, "Fetched listing page");
    Ok(body)
}

/// Walk the feed from `start_url` and collect every preview up to the page limit.
///
/// # Errors
///
/// Fails only when the first page cannot be fetched. A failure on a later
/// page ends paging early and returns what was collected so far.
#[instrument(level = "info", skip_all, fields(start_url = %options.start_url, pages = options.pages))]
pub async fn fetch_records(options: &ScrapeOptions) -> Result<Vec<RawRecord>, FetchError> {
    let start = Url::parse(&options.start_url).map_err(|e| FetchError::Markup {
        url: options.start_url.clone(),
        reason: format!("invalid start URL: {e}"),
    })?;
    let client = Client::builder()
        .timeout(options.request_timeout)
        .user_agent(concat!("habr_nouns/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FetchError::from_reqwest(&start, e))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut visited = HashSet::new();
    let mut url = start;
    let mut body = fetch_page(&client, &url, options.max_pacing).await?;

    loop {
        visited.insert(url.clone());
        let page = parse_listing(&body, &url);
        records.extend(page.records);
        skipped += page.skipped;

        let Some(next) = page.next_page else {
            debug!("No next page link");
            break;
        };
        if page_number(&next).is_some_and(|n| n > options.pages) {
            debug!(next = %next, "Reached page limit");
            break;
        }
        if visited.contains(&next) {
            warn!(next = %next, "Next page link loops back; stopping");
            break;
        }

        match fetch_page(&client, &next, options.max_pacing).await {
            Ok(next_body) => {
                body = next_body;
                url = next;
            }
            Err(e) => {
                warn!(
                    error = %e,
                    kind = e.kind(),
                    collected = records.len(),
                    "Listing page failed; keeping records collected so far"
                );
                break;
            }
        }
    }

    info!(
        count = records.len(),
        skipped,
        pages = visited.len(),
        "Collected article previews"
    );
    if let Some(last) = records.last() {
        debug!(title = %truncate_for_log(&last.title, 60), date = %last.date, "Oldest preview");
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_PAGE: &str = r#"
        <html><body>
          <article class="post post_preview">
            <span class="post__time">сегодня в 12:03</span>
            <h2><a class="post__title_link" href="/post/1/">Программирование голоса</a></h2>
          </article>
          <article class="post post_preview">
            <span class="post__time">22 декабря 2017 в 12:48</span>
            <h2><a class="post__title_link" href="/post/2/">Анализ кода</a></h2>
          </article>
          <article class="post post_preview">
            <h2><a class="post__title_link" href="/post/3/">Без даты</a></h2>
          </article>
          <a id="next_page" href="/all/page2/">Туда</a>
        </body></html>
    "#;

    const CURRENT_PAGE: &str = r#"
        <html><body>
          <article class="tm-articles-list__item">
            <span class="tm-article-datetime-published">
              <time datetime="2018-04-12T10:05:00.000Z" title="2018-04-12, 13:05">12 апр 2018</time>
            </span>
            <h2 class="tm-title"><a class="tm-title__link" href="/ru/articles/1/"><span>Языки и питон</span></a></h2>
          </article>
          <article class="tm-articles-list__item">
            <time datetime="2018-04-13T08:00:00.000Z">13 апр 2018</time>
          </article>
        </body></html>
    "#;

    fn base() -> Url {
        Url::parse("https://habr.com/all/").unwrap()
    }

    #[test]
    fn test_parse_legacy_listing() {
        let page = parse_listing(LEGACY_PAGE, &base());

        assert_eq!(
            page.records,
            vec![
                RawRecord::new("сегодня в 12:03", "Программирование голоса"),
                RawRecord::new("22 декабря 2017 в 12:48", "Анализ кода"),
            ]
        );
        assert_eq!(page.skipped, 1);
        assert_eq!(
            page.next_page.as_ref().map(Url::as_str),
            Some("https://habr.com/all/page2/")
        );
    }

    #[test]
    fn test_parse_current_listing() {
        let page = parse_listing(CURRENT_PAGE, &base());

        assert_eq!(
            page.records,
            vec![RawRecord::new("2018-04-12T10:05:00.000Z", "Языки и питон")]
        );
        assert_eq!(page.skipped, 1);
        assert!(page.next_page.is_none());
    }

    #[test]
    fn test_parse_empty_page() {
        let page = parse_listing("<html><body><p>Нет статей</p></body></html>", &base());
        assert!(page.records.is_empty());
        assert_eq!(page.skipped, 0);
        assert!(page.next_page.is_none());
    }

    #[test]
    fn test_page_number() {
        assert_eq!(page_number(&Url::parse("https://habr.com/all/page7/").unwrap()), Some(7));
        assert_eq!(page_number(&Url::parse("https://habr.com/all/").unwrap()), None);
        assert_eq!(
            page_number(&Url::parse("https://habr.com/ru/all/page12/?hl=ru").unwrap()),
            Some(12)
        );
    }

    #[tokio::test]
    async fn test_invalid_start_url() {
        let options = ScrapeOptions {
            start_url: "not a url".to_string(),
            pages: 1,
            request_timeout: StdDuration::from_secs(1),
            max_pacing: StdDuration::ZERO,
        };
        let err = fetch_records(&options).await.unwrap_err();
        assert_eq!(err.kind(), "markup");
    }
}
