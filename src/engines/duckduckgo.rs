//! DuckDuckGo Lite search engine implementation
//!
//! Scrapes the lite HTML page, which needs no API key. Results are rows of
//! the form `<tr class="result">` holding one link and one `td.snippet`
//! cell. A markup change on the provider side shows up as zero results, not
//! as an error.

use super::traits::*;
use crate::network::{accept_html, generate_user_agent, HttpRequest, HttpResponse};
use crate::results::{OrganicEntry, RawResults, SearchError, DEFAULT_SNIPPET};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

static RESULT_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr.result").expect("valid result selector"));
static RESULT_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid link selector"));
static RESULT_SNIPPET: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td.snippet").expect("valid snippet selector"));

/// DuckDuckGo web search engine
pub struct DuckDuckGo {
    lite_url: String,
}

impl DuckDuckGo {
    pub fn new() -> Self {
        Self::with_base_url("https://lite.duckduckgo.com/lite/")
    }

    pub fn with_base_url(lite_url: impl Into<String>) -> Self {
        Self {
            lite_url: lite_url.into(),
        }
    }

    fn parse_html_results(&self, html: &str, limit: usize) -> Vec<OrganicEntry> {
        let document = Html::parse_document(html);

        document
            .select(&RESULT_ROW)
            .filter_map(parse_row)
            .take(limit)
            .collect()
    }
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull one result out of a row; rows without a usable link are skipped
fn parse_row(row: ElementRef<'_>) -> Option<OrganicEntry> {
    let anchor = row.select(&RESULT_LINK).next()?;

    let title = element_text(anchor);
    let link = anchor.value().attr("href").unwrap_or_default().trim();
    if title.is_empty() || link.is_empty() {
        return None;
    }

    let snippet = row
        .select(&RESULT_SNIPPET)
        .next()
        .map(element_text)
        .unwrap_or_else(|| DEFAULT_SNIPPET.to_string());

    Some(OrganicEntry::new(title, link, snippet))
}

/// Text content with runs of whitespace collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Engine for DuckDuckGo {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    fn about(&self) -> EngineAbout {
        EngineAbout::new()
            .website("https://duckduckgo.com")
            .results_format("HTML")
    }

    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(crate::PROVIDER_TIMEOUT))
    }

    fn request(&self, params: &RequestParams) -> Result<HttpRequest, SearchError> {
        let url = format!("{}?q={}", self.lite_url, urlencoding::encode(&params.query));

        Ok(HttpRequest::get(url)
            .header("User-Agent", generate_user_agent())
            .header("Accept", accept_html()))
    }

    fn response(
        &self,
        response: HttpResponse,
        params: &RequestParams,
    ) -> Result<RawResults, SearchError> {
        ensure_success(&response)?;

        let organic = self.parse_html_results(&response.text, params.num_results);
        Ok(RawResults::with_organic(organic))
    }
}
