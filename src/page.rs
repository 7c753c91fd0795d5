use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// A link discovered on a page, with the text the reader saw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLink {
    /// Raw href attribute, possibly relative
    pub href: String,

    /// Visible anchor text, whitespace-normalized
    pub text: String,
}

/// Immutable snapshot of a rendered page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// URL of the page
    pub url: String,

    /// Visible body text, whitespace-normalized
    pub body_text: String,

    /// Anchors discovered on the page, in document order
    pub links: Vec<PageLink>,

    /// Whether the page carries an HTML form element
    pub has_form: bool,

    /// Trimmed text of list items, headings and paragraphs
    pub blocks: Vec<String>,
}

impl PageSnapshot {
    /// Builds a snapshot from rendered page source
    pub fn from_html(url: &str, html: &str) -> Self {
        let doc = Html::parse_document(html);

        let snapshot = Self {
            url: url.to_string(),
            body_text: extract_body_text(&doc),
            links: extract_links(&doc),
            has_form: detect_form(&doc),
            blocks: extract_blocks(&doc),
        };

        ::log::debug!(
            "Snapshot of {} has {} links and {} text blocks",
            url,
            snapshot.links.len(),
            snapshot.blocks.len()
        );

        snapshot
    }
}

/// Extracts the visible body text, collapsing whitespace runs
fn extract_body_text(doc: &Html) -> String {
    let body_selector = Selector::parse("body").unwrap();
    doc.select(&body_selector)
        .flat_map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts anchors with their visible text
fn extract_links(doc: &Html) -> Vec<PageLink> {
    let link_selector = Selector::parse("a").unwrap();
    doc.select(&link_selector)
        .filter_map(|e| {
            let href = e.value().attr("href")?;
            let text = normalize_text(e.text());
            Some(PageLink {
                href: href.to_string(),
                text,
            })
        })
        .collect()
}

/// Checks for the presence of any form element
fn detect_form(doc: &Html) -> bool {
    let form_selector = Selector::parse("form").unwrap();
    doc.select(&form_selector).next().is_some()
}

/// Extracts the text of list items, headings and paragraphs
fn extract_blocks(doc: &Html) -> Vec<String> {
    let block_selector = Selector::parse("ul li, ol li, h1, h2, h3, h4, h5, h6, p").unwrap();
    doc.select(&block_selector)
        .map(|e| normalize_text(e.text()))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Joins text fragments and collapses whitespace runs
fn normalize_text<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
