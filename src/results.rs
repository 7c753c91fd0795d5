use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Coarse classification of a page's apparent purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStructure {
    RegistrationForm,
    ContactPage,
    PricingPage,
    InformationPage,
    Unknown,
}

impl PageStructure {
    /// Stable name used in exported rows
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStructure::RegistrationForm => "registration_form",
            PageStructure::ContactPage => "contact_page",
            PageStructure::PricingPage => "pricing_page",
            PageStructure::InformationPage => "information_page",
            PageStructure::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PageStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single seed's crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlStatus {
    Pending,
    Success,
    Error(String),
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlStatus::Pending => f.write_str("pending"),
            CrawlStatus::Success => f.write_str("success"),
            CrawlStatus::Error(message) => write!(f, "error: {}", message),
        }
    }
}

/// Findings from a single fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubpageFinding {
    /// URL of the page
    pub url: String,

    /// Program types mentioned on the page
    pub program_types: BTreeSet<String>,

    /// Text blocks that appear to name partner companies
    pub partner_names: BTreeSet<String>,

    /// Apparent purpose of the page
    pub page_structure: PageStructure,
}

impl SubpageFinding {
    /// An empty finding for a page that yielded nothing
    pub fn empty(url: &str) -> Self {
        Self {
            url: url.to_string(),
            program_types: BTreeSet::new(),
            partner_names: BTreeSet::new(),
            page_structure: PageStructure::Unknown,
        }
    }

    /// Whether the page contributed any program types or partner names
    pub fn is_informative(&self) -> bool {
        !self.program_types.is_empty() || !self.partner_names.is_empty()
    }
}

/// Aggregated findings for one seed URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainResult {
    /// Network location of the seed URL
    pub domain: String,

    /// Normalized seed URL, set once the main page has been fetched
    pub partner_program_url: String,

    /// Carried through to exported rows; never assigned by the engine
    pub url_path: String,

    /// Union of program types across the main page and retained subpages
    pub program_types: BTreeSet<String>,

    /// Union of partner names across the main page and retained subpages
    pub partner_names: BTreeSet<String>,

    /// The main page's structure classification
    pub page_structure: PageStructure,

    /// Outcome of the crawl
    pub status: CrawlStatus,

    /// Subpages that contributed program types or partner names
    pub subpages: Vec<SubpageFinding>,
}

impl DomainResult {
    /// A pending result for a seed about to be crawled
    pub fn pending(domain: String) -> Self {
        Self {
            domain,
            partner_program_url: String::new(),
            url_path: String::new(),
            program_types: BTreeSet::new(),
            partner_names: BTreeSet::new(),
            page_structure: PageStructure::Unknown,
            status: CrawlStatus::Pending,
            subpages: Vec::new(),
        }
    }

    /// A degraded result for a seed whose crawl failed outright
    pub fn failed(seed_url: &str, message: &str) -> Self {
        let mut result = Self::pending(crate::urls::base_domain(seed_url));
        result.status = CrawlStatus::Error(message.to_string());
        result
    }

    /// Merges a retained subpage's findings into the domain-level sets
    pub fn absorb(&mut self, finding: SubpageFinding) {
        self.program_types
            .extend(finding.program_types.iter().cloned());
        self.partner_names
            .extend(finding.partner_names.iter().cloned());
        self.subpages.push(finding);
    }
}
