use crate::config::{PARTNER_KEYWORDS, PARTNER_NAME_PATTERNS};
use crate::page::PageSnapshot;
use crate::results::PageStructure;
use crate::urls;
use std::collections::{BTreeSet, HashSet};

/// Keyword vocabularies driving classification
///
/// The process-wide defaults live in [`crate::config`]; tests substitute
/// their own lists through [`Classifier::new`].
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Substrings marking partner-program content and links
    pub partner_keywords: Vec<String>,

    /// Substrings marking text blocks that name partner companies
    pub name_patterns: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            partner_keywords: PARTNER_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            name_patterns: PARTNER_NAME_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Lexical and structural classification of page snapshots
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    vocabulary: Vocabulary,
}

impl Classifier {
    /// Creates a classifier with a custom vocabulary
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Program types mentioned anywhere in the body text
    ///
    /// Case-insensitive substring containment, with no word boundaries:
    /// "partnering" matches the "partner" keyword.
    pub fn program_types(&self, body_text: &str) -> BTreeSet<String> {
        let haystack = body_text.to_lowercase();
        self.vocabulary
            .partner_keywords
            .iter()
            .filter(|keyword| haystack.contains(keyword.as_str()))
            .cloned()
            .collect()
    }

    /// Text blocks that appear to name partner companies
    ///
    /// A block qualifies if its trimmed text is longer than three characters
    /// and contains one of the name patterns. The whole block text is kept,
    /// not just the matched token, so results are noisy whole-line captures.
    pub fn partner_names(&self, page: &PageSnapshot) -> BTreeSet<String> {
        page.blocks
            .iter()
            .filter(|block| block.chars().count() > 3)
            .filter(|block| {
                let lowered = block.to_lowercase();
                self.vocabulary
                    .name_patterns
                    .iter()
                    .any(|pattern| lowered.contains(pattern.as_str()))
            })
            .cloned()
            .collect()
    }

    /// Classifies the apparent purpose of a page
    ///
    /// Priority order: a form outranks contact wording, which outranks
    /// pricing wording; anything else is an information page.
    pub fn structure(&self, page: &PageSnapshot) -> PageStructure {
        let text = page.body_text.to_lowercase();
        if page.has_form {
            PageStructure::RegistrationForm
        } else if text.contains("contact") {
            PageStructure::ContactPage
        } else if text.contains("pricing") {
            PageStructure::PricingPage
        } else {
            PageStructure::InformationPage
        }
    }

    /// Candidate partner links on a page
    ///
    /// Keeps anchors whose visible text contains a partner keyword,
    /// resolving each href against the page URL. Unresolvable and
    /// already-visited targets are dropped; duplicate targets collapse to
    /// their first occurrence.
    pub fn partner_links(&self, page: &PageSnapshot, visited: &HashSet<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for link in &page.links {
            let text = link.text.to_lowercase();
            let matches_keyword = self
                .vocabulary
                .partner_keywords
                .iter()
                .any(|keyword| text.contains(keyword.as_str()));
            if !matches_keyword {
                continue;
            }

            let resolved = urls::resolve(&page.url, &link.href);
            if resolved.is_empty() || visited.contains(&resolved) {
                continue;
            }

            if seen.insert(resolved.clone()) {
                candidates.push(resolved);
            }
        }

        ::log::debug!(
            "Found {} candidate partner links on {}",
            candidates.len(),
            page.url
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageLink;

    fn snapshot(url: &str, body: &str, links: Vec<(&str, &str)>) -> PageSnapshot {
        PageSnapshot {
            url: url.to_string(),
            body_text: body.to_string(),
            links: links
                .into_iter()
                .map(|(href, text)| PageLink {
                    href: href.to_string(),
                    text: text.to_string(),
                })
                .collect(),
            has_form: false,
            blocks: Vec::new(),
        }
    }

    #[test]
    fn test_program_types_substring_match() {
        let classifier = Classifier::default();
        let types = classifier.program_types("Join our Affiliate Program today");
        // "affiliates" is not present, only "affiliate"
        assert!(types.contains("affiliate"));
        assert!(!types.contains("affiliates"));
        assert!(!types.contains("reseller"));
    }

    #[test]
    fn test_program_types_no_word_boundaries() {
        let classifier = Classifier::default();
        let types = classifier.program_types("We are partnering with resellers worldwide");
        assert!(types.contains("partner"));
        assert!(types.contains("reseller"));
        assert!(types.contains("resellers"));
        // "partners" needs the plural substring, "partnering" does not have it
        assert!(!types.contains("partners"));
    }

    #[test]
    fn test_program_types_empty_text() {
        let classifier = Classifier::default();
        assert!(classifier.program_types("").is_empty());
    }

    #[test]
    fn test_partner_names_whole_block_capture() {
        let classifier = Classifier::default();
        let mut page = snapshot("https://acme.com/partners", "", vec![]);
        page.blocks = vec![
            "Gold Partners: Acme, Globex".to_string(),
            "Just an unrelated sentence.".to_string(),
            "Gold".to_string(),
            "Our certified integrations including Initech".to_string(),
        ];

        let names = classifier.partner_names(&page);
        // The qualifying blocks are kept whole
        assert!(names.contains("Gold Partners: Acme, Globex"));
        assert!(names.contains("Our certified integrations including Initech"));
        // No pattern token present
        assert!(!names.contains("Just an unrelated sentence."));
        // Too short, even though "gold" matches
        assert!(!names.contains("Gold"));
    }

    #[test]
    fn test_structure_priority_order() {
        let classifier = Classifier::default();

        let mut page = snapshot("https://acme.com", "See our pricing and contact us", vec![]);
        page.has_form = true;
        // A form outranks both contact and pricing wording
        assert_eq!(classifier.structure(&page), PageStructure::RegistrationForm);

        page.has_form = false;
        assert_eq!(classifier.structure(&page), PageStructure::ContactPage);

        let pricing = snapshot("https://acme.com", "Pricing starts at $10", vec![]);
        assert_eq!(classifier.structure(&pricing), PageStructure::PricingPage);

        let plain = snapshot("https://acme.com", "About our company", vec![]);
        assert_eq!(classifier.structure(&plain), PageStructure::InformationPage);
    }

    #[test]
    fn test_partner_links_deduplicates_targets() {
        let classifier = Classifier::default();
        let page = snapshot(
            "https://acme.com",
            "",
            vec![
                ("https://acme.com/partners", "Our Partners"),
                ("/partners", "Partner program"),
                ("/pricing", "Pricing"),
            ],
        );

        let links = classifier.partner_links(&page, &HashSet::new());
        // Both partner anchors resolve to the same target
        assert_eq!(links, vec!["https://acme.com/partners".to_string()]);
    }

    #[test]
    fn test_partner_links_skip_visited_and_unresolvable() {
        let classifier = Classifier::default();
        let page = snapshot(
            "https://acme.com",
            "",
            vec![
                ("/partners", "Partners"),
                ("/resellers", "Resellers"),
            ],
        );

        let mut visited = HashSet::new();
        visited.insert("https://acme.com/partners".to_string());

        let links = classifier.partner_links(&page, &visited);
        assert_eq!(links, vec!["https://acme.com/resellers".to_string()]);

        // An unparseable page URL makes every href unresolvable
        let broken = snapshot("not a url", "", vec![("/partners", "Partners")]);
        assert!(classifier.partner_links(&broken, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_partner_links_require_keyword_in_anchor_text() {
        let classifier = Classifier::default();
        let page = snapshot(
            "https://acme.com",
            "",
            vec![("/partners", "Learn more"), ("/about", "About")],
        );
        // The href path mentioning partners is not enough; only anchor text counts
        assert!(classifier.partner_links(&page, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_vocabulary_substitution() {
        let classifier = Classifier::new(Vocabulary {
            partner_keywords: vec!["alliance".to_string()],
            name_patterns: vec!["member:".to_string()],
        });

        let types = classifier.program_types("Our alliance of partners");
        assert_eq!(types.len(), 1);
        assert!(types.contains("alliance"));

        let mut page = snapshot("https://acme.com", "", vec![]);
        page.blocks = vec!["Member: Initech".to_string(), "Partner: Acme".to_string()];
        let names = classifier.partner_names(&page);
        assert_eq!(names.len(), 1);
        assert!(names.contains("Member: Initech"));
    }
}
