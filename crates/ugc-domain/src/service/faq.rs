//! FAQ search, category filter and highlighting

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Category value that matches every section
pub const ALL_CATEGORIES: &str = "all";

const SLUG_MAX_CHARS: usize = 50;

/// One question/answer pair as authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// A titled group of questions under one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqSection {
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<FaqItem>,
}

/// Indexed entry, built once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub id: usize,
    pub question: String,
    pub answer: String,
    pub category: String,
    search_text: String,
}

impl FaqEntry {
    /// Question and answer joined by a space
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn slug(&self) -> String {
        slugify(&self.question)
    }
}

/// A run of text, highlighted when it matched the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub text: String,
    pub highlighted: bool,
}

/// What is currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqView {
    /// Ids of visible entries, in document order
    pub visible: Vec<usize>,
    /// Category and visibility of each section, in document order
    pub sections: Vec<(String, bool)>,
    pub no_results: bool,
}

/// Anchor-style slug: lowercase, drop non-word characters, whitespace runs
/// become `-`, truncated to 50 characters
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    let mut slug = String::with_capacity(kept.len());
    let mut in_space = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.push(c);
            in_space = false;
        }
    }
    slug.chars().take(SLUG_MAX_CHARS).collect()
}

/// Search/filter state over a fixed set of entries
#[derive(Debug, Clone)]
pub struct FaqIndex {
    entries: Vec<FaqEntry>,
    sections: Vec<(String, String)>,
    category: String,
    query: String,
    /// Decides both visibility and highlighting
    matcher: Option<Regex>,
    expanded: BTreeSet<usize>,
}

impl FaqIndex {
    pub fn new(sections: &[FaqSection]) -> Self {
        let mut entries = Vec::new();
        for section in sections {
            for item in &section.items {
                entries.push(FaqEntry {
                    id: entries.len(),
                    question: item.question.clone(),
                    answer: item.answer.clone(),
                    category: section.category.clone(),
                    search_text: format!("{} {}", item.question, item.answer),
                });
            }
        }
        debug!("FAQ index built with {} entries", entries.len());

        Self {
            entries,
            sections: sections
                .iter()
                .map(|s| (s.category.clone(), s.title.clone()))
                .collect(),
            category: ALL_CATEGORIES.to_string(),
            query: String::new(),
            matcher: None,
            expanded: BTreeSet::new(),
        }
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn entry(&self, id: usize) -> Option<&FaqEntry> {
        self.entries.get(id)
    }

    /// Section categories and titles in document order
    pub fn sections(&self) -> &[(String, String)] {
        &self.sections
    }

    /// Distinct categories, `all` first
    pub fn categories(&self) -> Vec<String> {
        let mut out = vec![ALL_CATEGORIES.to_string()];
        for (category, _) in &self.sections {
            if !out.contains(category) {
                out.push(category.clone());
            }
        }
        out
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn category_matches(&self, category: &str) -> bool {
        self.category == ALL_CATEGORIES || self.category == category
    }

    fn is_match(&self, entry: &FaqEntry) -> bool {
        if !self.category_matches(&entry.category) {
            return false;
        }
        match &self.matcher {
            Some(re) => re.is_match(&entry.search_text),
            None => self.query.is_empty(),
        }
    }

    /// Run a search. The query is lowercased and trimmed; an empty query shows
    /// every entry of the active category. Matching is a case-insensitive
    /// literal regex over the original text.
    pub fn search(&mut self, query: &str) {
        let trimmed = query.trim();
        self.query = trimmed.to_lowercase();
        self.matcher = if trimmed.is_empty() {
            None
        } else {
            match RegexBuilder::new(&regex::escape(trimmed))
                .case_insensitive(true)
                .build()
            {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("FAQ query {:?} not searchable: {}", trimmed, e);
                    None
                }
            }
        };
        debug!(
            "FAQ search {:?} in {}: {} results",
            self.query,
            self.category,
            self.view().visible.len()
        );
    }

    /// Drop the query and highlights, back to the category view
    pub fn clear_search(&mut self) {
        self.query.clear();
        self.matcher = None;
    }

    /// Change category. An active search keeps its query and now applies
    /// under the new category.
    pub fn filter_by_category(&mut self, category: &str) {
        self.category = category.to_string();
        debug!(
            "FAQ category {}: {} results",
            self.category,
            self.view().visible.len()
        );
    }

    pub fn is_visible(&self, id: usize) -> bool {
        self.entries.get(id).is_some_and(|e| self.is_match(e))
    }

    pub fn view(&self) -> FaqView {
        let visible: Vec<usize> = self
            .entries
            .iter()
            .filter(|e| self.is_match(e))
            .map(|e| e.id)
            .collect();

        let sections = self
            .sections
            .iter()
            .map(|(category, _)| {
                let has_visible = visible
                    .iter()
                    .any(|id| self.entries[*id].category == *category);
                (category.clone(), has_visible && self.category_matches(category))
            })
            .collect();

        FaqView {
            no_results: !self.query.is_empty() && visible.is_empty(),
            visible,
            sections,
        }
    }

    /// Split `text` into spans, marking every case-insensitive occurrence of the query
    pub fn highlight(&self, text: &str) -> Vec<HighlightSpan> {
        let Some(re) = &self.matcher else {
            return vec![HighlightSpan {
                text: text.to_string(),
                highlighted: false,
            }];
        };

        let mut spans = Vec::new();
        let mut last = 0;
        for m in re.find_iter(text) {
            if m.start() > last {
                spans.push(HighlightSpan {
                    text: text[last..m.start()].to_string(),
                    highlighted: false,
                });
            }
            spans.push(HighlightSpan {
                text: m.as_str().to_string(),
                highlighted: true,
            });
            last = m.end();
        }
        if last < text.len() || spans.is_empty() {
            spans.push(HighlightSpan {
                text: text[last..].to_string(),
                highlighted: false,
            });
        }
        spans
    }

    pub fn is_expanded(&self, id: usize) -> bool {
        self.expanded.contains(&id)
    }

    /// Open or close an entry. Returns the entry's slug when it was opened.
    pub fn toggle(&mut self, id: usize) -> Option<String> {
        if self.expanded.remove(&id) {
            return None;
        }
        let slug = self.entries.get(id)?.slug();
        self.expanded.insert(id);
        Some(slug)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&FaqEntry> {
        self.entries.iter().find(|e| e.slug() == slug)
    }

    /// Expand the entry a slug points to
    pub fn open_slug(&mut self, slug: &str) -> Option<usize> {
        let id = self.find_by_slug(slug)?.id;
        self.expanded.insert(id);
        Some(id)
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<FaqSection> {
        vec![
            FaqSection {
                category: "getting-started".to_string(),
                title: "Getting Started".to_string(),
                items: vec![
                    FaqItem {
                        question: "What is UGC?".to_string(),
                        answer: "User-generated content (c+c) made by creators.".to_string(),
                    },
                    FaqItem {
                        question: "Is shipping included?".to_string(),
                        answer: "Nothing ships; prompts are text.".to_string(),
                    },
                ],
            },
            FaqSection {
                category: "billing".to_string(),
                title: "Billing".to_string(),
                items: vec![FaqItem {
                    question: "Do you charge for Shipping?".to_string(),
                    answer: "No.".to_string(),
                }],
            },
        ]
    }

    #[test]
    fn test_search_matches_all_categories() {
        let mut faq = FaqIndex::new(&sections());
        faq.search("  SHIPPING ");
        let view = faq.view();
        assert_eq!(view.visible, vec![1, 2]);
        for id in &view.visible {
            let text = faq.entry(*id).unwrap().search_text().to_lowercase();
            assert!(text.contains("shipping"));
        }
        assert!(!view.no_results);
    }

    #[test]
    fn test_empty_search_restores_category_view() {
        let mut faq = FaqIndex::new(&sections());
        faq.filter_by_category("billing");
        faq.search("what");
        assert!(faq.view().no_results);
        faq.search("");
        let view = faq.view();
        assert_eq!(view.visible, vec![2]);
        assert!(!view.no_results);
        assert_eq!(
            view.sections,
            vec![("getting-started".to_string(), false), ("billing".to_string(), true)]
        );
    }

    #[test]
    fn test_category_change_reruns_search() {
        let mut faq = FaqIndex::new(&sections());
        faq.search("shipping");
        faq.filter_by_category("getting-started");
        assert_eq!(faq.view().visible, vec![1]);
        assert_eq!(faq.query(), "shipping");
    }

    #[test]
    fn test_highlight_is_literal_and_case_insensitive() {
        let mut faq = FaqIndex::new(&sections());
        faq.search("(C+C)");
        assert_eq!(faq.view().visible, vec![0]);
        let spans = faq.highlight("content (C+C) and (c+c)");
        let marked: Vec<&str> = spans
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(marked, vec!["(C+C)", "(c+c)"]);

        faq.clear_search();
        assert_eq!(faq.highlight("content (C+C)").len(), 1);
        assert_eq!(faq.view().visible.len(), 3);
    }

    #[test]
    fn test_slug_and_toggle() {
        assert_eq!(slugify("What is UGC?"), "what-is-ugc");
        assert_eq!(slugify("Why   so  many   spaces"), "why-so-many-spaces");
        assert_eq!(slugify(&"a".repeat(80)).len(), 50);

        let mut faq = FaqIndex::new(&sections());
        assert_eq!(faq.toggle(0).as_deref(), Some("what-is-ugc"));
        assert!(faq.is_expanded(0));
        assert_eq!(faq.toggle(0), None);
        assert!(!faq.is_expanded(0));

        assert_eq!(faq.open_slug("do-you-charge-for-shipping"), Some(2));
        assert!(faq.is_expanded(2));
    }

    #[test]
    fn test_visible_entries_are_always_highlighted() {
        let mut sections = sections();
        sections[1].items.push(FaqItem {
            question: "Do you ship to İstanbul?".to_string(),
            answer: "Yes, İSTANBUL and Ankara.".to_string(),
        });
        let mut faq = FaqIndex::new(&sections);

        for query in ["shipping", "İstanbul", "ugc", "c+c", "NO."] {
            faq.search(query);
            for id in faq.view().visible {
                let entry = faq.entry(id).unwrap();
                let marked = faq
                    .highlight(&entry.question)
                    .into_iter()
                    .chain(faq.highlight(&entry.answer))
                    .any(|span| span.highlighted);
                assert!(marked, "entry {} visible for {:?} without a highlight", id, query);
            }
        }

        faq.search("İstanbul");
        assert_eq!(faq.view().visible, vec![3]);
        assert_eq!(faq.query(), "İstanbul".to_lowercase());
    }

    #[test]
    fn test_collapse_all_closes_every_entry() {
        let mut faq = FaqIndex::new(&sections());
        faq.toggle(0);
        faq.open_slug("do-you-charge-for-shipping");
        faq.collapse_all();
        assert!(!faq.is_expanded(0));
        assert!(!faq.is_expanded(2));
    }

    #[test]
    fn test_categories_listed_once() {
        let faq = FaqIndex::new(&sections());
        assert_eq!(faq.categories(), vec!["all", "getting-started", "billing"]);
    }
}
