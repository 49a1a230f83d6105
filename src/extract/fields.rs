use crate::site;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// A parsed snapshot of one contract detail page.
///
/// All lookups are read-only over the static HTML the session captured
/// after readiness and supplier disclosure. Every lookup degrades to an
/// empty string when its target is absent; absence is data, not failure.
pub struct DetailPage {
    doc: Html,
}

/// Collapsed text of an element, whitespace-normalized across its
/// descendant text nodes.
fn element_text(el: ElementRef) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl DetailPage {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }

    /// Trimmed text of the first element matching `selector`; empty when
    /// absent. Never fails.
    pub fn text_at(&self, selector: &str) -> String {
        let Ok(sel) = Selector::parse(selector) else {
            return String::new();
        };
        self.doc
            .select(&sel)
            .next()
            .map(element_text)
            .unwrap_or_default()
    }

    /// The value block (`p`) paired with a label, located by a
    /// case-insensitive exact text match over the page's label elements.
    ///
    /// This is a deliberate O(n) scan over all labels: the label set per
    /// page is small and fixed, and scanning keeps the lookup independent
    /// of where a given label happens to sit in the document.
    fn value_block(&self, label: &str) -> Option<ElementRef<'_>> {
        let sel = Selector::parse(site::LABEL_STRONGS).ok()?;
        for strong in self.doc.select(&sel) {
            if !element_text(strong).eq_ignore_ascii_case(label) {
                continue;
            }
            let enclosing = strong
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "h4");
            if let Some(h4) = enclosing {
                return h4
                    .next_siblings()
                    .filter_map(ElementRef::wrap)
                    .find(|el| el.value().name() == "p");
            }
        }
        None
    }

    /// Trimmed text associated with `label`; empty when the label or its
    /// value block is absent.
    pub fn value_by_label(&self, label: &str) -> String {
        self.value_block(label).map(element_text).unwrap_or_default()
    }

    /// Like `value_by_label`, but joins the value block's text fragments
    /// with `", "`. Used for the buyer address, where the site breaks the
    /// lines with `<br>`.
    pub fn value_by_label_joined(&self, label: &str) -> String {
        let Some(block) = self.value_block(label) else {
            return String::new();
        };
        block
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Normalized numeric amount for `label`: currency symbol and
    /// thousands separators stripped, lower bound taken from an
    /// "A to B" range. Falls back to the cleaned raw text when it does
    /// not parse as a number, and to empty when the label is absent.
    pub fn numeric_value(&self, label: &str) -> String {
        let raw = self.value_by_label(label);
        if raw.is_empty() {
            return raw;
        }
        let cleaned = Regex::new(r"[£,]")
            .unwrap()
            .replace_all(&raw, "")
            .trim()
            .to_string();
        let lower = match cleaned.split_once("to") {
            Some((lower, _)) => lower.trim().to_string(),
            None => cleaned.clone(),
        };
        match lower.parse::<f64>() {
            Ok(amount) if amount.fract() == 0.0 => format!("{}", amount as i64),
            Ok(amount) => amount.to_string(),
            Err(_) => cleaned,
        }
    }

    /// All non-blank paragraphs following the description heading,
    /// newline-joined.
    pub fn description(&self) -> String {
        let Ok(sel) = Selector::parse("h3") else {
            return String::new();
        };
        let Some(heading) = self
            .doc
            .select(&sel)
            .find(|el| element_text(*el) == site::DESCRIPTION_HEADING)
        else {
            return String::new();
        };
        heading
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "p")
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Href of the first link inside the Website value block.
    pub fn website(&self) -> String {
        let Some(block) = self.value_block("Website") else {
            return String::new();
        };
        let Ok(sel) = Selector::parse("a") else {
            return String::new();
        };
        block
            .select(&sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.trim().to_string())
            .unwrap_or_default()
    }

    /// Comma-joined industry classification entries.
    pub fn industry(&self) -> String {
        let Ok(sel) = Selector::parse(site::INDUSTRY_ITEMS) else {
            return String::new();
        };
        self.doc
            .select(&sel)
            .map(element_text)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Supplier name, visible without expanding the disclosure block at
    /// one of two structural positions. First non-empty wins.
    pub fn supplier_name(&self) -> String {
        let primary = self.text_at(site::SUPPLIER_NAME_PRIMARY);
        if !primary.is_empty() {
            return primary;
        }
        self.text_at(site::SUPPLIER_NAME_FALLBACK)
    }
}
