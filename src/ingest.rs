//! Page-annotated ingestion of raw extracted text.
//!
//! Turns the flat text of a standard's clause into numbered
//! categories of [`PageLine`]s. Page markers maintain a running page
//! counter, configured running headers are dropped, and hidden
//! Unicode left behind by PDF extraction is cleaned before any
//! pattern sees the text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{ExtractError, Result};
use crate::structure;
use crate::types::{Category, PageLine};

/// A page marker as printed in the source: `– 42 –`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*–\s*(\d+)\s*–\s*$").expect("valid regex"));

/// Strip zero-width characters and normalize compatibility forms.
///
/// PDF extraction leaves BOMs, zero-width spaces and soft hyphens in
/// the middle of words, which would break exact token matching later.
#[must_use]
pub fn clean_hidden_unicode(text: &str) -> String {
    text.nfkc()
        .filter(|c| !matches!(c, '\u{feff}' | '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{00ad}'))
        .collect()
}

/// Options controlling category splitting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOptions {
    /// Top-level clause number whose subsections become categories.
    pub clause: String,

    /// Running-header lines dropped wherever they occur (compared
    /// trimmed).
    #[serde(default)]
    pub skip_lines: Vec<String>,
}

/// A line encountered before the first category heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanLine {
    pub page: u32,
    pub text: String,
}

/// Result of splitting a document into categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedDocument {
    pub lines_out_of_categories: Vec<OrphanLine>,
    pub categories: Vec<Category>,
}

/// Split raw text into structurally analyzed categories.
///
/// A whole line matching `{clause}.N` opens category `N`; its title is
/// the following line, consumed. Closing a category (at the next
/// category heading or end of input) runs the structural analysis on
/// its lines.
pub fn split_into_categories(
    raw_text: &str,
    options: &IngestOptions,
) -> Result<CategorizedDocument> {
    let pattern = format!(r"^\s*{}\.(\d+)\s*$", regex::escape(&options.clause));
    let category_re = Regex::new(&pattern).map_err(|source| ExtractError::InvalidPattern {
        pattern,
        source,
    })?;

    let text = clean_hidden_unicode(raw_text);
    let mut document = CategorizedDocument::default();
    let mut current: Option<Category> = None;
    let mut awaiting_title = false;
    let mut page: u32 = 1;

    for raw_line in text.split('\n') {
        let raw_line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let trimmed = raw_line.trim();

        if let Some(caps) = PAGE_MARKER.captures(raw_line) {
            if let Ok(number) = caps[1].parse() {
                page = number;
            }
            continue;
        }
        if options.skip_lines.iter().any(|skip| skip == trimmed) {
            continue;
        }

        if let Some(caps) = category_re.captures(raw_line) {
            if let Some(mut finished) = current.take() {
                structure::analyze_category(&mut finished);
                document.categories.push(finished);
            }
            current = Some(Category {
                number: caps[1].to_string(),
                title: None,
                page,
                lines: Vec::new(),
            });
            awaiting_title = true;
            continue;
        }

        match current.as_mut() {
            Some(category) if awaiting_title => {
                category.title = Some(trimmed.to_string());
                awaiting_title = false;
            }
            Some(category) => {
                let indent = raw_line.len() - raw_line.trim_start().len();
                category.lines.push(PageLine::new(trimmed, page, indent));
            }
            None => document.lines_out_of_categories.push(OrphanLine {
                page,
                text: trimmed.to_string(),
            }),
        }
    }

    if let Some(mut finished) = current.take() {
        structure::analyze_category(&mut finished);
        document.categories.push(finished);
    }

    tracing::debug!(
        categories = document.categories.len(),
        orphans = document.lines_out_of_categories.len(),
        "split document into categories"
    );

    Ok(document)
}
