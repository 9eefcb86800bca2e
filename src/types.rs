//! Core data types for the extractor.
//!
//! These types model the two document shapes the extractor works on:
//! page-annotated line blocks grouped into categories (deep numbering
//! schemes, IEC 62443 style) and two-level section outlines
//! (ISO 27002 style). Field names in the serialized form follow the
//! downstream JSON contract, hence the camelCase renames.

use serde::{Deserialize, Serialize};

use crate::attributes::ControlAttributes;
use crate::segment::ControlSections;

/// Sentinel parent index for root-level lines.
pub const ROOT_PARENT: isize = -1;

fn root_parent() -> isize {
    ROOT_PARENT
}

fn is_root_parent(parent: &isize) -> bool {
    *parent == ROOT_PARENT
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single page-annotated input line.
///
/// `indent` is computed once at ingestion and never recomputed.
/// `consumed` is a tombstone: set when the line has been folded into a
/// preceding heading's inferred title. Tombstoned lines are skipped by
/// later heading scans but still participate in parent assignment.
///
/// The `section3` / `section4` / `section5` annotations are mutually
/// exclusive: at most one is populated, determined by the depth of the
/// numeric pattern the line matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLine {
    /// Trimmed line text.
    pub text: String,

    /// Page the line was extracted from.
    pub page: u32,

    /// Count of leading whitespace columns in the raw line.
    pub indent: usize,

    /// Tombstone flag: line was consumed as a heading title continuation.
    #[serde(default, skip_serializing_if = "is_false")]
    pub consumed: bool,

    /// Annotation for a depth-3 numeric heading match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section3: Option<Depth3Annotation>,

    /// Annotation for a depth-4 numeric heading match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section4: Option<Depth4Annotation>,

    /// Annotation for a depth-5 numeric heading match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section5: Option<Depth5Annotation>,

    /// Index of the nearest strictly-shallower-indent line, or
    /// [`ROOT_PARENT`] for root-level lines.
    #[serde(default = "root_parent", skip_serializing_if = "is_root_parent")]
    pub parent: isize,
}

impl PageLine {
    /// Create a new unannotated line.
    #[must_use]
    pub fn new(text: impl Into<String>, page: u32, indent: usize) -> Self {
        Self {
            text: text.into(),
            page,
            indent,
            consumed: false,
            section3: None,
            section4: None,
            section5: None,
            parent: ROOT_PARENT,
        }
    }

    /// Whether any depth annotation is attached.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        self.section3.is_some() || self.section4.is_some() || self.section5.is_some()
    }

    /// The resolved heading title, if this line matched a pattern.
    #[must_use]
    pub fn heading_title(&self) -> Option<&str> {
        self.section3
            .as_ref()
            .map(|a| a.title.as_str())
            .or_else(|| self.section4.as_ref().map(|a| a.title.as_str()))
            .or_else(|| self.section5.as_ref().map(|a| a.title.as_str()))
    }

    /// The section kind classified from the resolved title, if any.
    #[must_use]
    pub fn heading_kind(&self) -> Option<SectionKind> {
        self.section3
            .as_ref()
            .and_then(|a| a.kind)
            .or_else(|| self.section4.as_ref().and_then(|a| a.kind))
            .or_else(|| self.section5.as_ref().and_then(|a| a.kind))
    }
}

/// Section kind classified from a resolved heading title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    /// Title is exactly "Description of category".
    #[serde(rename = "Description of category")]
    DescriptionOfCategory,

    /// Title starts with "Element:".
    Element,

    /// Title starts with "ElementGroup:".
    ElementGroup,
}

impl SectionKind {
    /// Classify a resolved title into a kind, if any.
    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        if title == "Description of category" {
            Some(Self::DescriptionOfCategory)
        } else if title.starts_with("ElementGroup:") {
            Some(Self::ElementGroup)
        } else if title.starts_with("Element:") {
            Some(Self::Element)
        } else {
            None
        }
    }

    /// String value for serialized output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DescriptionOfCategory => "Description of category",
            Self::Element => "Element",
            Self::ElementGroup => "ElementGroup",
        }
    }
}

/// Annotation payload for a depth-3 match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Depth3Annotation {
    pub category_number: String,
    pub section3_number: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SectionKind>,
}

/// Annotation payload for a depth-4 match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Depth4Annotation {
    pub category_number: String,
    pub section3_number: String,
    pub section4_number: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SectionKind>,
}

/// Annotation payload for a depth-5 match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Depth5Annotation {
    pub category_number: String,
    pub section3_number: String,
    pub section4_number: String,
    pub section5_number: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SectionKind>,
}

/// An ordered block of page-annotated lines belonging to one
/// top-level category of a deep-numbered standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category number within the clause (e.g. "3" for clause 4.3).
    pub number: String,

    /// Category title, taken from the line after the category heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page the category heading appeared on.
    pub page: u32,

    /// Lines belonging to this category, in document order.
    pub lines: Vec<PageLine>,
}

/// A section node in the two-level outline.
///
/// Created during a single forward pass; mutated (lines and children
/// appended) only while open, immutable once a sibling or
/// ancestor-level heading closes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionNode {
    /// Dotted numeric identifier (e.g. "5" or "5.1").
    pub id: String,

    /// Heading title. Empty for synthesized placeholder sections.
    pub title: String,

    /// The raw heading line as it appeared in the input.
    pub heading_raw: String,

    /// Index of the heading line in the input sequence.
    pub heading_line_index: usize,

    /// Content lines strictly between this heading and the next
    /// sibling/child heading.
    #[serde(default)]
    pub lines: Vec<String>,

    /// Child sections in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SectionNode>,

    /// Labeled prose fields, populated by the segmenter. Serialized
    /// flattened under the header tokens themselves.
    #[serde(flatten)]
    pub content: ControlSections,

    /// Controlled-vocabulary attributes classified from marker lines.
    /// Absent until at least one marker token matches a vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<ControlAttributes>,
}

impl SectionNode {
    /// Create a new open section node.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        heading_raw: impl Into<String>,
        heading_line_index: usize,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            heading_raw: heading_raw.into(),
            heading_line_index,
            lines: Vec::new(),
            children: Vec::new(),
            content: ControlSections::default(),
            attributes: None,
        }
    }
}

/// Lines preceding the first recognized heading. Never has children
/// or an identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prologue {
    pub lines: Vec<String>,
}

/// Effective heading patterns, recorded for provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlinePatterns {
    pub l1: String,
    pub l2: String,
}

/// Provenance metadata for an extracted outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineMeta {
    /// Source the lines were read from.
    pub source: String,

    /// RFC 3339 extraction timestamp.
    pub extracted_at: String,

    /// Effective heading patterns (defaults or overrides).
    pub patterns: OutlinePatterns,

    /// Whether heading lines were included in node `lines`.
    pub include_heading_in_lines: bool,
}

/// Complete two-level outline of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOutline {
    pub meta: OutlineMeta,
    pub prologue: Prologue,
    pub l1_sections: Vec<SectionNode>,
}
