//! Section-content segmenter.
//!
//! Splits a leaf section's body into the four standard control
//! sections (Control, Purpose, Guidance, Other information) and
//! collects attribute marker lines. Recognition is by exact token
//! match on the trimmed line; prose never opens a section.

use serde::{Deserialize, Serialize};

use crate::attributes;
use crate::types::{DocumentOutline, SectionNode};

/// The four recognized section header tokens, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionHeader {
    Control,
    Purpose,
    Guidance,
    OtherInformation,
}

impl SectionHeader {
    /// Parse a trimmed line as a section header token.
    ///
    /// Exact equality only: `"Control"` matches, `"Control:"` or
    /// `"control"` do not.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Control" => Some(Self::Control),
            "Purpose" => Some(Self::Purpose),
            "Guidance" => Some(Self::Guidance),
            "Other information" => Some(Self::OtherInformation),
            _ => None,
        }
    }
}

/// The segmented body of a leaf section.
///
/// Serialized with the header tokens as field names so the output
/// mirrors the document's own vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSections {
    #[serde(rename = "Control", default, skip_serializing_if = "Option::is_none")]
    pub control: Option<String>,

    #[serde(rename = "Purpose", default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    #[serde(rename = "Guidance", default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,

    #[serde(
        rename = "Other information",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub other_information: Option<String>,
}

impl ControlSections {
    /// Whether no section has been filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.control.is_none()
            && self.purpose.is_none()
            && self.guidance.is_none()
            && self.other_information.is_none()
    }

    /// Store text under the given header, replacing any earlier value.
    pub fn set(&mut self, header: SectionHeader, text: String) {
        match header {
            SectionHeader::Control => self.control = Some(text),
            SectionHeader::Purpose => self.purpose = Some(text),
            SectionHeader::Guidance => self.guidance = Some(text),
            SectionHeader::OtherInformation => self.other_information = Some(text),
        }
    }
}

/// Outcome of segmenting one body: the filled sections plus the
/// attribute marker lines lifted out of the preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmented {
    pub sections: ControlSections,
    pub attribute_markers: Vec<String>,
}

/// Segment a body into control sections.
///
/// Lines before the first header are collected (trimmed) as attribute
/// markers and never become prose. Within a section, lines are kept
/// verbatim and joined with newlines; a later duplicate header
/// overwrites the earlier section.
#[must_use]
pub fn segment_lines(lines: &[String]) -> Segmented {
    let mut result = Segmented::default();
    let mut current: Option<SectionHeader> = None;
    let mut accumulator: Vec<&str> = Vec::new();

    for line in lines {
        let trimmed = line.trim();

        if let Some(header) = SectionHeader::from_token(trimmed) {
            flush(&mut result.sections, current, &mut accumulator);
            current = Some(header);
            continue;
        }

        match current {
            None => result.attribute_markers.push(trimmed.to_string()),
            Some(_) => accumulator.push(line),
        }
    }

    flush(&mut result.sections, current, &mut accumulator);
    result
}

fn flush(sections: &mut ControlSections, header: Option<SectionHeader>, accumulator: &mut Vec<&str>) {
    let Some(header) = header else {
        accumulator.clear();
        return;
    };
    if accumulator.is_empty() {
        return;
    }
    sections.set(header, accumulator.join("\n"));
    accumulator.clear();
}

/// Apply segmentation to every leaf section of an outline.
///
/// Leaves are the level-2 sections, plus any level-1 section without
/// children. Segmented bodies also get their attribute markers
/// classified into structured attributes.
pub fn segment_outline(outline: &mut DocumentOutline) {
    for l1 in &mut outline.l1_sections {
        if l1.children.is_empty() {
            segment_node(l1);
        } else {
            for l2 in &mut l1.children {
                segment_node(l2);
            }
        }
    }
}

fn segment_node(node: &mut SectionNode) {
    let segmented = segment_lines(&node.lines);
    node.content = segmented.sections;
    node.attributes = attributes::classify_markers(&segmented.attribute_markers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_header_tokens_exact_match() {
        assert_eq!(SectionHeader::from_token("Control"), Some(SectionHeader::Control));
        assert_eq!(
            SectionHeader::from_token("Other information"),
            Some(SectionHeader::OtherInformation)
        );
        assert_eq!(SectionHeader::from_token("Control:"), None);
        assert_eq!(SectionHeader::from_token("control"), None);
        assert_eq!(SectionHeader::from_token("Other  information"), None);
    }

    #[test]
    fn test_segment_full_body() {
        let body = lines(&[
            "#Preventive #Confidentiality",
            "Control",
            "Access to information shall be restricted.",
            "Purpose",
            "To ensure authorized access",
            "and to prevent unauthorized access.",
            "Guidance",
            "Owners should determine access rules.",
        ]);
        let segmented = segment_lines(&body);

        assert_eq!(
            segmented.sections.control.as_deref(),
            Some("Access to information shall be restricted.")
        );
        assert_eq!(
            segmented.sections.purpose.as_deref(),
            Some("To ensure authorized access\nand to prevent unauthorized access.")
        );
        assert_eq!(
            segmented.sections.guidance.as_deref(),
            Some("Owners should determine access rules.")
        );
        assert_eq!(segmented.sections.other_information, None);
        assert_eq!(
            segmented.attribute_markers,
            vec!["#Preventive #Confidentiality".to_string()]
        );
    }

    #[test]
    fn test_preamble_lines_become_markers_not_prose() {
        let body = lines(&["note", "Control", "c1", "c2", "Purpose", "p1"]);
        let segmented = segment_lines(&body);
        assert_eq!(segmented.attribute_markers, vec!["note".to_string()]);
        assert_eq!(segmented.sections.control.as_deref(), Some("c1\nc2"));
        assert_eq!(segmented.sections.purpose.as_deref(), Some("p1"));
    }

    #[test]
    fn test_marker_lines_trimmed() {
        let body = lines(&["  #Detective  ", "Control", "x"]);
        let segmented = segment_lines(&body);
        assert_eq!(segmented.attribute_markers, vec!["#Detective".to_string()]);
    }

    #[test]
    fn test_header_with_surrounding_whitespace_recognized() {
        let body = lines(&["  Purpose  ", "why it matters"]);
        let segmented = segment_lines(&body);
        assert_eq!(segmented.sections.purpose.as_deref(), Some("why it matters"));
    }

    #[test]
    fn test_empty_section_stays_unset() {
        // A header immediately followed by another header fills nothing
        let body = lines(&["Control", "Purpose", "p"]);
        let segmented = segment_lines(&body);
        assert_eq!(segmented.sections.control, None);
        assert_eq!(segmented.sections.purpose.as_deref(), Some("p"));
    }

    #[test]
    fn test_duplicate_header_overwrites() {
        let body = lines(&["Control", "first", "Control", "second"]);
        let segmented = segment_lines(&body);
        assert_eq!(segmented.sections.control.as_deref(), Some("second"));
    }

    #[test]
    fn test_section_lines_kept_verbatim() {
        let body = lines(&["Guidance", "  indented detail", "trailing spaces  "]);
        let segmented = segment_lines(&body);
        assert_eq!(
            segmented.sections.guidance.as_deref(),
            Some("  indented detail\ntrailing spaces  ")
        );
    }

    #[test]
    fn test_no_headers_yields_empty_sections() {
        // Without a header nothing becomes prose; every line lands in
        // the marker bucket
        let body = lines(&["only prose", "more prose"]);
        let segmented = segment_lines(&body);
        assert!(segmented.sections.is_empty());
        assert_eq!(
            segmented.attribute_markers,
            vec!["only prose".to_string(), "more prose".to_string()]
        );
    }

    #[test]
    fn test_segment_outline_targets_leaves() {
        use crate::types::SectionNode;

        let mut child = SectionNode::new("5.1", "Policies", "5.1 Policies", 1);
        child.lines = lines(&["Control", "policy text"]);
        let mut parent = SectionNode::new("5", "Organizational", "5 Organizational", 0);
        parent.lines = lines(&["Control", "must not be segmented"]);
        parent.children.push(child);

        let mut childless = SectionNode::new("6", "People", "6 People", 2);
        childless.lines = lines(&["Purpose", "leaf body"]);

        let mut outline = DocumentOutline {
            meta: crate::types::OutlineMeta {
                source: "test".to_string(),
                extracted_at: String::new(),
                patterns: crate::types::OutlinePatterns {
                    l1: String::new(),
                    l2: String::new(),
                },
                include_heading_in_lines: false,
            },
            prologue: crate::types::Prologue { lines: vec![] },
            l1_sections: vec![parent, childless],
        };
        segment_outline(&mut outline);

        let parent = &outline.l1_sections[0];
        assert!(parent.content.is_empty());
        assert_eq!(
            parent.children[0].content.control.as_deref(),
            Some("policy text")
        );
        assert_eq!(
            outline.l1_sections[1].content.purpose.as_deref(),
            Some("leaf body")
        );
    }
}
