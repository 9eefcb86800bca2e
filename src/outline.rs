//! Two-level section tree builder.
//!
//! Consumes an ordered line sequence and the heading recognizer's
//! classifications in a single forward pass, producing a
//! [`DocumentOutline`]: prologue, then ordered level-1 sections, each
//! containing ordered level-2 children.
//!
//! Known failure modes are kept rather than corrected: a document with
//! no recognizable headings degrades silently into an all-prologue
//! outline, and a level-2 heading whose prefix matches no open level-1
//! gets a synthesized placeholder parent with an empty title.

use chrono::Utc;

use crate::heading::{HeadingMatch, HeadingRecognizer};
use crate::types::{DocumentOutline, OutlineMeta, OutlinePatterns, Prologue, SectionNode};

/// Builder for two-level document outlines.
#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    recognizer: HeadingRecognizer,
    include_heading_in_lines: bool,
}

/// Mutable pass state: the open nodes and the accumulated result.
///
/// Explicitly local to one `build` call; a node becomes immutable the
/// moment a sibling or ancestor-level heading closes it.
#[derive(Debug, Default)]
struct BuilderState {
    prologue: Vec<String>,
    l1_sections: Vec<SectionNode>,
    current_l1: Option<SectionNode>,
    current_l2: Option<SectionNode>,
}

impl BuilderState {
    /// Close the open level-2 node, attaching it to the open level-1.
    fn close_l2(&mut self) {
        if let Some(l2) = self.current_l2.take() {
            if let Some(l1) = self.current_l1.as_mut() {
                l1.children.push(l2);
            }
        }
    }

    /// Close the open level-1 node, flushing any open level-2 first.
    /// Closing order is always inner before outer.
    fn close_l1(&mut self) {
        self.close_l2();
        if let Some(l1) = self.current_l1.take() {
            self.l1_sections.push(l1);
        }
    }

    /// Append a content line to the innermost open node, or the prologue.
    fn push_content(&mut self, line: &str) {
        if let Some(l2) = self.current_l2.as_mut() {
            l2.lines.push(line.to_string());
        } else if let Some(l1) = self.current_l1.as_mut() {
            l1.lines.push(line.to_string());
        } else {
            self.prologue.push(line.to_string());
        }
    }
}

impl OutlineBuilder {
    /// Create a builder with the given recognizer.
    #[must_use]
    pub fn new(recognizer: HeadingRecognizer) -> Self {
        Self {
            recognizer,
            include_heading_in_lines: false,
        }
    }

    /// Control whether heading lines are included in the node's own
    /// `lines` collection (default: excluded).
    #[must_use]
    pub fn include_heading_in_lines(mut self, include: bool) -> Self {
        self.include_heading_in_lines = include;
        self
    }

    /// Build the outline from an ordered line sequence.
    ///
    /// `source` is recorded in the provenance metadata only.
    #[must_use]
    pub fn build(&self, lines: &[String], source: &str) -> DocumentOutline {
        let mut state = BuilderState::default();

        for (idx, line) in lines.iter().enumerate() {
            match self.recognizer.classify(line.trim()) {
                HeadingMatch::Level2 { id, title } => {
                    self.open_level2(&mut state, id, title, line, idx);
                }
                HeadingMatch::Level1 { id, title } => {
                    state.close_l1();
                    state.current_l1 = Some(self.new_node(id, title, line, idx));
                }
                HeadingMatch::NoMatch => state.push_content(line),
            }
        }

        // Final closes, inner before outer
        state.close_l1();

        DocumentOutline {
            meta: OutlineMeta {
                source: source.to_string(),
                extracted_at: Utc::now().to_rfc3339(),
                patterns: OutlinePatterns {
                    l1: self.recognizer.l1_pattern().to_string(),
                    l2: self.recognizer.l2_pattern().to_string(),
                },
                include_heading_in_lines: self.include_heading_in_lines,
            },
            prologue: Prologue {
                lines: state.prologue,
            },
            l1_sections: state.l1_sections,
        }
    }

    /// Handle a level-2 heading `A.B`, synthesizing a placeholder
    /// level-1 when none with id `A` is open.
    fn open_level2(
        &self,
        state: &mut BuilderState,
        id: String,
        title: String,
        raw: &str,
        idx: usize,
    ) {
        let prefix = id.split('.').next().unwrap_or(id.as_str()).to_string();

        let prefix_matches = state
            .current_l1
            .as_ref()
            .is_some_and(|l1| l1.id == prefix);
        if !prefix_matches {
            state.close_l1();
            // Placeholder parent: the real heading was never seen, so
            // the title stays empty and headingRaw is blank.
            tracing::debug!(id = %id, prefix = %prefix, "synthesizing placeholder level-1 section");
            state.current_l1 = Some(SectionNode::new(prefix, "", "", idx));
        }

        state.close_l2();
        state.current_l2 = Some(self.new_node(id, title, raw, idx));
    }

    fn new_node(&self, id: String, title: String, raw: &str, idx: usize) -> SectionNode {
        let mut node = SectionNode::new(id, title, raw, idx);
        if self.include_heading_in_lines {
            node.lines.push(raw.to_string());
        }
        node
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new(HeadingRecognizer::new())
    }
}
