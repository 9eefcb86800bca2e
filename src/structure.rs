//! Structural parser for deep-numbered categories.
//!
//! Two passes over a [`Category`]'s lines. The first annotates lines
//! that match one of three anchored numeric patterns (depth 3, 4 or
//! 5), inferring possibly multi-line titles by bounded look-ahead and
//! tombstoning the consumed continuation lines. The second assigns
//! every line a parent index via a monotonic indent stack.
//!
//! Pattern priority is fixed: depth 3 is tried before depth 4 before
//! depth 5, and the first match wins. A line is never retried against
//! a deeper pattern. Existing documents rely on this tie-break.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{
    Category, Depth3Annotation, Depth4Annotation, Depth5Annotation, PageLine, SectionKind,
    ROOT_PARENT,
};

/// Maximum number of physical continuation lines folded into a title.
const MAX_TITLE_CONTINUATIONS: usize = 3;

// The leading numeric component is the standard's clause number and is
// dropped from the annotation; the remaining components map onto
// category/section3/section4/section5 numbers.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DEPTH3_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<clause>\d+)\.(?P<category>\d+)\.(?P<s3>\d+)(?:[\t ]+(?P<title>\S.*?))?\s*$")
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DEPTH4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<clause>\d+)\.(?P<category>\d+)\.(?P<s3>\d+)\.(?P<s4>\d+)(?:[\t ]+(?P<title>\S.*?))?\s*$",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DEPTH5_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<clause>\d+)\.(?P<category>\d+)\.(?P<s3>\d+)\.(?P<s4>\d+)\.(?P<s5>\d+)(?:[\t ]+(?P<title>\S.*?))?\s*$",
    )
    .expect("valid regex")
});

/// Result of matching a line against the numeric heading patterns.
///
/// `title` is the trailing capture on the same line; empty when the
/// line carries the numbering alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepthMatch {
    NoMatch,
    Depth3 {
        category: String,
        section3: String,
        title: String,
    },
    Depth4 {
        category: String,
        section3: String,
        section4: String,
        title: String,
    },
    Depth5 {
        category: String,
        section3: String,
        section4: String,
        section5: String,
        title: String,
    },
}

/// Match a line against the three numeric patterns in priority order.
#[must_use]
pub fn match_numeric(text: &str) -> DepthMatch {
    if let Some(caps) = DEPTH3_RE.captures(text) {
        return DepthMatch::Depth3 {
            category: caps["category"].to_string(),
            section3: caps["s3"].to_string(),
            title: capture_title(&caps),
        };
    }
    if let Some(caps) = DEPTH4_RE.captures(text) {
        return DepthMatch::Depth4 {
            category: caps["category"].to_string(),
            section3: caps["s3"].to_string(),
            section4: caps["s4"].to_string(),
            title: capture_title(&caps),
        };
    }
    if let Some(caps) = DEPTH5_RE.captures(text) {
        return DepthMatch::Depth5 {
            category: caps["category"].to_string(),
            section3: caps["s3"].to_string(),
            section4: caps["s4"].to_string(),
            section5: caps["s5"].to_string(),
            title: capture_title(&caps),
        };
    }
    DepthMatch::NoMatch
}

fn capture_title(caps: &regex::Captures<'_>) -> String {
    caps.name("title")
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Annotate a category's lines with structural headings and parents.
///
/// Tombstoned lines are skipped by the heading scan but still take
/// part in parent assignment: tombstoning suppresses heading
/// re-detection only, never indent-stack membership.
pub fn analyze_category(category: &mut Category) {
    let len = category.lines.len();
    for i in 0..len {
        if category.lines[i].text.is_empty() || category.lines[i].consumed {
            continue;
        }

        let matched = match_numeric(&category.lines[i].text);
        match matched {
            DepthMatch::NoMatch => {}
            DepthMatch::Depth3 {
                category: cat,
                section3,
                title,
            } => {
                let title = resolve_title(&mut category.lines, i, title);
                let kind = SectionKind::from_title(&title);
                category.lines[i].section3 = Some(Depth3Annotation {
                    category_number: cat,
                    section3_number: section3,
                    title,
                    kind,
                });
            }
            DepthMatch::Depth4 {
                category: cat,
                section3,
                section4,
                title,
            } => {
                let title = resolve_title(&mut category.lines, i, title);
                let kind = SectionKind::from_title(&title);
                category.lines[i].section4 = Some(Depth4Annotation {
                    category_number: cat,
                    section3_number: section3,
                    section4_number: section4,
                    title,
                    kind,
                });
            }
            DepthMatch::Depth5 {
                category: cat,
                section3,
                section4,
                section5,
                title,
            } => {
                let title = resolve_title(&mut category.lines, i, title);
                let kind = SectionKind::from_title(&title);
                category.lines[i].section5 = Some(Depth5Annotation {
                    category_number: cat,
                    section3_number: section3,
                    section4_number: section4,
                    section5_number: section5,
                    title,
                    kind,
                });
            }
        }
    }

    assign_parents(&mut category.lines);
}

/// Resolve a heading's title, consuming up to
/// [`MAX_TITLE_CONTINUATIONS`] following lines when the heading line
/// carries no title of its own.
///
/// The first continuation line is consumed unconditionally; each
/// further line must share the *first* continuation's indent. Consumed
/// lines are tombstoned so later heading scans skip them.
fn resolve_title(lines: &mut [PageLine], i: usize, inline_title: String) -> String {
    if !inline_title.is_empty() {
        return inline_title;
    }
    if i + 1 >= lines.len() {
        return inline_title;
    }

    let mut title = lines[i + 1].text.trim().to_string();
    lines[i + 1].consumed = true;
    let continuation_indent = lines[i + 1].indent;

    for offset in 2..=MAX_TITLE_CONTINUATIONS {
        let j = i + offset;
        if j >= lines.len() || lines[j].indent != continuation_indent {
            break;
        }
        title.push(' ');
        title.push_str(&lines[j].text);
        lines[j].consumed = true;
    }

    title
}

/// Assign each line the index of its nearest strictly-shallower-indent
/// ancestor, or [`ROOT_PARENT`] when there is none.
///
/// Every line participates, headings and prose alike: non-heading
/// lines can be parents too.
pub fn assign_parents(lines: &mut [PageLine]) {
    let mut stack: Vec<usize> = Vec::new();

    for i in 0..lines.len() {
        let indent = lines[i].indent;

        while stack
            .last()
            .is_some_and(|&top| lines[top].indent >= indent)
        {
            stack.pop();
        }

        lines[i].parent = stack
            .last()
            .map_or(ROOT_PARENT, |&top| {
                isize::try_from(top).unwrap_or(ROOT_PARENT)
            });

        stack.push(i);
    }
}
