//! Chunk emission for segmented outlines.
//!
//! Every segmented leaf with normative text becomes one chunk record
//! with a stable identifier and a SHA-256 fingerprint of the normative
//! text, so re-ingesting unchanged text yields byte-identical records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::types::{DocumentOutline, SectionNode};

/// Lowercase hex SHA-256 digest of a string.
#[must_use]
pub fn sha256_hex(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

/// Document-level metadata merged into every chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Stable document identifier, the chunk id prefix.
    pub doc_id: String,

    /// Free-form metadata copied verbatim onto each record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Surrounding text carried alongside a chunk for retrieval display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkContext {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_information: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<crate::attributes::ControlAttributes>,
}

/// One normative chunk of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub chunk_id: String,
    pub doc_id: String,

    /// Dotted section identifier within the document.
    pub section_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Chunks of the same top-level section share a group.
    pub group_id: String,

    pub seq: u32,
    pub normative: bool,
    pub informative: bool,

    pub text_normative: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_informative: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_note: Option<String>,

    /// Fingerprint of `text_normative`.
    pub sha256: String,

    pub context: ChunkContext,

    /// Document metadata copied onto the record.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

/// Top-level shape of a chunk output file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkFile {
    pub chunks: Vec<ChunkRecord>,
}

/// Build chunk records from a segmented outline.
///
/// Walks leaves in document order and emits one record per leaf whose
/// `Control` section is non-empty. Leaves without normative text are
/// skipped entirely rather than emitted empty.
#[must_use]
pub fn build_chunks(outline: &DocumentOutline, metadata: &ChunkMetadata) -> Vec<ChunkRecord> {
    let mut chunks = Vec::new();

    for l1 in &outline.l1_sections {
        if l1.children.is_empty() {
            push_chunk(&mut chunks, l1, metadata);
        } else {
            for l2 in &l1.children {
                push_chunk(&mut chunks, l2, metadata);
            }
        }
    }

    chunks
}

fn push_chunk(chunks: &mut Vec<ChunkRecord>, node: &SectionNode, metadata: &ChunkMetadata) {
    let Some(text_normative) = node.content.control.as_deref() else {
        return;
    };
    if text_normative.is_empty() {
        return;
    }

    let group = node.id.split('.').next().unwrap_or(&node.id);

    chunks.push(ChunkRecord {
        chunk_id: format!("{}/{}", metadata.doc_id, node.id),
        doc_id: metadata.doc_id.clone(),
        section_path: node.id.clone(),
        parent_id: None,
        group_id: format!("{}/{}", metadata.doc_id, group),
        seq: 1,
        normative: true,
        informative: false,
        text_normative: text_normative.to_string(),
        text_informative: None,
        context_note: None,
        sha256: sha256_hex(text_normative),
        context: ChunkContext {
            name: node.title.clone(),
            purpose: node.content.purpose.clone(),
            guidance: node.content.guidance.clone(),
            other_information: node.content.other_information.clone(),
            attributes: node.attributes.clone(),
        },
        metadata: metadata.extra.clone(),
    });
}
