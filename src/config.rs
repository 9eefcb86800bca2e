//! Job configuration for the extraction pipeline.
//!
//! A job file is a JSON map of document name to the steps configured
//! for that document. Each step names its input and output paths;
//! requesting a step a document does not configure is a fatal error
//! raised before any file is touched.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::block;
use crate::chunk::ChunkMetadata;
use crate::error::{ExtractError, Result};
use crate::ingest::IngestOptions;

/// Structural-parsing step: raw text in, categorized document out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureStep {
    pub input_text_path: PathBuf,
    pub output_json_path: PathBuf,

    #[serde(flatten)]
    pub options: IngestOptions,
}

/// Outline step: line block in, section tree out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineStep {
    pub input_json_path: PathBuf,
    pub output_json_path: PathBuf,

    /// Keep matched heading lines in their section's body.
    #[serde(default)]
    pub include_heading_in_lines: bool,

    /// Level-1 heading pattern override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_pattern: Option<String>,

    /// Level-2 heading pattern override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2_pattern: Option<String>,
}

/// Segmentation step: outline in, outline with control sections out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStep {
    pub input_json_path: PathBuf,
    pub output_json_path: PathBuf,
}

/// Chunk step: segmented outline in, chunk records out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkStep {
    pub input_json_path: PathBuf,
    pub output_json_path: PathBuf,

    pub metadata: ChunkMetadata,
}

/// Steps configured for one document. Absent steps are simply not
/// runnable for that document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureStep>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<OutlineStep>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentStep>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<ChunkStep>,
}

/// A whole job file: document name to document configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobConfig {
    pub documents: BTreeMap<String, DocumentConfig>,
}

impl JobConfig {
    /// Load a job file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        block::read_json(path)
    }

    /// Look up a document's configuration by name.
    pub fn document(&self, name: &str) -> Result<&DocumentConfig> {
        self.documents
            .get(name)
            .ok_or_else(|| ExtractError::MissingDocument(name.to_string()))
    }
}

impl DocumentConfig {
    pub fn require_structure(&self, document: &str) -> Result<&StructureStep> {
        self.structure
            .as_ref()
            .ok_or_else(|| missing_step(document, "structure"))
    }

    pub fn require_outline(&self, document: &str) -> Result<&OutlineStep> {
        self.outline
            .as_ref()
            .ok_or_else(|| missing_step(document, "outline"))
    }

    pub fn require_segment(&self, document: &str) -> Result<&SegmentStep> {
        self.segment
            .as_ref()
            .ok_or_else(|| missing_step(document, "segment"))
    }

    pub fn require_chunks(&self, document: &str) -> Result<&ChunkStep> {
        self.chunks
            .as_ref()
            .ok_or_else(|| missing_step(document, "chunks"))
    }
}

fn missing_step(document: &str, step: &str) -> ExtractError {
    ExtractError::MissingStep {
        document: document.to_string(),
        step: step.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> JobConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_full_document_config() {
        let config = parse(
            r#"{
                "iso-27002": {
                    "outline": {
                        "inputJsonPath": "data/block.json",
                        "outputJsonPath": "out/outline.json",
                        "includeHeadingInLines": true,
                        "l1Pattern": "^(?P<id>\\d+) (?P<title>.+)$"
                    },
                    "segment": {
                        "inputJsonPath": "out/outline.json",
                        "outputJsonPath": "out/segmented.json"
                    },
                    "chunks": {
                        "inputJsonPath": "out/segmented.json",
                        "outputJsonPath": "out/chunks.json",
                        "metadata": {"doc_id": "iso-27002-2022", "language": "en"}
                    }
                }
            }"#,
        );

        let document = config.document("iso-27002").unwrap();
        let outline = document.require_outline("iso-27002").unwrap();
        assert_eq!(outline.input_json_path, PathBuf::from("data/block.json"));
        assert!(outline.include_heading_in_lines);
        assert!(outline.l1_pattern.is_some());
        assert!(outline.l2_pattern.is_none());

        let chunks = document.require_chunks("iso-27002").unwrap();
        assert_eq!(chunks.metadata.doc_id, "iso-27002-2022");
        assert_eq!(chunks.metadata.extra["language"], "en");
    }

    #[test]
    fn test_parse_structure_step_with_ingest_options() {
        let config = parse(
            r#"{
                "iec-62443": {
                    "structure": {
                        "inputTextPath": "data/raw.txt",
                        "outputJsonPath": "out/categories.json",
                        "clause": "4",
                        "skipLines": ["62443-2-1 IEC:2010(E)"]
                    }
                }
            }"#,
        );

        let step = config
            .document("iec-62443")
            .unwrap()
            .require_structure("iec-62443")
            .unwrap();
        assert_eq!(step.options.clause, "4");
        assert_eq!(step.options.skip_lines.len(), 1);
    }

    #[test]
    fn test_unknown_document_is_fatal() {
        let config = parse(r#"{"known": {}}"#);
        let err = config.document("unknown").unwrap_err();
        assert!(matches!(err, ExtractError::MissingDocument(name) if name == "unknown"));
    }

    #[test]
    fn test_missing_step_is_fatal() {
        let config = parse(r#"{"doc": {}}"#);
        let document = config.document("doc").unwrap();
        let err = document.require_outline("doc").unwrap_err();
        assert!(
            matches!(err, ExtractError::MissingStep { document, step }
                if document == "doc" && step == "outline")
        );
    }

    #[test]
    fn test_include_heading_defaults_to_false() {
        let config = parse(
            r#"{"doc": {"outline": {"inputJsonPath": "a", "outputJsonPath": "b"}}}"#,
        );
        let outline = config
            .document("doc")
            .unwrap()
            .require_outline("doc")
            .unwrap();
        assert!(!outline.include_heading_in_lines);
    }
}
