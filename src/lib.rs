//! Norm Extractor - Reconstruct section trees from flat standard text.
//!
//! This crate ingests page-annotated lines extracted from security
//! standards (ISO 27002-style outlines, IEC 62443-style deep
//! numbering) and rebuilds their hierarchical structure: section
//! trees, control-section bodies and retrieval-ready chunks.
//!
//! # Example
//!
//! ```
//! use norm_extractor::heading::{HeadingMatch, HeadingRecognizer};
//!
//! let recognizer = HeadingRecognizer::new();
//! assert_eq!(
//!     recognizer.classify("5.1\tPolicies for information security"),
//!     HeadingMatch::Level2 {
//!         id: "5.1".to_string(),
//!         title: "Policies for information security".to_string(),
//!     }
//! );
//! ```
//!
//! # Architecture
//!
//! The extractor is organized into several modules:
//!
//! - [`types`]: Core data types (PageLine, Category, DocumentOutline, etc.)
//! - [`error`]: Error types and Result alias
//! - [`heading`]: Level-1/level-2 heading recognition
//! - [`outline`]: Two-level section tree building
//! - [`ingest`]: Raw text to page-annotated categories
//! - [`structure`]: Deep-numbering annotation and parent assignment
//! - [`segment`]: Control-section segmentation of leaf bodies
//! - [`attributes`]: Controlled-vocabulary attribute classification
//! - [`chunk`]: Chunk record emission with content fingerprints
//! - [`block`]: JSON block I/O
//! - [`config`]: Job configuration
//! - [`cli`]: Command-line interface

pub mod attributes;
pub mod block;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod error;
pub mod heading;
pub mod ingest;
pub mod outline;
pub mod segment;
pub mod structure;
pub mod types;

// Re-export main entry points
pub use ingest::split_into_categories;
pub use outline::OutlineBuilder;

// Re-export commonly used items
pub use chunk::{build_chunks, ChunkMetadata, ChunkRecord};
pub use error::{ExtractError, Result};
pub use heading::{HeadingMatch, HeadingRecognizer};
pub use segment::{segment_lines, ControlSections};
pub use types::{Category, DocumentOutline, PageLine, SectionNode};
