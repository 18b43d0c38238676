// ABOUTME: Main library entry point for the readaloud document scanner.
// ABOUTME: Re-exports the public API: Scanner, ScannerBuilder, ScanOptions, ScanResult, Region.

//! readaloud-scan - heuristic title/content region detection for HTML documents.
//!
//! This crate scans a parsed document for plausible title elements, claims
//! the content block belonging to each one (every node owned by at most one
//! region), and extracts clean spoken text from a claimed region on demand.
//!
//! # Example
//!
//! ```
//! use readaloud_scan::Scanner;
//! use scraper::Html;
//!
//! let doc = Html::parse_document(
//!     r#"<body><h2 class="title">Intro</h2><p>Hello &amp; welcome.</p></body>"#,
//! );
//! let result = Scanner::builder().build().scan(&doc);
//!
//! let region = &result.regions()[0];
//! assert_eq!(region.title_text(&doc), "Intro");
//! assert_eq!(region.content_text(&doc).unwrap(), "Hello & welcome.");
//! ```

pub mod claim;
pub mod classify;
pub mod dom;
pub mod exclude;
pub mod extract;
pub mod metrics;
pub mod options;
pub mod scanner;

pub use crate::claim::{assign_ownership, default_content_policy, Anchor, Ownership};
pub use crate::classify::{find_title_candidates, matches_title_semantics};
pub use crate::exclude::{is_excluded, is_excluded_tag, EXCLUDED_KEYWORDS, EXCLUDED_TAGS};
pub use crate::extract::{collapse_whitespace, decode_entities, extract_spoken_text, strip_tags};
pub use crate::metrics::{compute_metrics, MetricsMap, NodeMetrics};
pub use crate::options::{
    ClassifierPolicy, ContentPolicy, ParsePolicyError, ScanOptions, ScannerBuilder,
};
pub use crate::scanner::{Region, RegionReport, ScanResult, Scanner};
