// ABOUTME: The scan pipeline: metrics, classification, claiming, region assembly.
// ABOUTME: Total over any parsed document; an empty page yields an empty result.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::claim::{assign_ownership, Ownership};
use crate::classify::find_title_candidates;
use crate::dom::{element_for, next_element_sibling};
use crate::exclude::is_excluded;
use crate::extract::extract_spoken_text;
use crate::metrics::compute_metrics;
use crate::options::{ScanOptions, ScannerBuilder};

/// One title-to-content ownership group found by a scan.
///
/// Holds only node identities; the spoken text is extracted on demand
/// against the document, at speak time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    claim: u32,
    title: NodeId,
    content: Option<NodeId>,
}

impl Region {
    /// The claim id owning this region, starting at 1.
    pub fn claim(&self) -> u32 {
        self.claim
    }

    /// The title anchor node.
    pub fn title_node(&self) -> NodeId {
        self.title
    }

    /// The first owned content node after the title, if any.
    pub fn content_node(&self) -> Option<NodeId> {
        self.content
    }

    /// Spoken text of the title. Empty string when the node is gone or
    /// has nothing to say.
    pub fn title_text(&self, doc: &Html) -> String {
        element_for(doc, self.title)
            .map(extract_spoken_text)
            .unwrap_or_default()
    }

    /// Spoken text of the owned content, or `None` when the region has no
    /// content node or its extracted text is empty.
    pub fn content_text(&self, doc: &Html) -> Option<String> {
        let element = element_for(doc, self.content?)?;
        let text = extract_spoken_text(element);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Snapshot of the extracted texts, for reporting.
    pub fn report(&self, doc: &Html) -> RegionReport {
        RegionReport {
            claim: self.claim,
            title: self.title_text(doc),
            content: self.content_text(doc),
        }
    }
}

/// Serializable snapshot of one region's extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionReport {
    pub claim: u32,
    pub title: String,
    pub content: Option<String>,
}

/// Everything one scan pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    candidates: Vec<NodeId>,
    ownership: Ownership,
    regions: Vec<Region>,
}

impl ScanResult {
    /// Regions in claim order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The region carrying `claim`, if any.
    pub fn region(&self, claim: u32) -> Option<&Region> {
        self.regions.iter().find(|r| r.claim == claim)
    }

    /// Title candidates in document order, before claiming collapsed
    /// swallowed ones.
    pub fn candidates(&self) -> &[NodeId] {
        &self.candidates
    }

    /// The ownership marks backing the regions.
    pub fn ownership(&self) -> &Ownership {
        &self.ownership
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Extracted-text snapshots for every region, in claim order.
    pub fn reports(&self, doc: &Html) -> Vec<RegionReport> {
        self.regions.iter().map(|r| r.report(doc)).collect()
    }
}

/// Scans a parsed document for title regions.
#[derive(Debug, Clone)]
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// A builder preloaded with default options.
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Run the full pipeline over `doc`: metrics bottom-up, candidates
    /// top-down, ownership in traversal order, regions in claim order.
    ///
    /// Total: a document with no body, no candidates, or no content
    /// produces an empty result, never an error. Re-scanning the same
    /// document yields an identical result.
    pub fn scan(&self, doc: &Html) -> ScanResult {
        let Some(root) = scan_root(doc) else {
            return ScanResult {
                candidates: Vec::new(),
                ownership: Ownership::default(),
                regions: Vec::new(),
            };
        };

        let metrics = compute_metrics(root);
        let candidates = find_title_candidates(root, &metrics, &self.options);
        let ownership = assign_ownership(doc, &candidates, &self.options);

        let regions = ownership
            .anchors
            .iter()
            .map(|anchor| Region {
                claim: anchor.claim,
                title: anchor.node,
                content: resolve_content(doc, anchor.node, anchor.claim, &ownership),
            })
            .collect::<Vec<_>>();

        log::debug!(
            "scan: {} candidates, {} regions",
            candidates.len(),
            regions.len()
        );

        ScanResult {
            candidates,
            ownership,
            regions,
        }
    }
}

/// The scan starts at `<body>` when the document has one, else at the
/// root element (fragments).
fn scan_root(doc: &Html) -> Option<ElementRef<'_>> {
    let body = Selector::parse("body").ok()?;
    doc.select(&body).next().or_else(|| Some(doc.root_element()))
}

/// The first element sibling after the title that this claim owns. Skips
/// excluded elements and anything left unmarked or owned elsewhere.
fn resolve_content(doc: &Html, title: NodeId, claim: u32, ownership: &Ownership) -> Option<NodeId> {
    let title_el = element_for(doc, title)?;
    let mut sibling = next_element_sibling(&title_el);
    while let Some(element) = sibling {
        if !is_excluded(&element) && ownership.claim_of(element.id()) == Some(claim) {
            return Some(element.id());
        }
        sibling = next_element_sibling(&element);
    }
    None
}
