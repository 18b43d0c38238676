// ABOUTME: Content claim resolver assigning each node to at most one title's region.
// ABOUTME: Walks forward siblings recursively, write-once marks keyed by NodeId.

use std::collections::HashMap;

use ego_tree::NodeId;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::dom::{element_for, next_element_sibling};
use crate::exclude::is_excluded;
use crate::options::ScanOptions;

/// A word consisting entirely of uppercase letters. Text containing one is
/// treated as a decorative label or acronym header rather than prose.
static UPPERCASE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]+\b").unwrap());

/// The default valid-content policy: reject text with any all-uppercase
/// word. Coarse on purpose; swap in your own via `ScanOptions::content_policy`.
pub fn default_content_policy(text: &str) -> bool {
    !UPPERCASE_WORD.is_match(text.trim())
}

/// The title element anchoring one claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub node: NodeId,
    pub claim: u32,
}

/// The complete ownership assignment of one scan pass.
///
/// `marks` is write-once: a node that carries a claim id is never
/// reconsidered by a later claim, which is what keeps regions disjoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ownership {
    pub anchors: Vec<Anchor>,
    pub marks: HashMap<NodeId, u32>,
}

impl Ownership {
    /// The claim id marked on `node`, if any.
    pub fn claim_of(&self, node: NodeId) -> Option<u32> {
        self.marks.get(&node).copied()
    }
}

/// Assign ownership marks for `candidates`, consumed in input order.
///
/// A candidate that was already swallowed by an earlier claim's walk gets
/// no anchor and no claim id of its own; that outer check is the only
/// thing preventing two controls over the same region. Claim ids start at
/// 1 and increase monotonically.
pub fn assign_ownership(doc: &Html, candidates: &[NodeId], options: &ScanOptions) -> Ownership {
    let mut ownership = Ownership::default();
    let mut next_claim = 0u32;

    for &candidate in candidates {
        if ownership.marks.contains_key(&candidate) {
            log::debug!("candidate already claimed, skipping: {:?}", candidate);
            continue;
        }
        let Some(element) = element_for(doc, candidate) else {
            continue;
        };
        next_claim += 1;
        ownership.anchors.push(Anchor {
            node: candidate,
            claim: next_claim,
        });
        mark_forward(element, next_claim, &mut ownership.marks, options);
    }

    ownership
}

/// Walk forward through element siblings starting at `start` itself,
/// marking each unmarked, non-excluded sibling whose text passes the
/// valid-content policy, and recursing the same walk into its element
/// children before moving on. Already-marked siblings are left untouched
/// and not descended into.
fn mark_forward(
    start: ElementRef<'_>,
    claim: u32,
    marks: &mut HashMap<NodeId, u32>,
    options: &ScanOptions,
) {
    let mut sibling = Some(start);
    while let Some(element) = sibling {
        if !is_excluded(&element) && !marks.contains_key(&element.id()) {
            let text = element.text().collect::<String>();
            if (options.content_policy)(&text) {
                marks.insert(element.id(), claim);
            }
            for child in element.children().filter_map(ElementRef::wrap) {
                mark_forward(child, claim, marks, options);
            }
        }
        sibling = next_element_sibling(&element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::find_title_candidates;
    use crate::metrics::compute_metrics;
    use scraper::Selector;

    fn scan(html: &str) -> (Html, Ownership) {
        let doc = Html::parse_document(html);
        let body = doc
            .select(&Selector::parse("body").unwrap())
            .next()
            .unwrap();
        let options = ScanOptions::default();
        let metrics = compute_metrics(body);
        let candidates = find_title_candidates(body, &metrics, &options);
        let ownership = assign_ownership(&doc, &candidates, &options);
        (doc, ownership)
    }

    fn node(doc: &Html, css: &str) -> NodeId {
        doc.select(&Selector::parse(css).unwrap())
            .next()
            .unwrap()
            .id()
    }

    #[test]
    fn default_policy_rejects_uppercase_words() {
        assert!(!default_content_policy("WARNING"));
        assert!(!default_content_policy("read the FAQ first"));
        assert!(default_content_policy("Hello & welcome."));
        assert!(default_content_policy(""));
    }

    #[test]
    fn claim_ids_start_at_one_and_increase() {
        let html = "<body>\
                    <div><h2>One</h2><p>first body text</p></div>\
                    <div><h2>Two</h2><p>second body text</p></div>\
                    </body>";
        let (_, ownership) = scan(html);
        let claims: Vec<u32> = ownership.anchors.iter().map(|a| a.claim).collect();
        assert_eq!(claims, vec![1, 2]);
    }

    #[test]
    fn earlier_marks_survive_a_later_overlapping_walk() {
        // The all-caps heading stays unmarked after claim 1's walk, so it
        // still anchors claim 2 - but its walk may not steal the paragraph
        // claim 1 already owns.
        let html = "<body><h2>Real heading</h2><h2>INDEX</h2><p>beta text</p></body>";
        let (doc, ownership) = scan(html);
        assert_eq!(ownership.anchors.len(), 2);
        assert_eq!(ownership.claim_of(node(&doc, "p")), Some(1));
    }

    #[test]
    fn swallowed_candidate_gets_no_claim() {
        // The second h2 is marked by the first claim's forward walk, so it
        // anchors nothing.
        let html = r#"<body><h2 class="title">Intro</h2><p>Hello</p><h2 class="title">Next</h2></body>"#;
        let (doc, ownership) = scan(html);
        assert_eq!(ownership.anchors.len(), 1);
        let second = doc
            .select(&Selector::parse("h2").unwrap())
            .nth(1)
            .unwrap()
            .id();
        assert_eq!(ownership.claim_of(second), Some(1));
    }

    #[test]
    fn uppercase_content_is_walked_but_never_marked() {
        let html = "<body><h2>Head</h2><p id=\"warn\">WARNING <span>inner detail</span></p>\
                    <p id=\"real\">Real prose follows.</p></body>";
        let (doc, ownership) = scan(html);
        // the WARNING paragraph itself carries no mark
        assert_eq!(ownership.claim_of(node(&doc, "#warn")), None);
        // but the walk still descended into it and marked the valid span
        assert_eq!(ownership.claim_of(node(&doc, "#warn > span")), Some(1));
        assert_eq!(ownership.claim_of(node(&doc, "#real")), Some(1));
    }

    #[test]
    fn excluded_elements_are_never_marked() {
        let html = "<body><h2>Head</h2><nav><p>menu text</p></nav><p>real text</p></body>";
        let (doc, ownership) = scan(html);
        assert_eq!(ownership.claim_of(node(&doc, "nav")), None);
        assert_eq!(ownership.claim_of(node(&doc, "nav > p")), None);
        assert_eq!(ownership.claim_of(node(&doc, "body > p")), Some(1));
    }

    #[test]
    fn rerun_produces_identical_assignment() {
        let html = "<body>\
                    <h2>First</h2><p>alpha text</p>\
                    <div><h3>Second</h3><p>beta text</p></div>\
                    </body>";
        let (_, first) = scan(html);
        let (_, second) = scan(html);
        assert_eq!(first.anchors.len(), second.anchors.len());
        assert_eq!(first.marks.len(), second.marks.len());
    }
}
