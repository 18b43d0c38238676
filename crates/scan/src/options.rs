// ABOUTME: Scan configuration: classifier policy, tunable thresholds, content policy.
// ABOUTME: ScannerBuilder provides a fluent API for constructing Scanner instances.

use std::fmt;
use std::str::FromStr;

use crate::claim::default_content_policy;
use crate::scanner::Scanner;

/// Replaceable valid-content predicate consulted while claiming. Returns
/// true when the text reads as speakable prose.
pub type ContentPolicy = fn(&str) -> bool;

/// Which locality signal the title classifier consults for the sibling
/// following a semantic match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierPolicy {
    /// Accept when the next sibling's subtree height is at or below the
    /// configured threshold.
    #[default]
    Semantic,
    /// Accept when the next sibling's text density clears the document
    /// baseline by the configured margin.
    Density,
}

impl fmt::Display for ClassifierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClassifierPolicy::Semantic => "semantic",
            ClassifierPolicy::Density => "density",
        };
        write!(f, "{}", s)
    }
}

/// Error for an unrecognized policy name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown classifier policy {0:?}, expected \"semantic\" or \"density\"")]
pub struct ParsePolicyError(String);

impl FromStr for ClassifierPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "semantic" => Ok(ClassifierPolicy::Semantic),
            "density" => Ok(ClassifierPolicy::Density),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

/// Tunables for one scan pass. The thresholds are heuristics, not
/// contracts; the defaults match the most complete variant of the source
/// behavior.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Maximum height of the sibling following a title for the semantic
    /// policy to accept it.
    pub height_threshold: u32,
    /// Locality signal used by the classifier.
    pub policy: ClassifierPolicy,
    /// Margin over the document baseline density for the density policy.
    pub density_margin: f64,
    /// Valid-content predicate used while claiming.
    pub content_policy: ContentPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            height_threshold: 3,
            policy: ClassifierPolicy::Semantic,
            density_margin: 5.0,
            content_policy: default_content_policy,
        }
    }
}

/// Builder for constructing Scanner instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ScannerBuilder {
    opts: ScanOptions,
}

impl ScannerBuilder {
    /// Create a new ScannerBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: ScanOptions::default(),
        }
    }

    /// Set the height threshold for the semantic locality heuristic.
    pub fn height_threshold(mut self, threshold: u32) -> Self {
        self.opts.height_threshold = threshold;
        self
    }

    /// Set the classifier policy.
    pub fn policy(mut self, policy: ClassifierPolicy) -> Self {
        self.opts.policy = policy;
        self
    }

    /// Set the density margin for the density policy.
    pub fn density_margin(mut self, margin: f64) -> Self {
        self.opts.density_margin = margin;
        self
    }

    /// Replace the valid-content predicate.
    pub fn content_policy(mut self, policy: ContentPolicy) -> Self {
        self.opts.content_policy = policy;
        self
    }

    /// Build the Scanner with the configured options.
    pub fn build(self) -> Scanner {
        Scanner::new(self.opts)
    }
}

impl Default for ScannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
