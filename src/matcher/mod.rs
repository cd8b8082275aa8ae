//! Public suffix matching.
//!
//! [`SuffixTrie`] stores the rule set keyed by reversed labels and
//! [`suffix_len`] turns a normalized hostname into the number of trailing
//! labels that form its public suffix.
//!
//! ## Example
//!
//! ```
//! use domain_extract_r::matcher::{suffix_len, SuffixTrie};
//! use domain_extract_r::RuleKind;
//!
//! let mut trie = SuffixTrie::new();
//! trie.insert_labels(&["co", "uk"], RuleKind::Plain);
//! trie.insert_labels(&["*", "ck"], RuleKind::Wildcard);
//! trie.insert_labels(&["www", "ck"], RuleKind::Exception);
//!
//! assert_eq!(suffix_len(&trie, &["www", "theregister", "co", "uk"]), 2);
//! assert_eq!(suffix_len(&trie, &["bla", "ck"]), 2);
//! assert_eq!(suffix_len(&trie, &["www", "ck"]), 1);
//! assert_eq!(suffix_len(&trie, &["nonexistenttld"]), 0);
//! ```

mod trie;

pub use trie::SuffixTrie;

/// Outcome of a single trie walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuffixMatch {
    /// Labels consumed along the path to the deepest terminal (0 if none)
    pub matched_depth: usize,
    /// The deepest terminal was an exception rule
    pub is_exception: bool,
}

impl SuffixMatch {
    pub fn new(matched_depth: usize, is_exception: bool) -> Self {
        Self {
            matched_depth,
            is_exception,
        }
    }

    /// Number of trailing labels forming the public suffix.
    ///
    /// An exception match gives back its leftmost label.
    pub fn suffix_len(&self) -> usize {
        if self.is_exception {
            self.matched_depth.saturating_sub(1)
        } else {
            self.matched_depth
        }
    }
}

/// Public suffix length for labels in written order ("www", "google", "com").
///
/// Unmatched hostnames get 0: no implicit one-label suffix is assumed.
pub fn suffix_len<S: AsRef<str>>(trie: &SuffixTrie, labels: &[S]) -> usize {
    trie.lookup(labels.iter().rev().map(|l| l.as_ref()))
        .suffix_len()
}
