//! Suffix trie keyed by reversed label sequences.
//!
//! Nodes live in a flat arena and refer to each other by index, so a built
//! trie is a plain immutable value that can be shared behind an `Arc`.

use std::collections::HashMap;

use super::SuffixMatch;
use crate::types::{Rule, RuleKind};

const ROOT: usize = 0;
const WILDCARD: &str = "*";

#[derive(Debug, Clone, Default)]
struct Node {
    /// Exact label edges
    children: HashMap<String, usize>,
    /// Distinguished "*" edge, never stored in `children`
    wildcard: Option<usize>,
    /// A plain or wildcard rule ends here
    is_terminal: bool,
    /// An exception rule ends here
    is_exception: bool,
}

impl Node {
    #[inline]
    fn is_match(&self) -> bool {
        self.is_terminal || self.is_exception
    }
}

/// Arena-backed suffix trie
#[derive(Debug, Clone)]
pub struct SuffixTrie {
    nodes: Vec<Node>,
}

impl Default for SuffixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixTrie {
    /// Create an empty trie holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Insert a parsed rule.
    pub fn insert(&mut self, rule: &Rule) {
        self.insert_labels(&rule.labels, rule.kind);
    }

    /// Insert a rule given its labels in written order ("co", "uk").
    ///
    /// A "*" label walks or creates the wildcard edge. Exception rules mark
    /// the node of their literal first label.
    pub fn insert_labels<S: AsRef<str>>(&mut self, labels: &[S], kind: RuleKind) {
        let mut node = ROOT;
        for label in labels.iter().rev() {
            node = self.child_or_insert(node, label.as_ref());
        }

        let end = &mut self.nodes[node];
        match kind {
            RuleKind::Plain | RuleKind::Wildcard => end.is_terminal = true,
            RuleKind::Exception => end.is_exception = true,
        }
    }

    fn child_or_insert(&mut self, node: usize, label: &str) -> usize {
        let existing = if label == WILDCARD {
            self.nodes[node].wildcard
        } else {
            self.nodes[node].children.get(label).copied()
        };
        if let Some(child) = existing {
            return child;
        }

        let child = self.nodes.len();
        self.nodes.push(Node::default());
        if label == WILDCARD {
            self.nodes[node].wildcard = Some(child);
        } else {
            self.nodes[node].children.insert(label.to_string(), child);
        }
        child
    }

    /// Walk the trie with labels ordered rightmost first ("uk", "co", ...).
    ///
    /// At each node the exact edge is preferred over the wildcard edge. The
    /// deepest terminal reached is the result.
    ///
    /// When the exact edge leads to a node that ends no rule, a terminal
    /// wildcard sibling still counts as a match at that depth. With rules
    /// `*.foo` and `bar.baz.foo`, the host `x.baz.foo` walks the exact `baz`
    /// edge (kept for `bar.baz.foo`), finds no `x` below it, and still gets
    /// the suffix `baz.foo` from `*.foo`. Only following the exact edge would
    /// report `foo`, ignoring a rule that covers the host.
    pub fn lookup<'a, I>(&self, reversed_labels: I) -> SuffixMatch
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best = SuffixMatch::default();
        let mut node = ROOT;
        let mut depth = 0;

        for label in reversed_labels {
            let current = &self.nodes[node];
            let next = match current.children.get(label) {
                Some(&child) => {
                    if !self.nodes[child].is_match()
                        && current.wildcard.is_some_and(|w| self.nodes[w].is_terminal)
                    {
                        best = SuffixMatch::new(depth + 1, false);
                    }
                    child
                }
                None => match current.wildcard {
                    Some(wildcard) => wildcard,
                    None => break,
                },
            };

            depth += 1;
            let arrived = &self.nodes[next];
            if arrived.is_exception {
                best = SuffixMatch::new(depth, true);
            } else if arrived.is_terminal {
                best = SuffixMatch::new(depth, false);
            }
            node = next;
        }

        best
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True if no rule was inserted
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}
