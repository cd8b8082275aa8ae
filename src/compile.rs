use std::collections::BTreeSet;

use crate::error::{ExtractError, Result};
use crate::extractor::ExtractorOptions;
use crate::matcher::SuffixTrie;
use crate::parser::MalformedRulePolicy;
use crate::types::{Rule, Section};

/// Immutable rule set ready for matching
#[derive(Debug, Clone, Default)]
pub struct CompiledSuffixList {
    trie: SuffixTrie,
    tld_list: BTreeSet<String>,
    rule_count: usize,
}

impl CompiledSuffixList {
    /// Suffix trie
    pub fn trie(&self) -> &SuffixTrie {
        &self.trie
    }

    /// Every suffix the rule set recognizes, in normalized form.
    pub fn tld_list(&self) -> &BTreeSet<String> {
        &self.tld_list
    }

    /// Number of rules inserted, ACE variants included
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    fn add(&mut self, rule: &Rule) {
        self.trie.insert(rule);
        self.tld_list.insert(rule.effective_suffix());
        self.rule_count += 1;
    }
}

/// Compile parsed rules into a CompiledSuffixList.
///
/// Unicode rules are inserted a second time in their ACE form, so
/// "鹿児島.jp" and "xn--d5qv7z876c.jp" both match.
pub fn compile(rules: &[Rule], options: &ExtractorOptions) -> Result<CompiledSuffixList> {
    let mut compiled = CompiledSuffixList::default();

    for rule in rules {
        if rule.section == Section::Private && !options.include_private_domains {
            continue;
        }

        compiled.add(rule);

        if rule.is_unicode() {
            match to_ace(rule) {
                Ok(ace) => {
                    log::debug!("suffix rule '{}' also inserted as '{}'", rule.name(), ace.name());
                    compiled.add(&ace);
                }
                Err(e) => match options.malformed_rules {
                    MalformedRulePolicy::Error => return Err(e),
                    MalformedRulePolicy::Skip => {
                        log::warn!("keeping only the Unicode form of suffix rule: {}", e);
                    }
                },
            }
        }
    }

    Ok(compiled)
}

/// ACE form of a Unicode rule, label by label. Wildcards are kept as is.
fn to_ace(rule: &Rule) -> Result<Rule> {
    let labels = rule
        .labels
        .iter()
        .map(|label| {
            if label.is_ascii() {
                return Ok(label.clone());
            }
            match idna::domain_to_ascii(label) {
                Ok(ace) if !ace.is_empty() && !ace.contains('.') => Ok(ace),
                _ => Err(ExtractError::ParseErrorAtLine {
                    line: rule.line_num,
                    message: format!("label '{}' has no ACE form", label),
                }),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Rule {
        labels,
        ..rule.clone()
    })
}
