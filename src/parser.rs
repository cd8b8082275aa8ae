use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::error::{ExtractError, Result};
use crate::types::{Rule, RuleKind, Section};

/// A single rule label: "*" or a run without dots, wildcards, '!' or '/'
static RULE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\*|[^\s.*!/]+)$").expect("RULE_LABEL: hardcoded regex is invalid")
});

const BEGIN_ICANN: &str = "===BEGIN ICANN DOMAINS===";
const END_ICANN: &str = "===END ICANN DOMAINS===";
const BEGIN_PRIVATE: &str = "===BEGIN PRIVATE DOMAINS===";
const END_PRIVATE: &str = "===END PRIVATE DOMAINS===";

/// What to do with a rule line that cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRulePolicy {
    /// Fail the whole load
    #[default]
    Error,
    /// Log a warning and continue with the next line
    Skip,
}

/// Parse suffix list rules from text.
///
/// Blank lines and `//` comments are ignored. Each remaining line is read up
/// to its first whitespace. Section markers inside comments set the
/// [`Section`] of the rules that follow.
pub fn parse_rules(text: &str, policy: MalformedRulePolicy) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();
    let mut section = Section::Unspecified;

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1; // 1-based line numbers
        let line = line.trim();

        if let Some(comment) = line.strip_prefix("//") {
            if let Some(next) = section_marker(comment) {
                log::debug!("suffix list section {:?} at line {}", next, line_num);
                section = next;
            }
            continue;
        }

        let token = match line.split_whitespace().next() {
            Some(token) => token,
            None => continue,
        };

        match parse_rule(token, section, line_num) {
            Ok(rule) => rules.push(rule),
            Err(e) => match policy {
                MalformedRulePolicy::Error => return Err(e),
                MalformedRulePolicy::Skip => {
                    log::warn!("skipping malformed suffix rule: {}", e);
                }
            },
        }
    }

    Ok(rules)
}

/// Parse suffix list rules from a file.
pub fn parse_rules_from_file(
    path: impl AsRef<Path>,
    policy: MalformedRulePolicy,
) -> Result<Vec<Rule>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        ExtractError::ParseError(format!(
            "Failed to read suffix list '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_rules(&text, policy)
}

fn section_marker(comment: &str) -> Option<Section> {
    if comment.contains(BEGIN_ICANN) {
        Some(Section::Icann)
    } else if comment.contains(BEGIN_PRIVATE) {
        Some(Section::Private)
    } else if comment.contains(END_ICANN) || comment.contains(END_PRIVATE) {
        Some(Section::Unspecified)
    } else {
        None
    }
}

/// Parse a single rule token ("co.uk", "*.ck", "!www.ck").
pub fn parse_rule(token: &str, section: Section, line_num: usize) -> Result<Rule> {
    let malformed = |message: String| ExtractError::ParseErrorAtLine {
        line: line_num,
        message,
    };

    let lowered = token.to_ascii_lowercase();
    let (body, exception) = match lowered.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (lowered.as_str(), false),
    };

    let mut labels = Vec::new();
    for label in body.split('.') {
        if label.is_empty() {
            return Err(malformed(format!("empty label in rule '{}'", token)));
        }
        if !RULE_LABEL.is_match(label) {
            return Err(malformed(format!(
                "invalid label '{}' in rule '{}'",
                label, token
            )));
        }
        labels.push(label.to_string());
    }

    let has_wildcard = labels.iter().any(|l| l == "*");
    let kind = match (exception, has_wildcard) {
        (true, true) => {
            return Err(malformed(format!(
                "exception rule '{}' contains a wildcard",
                token
            )))
        }
        (true, false) => {
            if labels.len() < 2 {
                return Err(malformed(format!(
                    "exception rule '{}' has no parent suffix",
                    token
                )));
            }
            RuleKind::Exception
        }
        (false, true) => {
            if labels.len() < 2 {
                return Err(malformed(format!(
                    "wildcard rule '{}' has no fixed suffix",
                    token
                )));
            }
            RuleKind::Wildcard
        }
        (false, false) => RuleKind::Plain,
    };

    Ok(Rule {
        labels,
        kind,
        section,
        line_num,
    })
}
