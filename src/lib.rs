//! Domain Extract - a fast Public Suffix List engine for Rust
//!
//! Splits a hostname or URL into its subdomain, registrable domain label and
//! public suffix, using rules in the Public Suffix List format:
//! - Plain rules (`co.uk`)
//! - Wildcard rules (`*.ck`)
//! - Exception rules (`!www.ck`)
//! - Unicode rules, matched in both Unicode and punycode spelling
//!
//! Every label is validated on the way in: hostname charset, hyphen
//! placement, length limits and a punycode round-trip for `xn--` labels.
//!
//! # Example
//!
//! ```rust
//! use domain_extract_r::{DomainExtractor, DomainParts, ExtractorOptions};
//!
//! let rules = "
//! // ===BEGIN ICANN DOMAINS===
//! com
//! uk
//! co.uk
//! *.ck
//! !www.ck
//! // ===END ICANN DOMAINS===
//! ";
//!
//! let extractor = DomainExtractor::from_rules(rules, ExtractorOptions::default()).unwrap();
//!
//! let parts = extractor.extract("forums.theregister.co.uk").unwrap();
//! assert_eq!(parts, DomainParts::new("forums", "theregister", "co.uk"));
//!
//! let parts = extractor.extract_from_url("https://user@www.ck:8443/path?q=1").unwrap();
//! assert_eq!(parts, DomainParts::new("", "www", "ck"));
//!
//! assert!(extractor.is_valid_domain("google.com"));
//! assert!(!extractor.is_valid_domain("com"));
//! assert!(extractor.extract("domain..com").is_err());
//! ```
//!
//! # Results
//!
//! | Input | Subdomain | Domain | Suffix |
//! |-------|-----------|--------|--------|
//! | `www.theregister.co.uk` | `www` | `theregister` | `co.uk` |
//! | `bla.ck` | | | `bla.ck` |
//! | `www.ck` | | `www` | `ck` |
//! | `nonexistenttld.nonexistenttld` | `nonexistenttld` | `nonexistenttld` | |
//!
//! A hostname that matches no rule gets an empty suffix; the rightmost
//! label becomes the domain.

pub mod compile;
pub mod error;
pub mod extractor;
pub mod hostname;
pub mod label;
pub mod matcher;
pub mod parser;
pub mod resolver;
pub mod types;
pub mod url;

// Re-export commonly used items
pub use compile::{compile, CompiledSuffixList};
pub use error::{ExtractError, Result, SyntaxErrorKind, UrlErrorKind};
pub use extractor::{DomainExtractor, ExtractorOptions};
pub use hostname::{normalize_hostname, MAX_DOMAIN_LENGTH};
pub use label::{classify_label, normalize_label, LabelClass, MAX_LABEL_LENGTH};
pub use matcher::{suffix_len, SuffixMatch, SuffixTrie};
pub use parser::{parse_rule, parse_rules, parse_rules_from_file, MalformedRulePolicy};
pub use resolver::resolve;
pub use types::{DomainParts, Rule, RuleKind, Section};
pub use url::extract_host;
