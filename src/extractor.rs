//! Extractor module.
//!
//! Owns the active suffix list and splits hostnames and URLs against it.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::compile::{compile, CompiledSuffixList};
use crate::error::{ExtractError, Result};
use crate::hostname::{normalize_hostname, MAX_DOMAIN_LENGTH};
use crate::matcher::suffix_len;
use crate::parser::{parse_rules, parse_rules_from_file, MalformedRulePolicy};
use crate::resolver::resolve;
use crate::types::DomainParts;
use crate::url::extract_host;

/// Extractor builder options.
#[derive(Debug, Clone)]
pub struct ExtractorOptions {
    /// What to do with rule lines that cannot be parsed
    pub malformed_rules: MalformedRulePolicy,
    /// Compile rules from the PRIVATE section of the list
    pub include_private_domains: bool,
    /// Maximum hostname length, in characters
    pub max_domain_length: usize,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            malformed_rules: MalformedRulePolicy::Error,
            include_private_domains: true,
            max_domain_length: MAX_DOMAIN_LENGTH,
        }
    }
}

impl ExtractorOptions {
    /// Create new extractor options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the malformed rule policy.
    pub fn with_malformed_rules(mut self, policy: MalformedRulePolicy) -> Self {
        self.malformed_rules = policy;
        self
    }

    /// Include or drop the PRIVATE section.
    pub fn with_private_domains(mut self, include: bool) -> Self {
        self.include_private_domains = include;
        self
    }

    /// Set maximum hostname length.
    pub fn with_max_domain_length(mut self, length: usize) -> Self {
        self.max_domain_length = length;
        self
    }
}

/// Public suffix extractor.
///
/// Starts unloaded; every extraction fails with [`ExtractError::NotLoaded`]
/// until a rule set is loaded. Loading builds a new rule set off to the side
/// and publishes it with a single pointer swap, so lookups running on other
/// threads keep the rule set they started with.
pub struct DomainExtractor {
    active: RwLock<Option<Arc<CompiledSuffixList>>>,
    options: ExtractorOptions,
}

impl Default for DomainExtractor {
    fn default() -> Self {
        Self::new(ExtractorOptions::default())
    }
}

impl DomainExtractor {
    /// Create an unloaded extractor.
    pub fn new(options: ExtractorOptions) -> Self {
        Self {
            active: RwLock::new(None),
            options,
        }
    }

    /// Create an extractor loaded from suffix list text.
    pub fn from_rules(rules: &str, options: ExtractorOptions) -> Result<Self> {
        let extractor = Self::new(options);
        extractor.load(rules)?;
        Ok(extractor)
    }

    /// Create an extractor loaded from a suffix list file.
    pub fn from_file(path: impl AsRef<Path>, options: ExtractorOptions) -> Result<Self> {
        let extractor = Self::new(options);
        extractor.load_from_file(path)?;
        Ok(extractor)
    }

    pub fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    /// Parse `rules` and replace the active rule set.
    ///
    /// On error the previous rule set stays active.
    pub fn load(&self, rules: &str) -> Result<()> {
        let parsed = parse_rules(rules, self.options.malformed_rules)?;
        self.publish(compile(&parsed, &self.options)?);
        Ok(())
    }

    /// Read `path` and replace the active rule set.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let parsed = parse_rules_from_file(path, self.options.malformed_rules)?;
        self.publish(compile(&parsed, &self.options)?);
        Ok(())
    }

    fn publish(&self, compiled: CompiledSuffixList) {
        log::info!(
            "loaded {} suffix rules ({} trie nodes)",
            compiled.rule_count(),
            compiled.trie().node_count()
        );
        *self.active.write() = Some(Arc::new(compiled));
    }

    /// Drop the active rule set.
    pub fn unload(&self) {
        *self.active.write() = None;
    }

    /// True once a rule set has been loaded (even an empty one)
    pub fn is_loaded(&self) -> bool {
        self.active.read().is_some()
    }

    fn snapshot(&self) -> Result<Arc<CompiledSuffixList>> {
        self.active.read().clone().ok_or(ExtractError::NotLoaded)
    }

    /// Split a hostname into subdomain, domain and suffix.
    pub fn extract(&self, host: &str) -> Result<DomainParts> {
        let list = self.snapshot()?;
        self.extract_with(&list, host)
    }

    /// Split the host of a URL into subdomain, domain and suffix.
    ///
    /// The URL needs a scheme ("https://host") or a leading "//".
    pub fn extract_from_url(&self, url: &str) -> Result<DomainParts> {
        let list = self.snapshot()?;
        let host = extract_host(url)?;
        self.extract_with(&list, host)
    }

    fn extract_with(&self, list: &CompiledSuffixList, host: &str) -> Result<DomainParts> {
        let labels = normalize_hostname(host, self.options.max_domain_length)?;
        let suffix = suffix_len(list.trie(), &labels);
        Ok(resolve(&labels, suffix))
    }

    /// True iff `host` is syntactically valid and has both a known suffix
    /// and a domain label above it.
    pub fn is_valid_domain(&self, host: &str) -> bool {
        match self.extract(host) {
            Ok(parts) => !parts.suffix.is_empty() && !parts.domain.is_empty(),
            Err(_) => false,
        }
    }

    /// Every suffix the active rule set recognizes. Empty when unloaded.
    pub fn get_tld_list(&self) -> BTreeSet<String> {
        match self.snapshot() {
            Ok(list) => list.tld_list().clone(),
            Err(_) => BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SyntaxErrorKind, UrlErrorKind};

    const RULES: &str = "com\nuk\nco.uk\n*.ck\n!www.ck\n";

    fn extractor() -> DomainExtractor {
        DomainExtractor::from_rules(RULES, ExtractorOptions::default()).unwrap()
    }

    #[test]
    fn test_not_loaded() {
        let extractor = DomainExtractor::default();
        assert!(!extractor.is_loaded());
        assert!(matches!(extractor.extract("com"), Err(ExtractError::NotLoaded)));
        assert!(matches!(
            extractor.extract_from_url("http://google.com"),
            Err(ExtractError::NotLoaded)
        ));
        assert!(!extractor.is_valid_domain("google.com"));
        assert!(extractor.get_tld_list().is_empty());
    }

    #[test]
    fn test_empty_rule_set_is_loaded() {
        let extractor = DomainExtractor::from_rules("", ExtractorOptions::default()).unwrap();
        assert!(extractor.is_loaded());
        assert_eq!(
            extractor.extract("google.com").unwrap(),
            DomainParts::new("google", "com", "")
        );
    }

    #[test]
    fn test_extract() {
        let extractor = extractor();
        assert_eq!(
            extractor.extract("www.theregister.co.uk").unwrap(),
            DomainParts::new("www", "theregister", "co.uk")
        );
        assert_eq!(extractor.extract("www.ck").unwrap(), DomainParts::new("", "www", "ck"));
        assert_eq!(extractor.extract("bla.ck").unwrap(), DomainParts::new("", "", "bla.ck"));
    }

    #[test]
    fn test_extract_syntax_error() {
        let err = extractor().extract("domain..com").unwrap_err();
        assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::EmptyLabel));
    }

    #[test]
    fn test_extract_from_url() {
        let extractor = extractor();
        assert_eq!(
            extractor.extract_from_url("http://www.theregister.co.uk").unwrap(),
            DomainParts::new("www", "theregister", "co.uk")
        );
        let err = extractor.extract_from_url("www.theregister.co.uk").unwrap_err();
        assert_eq!(err.url_kind(), Some(UrlErrorKind::MissingScheme));
    }

    #[test]
    fn test_is_valid_domain() {
        let extractor = extractor();
        assert!(extractor.is_valid_domain("google.com"));
        assert!(extractor.is_valid_domain("www.ck"));
        assert!(!extractor.is_valid_domain("com"));
        assert!(!extractor.is_valid_domain("bla.ck"));
        assert!(!extractor.is_valid_domain("google.nonexistenttld"));
        assert!(!extractor.is_valid_domain("-google.com"));
        assert!(!extractor.is_valid_domain(""));
    }

    #[test]
    fn test_reload_replaces_rules() {
        let extractor = DomainExtractor::from_rules("com\n", ExtractorOptions::default()).unwrap();
        assert_eq!(extractor.extract("com").unwrap(), DomainParts::new("", "", "com"));

        extractor.load("net\n").unwrap();
        assert_eq!(extractor.extract("com").unwrap(), DomainParts::new("", "com", ""));
    }

    #[test]
    fn test_failed_load_keeps_previous_rules() {
        let extractor = extractor();
        assert!(extractor.load("com\nbad..rule\n").is_err());
        assert_eq!(extractor.get_tld_list().len(), 5);
        assert_eq!(extractor.extract("bla.ck").unwrap().suffix, "bla.ck");
    }

    #[test]
    fn test_unload() {
        let extractor = extractor();
        extractor.unload();
        assert!(!extractor.is_loaded());
        assert!(matches!(extractor.extract("com"), Err(ExtractError::NotLoaded)));
    }

    #[test]
    fn test_max_domain_length_option() {
        let options = ExtractorOptions::new().with_max_domain_length(10);
        let extractor = DomainExtractor::from_rules(RULES, options).unwrap();
        assert!(extractor.extract("google.com").is_ok());
        let err = extractor.extract("mail.google.com").unwrap_err();
        assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::DomainTooLong));
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let extractor = extractor();
        let before = extractor.snapshot().unwrap();
        extractor.load("net\n").unwrap();
        assert!(before.tld_list().contains("co.uk"));
        assert!(!extractor.get_tld_list().contains("co.uk"));
    }

    #[test]
    fn test_extractor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DomainExtractor>();
    }
}
