use serde::{Deserialize, Serialize};

/// Rule kind, as written in the suffix list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Plain rule: "co.uk"
    Plain,
    /// Wildcard rule: "*.ck"
    Wildcard,
    /// Exception rule: "!www.ck"
    Exception,
}

/// Suffix list section a rule was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    /// Between the ICANN begin/end markers
    Icann,
    /// Between the PRIVATE begin/end markers
    Private,
    /// Outside any marked section (custom lists)
    #[default]
    Unspecified,
}

/// Parsed suffix list rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Labels in written order, lowercased. Wildcard positions hold "*";
    /// exception rules do not keep the leading '!'.
    pub labels: Vec<String>,
    /// Rule kind
    pub kind: RuleKind,
    /// Section the rule came from
    pub section: Section,
    /// Line number in the original text (for error reporting)
    pub line_num: usize,
}

impl Rule {
    /// Labels joined by '.', without any '!' prefix.
    pub fn name(&self) -> String {
        self.labels.join(".")
    }

    /// The suffix this rule makes public.
    ///
    /// Exception rules publish their parent: "!www.ck" yields "ck". An
    /// exception without a parent yields "".
    pub fn effective_suffix(&self) -> String {
        match self.kind {
            RuleKind::Exception => self.labels.get(1..).unwrap_or_default().join("."),
            RuleKind::Plain | RuleKind::Wildcard => self.name(),
        }
    }

    /// True if any label is non-ASCII.
    pub fn is_unicode(&self) -> bool {
        self.labels.iter().any(|l| !l.is_ascii())
    }
}

/// Hostname split into its three registrable components.
///
/// Each part is a dot-joined, normalized label sequence and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainParts {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

impl DomainParts {
    pub fn new(
        subdomain: impl Into<String>,
        domain: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            subdomain: subdomain.into(),
            domain: domain.into(),
            suffix: suffix.into(),
        }
    }

    /// Registrable domain ("example.co.uk"), if both domain and suffix exist.
    pub fn registrable_domain(&self) -> Option<String> {
        if self.domain.is_empty() || self.suffix.is_empty() {
            return None;
        }
        Some(format!("{}.{}", self.domain, self.suffix))
    }

    /// Re-joins the non-empty parts into the normalized hostname.
    pub fn fqdn(&self) -> String {
        [&self.subdomain, &self.domain, &self.suffix]
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}
