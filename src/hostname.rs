//! Hostname syntax validation.

use crate::error::{ExtractError, Result, SyntaxErrorKind};
use crate::label::normalize_label;

/// Default maximum hostname length, in characters.
pub const MAX_DOMAIN_LENGTH: usize = 255;

/// Split a hostname on '.', validate every label and return the normalized labels.
///
/// Leading, trailing and doubled dots are rejected, so "com." is invalid.
pub fn normalize_hostname(host: &str, max_length: usize) -> Result<Vec<String>> {
    if host.is_empty() {
        return Err(ExtractError::syntax(
            SyntaxErrorKind::EmptyLabel,
            "empty hostname",
        ));
    }
    if host.len() > max_length && host.chars().count() > max_length {
        return Err(ExtractError::syntax(
            SyntaxErrorKind::DomainTooLong,
            format!("hostname exceeds {} characters", max_length),
        ));
    }

    host.split('.')
        .map(|label| {
            if label.is_empty() {
                return Err(ExtractError::syntax(
                    SyntaxErrorKind::EmptyLabel,
                    format!("empty label in '{}'", host),
                ));
            }
            normalize_label(label).map(|l| l.into_owned())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(host: &str) -> Vec<String> {
        normalize_hostname(host, MAX_DOMAIN_LENGTH).unwrap()
    }

    fn kind(host: &str) -> SyntaxErrorKind {
        normalize_hostname(host, MAX_DOMAIN_LENGTH)
            .unwrap_err()
            .syntax_kind()
            .unwrap()
    }

    #[test]
    fn test_splits_and_lowercases() {
        assert_eq!(labels("WWW.Google.COM"), vec!["www", "google", "com"]);
        assert_eq!(labels("com"), vec!["com"]);
        assert_eq!(labels("google.鹿児島.jp"), vec!["google", "鹿児島", "jp"]);
    }

    #[test]
    fn test_empty_labels_rejected() {
        for host in [".com", "domain..com", "domain.com.", "com.", ".", "..", ""] {
            assert_eq!(kind(host), SyntaxErrorKind::EmptyLabel, "host: {:?}", host);
        }
    }

    #[test]
    fn test_label_errors_propagate() {
        assert_eq!(kind("-bad.com"), SyntaxErrorKind::HyphenPlacement);
        assert_eq!(kind("bad_.com"), SyntaxErrorKind::InvalidCharacter);
        assert_eq!(kind("xn--zckzap6140b352by.blog.com"), SyntaxErrorKind::Punycode);
    }

    #[test]
    fn test_ip_like_hosts_are_plain_labels() {
        assert_eq!(labels("127.0.0.1"), vec!["127", "0", "0", "1"]);
        assert_eq!(labels("256.256.256.256").len(), 4);
    }

    #[test]
    fn test_max_length() {
        let label = "a".repeat(50);
        let host = vec![label.as_str(); 5].join(".");
        assert_eq!(host.len(), 254);
        assert_eq!(labels(&host).len(), 5);

        let too_long = format!("{}.{}", host, "ab");
        assert_eq!(kind(&too_long), SyntaxErrorKind::DomainTooLong);

        assert_eq!(
            normalize_hostname("abc.com", 5).unwrap_err().syntax_kind(),
            Some(SyntaxErrorKind::DomainTooLong)
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // 100 CJK characters are 300 bytes but only 100 characters
        let label = "香".repeat(20);
        let host = vec![label.as_str(); 5].join(".");
        assert!(host.len() > MAX_DOMAIN_LENGTH);
        assert!(normalize_hostname(&host, MAX_DOMAIN_LENGTH).is_ok());
    }
}
