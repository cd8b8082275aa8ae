//! Domain resolver.
//!
//! Splits normalized labels into subdomain, domain and suffix given the
//! public suffix length computed by the matcher.

use crate::types::DomainParts;

/// Split `labels` (written order) so that the last `suffix_len` labels form
/// the suffix, the label above it the domain, and the rest the subdomain.
pub fn resolve<S: AsRef<str>>(labels: &[S], suffix_len: usize) -> DomainParts {
    let suffix_len = suffix_len.min(labels.len());
    let (rest, suffix) = labels.split_at(labels.len() - suffix_len);

    let (subdomain, domain) = match rest.split_last() {
        Some((domain, subdomain)) => (join(subdomain), domain.as_ref().to_string()),
        None => (String::new(), String::new()),
    };

    DomainParts {
        subdomain,
        domain,
        suffix: join(suffix),
    }
}

fn join<S: AsRef<str>>(labels: &[S]) -> String {
    let mut out = String::new();
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(label.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_parts() {
        let parts = resolve(&["media", "forums", "theregister", "co", "uk"], 2);
        assert_eq!(parts, DomainParts::new("media.forums", "theregister", "co.uk"));
    }

    #[test]
    fn test_suffix_only() {
        assert_eq!(resolve(&["bla", "ck"], 2), DomainParts::new("", "", "bla.ck"));
        assert_eq!(resolve(&["com"], 1), DomainParts::new("", "", "com"));
    }

    #[test]
    fn test_domain_without_subdomain() {
        assert_eq!(resolve(&["www", "ck"], 1), DomainParts::new("", "www", "ck"));
    }

    #[test]
    fn test_no_suffix() {
        assert_eq!(
            resolve(&["nonexistenttld", "nonexistenttld"], 0),
            DomainParts::new("nonexistenttld", "nonexistenttld", "")
        );
        assert_eq!(
            resolve(&["127", "0", "0", "1"], 0),
            DomainParts::new("127.0.0", "1", "")
        );
    }

    #[test]
    fn test_suffix_len_clamped() {
        assert_eq!(resolve(&["com"], 3), DomainParts::new("", "", "com"));
    }

    #[test]
    fn test_label_count_preserved() {
        let labels = ["a", "b", "c", "d", "e"];
        for suffix_len in 0..=labels.len() {
            let parts = resolve(&labels, suffix_len);
            assert_eq!(parts.fqdn(), "a.b.c.d.e");
            let count = [&parts.subdomain, &parts.domain, &parts.suffix]
                .iter()
                .filter(|p| !p.is_empty())
                .map(|p| p.split('.').count())
                .sum::<usize>();
            assert_eq!(count, labels.len());
        }
    }
}
