//! Label codec.
//!
//! Normalizes a single dot-free label: ASCII case folding, hostname charset
//! and hyphen rules, and punycode round-trip validation for ACE labels.

use std::borrow::Cow;

use idna::punycode;

use crate::error::{ExtractError, Result, SyntaxErrorKind};

/// Maximum label length in octets (RFC 1035).
pub const MAX_LABEL_LENGTH: usize = 63;

/// ACE prefix marking punycode labels.
pub const ACE_PREFIX: &str = "xn--";

/// Label classification, decided on the lowercased label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelClass {
    /// Letters, digits and hyphens only
    Ascii,
    /// Punycode label starting with "xn--"
    Ace,
    /// Contains non-ASCII code points
    Unicode,
}

/// Classify a label. The ACE prefix is matched case-insensitively.
pub fn classify_label(label: &str) -> LabelClass {
    if !label.is_ascii() {
        LabelClass::Unicode
    } else if label.len() >= ACE_PREFIX.len()
        && label[..ACE_PREFIX.len()].eq_ignore_ascii_case(ACE_PREFIX)
    {
        LabelClass::Ace
    } else {
        LabelClass::Ascii
    }
}

/// Validate and normalize one label.
///
/// ASCII letters are lowercased; Unicode code points are left untouched.
/// Returns the label unchanged (borrowed) when it is already normalized.
pub fn normalize_label(label: &str) -> Result<Cow<'_, str>> {
    if label.is_empty() {
        return Err(ExtractError::syntax(SyntaxErrorKind::EmptyLabel, "empty label"));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(ExtractError::syntax(
            SyntaxErrorKind::HyphenPlacement,
            format!("label '{}' starts or ends with a hyphen", label),
        ));
    }

    let normalized = if label.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(label.to_ascii_lowercase())
    } else {
        Cow::Borrowed(label)
    };

    match classify_label(&normalized) {
        LabelClass::Ascii => check_ascii(&normalized)?,
        LabelClass::Ace => check_ace(&normalized)?,
        LabelClass::Unicode => check_unicode(&normalized)?,
    }

    Ok(normalized)
}

fn check_ascii(label: &str) -> Result<()> {
    if label.len() > MAX_LABEL_LENGTH {
        return Err(too_long(label));
    }
    check_ldh_chars(label)
}

/// ACE labels must decode and re-encode to exactly the same string.
fn check_ace(label: &str) -> Result<()> {
    check_ascii(label)?;

    let payload = &label[ACE_PREFIX.len()..];
    let decoded = punycode::decode_to_string(payload).ok_or_else(|| {
        ExtractError::syntax(
            SyntaxErrorKind::Punycode,
            format!("label '{}' is not valid punycode", label),
        )
    })?;

    // An all-ASCII payload has a single canonical spelling: itself.
    if decoded.is_empty() || decoded.is_ascii() {
        return Err(round_trip_error(label));
    }
    if decoded.starts_with('-') || decoded.ends_with('-') {
        return Err(round_trip_error(label));
    }
    check_code_points(&decoded).map_err(|_| round_trip_error(label))?;

    let reencoded = idna::domain_to_ascii(&decoded).map_err(|_| round_trip_error(label))?;
    if reencoded != label {
        return Err(round_trip_error(label));
    }
    Ok(())
}

/// Unicode labels must already be in the form UTS #46 maps them to.
///
/// A label the mapping rewrites (fullwidth forms, soft hyphens, uppercase,
/// non-NFC text) would be looked up under one name and resolved in DNS
/// under another, so it is refused.
fn check_unicode(label: &str) -> Result<()> {
    check_code_points(label)?;

    let ascii = idna::domain_to_ascii(label).map_err(|e| {
        ExtractError::syntax(
            SyntaxErrorKind::Idna,
            format!("label '{}' rejected by IDNA: {:?}", label, e),
        )
    })?;
    // UTS #46 maps some code points to '.', which would smuggle a second label in.
    if ascii.is_empty() || ascii.contains('.') {
        return Err(ExtractError::syntax(
            SyntaxErrorKind::Idna,
            format!("label '{}' does not map to a single label", label),
        ));
    }
    if ascii.len() > MAX_LABEL_LENGTH {
        return Err(too_long(label));
    }

    match ascii.strip_prefix(ACE_PREFIX) {
        Some(payload) => {
            let decoded = punycode::decode_to_string(payload).ok_or_else(|| {
                ExtractError::syntax(
                    SyntaxErrorKind::Punycode,
                    format!("label '{}' encodes to invalid punycode", label),
                )
            })?;
            if decoded != label {
                return Err(mapped_error(label, &decoded));
            }
            Ok(())
        }
        // Every non-ASCII code point was mapped to ASCII or dropped.
        None => {
            check_ldh_chars(&ascii).map_err(|_| {
                ExtractError::syntax(
                    SyntaxErrorKind::InvalidCharacter,
                    format!("label '{}' maps to '{}' outside the hostname charset", label, ascii),
                )
            })?;
            if ascii.starts_with('-') || ascii.ends_with('-') {
                return Err(ExtractError::syntax(
                    SyntaxErrorKind::HyphenPlacement,
                    format!("label '{}' maps to '{}' with an edge hyphen", label, ascii),
                ));
            }
            Err(mapped_error(label, &ascii))
        }
    }
}

/// ASCII code points must be LDH; IDNA2008 deviation characters are refused.
fn check_code_points(label: &str) -> Result<()> {
    for ch in label.chars() {
        if ch.is_ascii() {
            if !is_ldh(ch as u8) {
                return Err(invalid_char(label, ch));
            }
        } else if is_deviation(ch) {
            return Err(ExtractError::syntax(
                SyntaxErrorKind::Idna,
                format!("label '{}' contains deviation character {:?}", label, ch),
            ));
        }
    }
    Ok(())
}

fn check_ldh_chars(label: &str) -> Result<()> {
    match label.bytes().find(|b| !is_ldh(*b)) {
        Some(b) => Err(invalid_char(label, b as char)),
        None => Ok(()),
    }
}

#[inline]
fn is_ldh(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'
}

/// Characters IDNA2003 and IDNA2008 transcode differently.
#[inline]
fn is_deviation(ch: char) -> bool {
    matches!(ch, '\u{00DF}' | '\u{03C2}' | '\u{200C}' | '\u{200D}')
}

fn too_long(label: &str) -> ExtractError {
    ExtractError::syntax(
        SyntaxErrorKind::LabelTooLong,
        format!("label '{}' exceeds {} octets", label, MAX_LABEL_LENGTH),
    )
}

fn invalid_char(label: &str, ch: char) -> ExtractError {
    ExtractError::syntax(
        SyntaxErrorKind::InvalidCharacter,
        format!("label '{}' contains invalid character {:?}", label, ch),
    )
}

fn mapped_error(label: &str, mapped: &str) -> ExtractError {
    ExtractError::syntax(
        SyntaxErrorKind::Idna,
        format!("label '{}' is rewritten to '{}' by IDNA mapping", label, mapped),
    )
}

fn round_trip_error(label: &str) -> ExtractError {
    ExtractError::syntax(
        SyntaxErrorKind::Punycode,
        format!("label '{}' does not round-trip through punycode", label),
    )
}
