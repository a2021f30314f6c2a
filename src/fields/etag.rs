// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Entity-tag grammar (RFC 9110 §8.8.3).

use serde::{Deserialize, Serialize};

/// A parsed entity-tag: weakness marker plus opaque tag contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTag {
    pub weak: bool,
    pub opaque: String,
}

impl EntityTag {
    pub fn strong_equiv(&self, other: &EntityTag) -> bool {
        !self.weak && !other.weak && self.opaque == other.opaque
    }

    pub fn weak_equiv(&self, other: &EntityTag) -> bool {
        self.opaque == other.opaque
    }
}

/// Parse an entity-tag: optional `W/` prefix, then a DQUOTE-delimited opaque
/// tag of `etagc` characters (no backslash escaping, unlike quoted-string).
pub fn parse(s: &str) -> Option<EntityTag> {
    let s = s.trim();
    let (weak, rest) = match s.strip_prefix("W/") {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let bytes = rest.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'"' || bytes[bytes.len() - 1] != b'"' {
        return None;
    }
    let opaque = &rest[1..rest.len() - 1];
    // etagc = %x21 / %x23-7E / obs-text
    if !opaque
        .bytes()
        .all(|b| b == 0x21 || (0x23..=0x7e).contains(&b) || b >= 0x80)
    {
        return None;
    }

    Some(EntityTag {
        weak,
        opaque: opaque.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("\"abc\"", false, "abc")]
    #[case("W/\"abc\"", true, "abc")]
    #[case("\"\"", false, "")]
    fn parses_valid_tags(#[case] input: &str, #[case] weak: bool, #[case] opaque: &str) {
        let tag = parse(input).unwrap();
        assert_eq!(tag.weak, weak);
        assert_eq!(tag.opaque, opaque);
    }

    #[rstest]
    #[case("abc")]
    #[case("W/abc")]
    #[case("\"unterminated")]
    #[case("\"with\"quote\"")]
    #[case("w/\"lowercase-prefix\"")]
    fn rejects_invalid_tags(#[case] input: &str) {
        assert!(parse(input).is_none());
    }

    #[test]
    fn equivalence_rules() {
        let strong = parse("\"a\"").unwrap();
        let weak = parse("W/\"a\"").unwrap();
        assert!(strong.strong_equiv(&strong));
        assert!(!strong.strong_equiv(&weak));
        assert!(strong.weak_equiv(&weak));
    }
}
