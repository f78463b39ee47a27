//! Parser for the `code name` attribute source data.
//!
//! Compiled into `build.rs` next to `compare.rs`, so it may only depend on
//! `crate::compare` and std.

use std::cmp::Ordering;

use crate::compare::compare_ignore_ascii_case;

const RESERVED_CODE: u32 = 0xFFFF_FFFF;

/// Parse `<code> <name>` lines into entries sorted by
/// [`compare_ignore_ascii_case`].
///
/// Blank lines and `#` comments are skipped. Codes are hex with a `0x`
/// prefix or decimal. Fails on malformed lines, invalid codes, the reserved
/// not-found code, names outside `[A-Za-z0-9_]`, and names that compare equal
/// ignoring ASCII case. `origin` prefixes every error message.
pub fn parse_attributes(origin: &str, source: &str) -> Result<Vec<(u32, String)>, String> {
    let mut entries = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let lineno = index + 1;
        let mut fields = line.split_whitespace();
        let (Some(code), Some(name), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(format!("{origin}:{lineno}: expected `<code> <name>`, got `{line}`"));
        };
        let code = parse_code(code)
            .ok_or_else(|| format!("{origin}:{lineno}: invalid attribute code `{code}`"))?;
        if code == RESERVED_CODE {
            return Err(format!("{origin}:{lineno}: {name} uses the reserved not-found code"));
        }
        if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(format!("{origin}:{lineno}: invalid attribute name `{name}`"));
        }
        entries.push((code, name.to_string()));
    }

    entries.sort_by(|a, b| compare_ignore_ascii_case(&a.1, &b.1));
    for pair in entries.windows(2) {
        if compare_ignore_ascii_case(&pair[0].1, &pair[1].1) == Ordering::Equal {
            return Err(format!(
                "{origin}: duplicate attribute name `{}` (codes {:#010x} and {:#010x})",
                pair[1].1, pair[0].0, pair[1].0
            ));
        }
    }
    Ok(entries)
}

fn parse_code(text: &str) -> Option<u32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeTable;

    fn parse(source: &str) -> Result<Vec<(u32, String)>, String> {
        parse_attributes("attrs.in", source)
    }

    #[test]
    fn sorts_and_skips_comments() {
        let entries = parse("# header\n\n0x3 CKA_LABEL\n  0 CKA_CLASS  \n0x00000102 cka_id\n")
            .expect("parse");
        assert_eq!(
            entries,
            vec![
                (0, "CKA_CLASS".to_string()),
                (0x102, "cka_id".to_string()),
                (3, "CKA_LABEL".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        let err = parse("0x3\n").unwrap_err();
        assert!(err.starts_with("attrs.in:1: expected"), "{err}");

        let err = parse("0x3 CKA_LABEL extra\n").unwrap_err();
        assert!(err.contains("expected `<code> <name>`"), "{err}");
    }

    #[test]
    fn rejects_bad_codes() {
        let err = parse("0x3 CKA_LABEL\n0xZZ CKA_CLASS\n").unwrap_err();
        assert_eq!(err, "attrs.in:2: invalid attribute code `0xZZ`");

        let err = parse("0x100000000 CKA_TOO_BIG\n").unwrap_err();
        assert!(err.contains("invalid attribute code"), "{err}");

        let err = parse("-1 CKA_NEGATIVE\n").unwrap_err();
        assert!(err.contains("invalid attribute code"), "{err}");
    }

    #[test]
    fn rejects_reserved_code() {
        let err = parse("0xFFFFFFFF CKA_BOGUS\n").unwrap_err();
        assert_eq!(err, "attrs.in:1: CKA_BOGUS uses the reserved not-found code");
        assert!(parse("4294967295 CKA_BOGUS\n").is_err());
    }

    #[test]
    fn rejects_invalid_names() {
        let err = parse("0x3 CKA-LABEL\n").unwrap_err();
        assert!(err.contains("invalid attribute name `CKA-LABEL`"), "{err}");
    }

    #[test]
    fn rejects_case_insensitive_duplicates() {
        let err = parse("0x3 CKA_LABEL\n0x4 cka_label\n").unwrap_err();
        assert!(err.contains("duplicate attribute name"), "{err}");
        assert!(err.contains("0x00000003") && err.contains("0x00000004"), "{err}");

        assert!(parse("0x3 CKA_LABEL\n0x3 CKA_LABEL\n").is_err());
    }

    #[test]
    fn shipped_data_matches_builtin_table() {
        let entries = parse(include_str!("../data/attributes.in")).expect("shipped data parses");
        let builtin: Vec<(u32, String)> = AttributeTable::builtin()
            .iter()
            .map(|entry| (entry.code(), entry.name().to_string()))
            .collect();
        assert_eq!(entries, builtin);
    }
}
