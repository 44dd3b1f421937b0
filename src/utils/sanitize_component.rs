// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Filesystem-safe file stems derived from poll names.

/// Stem used when nothing printable survives sanitization.
const FALLBACK_NAME: &str = "poll";

/// Device names Windows refuses as file stems.
const RESERVED_STEMS: &[&str] = &["CON", "PRN", "AUX", "NUL"];

/// Turn a free-text poll name into a file stem without extension.
///
/// Unicode is transliterated with `deunicode`. Anything outside ASCII
/// alphanumerics and `-` becomes a single `_`, and `_` at either end is
/// dropped. Windows device names get a trailing `_`.
pub fn sanitize_component(value: &str) -> String {
    let mut out = String::new();
    for ch in deunicode::deunicode(value).chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    let stem = out.trim_end_matches('_');

    if stem.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    if is_reserved(stem) {
        return format!("{stem}_");
    }
    stem.to_string()
}

fn is_reserved(stem: &str) -> bool {
    let upper = stem.to_ascii_uppercase();
    if RESERVED_STEMS.contains(&upper.as_str()) {
        return true;
    }
    // COM1..COM9, LPT1..LPT9
    match upper.as_bytes() {
        [a, b, c, d] => {
            matches!(&[*a, *b, *c], b"COM" | b"LPT") && (b'1'..=b'9').contains(d)
        }
        _ => false,
    }
}
