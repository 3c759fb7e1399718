//! Slug derivation for company public URLs.
//!
//! A slug is derived from the display name, then the store is searched for
//! `base`, `base-1`, `base-2`, ... until a free candidate (or the renaming
//! company's own slug) turns up. The search itself lives in the repository.

use deunicode::deunicode_char;
use jiff::Timestamp;

/// Word substituted for an empty display name.
pub const FALLBACK_BASE: &str = "empresa";

/// Lowercase ASCII slug of `name`: letters and digits transliterated with
/// diacritics stripped, runs of anything else (punctuation, symbols, emoji)
/// collapsed into one hyphen, no leading or trailing hyphen.
///
/// Symbols are dropped rather than spelled out, so `"🚀"` normalizes to an
/// empty string instead of `"rocket"`.
#[must_use]
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if is_combining_mark(c) {
            continue;
        }

        let transliterated = if c.is_alphanumeric() {
            deunicode_char(c).unwrap_or_default()
        } else {
            ""
        };

        if transliterated.is_empty() {
            pending_dash = true;
            continue;
        }

        for c in transliterated.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_dash && !out.is_empty() {
                    out.push('-');
                }
                out.push(c.to_ascii_lowercase());
                pending_dash = false;
            } else {
                pending_dash = true;
            }
        }
    }

    out
}

/// Combining diacritics belong to the preceding letter (decomposed input).
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

/// Base slug for `name`, never empty.
#[must_use]
pub fn base_slug(name: &str, now: Timestamp) -> String {
    let name = if name.trim().is_empty() {
        FALLBACK_BASE
    } else {
        name
    };

    let slug = normalize(name);

    if slug.is_empty() {
        format!("{FALLBACK_BASE}-{}", now.as_millisecond())
    } else {
        slug
    }
}

/// The `suffix`-th candidate for `base`: `base` itself, then `base-1`, `base-2`, ...
#[must_use]
pub fn candidate(base: &str, suffix: u64) -> String {
    if suffix == 0 {
        base.to_string()
    } else {
        format!("{base}-{suffix}")
    }
}
