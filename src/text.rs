//! Text helpers: case-insensitive containment and display truncation.

use once_cell::sync::Lazy;
use regex::Regex;

// `[ZH01] `, `[EN12]` ... corpus ids embedded at the start of a text.
static ID_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[[A-Z]{2}\d+\]\s*").expect("valid id prefix pattern"));

const BREAK_PUNCTUATION: &[char] = &['.', '!', '?', '。', '！', '？'];

/// Lowercase for case-insensitive comparison.
pub(crate) fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// `needle` must already be folded.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || fold(haystack).contains(needle)
}

/// Remove a leading `[XX00]` id marker and the whitespace after it.
pub fn strip_id_prefix(text: &str) -> &str {
    match ID_PREFIX.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Strip the id marker and cut `text` to at most `max` characters, appending
/// `…` when something was removed.
///
/// The cut prefers a sentence break or a space inside the last fifth of the
/// window, so words are not split when that can be avoided.
pub fn truncate(text: &str, max: usize) -> String {
    let cleaned = strip_id_prefix(text);
    let chars: Vec<char> = cleaned.chars().collect();
    if chars.len() <= max {
        return cleaned.to_string();
    }

    let window = &chars[..max];
    let last_space = window.iter().rposition(|&c| c == ' ');
    let last_punct = window.iter().rposition(|c| BREAK_PUNCTUATION.contains(c));
    let lower_bound = max as f64 * 0.8;

    let cutoff = last_punct.max(last_space);
    if let Some(cut) = cutoff {
        if cut + 50 > max && cut as f64 > lower_bound {
            return chars[..=cut].iter().chain(std::iter::once(&'…')).collect();
        }
    }
    if let Some(space) = last_space {
        if space as f64 > lower_bound {
            return chars[..space].iter().chain(std::iter::once(&'…')).collect();
        }
    }
    window.iter().chain(std::iter::once(&'…')).collect()
}
