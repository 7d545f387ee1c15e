// crates/tripcat-core/src/text.rs
use std::cmp::Ordering;

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Åland` -> `Aland`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// Folding transliterates to ASCII, so `ß` becomes `ss` and non-Latin
/// scripts are romanized.
///
/// ```rust
/// use tripcat_core::text::fold_key;
///
/// assert_eq!(fold_key("Åland Islands"), "aland islands");
/// assert_eq!(fold_key("Straße"), "strasse");
/// assert_eq!(fold_key("Côte d'Ivoire"), "cote d'ivoire");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after folding.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Locale-aware ordering of display names.
///
/// Names are compared on their folded form first, so accented and
/// lower-case initials sort next to their plain counterparts
/// (`"Åland Islands"` lands among the `A`s, not after `"Zimbabwe"`).
/// Ties fall back to the raw strings to keep the order total.
///
/// ```rust
/// use std::cmp::Ordering;
/// use tripcat_core::text::collate;
///
/// assert_eq!(collate("Åland Islands", "Albania"), Ordering::Less);
/// assert_eq!(collate("Zimbabwe", "Åland Islands"), Ordering::Greater);
/// ```
pub fn collate(a: &str, b: &str) -> Ordering {
    fold_key(a).cmp(&fold_key(b)).then_with(|| a.cmp(b))
}

/// `true` for strings that are empty once trimmed.
#[inline]
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
