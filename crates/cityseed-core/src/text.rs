// crates/cityseed-core/src/text.rs

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Šiauliai` -> `Siauliai`)
/// 2\) Normalize to lowercase
///
/// The implementation uses the `deunicode` crate to perform a best-effort
/// transliteration from Unicode to ASCII.
///
/// # Examples
///
/// ```rust
/// use cityseed_core::text::fold_key;
///
/// assert_eq!(fold_key("Klaipėda"), "klaipeda");
/// assert_eq!(fold_key("Jyväskylä"), "jyvaskyla");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after Unicode folding and normalization.
///
/// # Examples
///
/// ```rust
/// use cityseed_core::text::equals_folded;
///
/// assert!(equals_folded("Łódź", "lodz"));
/// assert!(!equals_folded("Vilnius", "Kaunas"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Builds a URL-safe slug from a display name.
///
/// The name is folded with [`fold_key`], every run of non-alphanumeric
/// characters becomes a single `-`, and leading/trailing dashes are dropped.
///
/// # Examples
///
/// ```rust
/// use cityseed_core::text::slugify;
///
/// assert_eq!(slugify("Kohtla-Järve"), "kohtla-jarve");
/// assert_eq!(slugify("Frankfurt am Main"), "frankfurt-am-main");
/// assert_eq!(slugify("  St. John's "), "st-john-s");
/// ```
pub fn slugify(name: &str) -> String {
    let folded = fold_key(name);
    let mut slug = String::with_capacity(folded.len());
    let mut last_dash = true;
    for ch in folded.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Returns `true` if `s` contains a control character (including tabs and
/// newlines).
pub fn has_control_chars(s: &str) -> bool {
    s.chars().any(char::is_control)
}

/// A locale key is two or three lowercase ASCII letters (`en`, `lt`, `fil`).
pub fn is_locale_key(s: &str) -> bool {
    (2..=3).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_lowercase())
}

/// An ISO 3166-1 alpha-2 code: exactly two uppercase ASCII letters.
pub fn is_iso2(s: &str) -> bool {
    s.len() == 2 && s.bytes().all(|b| b.is_ascii_uppercase())
}
