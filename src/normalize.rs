use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Separator between the normalized name and the code in a composite key.
pub const KEY_SEPARATOR: char = '|';

/// Decomposes to NFD and drops combining marks, then trims.
pub fn strip_accents(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Accent-stripped, upper-cased, whitespace-collapsed name.
///
/// Build time and lookup time must both go through this, otherwise logins
/// silently miss.
pub fn normalize_name(name: &str) -> String {
    strip_accents(name)
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strips the `.0` left behind when a numeric code was rendered as a float.
pub fn clean_code(code: &str) -> String {
    let t = code.trim();
    t.strip_suffix(".0").unwrap_or(t).trim().to_string()
}

pub fn composite_key(name: &str, code: &str) -> String {
    format!("{}{}{}", normalize_name(name), KEY_SEPARATOR, clean_code(code))
}

/// Folded form used to recognise header and trailer labels: no accents,
/// lower case, trimmed.
pub fn fold_label(s: &str) -> String {
    strip_accents(s).to_lowercase()
}
