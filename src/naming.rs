//! Identifier and word-casing rules shared by every generated artifact.
//!
//! All functions here are pure and infallible: whatever the user typed, they
//! return a string. Callers pick the fallback for the empty case.

use regex::Regex;
use std::sync::LazyLock;

static LOWER_THEN_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static ACRONYM_THEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());

/// Constant name used when an alias has no usable characters.
pub const UNNAMED_CONSTANT: &str = "UNNAMED";

/// Turn free-form text into a Java class identifier.
///
/// Every character outside `[A-Za-z0-9]` is removed (underscores included),
/// a leading run of digits is dropped, and the first letter is upper-cased.
/// An empty result yields `fallback` untouched.
///
/// ```
/// use csb::naming::sanitize;
/// assert_eq!(sanitize("3cool_name!", "Fallback"), "Coolname");
/// assert_eq!(sanitize("", "Fallback"), "Fallback");
/// ```
pub fn sanitize(raw: &str, fallback: &str) -> String {
    let clean: String = raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    let clean = clean.trim_start_matches(|c: char| !c.is_ascii_alphabetic());
    if clean.is_empty() {
        return fallback.to_string();
    }
    upper_first(clean)
}

/// Split on runs of non-alphanumerics and upper-case each fragment's first letter.
pub fn pascal(s: &str) -> String {
    words(s).map(upper_first).collect()
}

pub fn camel(s: &str) -> String {
    lower_first(&pascal(s))
}

/// Constant-style aliases (`LOGIN_BUTTON`) become camelCase (`loginButton`);
/// anything else passes through unchanged.
pub fn friendly(raw_alias: &str) -> String {
    if !is_constant_style(raw_alias) {
        return raw_alias.to_string();
    }

    let mut segments = raw_alias.split('_').filter(|s| !s.is_empty());
    let mut out = segments.next().map(str::to_lowercase).unwrap_or_default();
    for segment in segments {
        out.push_str(&upper_first(&segment.to_lowercase()));
    }
    out
}

/// Method-name fragment for an alias, whatever its original casing.
///
/// ```
/// use csb::naming::alias_pascal;
/// assert_eq!(alias_pascal("LOGIN_BUTTON"), "LoginButton");
/// assert_eq!(alias_pascal("login button"), "LoginButton");
/// ```
pub fn alias_pascal(raw_alias: &str) -> String {
    words(raw_alias)
        .map(|w| upper_first(&w.to_lowercase()))
        .collect()
}

/// Title Case words for grid-mode annotations: `LOGIN_BUTTON` and
/// `loginButton` both become `Login Button`.
pub fn humanize_words(raw: &str) -> String {
    let spaced = raw.replace(['_', '-'], " ");
    let spaced = LOWER_THEN_UPPER.replace_all(&spaced, "$1 $2");
    let spaced = ACRONYM_THEN_WORD.replace_all(&spaced, "$1 $2");
    spaced
        .split_whitespace()
        .map(|w| upper_first(&w.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper snake case constant for a locator alias. Also the scenario-context
/// key for saved values.
pub fn constant_name(alias: &str) -> String {
    let folded: String = alias.chars().map(fold_turkish).collect();
    let name = words(&folded)
        .map(|w| w.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join("_");

    if name.is_empty() {
        UNNAMED_CONSTANT.to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("E_{name}")
    } else {
        name
    }
}

/// Escape text for use inside a Java string literal.
pub fn java_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Final pass over a generated method name: drop a leading digit run so the
/// name stays a legal identifier, falling back when nothing is left.
pub fn method_identifier(name: &str, fallback: &str) -> String {
    let clean: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    let clean = clean.trim_start_matches(|c: char| c.is_ascii_digit());
    if clean.is_empty() {
        fallback.to_string()
    } else {
        lower_first(clean)
    }
}

/// `^[A-Z][A-Za-z0-9_]*$`, the hint shown next to class-name inputs.
pub fn is_valid_class_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn is_constant_style(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn fold_turkish(ch: char) -> char {
    match ch {
        'ç' => 'c',
        'ğ' => 'g',
        'ı' => 'i',
        'ö' => 'o',
        'ş' => 's',
        'ü' => 'u',
        'Ç' => 'C',
        'Ğ' => 'G',
        'İ' => 'I',
        'Ö' => 'O',
        'Ş' => 'S',
        'Ü' => 'U',
        other => other,
    }
}
