//! Field validation rules for product requests
//!
//! Each rule function returns every violated rule as a message instead of
//! stopping at the first, so the caller can aggregate them into a single
//! validation error.

use serde_json::Value;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;

/// Script family of a letter, used to reject mixed-script names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Greek,
    Cyrillic,
    Hebrew,
    Arabic,
    Devanagari,
    Kana,
    Hangul,
    Cjk,
    Other,
}

fn script_of(c: char) -> Script {
    match c as u32 {
        0x0041..=0x005A | 0x0061..=0x007A | 0x00C0..=0x024F => Script::Latin,
        0x0370..=0x03FF | 0x1F00..=0x1FFF => Script::Greek,
        0x0400..=0x052F => Script::Cyrillic,
        0x0590..=0x05FF => Script::Hebrew,
        0x0600..=0x06FF | 0x0750..=0x077F => Script::Arabic,
        0x0900..=0x097F => Script::Devanagari,
        0x3040..=0x30FF => Script::Kana,
        0x1100..=0x11FF | 0xAC00..=0xD7AF => Script::Hangul,
        0x3400..=0x4DBF | 0x4E00..=0x9FFF => Script::Cjk,
        _ => Script::Other,
    }
}

/// Check whether letters in the name come from more than one script family.
/// Digits, hyphens, parentheses and other non-letter characters are ignored.
fn mixes_scripts(name: &str) -> bool {
    let mut seen: Option<Script> = None;
    for c in name.chars().filter(|c| c.is_alphabetic()) {
        let script = script_of(c);
        match seen {
            None => seen = Some(script),
            Some(first) if first != script => return true,
            Some(_) => {}
        }
    }
    false
}

/// Validate a product name: non-empty after trimming, 2-50 characters,
/// letters all from one script family.
pub fn validate_name(name: &str) -> Vec<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return vec!["name must not be empty".to_string()];
    }

    let mut failures = Vec::new();

    let chars = trimmed.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        failures.push(format!(
            "name must be between {} and {} characters",
            NAME_MIN_CHARS, NAME_MAX_CHARS
        ));
    }

    if mixes_scripts(trimmed) {
        failures.push("name must not mix letters from different scripts".to_string());
    }

    failures
}

/// Validate a product payload: must be a structured JSON object, since the
/// external API only accepts an object for the `data` field.
pub fn validate_payload(data: &Value) -> Vec<String> {
    if data.is_object() {
        Vec::new()
    } else {
        vec!["data must be a JSON object".to_string()]
    }
}
