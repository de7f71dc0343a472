//! Parser for inline `style` attribute declarations.
//!
//! Only a handful of properties matter to style resolution, so this is a
//! flat `property: value` splitter rather than a CSS tokenizer. Anything it
//! cannot make sense of is skipped.

use crate::document::StyleSignals;

/// Parsed `property: value` pairs in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<(String, String)>,
}

impl Declarations {
    pub fn parse(source: &str) -> Self {
        let entries = source
            .split(';')
            .filter_map(|clause| {
                let (name, value) = clause.split_once(':')?;
                let name = name.trim().to_ascii_lowercase();
                if name.is_empty() {
                    return None;
                }
                Some((name, normalize_value(value)))
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Value of the last occurrence of `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Declared `display` keyword, if it says anything definite.
    pub fn display(&self) -> Option<&str> {
        self.get("display").filter(|value| !is_pass_through(value))
    }
}

const IMPORTANT: &str = "!important";

fn normalize_value(raw: &str) -> String {
    let mut value = raw.trim();
    let split = value
        .len()
        .checked_sub(IMPORTANT.len())
        .filter(|&at| value.is_char_boundary(at));
    if let Some(at) = split {
        if value[at..].eq_ignore_ascii_case(IMPORTANT) {
            value = value[..at].trim_end();
        }
    }
    value.to_ascii_lowercase()
}

// Keywords that defer to the inherited value.
fn is_pass_through(value: &str) -> bool {
    matches!(value, "" | "inherit" | "unset" | "revert" | "revert-layer")
}

/// Interpret a `font-weight` value against the bold cutoff.
pub fn weight_signal(value: &str, bold_threshold: u16) -> Option<bool> {
    if is_pass_through(value) {
        return None;
    }
    match value {
        "bold" | "bolder" => Some(true),
        "normal" | "lighter" | "initial" => Some(false),
        numeric => numeric
            .parse::<f32>()
            .ok()
            .filter(|weight| weight.is_finite())
            .map(|weight| weight >= f32::from(bold_threshold)),
    }
}

/// Interpret a `font-style` value.
pub fn slant_signal(value: &str) -> Option<bool> {
    if is_pass_through(value) {
        return None;
    }
    Some(value == "italic")
}

impl StyleSignals {
    pub fn from_declarations(declarations: &Declarations, bold_threshold: u16) -> Self {
        Self {
            bold: declarations
                .get("font-weight")
                .and_then(|value| weight_signal(value, bold_threshold)),
            italic: declarations.get("font-style").and_then(slant_signal),
        }
    }
}
