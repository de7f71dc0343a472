use serde::{Deserialize, Serialize};

/// Resolved bold/italic state carried down the markup tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StyleFlags {
    pub bold: bool,
    pub italic: bool,
}

impl StyleFlags {
    pub const NORMAL: StyleFlags = StyleFlags {
        bold: false,
        italic: false,
    };

    pub fn new(bold: bool, italic: bool) -> Self {
        Self { bold, italic }
    }

    /// Replace each axis the signals are definite about.
    pub fn apply(self, signals: StyleSignals) -> Self {
        Self {
            bold: signals.bold.unwrap_or(self.bold),
            italic: signals.italic.unwrap_or(self.italic),
        }
    }

    pub fn label(self) -> StyleLabel {
        match (self.bold, self.italic) {
            (true, true) => StyleLabel::BoldItalic,
            (true, false) => StyleLabel::Bold,
            (false, true) => StyleLabel::Italic,
            (false, false) => StyleLabel::Normal,
        }
    }
}

/// Per-axis style signal. `None` means the source said nothing about that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleSignals {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl StyleSignals {
    pub fn is_silent(&self) -> bool {
        self.bold.is_none() && self.italic.is_none()
    }
}

/// Canonical style label of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleLabel {
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl StyleLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleLabel::Normal => "normal",
            StyleLabel::Bold => "bold",
            StyleLabel::Italic => "italic",
            StyleLabel::BoldItalic => "bold-italic",
        }
    }
}

impl std::fmt::Display for StyleLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text payload together with its resolved style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    pub style: StyleLabel,
    pub content: String,
}

impl StyledRun {
    pub fn new(style: StyleLabel, content: impl Into<String>) -> Self {
        Self {
            style,
            content: content.into(),
        }
    }
}

/// A block-bounded group of runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub content: Vec<StyledRun>,
}

/// Ordered paragraphs, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn into_paragraphs(self) -> Vec<Paragraph> {
        self.paragraphs
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Paragraph> {
        self.paragraphs.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Paragraph;
    type IntoIter = std::slice::Iter<'a, Paragraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.paragraphs.iter()
    }
}
