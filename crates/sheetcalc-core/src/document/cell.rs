use serde::{Deserialize, Serialize};

/// Stored contents of one cell.
///
/// `value` is what the cell displays and what formulas referencing it see.
/// For formula cells it holds the result of the last evaluation; `formula`
/// keeps the source text including the leading `=`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellData {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
}

impl CellData {
    pub fn plain(value: impl Into<String>) -> Self {
        CellData {
            value: value.into(),
            ..CellData::default()
        }
    }

    pub fn is_formula(&self) -> bool {
        self.formula.is_some()
    }
}

/// Presentation attributes. Carried and copied with the cell, never read by
/// evaluation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// A partial style update; `None` fields leave the stored attribute as is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellStylePatch {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
}

impl CellStyle {
    pub fn apply(&mut self, patch: CellStylePatch) {
        if let Some(bold) = patch.bold {
            self.bold = bold;
        }
        if let Some(italic) = patch.italic {
            self.italic = italic;
        }
        if let Some(underline) = patch.underline {
            self.underline = underline;
        }
        if patch.background_color.is_some() {
            self.background_color = patch.background_color;
        }
        if patch.text_color.is_some() {
            self.text_color = patch.text_color;
        }
        if patch.font_size.is_some() {
            self.font_size = patch.font_size;
        }
        if patch.font_family.is_some() {
            self.font_family = patch.font_family;
        }
    }
}
