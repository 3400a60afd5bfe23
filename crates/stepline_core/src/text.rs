//! Label text style

use serde::{Deserialize, Serialize};

/// Where step labels sit relative to the marker row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    /// Text over the step
    #[default]
    Above,
    /// Text below the step
    Below,
}

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
    Black,
}

/// Font used for step labels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelFont {
    /// Font family name, `None` for the platform default
    pub family: Option<String>,
    /// Font size in layout units
    pub size: f32,
    pub weight: FontWeight,
    /// Line height multiplier
    pub line_height: f32,
}

impl Default for LabelFont {
    fn default() -> Self {
        Self {
            family: None,
            size: 14.0,
            weight: FontWeight::Regular,
            line_height: 1.2,
        }
    }
}

impl LabelFont {
    pub fn new(size: f32, weight: FontWeight) -> Self {
        Self {
            size,
            weight,
            ..Self::default()
        }
    }

    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }
}
