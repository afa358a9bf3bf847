use serde::{Deserialize, Serialize};

/// Typography for the printable DOCX summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyles {
    /// Font for body text and bullets.
    pub body_font: String,

    /// Font for headings. The widget pairs a serif display face with a
    /// sans-serif body.
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Title (`#`) font size in points.
    pub heading1_size: usize,

    /// Section (`##`) font size in points.
    pub heading2_size: usize,

    /// Subsection (`###`) font size in points.
    pub heading3_size: usize,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Source Sans 3".to_string(),
            heading_font: "DM Serif Display".to_string(),
            body_size: 11,
            heading1_size: 20,
            heading2_size: 14,
            heading3_size: 12,
        }
    }
}
