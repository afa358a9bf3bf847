use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::WidgetError;
use crate::styles::DocumentStyles;

const TICKED: &str = "\u{2612} ";
const UNTICKED: &str = "\u{2610} ";

/// Build a printable DOCX summary from the rendered Markdown.
///
/// Understands the subset emitted by the summary template:
/// - `#`, `##`, `###` headings
/// - `- item` bullets, with `[x]` / `[ ]` rendered as ballot boxes
/// - `**bold**` runs
/// - `---` page break (methodology starts on its own page)
pub fn generate_docx(markdown: &str, styles: &DocumentStyles) -> Result<Vec<u8>, WidgetError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size, styles))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size, styles))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size, styles));

    for line in markdown.lines() {
        let trimmed = line.trim();
        let paragraph = if trimmed.is_empty() {
            continue;
        } else if let Some(text) = trimmed.strip_prefix("### ") {
            heading_paragraph(text, "Heading3")
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            heading_paragraph(text, "Heading2")
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            heading_paragraph(text, "Heading1")
        } else if let Some(item) = trimmed.strip_prefix("- ") {
            bullet_paragraph(item, styles)
        } else if trimmed == "---" {
            Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
        } else {
            inline_paragraph(Paragraph::new(), trimmed, styles)
        };
        docx = docx.add_paragraph(paragraph.align(AlignmentType::Left));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| WidgetError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn heading_style(style_id: &str, name: &str, size_pt: usize, styles: &DocumentStyles) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
        .fonts(RunFonts::new().ascii(&styles.heading_font))
}

fn heading_paragraph(text: &str, style_id: &str) -> Paragraph {
    Paragraph::new()
        .style(style_id)
        .add_run(Run::new().add_text(text))
}

fn bullet_paragraph(item: &str, styles: &DocumentStyles) -> Paragraph {
    let (marker, text) = if let Some(rest) = item.strip_prefix("[x] ") {
        (TICKED, rest)
    } else if let Some(rest) = item.strip_prefix("[ ] ") {
        (UNTICKED, rest)
    } else {
        ("\u{2022} ", item)
    };

    let para = Paragraph::new().add_run(body_run(marker, styles));
    inline_paragraph(para, text, styles)
}

fn inline_paragraph(mut para: Paragraph, text: &str, styles: &DocumentStyles) -> Paragraph {
    for (segment, bold) in split_bold(text) {
        let run = body_run(segment, styles);
        para = para.add_run(if bold { run.bold() } else { run });
    }
    para
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Split `text` on `**` markers into (segment, is_bold) pairs. An unclosed
/// marker leaves the remainder as plain text.
fn split_bold(text: &str) -> Vec<(&str, bool)> {
    let mut segments = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let after = &remaining[start + 2..];
        let Some(end) = after.find("**") else {
            break;
        };
        if start > 0 {
            segments.push((&remaining[..start], false));
        }
        if end > 0 {
            segments.push((&after[..end], true));
        }
        remaining = &after[end + 2..];
    }

    if !remaining.is_empty() {
        segments.push((remaining, false));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_bold_segments() {
        assert_eq!(
            split_bold("Estimated rate: **22.1%** overall"),
            vec![
                ("Estimated rate: ", false),
                ("22.1%", true),
                (" overall", false)
            ]
        );
    }

    #[test]
    fn unclosed_marker_stays_plain() {
        assert_eq!(split_bold("**open"), vec![("**open", false)]);
    }

    #[test]
    fn plain_text_is_single_segment() {
        assert_eq!(split_bold("no markup"), vec![("no markup", false)]);
        assert!(split_bold("").is_empty());
    }

    #[test]
    fn produces_zip_container() {
        let bytes = generate_docx(
            "# Title\n\n- [x] **Bilateral operation** (+2)\n---\nplain",
            &DocumentStyles::default(),
        )
        .unwrap();
        // DOCX is a ZIP archive.
        assert_eq!(&bytes[..2], b"PK");
    }
}
