//! Semicircular score gauge.
//!
//! Angles are in degrees in SVG orientation (y grows downwards), sweeping
//! clockwise from -180° (the left end, score 0) through -90° (top) to 0°
//! (the right end, the display maximum).

use serde::Serialize;
use ts_rs::TS;

use csdh_core::models::category::{RiskCategory, RiskLevel};

use crate::config::GaugeGeometry;
use crate::palette::RiskPalette;

const START_DEG: f64 = -180.0;
const SWEEP_DEG: f64 = 180.0;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Faint background band for one risk category.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct GaugeSegment {
    pub level: RiskLevel,
    pub start_deg: f64,
    pub end_deg: f64,
    pub path: String,
    pub colour: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Gauge {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
    pub stroke_width: f64,
    pub score: u32,
    pub display_max: u32,
    pub needle_deg: f64,
    pub needle_tip: Point,
    pub segments: Vec<GaugeSegment>,
    /// Arc from the left end up to the needle, drawn in the active accent.
    pub value_arc: String,
    pub palette: RiskPalette,
    /// Estimated reoperation rate shown under the hub, e.g. `22.1%`.
    pub center_label: String,
    pub min_label_at: Point,
    pub max_label_at: Point,
}

impl Gauge {
    pub fn new(
        geometry: &GaugeGeometry,
        score: u32,
        display_max: u32,
        level: RiskLevel,
        rate: f64,
        categories: &[RiskCategory],
    ) -> Self {
        let needle_deg = score_angle(score, display_max);
        let rad = needle_deg.to_radians();
        let needle_tip = Point {
            x: geometry.cx + geometry.needle_length * rad.cos(),
            y: geometry.cy + geometry.needle_length * rad.sin(),
        };

        // The last band runs to the right end even when the display max
        // widens the scale past its upper bound.
        let last_min = categories.iter().map(|c| c.min_score).max();
        let segments = categories
            .iter()
            .map(|c| {
                let start_deg = score_angle(c.min_score, display_max);
                let end_deg = if Some(c.min_score) == last_min {
                    START_DEG + SWEEP_DEG
                } else {
                    score_angle(c.max_score.saturating_add(1), display_max)
                };
                GaugeSegment {
                    level: c.level,
                    start_deg,
                    end_deg,
                    path: arc_path(geometry, start_deg, end_deg, geometry.radius),
                    colour: RiskPalette::for_level(c.level).accent,
                }
            })
            .collect();

        Self {
            width: geometry.width,
            height: geometry.height,
            center: Point {
                x: geometry.cx,
                y: geometry.cy,
            },
            radius: geometry.radius,
            stroke_width: geometry.stroke_width,
            score,
            display_max,
            needle_deg,
            needle_tip,
            segments,
            value_arc: arc_path(geometry, START_DEG, needle_deg, geometry.radius),
            palette: RiskPalette::for_level(level),
            center_label: format!("{rate}%"),
            min_label_at: Point {
                x: geometry.cx - geometry.radius,
                y: geometry.cy + 8.0,
            },
            max_label_at: Point {
                x: geometry.cx + geometry.radius,
                y: geometry.cy + 8.0,
            },
        }
    }

    /// Standalone SVG document for the gauge.
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
            self.width, self.height
        );
        for seg in &self.segments {
            svg.push_str(&format!(
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" opacity="0.25"/>"#,
                seg.path, seg.colour, self.stroke_width
            ));
        }
        svg.push_str(&format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
            self.value_arc, self.palette.accent, self.stroke_width
        ));
        svg.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="2.5" stroke-linecap="round"/>"#,
            self.center.x, self.center.y, self.needle_tip.x, self.needle_tip.y, self.palette.text
        ));
        svg.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="5" fill="{}"/>"#,
            self.center.x, self.center.y, self.palette.text
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="22" font-weight="700" fill="{}">{}</text>"#,
            self.center.x,
            self.center.y + 28.0,
            self.palette.text,
            self.center_label
        ));
        for (at, label) in [
            (&self.min_label_at, 0),
            (&self.max_label_at, self.display_max),
        ] {
            svg.push_str(&format!(
                r##"<text x="{}" y="{}" text-anchor="middle" font-size="10" fill="#888">{}</text>"##,
                at.x, at.y, label
            ));
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Needle angle for `score`. Scores past the display maximum pin the needle
/// at the right end.
pub fn score_angle(score: u32, display_max: u32) -> f64 {
    if display_max == 0 {
        return START_DEG;
    }
    let fraction = score.min(display_max) as f64 / display_max as f64;
    START_DEG + fraction * SWEEP_DEG
}

/// SVG path for a clockwise circular arc around the gauge centre.
pub fn arc_path(geometry: &GaugeGeometry, start_deg: f64, end_deg: f64, r: f64) -> String {
    let (start, end) = (start_deg.to_radians(), end_deg.to_radians());
    let x1 = geometry.cx + r * start.cos();
    let y1 = geometry.cy + r * start.sin();
    let x2 = geometry.cx + r * end.cos();
    let y2 = geometry.cy + r * end.sin();
    let large_arc = u8::from(end_deg - start_deg > 180.0);
    format!("M {x1:.2} {y1:.2} A {r} {r} 0 {large_arc} 1 {x2:.2} {y2:.2}")
}
