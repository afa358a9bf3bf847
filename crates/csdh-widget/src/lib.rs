//! csdh-widget
//!
//! The interactive shell around the CSDH reoperation score: per-session
//! factor selection, a host-agnostic view-model (gauge, score distribution,
//! category cards, methodology panel) and renderers for Markdown, SVG and a
//! printable DOCX summary.
//!
//! Hosts drive a [`session::Session`] and draw the [`view::WidgetView`] it
//! produces; every view is derived from scratch from the current selection.

pub mod config;
pub mod docx;
pub mod error;
pub mod gauge;
pub mod palette;
pub mod render;
pub mod session;
pub mod styles;
pub mod view;
