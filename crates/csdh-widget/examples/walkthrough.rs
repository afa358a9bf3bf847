//! Walk a widget session through a few factor toggles and print what a host
//! would draw at each step.
//!
//! Usage:
//!   RUST_LOG=csdh_widget=debug cargo run -p csdh-widget --example walkthrough
//!
//! Pass a path as the first argument to also write the final summary as DOCX.

use csdh_widget::config::load_config;
use csdh_widget::docx::generate_docx;
use csdh_widget::render::render_markdown;
use csdh_widget::session::Session;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let mut session = Session::default();

    for id in ["gcs_low", "bilateral", "minicraniotomy"] {
        session.toggle_factor(id)?;
        let view = session.view(&config)?;
        println!(
            "+{:<16} score {}/{}  {:<8} {}% ({}/{})",
            id,
            view.summary.score,
            view.summary.display_max,
            view.summary.category_label,
            view.summary.rate,
            view.summary.events,
            view.summary.n,
        );
    }
    println!();

    session.toggle_methodology();
    let view = session.view(&config)?;
    let markdown = render_markdown(&view)?;
    println!("{markdown}");
    println!("{}", view.gauge.to_svg());

    if let Some(path) = std::env::args().nth(1) {
        let bytes = generate_docx(&markdown, &config.document)?;
        std::fs::write(&path, &bytes)?;
        println!("\nwrote {} bytes to {path}", bytes.len());
    }

    Ok(())
}
