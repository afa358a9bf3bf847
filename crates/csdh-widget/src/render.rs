use tera::{Context, Tera};

use crate::error::WidgetError;
use crate::view::WidgetView;

/// Built-in summary layout: Markdown subset understood by
/// [`crate::docx::generate_docx`].
pub const SUMMARY_TEMPLATE: &str = include_str!("../templates/summary.md.tera");

const SUMMARY_TEMPLATE_NAME: &str = "summary.md";

/// Render the widget as Markdown using the built-in layout.
pub fn render_markdown(view: &WidgetView) -> Result<String, WidgetError> {
    render_with_template(SUMMARY_TEMPLATE_NAME, SUMMARY_TEMPLATE, view)
}

/// Render a Tera template with a WidgetView.
///
/// The view's fields become the template context variables, so a template
/// can reach e.g. `summary.rate` or `methodology.population`.
pub fn render_with_template(
    template_name: &str,
    template_content: &str,
    view: &WidgetView,
) -> Result<String, WidgetError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| WidgetError::TemplateParse(e.to_string()))?;

    let context = Context::from_serialize(view)?;
    let rendered = tera.render(template_name, &context)?;
    tracing::debug!(template = template_name, bytes = rendered.len(), "widget rendered");
    Ok(rendered)
}
