//! Markdown rendering for post and comment bodies.
//!
//! DESIGN
//! ======
//! Raw HTML events are escaped rather than passed through, since bodies are
//! user-supplied and the output lands in `inner_html`.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{Event, Options, Parser, html};

/// Render CommonMark `source` to an HTML fragment with raw HTML neutralized.
pub fn render(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(source, options).map(|event| match event {
        // Demoting raw HTML to text makes the serializer escape it.
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
