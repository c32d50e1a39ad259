use std::collections::HashSet;

use ammonia::Builder as AmmoniaBuilder;
use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Options, Parser, html};

static SANITIZER: Lazy<AmmoniaBuilder<'static>> = Lazy::new(build_sanitizer);

fn build_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "blockquote",
        "br",
        "code",
        "del",
        "em",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "hr",
        "img",
        "li",
        "ol",
        "p",
        "pre",
        "strong",
        "table",
        "tbody",
        "td",
        "th",
        "thead",
        "tr",
        "ul",
    ]);
    builder.tags(tags);

    // Anything not listed (javascript:, vbscript:, data:, ...) loses its href/src.
    builder.url_schemes(HashSet::from(["http", "https", "mailto"]));
    builder.add_tag_attributes("img", &["alt", "title"]);

    builder
}

/// Convert headline markdown to HTML.
///
/// Raw HTML in the source comes out as escaped text, and the rendered output
/// goes through an allowlist sanitizer, so the result can be embedded as-is.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    SANITIZER.clean(&html_output).to_string()
}
