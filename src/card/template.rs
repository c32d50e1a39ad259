use std::fmt::Write as _;
use std::sync::Arc;

use crate::card::assets::AssetCache;
use crate::card::emoji::emojify;
use crate::card::markdown::markdown_to_html;
use crate::card::request::CardRequest;
use crate::card::sanitizer::sanitize;
use crate::card::theme::{card_direction, layout_rules, theme_style};

pub const DEFAULT_WIDTH: &str = "auto";
pub const DEFAULT_HEIGHT: &str = "200";
pub const SEPARATOR: &str = r#"<div class="plus">+</div>"#;

const ATTRIBUTION: &str = "eduardoaguayo.cl<br><small>Ilustración: Daily PM</small>";

/// Turns a [`CardRequest`] into a self-contained HTML document.
///
/// Holds the preloaded fonts; rendering itself reads nothing else, so the
/// same request always yields the same bytes.
#[derive(Debug, Clone)]
pub struct CardTemplate {
    assets: Arc<AssetCache>,
    emoji_base_url: String,
}

impl CardTemplate {
    pub fn new(assets: Arc<AssetCache>, emoji_base_url: impl Into<String>) -> Self {
        Self {
            assets,
            emoji_base_url: emoji_base_url.into(),
        }
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    /// Parse a card URL and render it in one step.
    pub fn render_uri(&self, raw_path_segment: &str, raw_query: Option<&str>) -> String {
        self.render(&CardRequest::from_uri_parts(raw_path_segment, raw_query))
    }

    pub fn render(&self, request: &CardRequest) -> String {
        let body_text = if request.markdown {
            markdown_to_html(&request.text)
        } else {
            sanitize(&request.text)
        };
        let heading = emojify(&body_text, &self.emoji_base_url);

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Generated Image</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
{}
    </style>
</head>
<body>
    <div class="card">
        <div class="logo-wrapper">
            {}
        </div>
        <div class="title-wrapper">
            <div class="heading">{}</div>
            <div class="attribution">{}</div>
        </div>
    </div>
</body>
</html>"#,
            self.css(request),
            image_blocks(request),
            heading,
            ATTRIBUTION
        )
    }

    fn css(&self, request: &CardRequest) -> String {
        let palette = &theme_style(request.theme).palette;
        let layout = layout_rules(request.layout);

        let mut css = String::new();
        for font in self.assets.fonts() {
            let _ = write!(
                css,
                r#"
    @font-face {{
        font-family: '{}';
        font-style: normal;
        font-weight: {};
        src: url(data:font/woff2;charset=utf-8;base64,{}) format("woff2");
    }}"#,
                font.spec.family, font.spec.weight, font.encoded
            );
        }

        let _ = write!(
            css,
            r#"
    body {{
        background: {background};
        height: 100vh;
        margin: 0;
        display: flex;
        text-align: {title_align};
        align-items: center;
        justify-content: center;
        align-content: center;
    }}

    .card {{
        display: flex;
        flex-direction: {card_direction};
        align-items: center;
        justify-content: center;
    }}

    code {{
        color: {text};
        font-family: 'Vera', monospace;
        white-space: pre-wrap;
        letter-spacing: -5px;
    }}

    code:before, code:after {{
        content: '`';
    }}

    .logo-wrapper {{
        display: flex;
        flex-direction: {logo_direction};
        align-items: center;
        align-content: center;
        justify-content: center;
    }}

    svg {{
        color: {text};
    }}

    .title-wrapper {{
        font-size: {font_size};
        display: flex;
        flex-direction: column;
        align-items: {title_items};
        align-content: center;
        justify-content: center;
    }}

    .logo {{
        margin: {logo_margin};
    }}

    .plus {{
        color: {text};
        font-family: 'Roboto', sans-serif;
        font-size: 100px;
    }}

    .emoji {{
        height: 1em;
        width: 1em;
        margin: 0 .05em 0 .1em;
        vertical-align: -0.1em;
    }}

    .heading {{
        font-family: 'Roboto', sans-serif;
        font-weight: normal;
        color: {title};
        background: {title_background};
        padding: 10px 20px;
        line-height: 120%;
        max-width: {heading_max_width};
        margin: 20px 0;
        font-size: 1em;
    }}

    .heading p {{
        margin: 0;
        padding: 0;
    }}

    .attribution {{
        font-family: 'Roboto', sans-serif;
        font-weight: normal;
        color: {text};
        line-height: 150%;
        font-size: .5em;
    }}

    .attribution small {{
        font-size: .75em;
    }}"#,
            background = palette.background,
            title = palette.title,
            title_background = palette.title_background,
            text = palette.text,
            title_align = layout.title_align,
            title_items = layout.title_items,
            card_direction = card_direction(request.theme, request.layout),
            logo_direction = layout.logo_direction,
            logo_margin = layout.logo_margin,
            heading_max_width = layout.heading_max_width,
            font_size = sanitize(&request.font_size),
        );

        css
    }
}

/// One `<img>` per entry in `images`, separated by [`SEPARATOR`].
fn image_blocks(request: &CardRequest) -> String {
    request
        .images
        .iter()
        .enumerate()
        .map(|(i, src)| {
            let width = request.widths.get(i).map_or(DEFAULT_WIDTH, String::as_str);
            let height = request.heights.get(i).map_or(DEFAULT_HEIGHT, String::as_str);
            format!(
                r#"{}<img class="logo" alt="Generated Image" src="{}" width="{}" height="{}"/>"#,
                if i == 0 { "" } else { SEPARATOR },
                sanitize(src),
                sanitize(width),
                sanitize(height)
            )
        })
        .collect()
}
