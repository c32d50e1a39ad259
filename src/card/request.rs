use percent_encoding::percent_decode_str;

pub const DEFAULT_TEXT: &str = "**Eduardo** Aguayo";
pub const DEFAULT_FONT_SIZE: &str = "48px";
pub const PLACEHOLDER_IMAGE: &str = "https://eduardoaguayo.cl/assets/favicons/favicon.svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Only an exact `"dark"` selects the dark theme.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileType {
    #[default]
    Png,
    Jpeg,
}

impl FileType {
    pub fn from_extension(value: Option<&str>) -> Self {
        match value {
            Some("jpeg") => FileType::Jpeg,
            _ => FileType::Png,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Png => "png",
            FileType::Jpeg => "jpeg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    #[default]
    Stacked,
    SideBySide,
}

impl Layout {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("side-by-side") => Layout::SideBySide,
            _ => Layout::Stacked,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Stacked => "stacked",
            Layout::SideBySide => "side-by-side",
        }
    }
}

/// Validated, fully defaulted description of one card.
///
/// `widths` and `heights` are index-aligned with `images` but may be shorter
/// or longer; the template resolves missing entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRequest {
    pub text: String,
    pub theme: Theme,
    pub layout: Layout,
    pub file_type: FileType,
    pub markdown: bool,
    pub font_size: String,
    pub images: Vec<String>,
    pub widths: Vec<String>,
    pub heights: Vec<String>,
}

impl CardRequest {
    /// Build a request from the raw last path segment and the raw query string
    /// of a card URL, e.g. `Hello%20World.png` and `theme=dark&md=1`.
    pub fn from_uri_parts(raw_path_segment: &str, raw_query: Option<&str>) -> Self {
        let params = url::form_urlencoded::parse(raw_query.unwrap_or_default().as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()));
        parse(params, raw_path_segment)
    }
}

/// Map raw query parameters and the path text onto a [`CardRequest`].
///
/// Never fails: every unknown or malformed value degrades to its default.
pub fn parse<I, K, V>(params: I, raw_path_text: &str) -> CardRequest
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut theme = None;
    let mut md = None;
    let mut font_size = None;
    let mut layout = None;
    let mut images = Vec::new();
    let mut widths = Vec::new();
    let mut heights = Vec::new();

    for (key, value) in params {
        match key.as_ref() {
            "theme" => set_once(&mut theme, value),
            "md" => set_once(&mut md, value),
            "fontSize" => set_once(&mut font_size, value),
            "layout" => set_once(&mut layout, value),
            "images" => images.push(value.into()),
            "widths" => widths.push(value.into()),
            "heights" => heights.push(value.into()),
            other => tracing::debug!("ignoring unknown card parameter `{}`", other),
        }
    }

    let (text, extension) = split_path_text(raw_path_text);

    if images.is_empty() {
        images.push(PLACEHOLDER_IMAGE.to_string());
    }

    CardRequest {
        text: if text.is_empty() {
            DEFAULT_TEXT.to_string()
        } else {
            text
        },
        theme: Theme::from_param(theme.as_deref()),
        layout: Layout::from_param(layout.as_deref()),
        file_type: FileType::from_extension(extension.as_deref()),
        markdown: md.as_deref() == Some("1"),
        font_size: font_size.unwrap_or_else(|| DEFAULT_FONT_SIZE.to_string()),
        images,
        widths,
        heights,
    }
}

fn set_once<V: Into<String>>(slot: &mut Option<String>, value: V) {
    if slot.is_none() {
        *slot = Some(value.into());
    }
}

/// Split `text.ext` on its last dot and percent-decode the text part.
fn split_path_text(raw: &str) -> (String, Option<String>) {
    let raw = raw.trim_start_matches('/');
    let (encoded, extension) = match raw.rsplit_once('.') {
        Some((text, ext)) => (text, Some(ext.to_string())),
        None => (raw, None),
    };
    let text = percent_decode_str(encoded).decode_utf8_lossy().into_owned();
    (text, extension)
}
