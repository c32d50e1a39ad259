//! Replace emoji in already-escaped HTML with scalable image markup.
//!
//! Sequences are matched the way the twemoji asset set names its files, so a
//! recognised emoji maps to `{base}{codepoints}.svg` where `codepoints` is the
//! dash-joined lowercase hex of the sequence.

use std::fmt::Write as _;

pub const DEFAULT_EMOJI_BASE_URL: &str = "https://cdn.jsdelivr.net/gh/jdecked/twemoji@latest/assets/svg/";

const ZWJ: char = '\u{200D}';
const VS16: char = '\u{FE0F}';
/// Longest sequence tried against the emoji table (family + skin tones, tag flags).
const MAX_SEQUENCE: usize = 16;

/// Substitute emoji found in text nodes of `html`. Tag contents are copied
/// through untouched.
pub fn emojify(html: &str, base_url: &str) -> String {
    let chars: Vec<char> = html.chars().collect();
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_tag {
            in_tag = c != '>';
            out.push(c);
            i += 1;
            continue;
        }
        if c == '<' {
            in_tag = true;
            out.push(c);
            i += 1;
            continue;
        }

        match match_sequence(&chars[i..]) {
            Some(len) => {
                push_image(&mut out, &chars[i..i + len], base_url);
                i += len;
            }
            None => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Length of the longest known emoji starting at `s[0]`, if there is one.
fn match_sequence(s: &[char]) -> Option<usize> {
    let first = s[0];
    if first.is_ascii() && !matches!(first, '0'..='9' | '#' | '*') {
        return None;
    }

    (1..=s.len().min(MAX_SEQUENCE))
        .rev()
        .find(|&len| is_emoji(&s[..len]))
}

fn is_emoji(sequence: &[char]) -> bool {
    let candidate: String = sequence.iter().collect();
    match emojis::get(&candidate) {
        // A lone text-default symbol (`©`, `❤`) is only an emoji with VS16.
        Some(emoji) if sequence.len() == 1 => emoji.as_str() == candidate,
        Some(_) => true,
        None => false,
    }
}

fn push_image(out: &mut String, sequence: &[char], base_url: &str) {
    let keep_vs16 = sequence.contains(&ZWJ);
    let code = sequence
        .iter()
        .filter(|&&c| keep_vs16 || c != VS16)
        .map(|&c| format!("{:x}", c as u32))
        .collect::<Vec<_>>()
        .join("-");
    let alt: String = sequence.iter().collect();

    let _ = write!(
        out,
        r#"<img class="emoji" draggable="false" alt="{}" src="{}{}.svg"/>"#,
        alt, base_url, code
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://cdn/svg/";

    fn img(alt: &str, code: &str) -> String {
        format!(r#"<img class="emoji" draggable="false" alt="{alt}" src="{BASE}{code}.svg"/>"#)
    }

    #[test]
    fn replaces_single_emoji() {
        assert_eq!(emojify("Hi 😀!", BASE), format!("Hi {}!", img("😀", "1f600")));
    }

    #[test]
    fn drops_vs16_from_file_name() {
        assert_eq!(emojify("❤\u{FE0F}", BASE), img("❤\u{FE0F}", "2764"));
    }

    #[test]
    fn keeps_zwj_sequences_together() {
        let dev = "👨\u{200D}💻";
        assert_eq!(emojify(dev, BASE), img(dev, "1f468-200d-1f4bb"));
    }

    #[test]
    fn flags_and_keycaps() {
        assert_eq!(emojify("🇨🇱", BASE), img("🇨🇱", "1f1e8-1f1f1"));
        assert_eq!(emojify("1\u{FE0F}\u{20E3}", BASE), img("1\u{FE0F}\u{20E3}", "31-20e3"));
        assert_eq!(emojify("2024", BASE), "2024");
    }

    #[test]
    fn text_presentation_symbols_stay_text() {
        assert_eq!(emojify("© 2024 ™", BASE), "© 2024 ™");
        assert_eq!(emojify("©\u{FE0F}", BASE), img("©\u{FE0F}", "a9"));
        assert_eq!(emojify("❤ ☀\u{FE0E}", BASE), "❤ ☀\u{FE0E}");
    }

    #[test]
    fn ordinary_symbols_stay_text() {
        for text in ["✓ done", "★★★", "♪ la la", "✗ nope", "\u{1F130}"] {
            assert_eq!(emojify(text, BASE), text);
        }
    }

    #[test]
    fn unpaired_regional_indicator_stays_text() {
        assert_eq!(emojify("\u{1F1E8}x", BASE), "\u{1F1E8}x");
    }

    #[test]
    fn default_base_points_at_maintained_assets() {
        let html = emojify("😀", DEFAULT_EMOJI_BASE_URL);
        assert!(html.contains(
            r#"src="https://cdn.jsdelivr.net/gh/jdecked/twemoji@latest/assets/svg/1f600.svg""#
        ));
    }

    #[test]
    fn skips_tag_contents() {
        let html = r#"<img alt="😀" src="x"/><p>😀</p>"#;
        assert_eq!(
            emojify(html, BASE),
            format!(r#"<img alt="😀" src="x"/><p>{}</p>"#, img("😀", "1f600"))
        );
    }

    #[test]
    fn leaves_plain_and_escaped_text_alone() {
        let html = "&lt;b&gt; Tom &amp; Jerry";
        assert_eq!(emojify(html, BASE), html);
    }
}
