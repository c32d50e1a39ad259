/// Escape a caller-supplied value for interpolation into markup.
///
/// `&`, `<`, `>`, `"` and `'` are replaced by their entity forms in a single
/// left-to-right pass. An `&` that already starts a well-formed character
/// reference is copied as-is, so running the function twice never produces
/// `&amp;amp;`.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for (idx, ch) in input.char_indices() {
        match ch {
            '&' if is_char_reference(&input[idx..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }

    out
}

/// Longest reference after the `&`: a 32-byte name plus `;`.
const MAX_REFERENCE_BODY: usize = 33;

/// `s` starts with `&` and is followed by `name;`, `#digits;` or `#xhex;`.
fn is_char_reference(s: &str) -> bool {
    let body = &s.as_bytes()[1..];
    let window = &body[..body.len().min(MAX_REFERENCE_BODY)];
    let Some(end) = window.iter().position(|&b| b == b';') else {
        return false;
    };
    let body = &body[..end];

    match body {
        [b'#', b'x' | b'X', hex @ ..] => {
            (1..=6).contains(&hex.len()) && hex.iter().all(u8::is_ascii_hexdigit)
        }
        [b'#', digits @ ..] => {
            (1..=7).contains(&digits.len()) && digits.iter().all(u8::is_ascii_digit)
        }
        name => (1..=32).contains(&name.len()) && name.iter().all(u8::is_ascii_alphanumeric),
    }
}
