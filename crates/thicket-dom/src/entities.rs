//! HTML character references, decoded when text is read.
//!
//! Text nodes keep the source text untouched; [`decode_html`] runs only for
//! [`crate::DomTree::inner_text`]. References that are unknown or malformed
//! are left exactly as written.

use std::borrow::Cow;

/// Names that browsers also accept without a trailing semicolon.
const LEGACY_NAMES: [&str; 7] = ["amp", "lt", "gt", "quot", "nbsp", "copy", "reg"];

/// Longest name we bother scanning for.
const MAX_NAME_LEN: usize = 32;

/// Look up a named character reference.
///
/// `name` excludes both the leading `&` and the trailing `;`.
///
/// # Example
/// ```
/// use thicket_dom::entities::lookup_entity;
///
/// assert_eq!(lookup_entity("amp"), Some("&"));
/// assert_eq!(lookup_entity("xyz"), None);
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    let replacement = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{00A0}",
        "shy" => "\u{00AD}",
        "copy" => "\u{00A9}",
        "reg" => "\u{00AE}",
        "trade" => "\u{2122}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        "middot" => "\u{00B7}",
        "sect" => "\u{00A7}",
        "para" => "\u{00B6}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201A}",
        "ldquo" => "\u{201C}",
        "rdquo" => "\u{201D}",
        "bdquo" => "\u{201E}",
        "laquo" => "\u{00AB}",
        "raquo" => "\u{00BB}",
        "iexcl" => "\u{00A1}",
        "iquest" => "\u{00BF}",
        "cent" => "\u{00A2}",
        "pound" => "\u{00A3}",
        "euro" => "\u{20AC}",
        "yen" => "\u{00A5}",
        "curren" => "\u{00A4}",
        "times" => "\u{00D7}",
        "divide" => "\u{00F7}",
        "plusmn" => "\u{00B1}",
        "minus" => "\u{2212}",
        "ne" => "\u{2260}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "deg" => "\u{00B0}",
        "micro" => "\u{00B5}",
        "frac12" => "\u{00BD}",
        "frac14" => "\u{00BC}",
        "frac34" => "\u{00BE}",
        "sup2" => "\u{00B2}",
        "sup3" => "\u{00B3}",
        "larr" => "\u{2190}",
        "rarr" => "\u{2192}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",
        "alpha" => "\u{03B1}",
        "beta" => "\u{03B2}",
        "gamma" => "\u{03B3}",
        "delta" => "\u{03B4}",
        "epsilon" => "\u{03B5}",
        "lambda" => "\u{03BB}",
        "mu" => "\u{03BC}",
        "pi" => "\u{03C0}",
        "sigma" => "\u{03C3}",
        "omega" => "\u{03C9}",
        "Omega" => "\u{03A9}",
        "Agrave" => "\u{00C0}",
        "Aacute" => "\u{00C1}",
        "Acirc" => "\u{00C2}",
        "Auml" => "\u{00C4}",
        "agrave" => "\u{00E0}",
        "aacute" => "\u{00E1}",
        "acirc" => "\u{00E2}",
        "auml" => "\u{00E4}",
        "aring" => "\u{00E5}",
        "Eacute" => "\u{00C9}",
        "eacute" => "\u{00E9}",
        "egrave" => "\u{00E8}",
        "ecirc" => "\u{00EA}",
        "euml" => "\u{00EB}",
        "iacute" => "\u{00ED}",
        "igrave" => "\u{00EC}",
        "iuml" => "\u{00EF}",
        "oacute" => "\u{00F3}",
        "ograve" => "\u{00F2}",
        "ocirc" => "\u{00F4}",
        "ouml" => "\u{00F6}",
        "Ouml" => "\u{00D6}",
        "oslash" => "\u{00F8}",
        "uacute" => "\u{00FA}",
        "ugrave" => "\u{00F9}",
        "uuml" => "\u{00FC}",
        "Uuml" => "\u{00DC}",
        "szlig" => "\u{00DF}",
        "ntilde" => "\u{00F1}",
        "Ntilde" => "\u{00D1}",
        "ccedil" => "\u{00E7}",
        "Ccedil" => "\u{00C7}",
        _ => return None,
    };
    Some(replacement)
}

/// Decode every character reference in `text`.
///
/// Borrows when there is nothing to decode.
///
/// ```
/// use thicket_dom::entities::decode_html;
///
/// assert_eq!(decode_html("a &lt; b &#38; &#x43;"), "a < b & C");
/// assert_eq!(decode_html("&bogus; stays"), "&bogus; stays");
/// ```
#[must_use]
pub fn decode_html(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let after_amp = &rest[amp + 1..];
        match decode_reference(after_amp, &mut decoded) {
            Some(consumed) => rest = &after_amp[consumed..],
            None => {
                decoded.push('&');
                rest = after_amp;
            }
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}

/// Decode the reference starting right after an `&`, pushing the result to
/// `out`. Returns the number of bytes consumed, or `None` if `input` does not
/// start with a recognizable reference.
fn decode_reference(input: &str, out: &mut String) -> Option<usize> {
    if let Some(numeric) = input.strip_prefix('#') {
        return decode_numeric(numeric, out).map(|consumed| consumed + 1);
    }

    let name_len = input
        .bytes()
        .take(MAX_NAME_LEN)
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    if name_len == 0 {
        return None;
    }
    let name = &input[..name_len];

    if input[name_len..].starts_with(';')
        && let Some(replacement) = lookup_entity(name)
    {
        out.push_str(replacement);
        return Some(name_len + 1);
    }

    // "&amp" and friends are accepted bare, even when letters follow.
    let legacy = LEGACY_NAMES
        .iter()
        .filter(|legacy| name.starts_with(*legacy))
        .max_by_key(|legacy| legacy.len())?;
    out.push_str(lookup_entity(legacy)?);
    Some(legacy.len())
}

/// `&#123;` / `&#x7B;`. Code points that are zero, surrogates or out of range
/// become U+FFFD.
fn decode_numeric(input: &str, out: &mut String) -> Option<usize> {
    let (digits_start, radix) = match input.as_bytes().first() {
        Some(b'x' | b'X') => (1, 16),
        _ => (0, 10),
    };
    let digits_len = input[digits_start..]
        .chars()
        .take_while(|c| c.is_digit(radix))
        .count();
    if digits_len == 0 {
        return None;
    }
    let digits_end = digits_start + digits_len;

    let code = u32::from_str_radix(&input[digits_start..digits_end], radix).unwrap_or(u32::MAX);
    let c = match code {
        0 => '\u{FFFD}',
        _ => char::from_u32(code).unwrap_or('\u{FFFD}'),
    };
    out.push(c);

    if input[digits_end..].starts_with(';') {
        Some(digits_end + 1)
    } else {
        Some(digits_end)
    }
}
