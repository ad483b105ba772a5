//! HTML entity decoding for upstream question text.
//!
//! The trivia upstream HTML-escapes question and answer strings. Only the
//! entities it is known to emit are mapped; anything else matching the token
//! shape is passed through verbatim rather than treated as an error.

/// Decodes the known HTML entities in `text`.
///
/// A token is "`&`, optional `#`, one or more word characters, `;`". Known
/// tokens are replaced with their character; unknown tokens and bare `&`
/// characters are copied through unchanged, so the function is idempotent on
/// text that contains no tokens. Decoded `&`, `<` and `>` are not re-escaped.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match entity_token_len(tail) {
            Some(len) => {
                let token = &tail[..len];
                out.push_str(entity_replacement(token).unwrap_or(token));
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Length of the entity token at the start of `s` (which begins with `&`),
/// or `None` if the text after the ampersand does not form a token.
fn entity_token_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut len = 1;
    if bytes.get(len) == Some(&b'#') {
        len += 1;
    }
    let word_start = len;
    while let Some(&b) = bytes.get(len) {
        if b.is_ascii_alphanumeric() || b == b'_' {
            len += 1;
        } else {
            break;
        }
    }
    if len == word_start {
        return None;
    }
    (bytes.get(len) == Some(&b';')).then_some(len + 1)
}

fn entity_replacement(token: &str) -> Option<&'static str> {
    let replacement = match token {
        "&#039;" => "'",
        "&quot;" => "\"",
        "&amp;" => "&",
        "&lt;" => "<",
        "&gt;" => ">",
        "&nbsp;" => " ",
        "&copy;" => "©",
        "&reg;" => "®",
        "&trade;" => "™",
        "&hellip;" => "…",
        "&ndash;" => "–",
        "&mdash;" => "—",
        "&lsquo;" => "\u{2018}",
        "&rsquo;" => "\u{2019}",
        "&ldquo;" => "\u{201C}",
        "&rdquo;" => "\u{201D}",
        "&#40;" => "(",
        "&#41;" => ")",
        "&#44;" => ",",
        "&#58;" => ":",
        "&#59;" => ";",
        _ => return None,
    };
    Some(replacement)
}
