//! Byte-scanning HTML tokenizer.
//!
//! Tag and attribute names run until whitespace, `/`, `>` (and `=` for attribute names) and
//! are lowercased ASCII-only, so non-ASCII names such as `⚡` survive untouched. This is not
//! the HTML5 state machine: there is no parse-error recovery beyond what the tree builder
//! needs.
//!
//! Known limitations:
//! - Raw text close-tag scanning accepts only ASCII whitespace before `>`.
//! - Duplicate attributes are kept; deduplication is the caller's concern.
use crate::entities::decode_entities;
use crate::types::{Attribute, Token};
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TextMode {
    /// Content is copied verbatim until the matching close tag.
    Raw,
    /// Like `Raw`, but character references are decoded.
    Escapable,
}

fn text_mode(name: &str) -> Option<TextMode> {
    match name {
        "script" | "style" | "iframe" | "xmp" | "noembed" | "noframes" => Some(TextMode::Raw),
        "title" | "textarea" => Some(TextMode::Escapable),
        _ => None,
    }
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "command"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

// Matches only start at ASCII `<`, which never appears inside a UTF-8 continuation byte.
fn find_close_tag(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let len = bytes.len();
    let name = name.as_bytes();
    let n = name.len() + 2;
    let mut i = 0;
    while i + n <= len {
        let rel = memchr(b'<', &bytes[i..])?;
        i += rel;
        if i + n > len {
            return None;
        }
        if bytes[i + 1] == b'/' && starts_with_ignore_ascii_case_at(bytes, i + 2, name) {
            let mut k = i + n;
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

fn is_tag_name_end(c: u8) -> bool {
    c.is_ascii_whitespace() || c == b'/' || c == b'>'
}

fn is_attribute_name_end(c: u8) -> bool {
    is_tag_name_end(c) || c == b'='
}

fn doctype_name(raw: &str) -> String {
    // `raw` is everything between `<!` and `>`, keyword included.
    raw.get("doctype".len()..)
        .unwrap_or_default()
        .split_ascii_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Tokenizes `input` into a flat token list.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    // Slices are only cut at ASCII structural bytes, which keeps every endpoint on a UTF-8
    // char boundary.
    while i < len {
        if bytes[i] != b'<' {
            let start = i;
            i = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            push_text(&mut out, decode_entities(&input[start..i]));
            continue;
        }

        if input[i..].starts_with(HTML_COMMENT_START) {
            let body_start = i + HTML_COMMENT_START.len();
            match input[body_start..].find(HTML_COMMENT_END) {
                Some(end) => {
                    out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                    i = body_start + end + HTML_COMMENT_END.len();
                    continue;
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    break;
                }
            }
        }

        let next = bytes.get(i + 1).copied();
        match next {
            Some(b'!') | Some(b'?') => {
                // Doctype, or a bogus comment such as `<![CDATA[...]]>` or `<?xml ...?>`.
                let body_start = i + 2;
                let end = memchr(b'>', &bytes[body_start..]).map_or(len, |rel| body_start + rel);
                let body = &input[body_start..end];
                if starts_with_ignore_ascii_case_at(bytes, body_start, b"doctype") {
                    out.push(Token::Doctype(doctype_name(body)));
                } else {
                    out.push(Token::Comment(body.to_string()));
                }
                i = (end + 1).min(len);
                continue;
            }
            Some(b'/') => {
                let name_start = i + 2;
                if bytes.get(name_start).is_some_and(|b| b.is_ascii_alphabetic()) {
                    let mut j = name_start;
                    while j < len && !is_tag_name_end(bytes[j]) {
                        j += 1;
                    }
                    let name = input[name_start..j].to_ascii_lowercase();
                    j = memchr(b'>', &bytes[j..]).map_or(len, |rel| j + rel + 1);
                    out.push(Token::EndTag(name));
                    i = j;
                } else {
                    // `</>` and `</ ...>` are dropped entirely.
                    i = memchr(b'>', &bytes[name_start..]).map_or(len, |rel| name_start + rel + 1);
                }
                continue;
            }
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => {
                push_text(&mut out, "<".to_string());
                i += 1;
                continue;
            }
        }

        let (tag, content_start) = scan_start_tag(input, i);
        let mode = if tag.self_closing {
            None
        } else {
            text_mode(&tag.name)
        };
        let name = tag.name.clone();
        out.push(Token::StartTag {
            name: tag.name,
            attributes: tag.attributes,
            self_closing: tag.self_closing,
        });
        i = content_start;

        if let Some(mode) = mode {
            let (content, resume) = match find_close_tag(&input[i..], &name) {
                Some((rel_start, rel_end)) => (&input[i..i + rel_start], i + rel_end),
                None => (&input[i..], len),
            };
            if !content.is_empty() {
                let text = match mode {
                    TextMode::Raw => content.to_string(),
                    TextMode::Escapable => decode_entities(content),
                };
                out.push(Token::Text(text));
            }
            out.push(Token::EndTag(name));
            i = resume;
        }
    }
    log::trace!(target: "html.tokenizer", "tokenized {} bytes into {} tokens", len, out.len());
    out
}

fn push_text(out: &mut Vec<Token>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Text(previous)) = out.last_mut() {
        previous.push_str(&text);
    } else {
        out.push(Token::Text(text));
    }
}

struct StartTag {
    name: String,
    attributes: Vec<Attribute>,
    self_closing: bool,
}

/// Scans a start tag beginning at `<`. Returns the tag and the index just past it.
fn scan_start_tag(input: &str, start: usize) -> (StartTag, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let name_start = start + 1;
    let mut k = name_start;
    while k < len && !is_tag_name_end(bytes[k]) {
        k += 1;
    }
    let name = input[name_start..k].to_ascii_lowercase();
    let mut attributes = Vec::new();
    let mut self_closing = false;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            break;
        }
        if bytes[k] == b'/' {
            if k + 1 < len && bytes[k + 1] == b'>' {
                self_closing = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }
        let key_start = k;
        // A leading `=` is part of the name.
        k += 1;
        while k < len && !is_attribute_name_end(bytes[k]) {
            k += 1;
        }
        let key = input[key_start..k].to_ascii_lowercase();

        skip_whitespace(&mut k);
        let mut value = String::new();
        if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let value_start = k;
                k = memchr(quote, &bytes[k..]).map_or(len, |rel| k + rel);
                value = decode_entities(&input[value_start..k]);
                if k < len {
                    k += 1;
                }
            } else {
                let value_start = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    k += 1;
                }
                value = decode_entities(&input[value_start..k]);
            }
        }
        attributes.push(Attribute::new(key, value));
    }

    if is_void_element(&name) {
        self_closing = true;
    }
    (
        StartTag {
            name,
            attributes,
            self_closing,
        },
        k,
    )
}
