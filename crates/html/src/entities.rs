/// Decode character references in text and attribute values.
///
/// Contract:
/// - Named references from [`NAMED_ENTITIES`] decode only when semicolon-terminated.
/// - Numeric references decode when well-formed and semicolon-terminated: `&#123;` and
///   `&#x1F4A9;`. Invalid scalar values pass through unchanged.
/// - Anything else, including unknown names, is copied through verbatim.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    if memchr::memchr(b'&', bytes).is_none() {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut copy_start = 0;

    while i < bytes.len() {
        if bytes[i] != b'&' {
            i += 1;
            continue;
        }
        if copy_start < i {
            out.push_str(&s[copy_start..i]);
        }
        match decode_reference(s, i) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                i += consumed;
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
        copy_start = i;
    }

    if copy_start < bytes.len() {
        out.push_str(&s[copy_start..]);
    }
    out
}

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111
const MAX_NAME_LEN: usize = 8;

const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("copy", '\u{00A9}'),
    ("reg", '\u{00AE}'),
    ("trade", '\u{2122}'),
    ("hellip", '\u{2026}'),
    ("mdash", '\u{2014}'),
    ("ndash", '\u{2013}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
    ("middot", '\u{00B7}'),
    ("times", '\u{00D7}'),
];

/// Returns the decoded char and the byte length of the reference starting at `start`.
fn decode_reference(s: &str, start: usize) -> Option<(char, usize)> {
    let rest = &s.as_bytes()[start + 1..];
    let semi = rest
        .iter()
        .take(MAX_NAME_LEN.max(MAX_DEC_DIGITS + 2) + 1)
        .position(|b| *b == b';')?;
    let body = &s[start + 1..start + 1 + semi];
    let consumed = semi + 2;

    if let Some(numeric) = body.strip_prefix('#') {
        let (digits, radix, max) = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => (hex, 16, MAX_HEX_DIGITS),
            None => (numeric, 10, MAX_DEC_DIGITS),
        };
        if digits.is_empty()
            || digits.len() > max
            || !digits.bytes().all(|b| (b as char).is_digit(radix))
        {
            return None;
        }
        let ch = u32::from_str_radix(digits, radix)
            .ok()
            .and_then(char::from_u32)?;
        return Some((ch, consumed));
    }

    NAMED_ENTITIES
        .iter()
        .find(|(name, _)| *name == body)
        .map(|(_, ch)| (*ch, consumed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_entities_preserves_utf8() {
        assert_eq!(decode_entities("120×32 ⚡"), "120×32 ⚡");
    }

    #[test]
    fn decode_entities_decodes_named_and_numeric() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&#34;&#x27;&copy;"), "\"'©");
        assert_eq!(decode_entities("&#x1F4A9;"), "💩");
    }

    #[test]
    fn decode_entities_leaves_malformed_sequences() {
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&amp"), "&amp");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode_entities("&#1114112;"), "&#1114112;");
        assert_eq!(decode_entities("a=1&b=2;"), "a=1&b=2;");
    }
}
