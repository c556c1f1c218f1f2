//! Textual repair of raw model output before JSON parsing.
//!
//! Models wrap the JSON in markdown fences, append citation lists, sprinkle
//! `[label](url)` footnotes into strings and forget to escape quotes inside
//! free text. The passes below undo those habits in a fixed order. Nothing
//! here checks that the result is JSON; a document that is still broken fails
//! later in [`crate::validate`].
//!
//! Known failure modes of the quote repair: a literal quote directly followed
//! by `", "` (e.g. `"Add "salt", "pepper" and oil"`) is indistinguishable from
//! an element boundary and splits the string; literal quotes are only repaired
//! inside `comments` values and `instructions` entries.

use std::sync::LazyLock;

use regex::Regex;

/// Opening or closing markdown fence, with an optional language tag.
static CODE_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+-]*").expect("Invalid code fence regex"));

/// `[label](url)` footnote with optional leading spaces. Never crosses a newline.
/// The label may not contain `[`, so a one-line JSON array such as
/// `["a" [1](u)]` only loses the footnote.
static FOOTNOTE_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]*\[[^\[\]\n]*\]\([^)\n]*\)").expect("Invalid footnote link regex")
});

/// Keys whose string bodies get the unescaped-quote repair.
static REPAIRABLE_FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(comments|instructions)"\s*:\s*"#).expect("Invalid repairable field regex")
});

/// Run every repair pass over `raw`, in order.
pub fn normalize(raw: &str) -> String {
    let text = strip_code_fences(raw);
    let text = truncate_after_last_brace(&text);
    let text = strip_footnote_links(&text);
    repair_unescaped_quotes(&text)
}

/// Remove every markdown fence marker, keeping what is between them.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE_REGEX.replace_all(text, "").into_owned()
}

/// Drop everything after the last `}` (citation lists, "Sources" sections).
/// Text without any `}` is returned unchanged.
pub fn truncate_after_last_brace(text: &str) -> String {
    match text.rfind('}') {
        Some(idx) => text[..=idx].to_string(),
        None => text.to_string(),
    }
}

/// Remove inline `[label](url)` footnotes.
pub fn strip_footnote_links(text: &str) -> String {
    FOOTNOTE_LINK_REGEX.replace_all(text, "").into_owned()
}

/// Escape literal `"` characters inside `comments` values and `instructions`
/// entries. Already-escaped quotes are copied through untouched.
pub fn repair_unescaped_quotes(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 16);
    let mut cursor = 0;

    for m in REPAIRABLE_FIELD_REGEX.find_iter(text) {
        if m.start() < cursor {
            continue;
        }
        out.push_str(&text[cursor..m.end()]);
        cursor = m.end();

        match bytes.get(cursor) {
            Some(b'"') => {
                cursor = repair_string(text, cursor, &mut out);
            }
            Some(b'[') => {
                out.push('[');
                cursor += 1;
                cursor = repair_string_array(text, cursor, &mut out);
            }
            _ => {}
        }
    }

    out.push_str(&text[cursor..]);
    out
}

/// Repair consecutive string elements of an array, starting just after `[`.
/// Returns the index of the first byte not consumed.
fn repair_string_array(text: &str, mut pos: usize, out: &mut String) -> usize {
    let bytes = text.as_bytes();
    loop {
        let next = skip_whitespace(bytes, pos);
        out.push_str(&text[pos..next]);
        pos = next;

        if bytes.get(pos) != Some(&b'"') {
            return pos;
        }
        pos = repair_string(text, pos, out);

        let next = skip_whitespace(bytes, pos);
        out.push_str(&text[pos..next]);
        pos = next;

        if bytes.get(pos) != Some(&b',') {
            return pos;
        }
        out.push(',');
        pos += 1;
    }
}

/// Copy the string literal whose opening quote is at `start`, escaping
/// quotes that cannot be its closing delimiter. Returns the index just past
/// the closing quote (or the end of input if it never closes).
///
/// All split points are ASCII bytes, so slicing stays on char boundaries.
fn repair_string(text: &str, start: usize, out: &mut String) -> usize {
    let bytes = text.as_bytes();
    out.push('"');
    let mut segment_start = start + 1;
    let mut pos = start + 1;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => {
                // Escape pair, copied as-is.
                pos += 2;
            }
            b'"' if closes_string(bytes, pos + 1) => {
                out.push_str(&text[segment_start..=pos]);
                return pos + 1;
            }
            b'"' => {
                out.push_str(&text[segment_start..pos]);
                out.push_str("\\\"");
                pos += 1;
                segment_start = pos;
            }
            _ => pos += 1,
        }
    }

    let end = bytes.len();
    out.push_str(&text[segment_start.min(end)..end]);
    end
}

/// A quote closes a string value when the JSON that follows it is
/// structural: end of input, `}` or `]`, or a comma leading into the next
/// key or element.
fn closes_string(bytes: &[u8], after: usize) -> bool {
    let pos = skip_whitespace(bytes, after);
    match bytes.get(pos) {
        None | Some(b'}') | Some(b']') => true,
        Some(b',') => {
            let next = skip_whitespace(bytes, pos + 1);
            matches!(
                bytes.get(next),
                None | Some(b'"') | Some(b'{') | Some(b'[') | Some(b'}') | Some(b']')
            )
        }
        _ => false,
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}
