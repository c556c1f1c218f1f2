//! Cleans user-supplied text before it is interpolated into a prompt.
//!
//! This is the only injection defense the prompt builder relies on: no
//! newline survives (so user text cannot open a new instruction line), control
//! characters are dropped, and whitespace is collapsed.

/// Default maximum length, in characters, of a sanitized field.
pub const DEFAULT_MAX_LENGTH: usize = 200;

/// Sanitize `input` with the default length limit.
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, DEFAULT_MAX_LENGTH)
}

/// Sanitize `input`, keeping at most `max_length` characters.
///
/// Steps, in order: truncate, turn CR/LF runs into a space, delete ASCII
/// control characters, collapse whitespace runs and trim. Idempotent.
pub fn sanitize_with_limit(input: &str, max_length: usize) -> String {
    let mut out = String::with_capacity(input.len().min(max_length));
    let mut pending_space = false;

    for c in input.chars().take(max_length) {
        let c = if c == '\r' || c == '\n' { ' ' } else { c };

        // Tabs and other controls are deleted, not turned into spaces.
        if c.is_ascii_control() {
            continue;
        }

        if c.is_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}
