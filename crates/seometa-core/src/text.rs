//! Text helpers shared by the generators.

const ELLIPSIS: &str = "...";

/// Trims `text` and shortens it to at most `max_length` characters.
///
/// Text already within the limit comes back trimmed but otherwise unchanged.
/// Longer text is cut to `max_length - 3` characters, trailing whitespace is
/// dropped from the cut, and `"..."` is appended. Lengths are counted in
/// `char`s, not bytes.
///
/// The result never exceeds `max_length`. Limits too small to hold the
/// ellipsis get a plain cut instead.
#[must_use]
pub fn truncate(text: &str, max_length: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_length {
        return text.to_owned();
    }

    if max_length <= ELLIPSIS.len() {
        let cut: String = text.chars().take(max_length).collect();
        return cut.trim_end().to_owned();
    }

    let cut: String = text.chars().take(max_length - ELLIPSIS.len()).collect();
    format!("{}{ELLIPSIS}", cut.trim_end())
}
