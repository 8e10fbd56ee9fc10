// src/extract/name.rs
// =============================================================================
// Name presence: every lowercase name part must appear somewhere in the page
// text.
//
// Plain substring search, no word boundaries, so "ann" also matches inside
// "Joanna". That collision is accepted in exchange for never missing a name
// split by odd whitespace or punctuation in the rendered page.
//
// Rust concepts:
// - Iterator::all: short-circuits on the first missing part
// - &[String]: borrow the parts, the caller keeps ownership
// =============================================================================

pub fn contains_name(visible_text: &str, name_parts: &[String]) -> bool {
    let text = visible_text.to_lowercase();
    name_parts
        .iter()
        .all(|part| text.contains(&part.to_lowercase()))
}
