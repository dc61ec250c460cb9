//! Placeholder detection and substitution.
//!
//! Placeholders are `{{name}}` tokens with no inner whitespace. Only names
//! present in the [`VarTable`] are replaced; anything else is left verbatim.

use crate::config::VarTable;

/// Check whether any known `{{key}}` token occurs in `text`.
///
/// Cheap pre-filter for [`render`]; never modifies anything.
pub fn has_placeholder(text: &str, vars: &VarTable) -> bool {
    !vars.is_empty() && text.contains("{{") && vars.tokens().any(|token| text.contains(&token))
}

/// Replace every known `{{key}}` token in `text` with its value.
///
/// Single pass: substituted values are not scanned again, so a value that
/// itself contains a placeholder is emitted literally.
pub fn render(text: &str, vars: &VarTable) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        let (before, tail) = rest.split_at(start);
        out.push_str(before);

        let inner = &tail[2..];
        if let Some(end) = inner.find("}}")
            && let Some(value) = vars.get(&inner[..end])
        {
            out.push_str(value);
            rest = &inner[end + 2..];
        } else {
            // Unknown or unterminated: keep one brace, rescan from the next
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}
