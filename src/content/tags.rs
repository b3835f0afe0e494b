//! Tag list edits used by the blog editor.

/// Adds a tag unless it is blank or already present. Returns true when
/// the list changed.
pub fn add_tag(tags: &mut Vec<String>, candidate: &str) -> bool {
    let trimmed = candidate.trim();
    if trimmed.is_empty() || tags.iter().any(|t| t == trimmed) {
        return false;
    }
    tags.push(trimmed.to_owned());
    true
}

/// Removes the tag at `index`, returning it, or None when out of range.
pub fn remove_tag(tags: &mut Vec<String>, index: usize) -> Option<String> {
    if index < tags.len() {
        Some(tags.remove(index))
    } else {
        None
    }
}
