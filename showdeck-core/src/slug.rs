/// Normalize a free-text show name into the slug format the external search
/// endpoint expects: lowercase, each whitespace run collapsed to a single
/// underscore, everything that is not alphanumeric, `_` or `-` stripped.
///
/// Whitespace-only input yields an empty slug; callers must treat that as
/// "not found" instead of issuing a search request.
pub fn normalize(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            pending_separator = true;
            continue;
        }
        if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
            continue;
        }
        if pending_separator {
            slug.push('_');
            pending_separator = false;
        }
        slug.push(c);
    }

    slug
}
