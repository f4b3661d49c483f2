/// URL slug from a listing title plus a uniqueness suffix: lowercase,
/// non-alphanumerics stripped, whitespace collapsed to single dashes.
pub(crate) fn generate_slug(title: &str, suffix: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_alphanumeric() || ch.is_whitespace() || *ch == '-' || *ch == '_')
        .collect();

    let stem = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if stem.is_empty() {
        format!("listing-{suffix}")
    } else {
        format!("{stem}-{suffix}")
    }
}
