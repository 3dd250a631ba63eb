use std::collections::HashSet;

/// Jaccard similarity of the lowercase word sets of two dish names.
pub fn name_similarity(a: &str, b: &str) -> f32 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let a_tokens: HashSet<_> = name_tokens(&a_lower).collect();
    let b_tokens: HashSet<_> = name_tokens(&b_lower).collect();
    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }
    let intersection = a_tokens.intersection(&b_tokens).count() as f32;
    let union = a_tokens.union(&b_tokens).count() as f32;
    intersection / union
}

fn name_tokens(name: &str) -> impl Iterator<Item = &str> {
    name.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
}
