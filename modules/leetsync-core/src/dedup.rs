use std::collections::{BTreeSet, HashMap};

use crate::types::Submission;

/// Trim each slug, drop empty ones, and return the unique survivors.
pub fn unique_slugs<I, S>(slugs: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    slugs
        .into_iter()
        .filter_map(|s| {
            let trimmed = s.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

/// Collapse submissions to one per slug, keeping the latest, ordered newest first.
///
/// Ties on timestamp are broken by slug so the output doesn't depend on input order.
pub fn latest_per_slug<I>(submissions: I) -> Vec<Submission>
where
    I: IntoIterator<Item = Submission>,
{
    let mut by_slug: HashMap<String, Submission> = HashMap::new();

    for mut sub in submissions {
        let slug = sub.title_slug.trim();
        if slug.is_empty() {
            continue;
        }
        if slug.len() != sub.title_slug.len() {
            sub.title_slug = slug.to_string();
        }

        let replace = by_slug
            .get(&sub.title_slug)
            .map_or(true, |existing| is_newer(&sub, existing));
        if replace {
            by_slug.insert(sub.title_slug.clone(), sub);
        }
    }

    let mut out: Vec<Submission> = by_slug.into_values().collect();
    out.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.title_slug.cmp(&b.title_slug))
    });
    out
}

// Equal timestamps fall back to title so the winner is order-independent.
fn is_newer(candidate: &Submission, existing: &Submission) -> bool {
    candidate.timestamp > existing.timestamp
        || (candidate.timestamp == existing.timestamp && candidate.title > existing.title)
}
