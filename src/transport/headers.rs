use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Headers that describe the captured request rather than the session; the
/// body is rewritten and the client negotiates its own encoding.
static CLIENT_OWNED: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["content-length", "host", "accept-encoding"].into_iter().collect());

#[derive(Debug, Clone, Default)]
pub struct HeaderRules {
    pub exclude: Vec<String>,
    pub append: HashMap<String, String>,
}

/// Drop client-owned and excluded headers, then add any appended header the
/// capture did not already carry. Matching is case-insensitive.
pub fn apply_header_rules(
    headers: &[(String, String)],
    rules: &HeaderRules,
) -> Vec<(String, String)> {
    let exclude_set: HashSet<String> = rules
        .exclude
        .iter()
        .map(|s| s.to_ascii_lowercase())
        .collect();

    let mut present: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(headers.len());

    for (name, value) in headers {
        let lower = name.to_ascii_lowercase();
        if CLIENT_OWNED.contains(lower.as_str()) || exclude_set.contains(&lower) {
            continue;
        }
        present.insert(lower);
        result.push((name.clone(), value.clone()));
    }

    let mut entries: Vec<_> = rules.append.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in entries {
        if present.insert(name.to_ascii_lowercase()) {
            result.push((name.clone(), value.clone()));
        }
    }

    result
}
