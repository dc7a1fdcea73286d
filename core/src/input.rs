use anyhow::{anyhow, Result};

use crate::model::mood::Mood;

/// Expands `key` to the one candidate it names: an exact match, or the single
/// candidate it is a prefix of.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Parses a mood name or an unambiguous prefix of one.
pub fn parse_mood(input: &str) -> Result<Mood> {
    let names: Vec<&str> = Mood::ALL.iter().map(|m| m.as_str()).collect();
    let lowered = input.trim().to_lowercase();
    if lowered.is_empty() {
        return Err(anyhow!("Mood is required (one of {})", names.join(", ")));
    }
    let name = expand_key(&lowered, &names)
        .map_err(|e| anyhow!("{} (moods: {})", e, names.join(", ")))?;
    Ok(name.parse::<Mood>()?)
}
