//! Command suggestion via Levenshtein distance

use strsim::levenshtein;

/// A candidate must be strictly closer than this to be suggested
pub const SUGGESTION_THRESHOLD: usize = 3;

/// Suggest the registered name closest to `unknown`.
///
/// Names are visited in registration order and a candidate only replaces the
/// current best when it is strictly closer, so ties keep the earlier name.
/// With no best yet the comparison distance is that of the empty string,
/// i.e. the length of `unknown`.
pub fn suggest_command<'a, I>(unknown: &str, names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut suggestion: Option<&'a str> = None;

    for name in names {
        let distance = levenshtein(name, unknown);
        let best = levenshtein(suggestion.unwrap_or(""), unknown);
        if distance < SUGGESTION_THRESHOLD && distance < best {
            suggestion = Some(name);
        }
    }

    suggestion
}
