//! String similarity scorers.
//!
//! All scorers return a value between 0 and 100, where 100 means the
//! strings are equivalent under that scorer. Comparison is on Unicode
//! scalar values and is case-sensitive; callers normalise case when they
//! want case-insensitive behaviour.
//!
//! The basic measure is the normalised indel similarity from
//! `rapidfuzz`: twice the length of the longest common subsequence
//! divided by the combined length. The token scorers apply it to
//! reordered or filtered word lists, and [`wratio`] picks the most
//! suitable combination for the relative lengths of the inputs.

use std::collections::BTreeSet;

use rapidfuzz::fuzz;

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    fuzz::ratio(a.iter().copied(), b.iter().copied()) * 100.0
}

/// Normalised indel similarity of two strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against any same-length window
/// of the longer one.
///
/// Windows that hang off either end of the longer string are included,
/// so a short string matching a prefix or suffix still scores well.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let n = short.len();
    let mut best = 0.0f64;

    for window in long.windows(n) {
        best = best.max(ratio_chars(short, window));
        if best >= 100.0 {
            return 100.0;
        }
    }

    for k in 1..n {
        best = best.max(ratio_chars(short, &long[..k]));
        best = best.max(ratio_chars(short, &long[long.len() - k..]));
    }

    best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

fn token_set(s: &str) -> BTreeSet<&str> {
    s.split_whitespace().collect()
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

/// [`ratio`] after sorting the words of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "))
}

/// Similarity of the shared words against each side's full word set.
///
/// Word order and repetition are ignored. If one side's words are a
/// subset of the other's, the score is 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let ta = token_set(a);
    let tb = token_set(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let sect: Vec<&str> = ta.intersection(&tb).copied().collect();
    let only_a: Vec<&str> = ta.difference(&tb).copied().collect();
    let only_b: Vec<&str> = tb.difference(&ta).copied().collect();

    if !sect.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let sect = sect.join(" ");
    let with_a = join_nonempty(&sect, &only_a.join(" "));
    let with_b = join_nonempty(&sect, &only_b.join(" "));

    let mut best = ratio(&with_a, &with_b);
    if !sect.is_empty() {
        best = best.max(ratio(&sect, &with_a)).max(ratio(&sect, &with_b));
    }
    best
}

/// [`partial_ratio`] over sorted words; 100 if any word is shared.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let ta = token_set(a);
    let tb = token_set(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    if ta.intersection(&tb).next().is_some() {
        return 100.0;
    }

    let sorted = partial_ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "));
    let deduped = partial_ratio(
        &ta.into_iter().collect::<Vec<_>>().join(" "),
        &tb.into_iter().collect::<Vec<_>>().join(" "),
    );
    sorted.max(deduped)
}

/// Weighted combination of the other scorers.
///
/// Strings of similar length are compared whole, with the token
/// scorers slightly discounted. When one string is at least half as
/// long again as the other, partial scorers are used instead, scaled
/// down further as the length gap grows.
pub fn wratio(a: &str, b: &str) -> f64 {
    const UNBASE_SCALE: f64 = 0.95;

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let whole = ratio(a, b);

    if len_ratio < 1.5 {
        let token = token_sort_ratio(a, b).max(token_set_ratio(a, b));
        return whole.max(token * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    whole
        .max(partial_ratio(a, b) * partial_scale)
        .max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}
