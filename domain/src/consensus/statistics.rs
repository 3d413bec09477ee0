//! Statistical reductions used by the consensus tiers.
//!
//! Pure functions over slices; callers guarantee non-empty input where noted.

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round to two decimal places (currency precision)
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Median truncated to an integer.
///
/// For an even count the two middle values are averaged and floored, so
/// `[4, 6]` gives 5 and `[4, 5]` gives 4. Returns 0 for an empty slice.
pub fn median_truncated(values: &[u32]) -> u32 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        ((u64::from(sorted[mid - 1]) + u64::from(sorted[mid])) / 2) as u32
    }
}

/// Most frequent label, ties broken by first appearance.
///
/// Labels are compared exactly (records are already trimmed on entry), and an
/// empty label is a vote like any other. Returns an empty string for no labels.
pub fn mode_first_seen<'a, I>(labels: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    // (label, count), in first-seen order
    let mut tally: Vec<(&'a str, usize)> = Vec::new();

    for label in labels {
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some(entry) => entry.1 += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(label, count) in &tally {
        // strictly greater keeps the earliest label on ties
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }

    best.map(|(label, _)| label.to_string()).unwrap_or_default()
}

/// Distinct values in first-seen order
pub fn distinct_in_order<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
