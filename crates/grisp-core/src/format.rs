//! Text renderings shared by every indicator adapter.
//!
//! Adapters distinguish three outcomes that must never be confused in a
//! finished report: no matching records, a record whose value is missing,
//! and an infrastructure failure. Only the last carries [`FAILURE_PREFIX`].

/// Marks lines produced by network, parsing or credential failures.
pub const FAILURE_PREFIX: &str = "[DATA SOURCE ERROR]";

/// Placeholder used when an optional field is absent.
pub const NOT_AVAILABLE: &str = "not available";

/// Renders a transient failure for `source` while handling `query`.
#[must_use]
pub fn render_failure(source: &str, query: &str, reason: impl std::fmt::Display) -> String {
    format!("{FAILURE_PREFIX} {source} request for '{query}' failed: {reason}")
}

/// Renders the "query matched nothing" outcome.
///
/// `scope` completes the sentence, e.g. `"in the ND-GAIN dataset"`.
#[must_use]
pub fn render_not_found(entity: &str, scope: &str) -> String {
    format!("No data found for {entity} {scope}.")
}

/// Renders the "record exists but the value is null" outcome.
#[must_use]
pub fn render_not_available(field: &str, entity: &str, year: &str) -> String {
    format!("{field} for {entity} is {NOT_AVAILABLE} for {year}.")
}

/// Returns `value` trimmed, or `placeholder` when it is absent or blank.
#[must_use]
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

/// Formats a number with two decimals, scaled to Thousand/Million/Billion/
/// Trillion once its magnitude reaches the respective threshold.
#[must_use]
pub fn scale_magnitude(value: f64) -> String {
    const SCALES: [(f64, &str); 5] = [
        (1.0, ""),
        (1e3, "Thousand"),
        (1e6, "Million"),
        (1e9, "Billion"),
        (1e12, "Trillion"),
    ];

    let magnitude = value.abs();
    let mut idx = SCALES
        .iter()
        .rposition(|&(threshold, _)| magnitude >= threshold)
        .unwrap_or(0);
    // A value that rounds to 1000.00 at its own scale moves up one label.
    if idx + 1 < SCALES.len() && (magnitude / SCALES[idx].0 * 100.0).round() >= 100_000.0 {
        idx += 1;
    }

    let (threshold, label) = SCALES[idx];
    if label.is_empty() {
        format!("{value:.2}")
    } else {
        format!("{:.2} {label}", value / threshold)
    }
}
