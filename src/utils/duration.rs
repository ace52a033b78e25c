//! Duration flag values
//!
//! Accepts the compact `<number><unit>` notation common to command-line
//! tools: `1s`, `250ms`, `1.5h`, `1m30s`. Supported units are `ns`, `us`
//! (or `µs`), `ms`, `s`, `m` and `h`. A bare `0` is also accepted.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

static COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d*)?|\.\d+)(ns|us|µs|ms|s|m|h)").expect("duration pattern is valid")
});

fn unit_nanos(unit: &str) -> u64 {
    match unit {
        "ns" => 1,
        "us" | "µs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        _ => 3600 * 1_000_000_000,
    }
}

/// Nanoseconds for one `<number><unit>` component, `None` on overflow
fn component_nanos(number: &str, unit: u64) -> Option<u64> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(unit)?;

    if !fraction.is_empty() {
        // Below one unit, so f64 precision is enough.
        let fraction: f64 = format!("0.{fraction}").parse().ok()?;
        nanos = nanos.checked_add((fraction * unit as f64).round() as u64)?;
    }
    Some(nanos)
}

/// Parse a duration such as `1s` or `1m30s`
///
/// Usable directly as a clap `value_parser`.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input == "0" {
        return Ok(Duration::ZERO);
    }
    if input.is_empty() {
        return Err("duration cannot be empty".to_string());
    }

    let mut consumed = 0;
    let mut total_nanos = Some(0_u64);
    for caps in COMPONENT.captures_iter(input) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
        if whole.start != consumed {
            break;
        }
        consumed = whole.end;

        total_nanos = total_nanos
            .and_then(|total| total.checked_add(component_nanos(&caps[1], unit_nanos(&caps[2]))?));
    }

    if consumed != input.len() {
        return Err(format!(
            "invalid duration '{input}' (expected e.g. 500ms, 2s, 1m30s)"
        ));
    }
    let total_nanos = total_nanos.ok_or_else(|| format!("duration '{input}' is too large"))?;

    Ok(Duration::from_nanos(total_nanos))
}
