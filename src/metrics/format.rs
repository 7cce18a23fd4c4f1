use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const SECS_PER_MIN: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;

/// Formats a duration the way Go prints `time.Duration`:
/// `0s`, `850ns`, `12.5µs`, `20ms`, `1.234567ms`, `1.5s`, `2m3s`, `1h0m5s`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_owned();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{}ns", nanos);
    }
    if nanos < NANOS_PER_MILLI {
        return with_fraction(nanos, NANOS_PER_MICRO, 3, "µs");
    }
    if nanos < NANOS_PER_SEC {
        return with_fraction(nanos, NANOS_PER_MILLI, 6, "ms");
    }

    let total_secs = duration.as_secs();
    let sub_nanos = u128::from(duration.subsec_nanos());
    let hours = total_secs.checked_div(SECS_PER_HOUR).unwrap_or(0);
    let minutes = total_secs
        .checked_rem(SECS_PER_HOUR)
        .and_then(|rest| rest.checked_div(SECS_PER_MIN))
        .unwrap_or(0);
    let secs = total_secs.checked_rem(SECS_PER_MIN).unwrap_or(0);
    let seconds = with_fraction(
        u128::from(secs)
            .saturating_mul(NANOS_PER_SEC)
            .saturating_add(sub_nanos),
        NANOS_PER_SEC,
        9,
        "s",
    );

    if hours > 0 {
        format!("{}h{}m{}", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}", minutes, seconds)
    } else {
        seconds
    }
}

fn with_fraction(nanos: u128, unit: u128, digits: usize, suffix: &str) -> String {
    let whole = nanos.checked_div(unit).unwrap_or(0);
    let fraction = nanos.checked_rem(unit).unwrap_or(0);
    if fraction == 0 {
        return format!("{}{}", whole, suffix);
    }
    let padded = format!("{:0width$}", fraction, width = digits);
    format!("{}.{}{}", whole, padded.trim_end_matches('0'), suffix)
}
