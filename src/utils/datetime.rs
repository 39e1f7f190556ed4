use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the unix epoch, or 0 if the clock is before it.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Format a unix timestamp as a short relative age ("3h ago", "2d ago")
/// against an explicit reference instant.
///
/// The reference is captured once per thread build, so every node in one
/// document is formatted against the same clock and rendering stays
/// deterministic. Missing timestamps come out as "unknown".
pub fn format_relative(timestamp: Option<i64>, now: i64) -> String {
    let Some(ts) = timestamp else {
        return "unknown".to_string();
    };

    // Future or same-second timestamps collapse to "just now".
    if ts >= now {
        return "just now".to_string();
    }

    let delta = now - ts;
    if delta >= 86_400 {
        return format!("{}d ago", delta / 86_400);
    }
    if delta >= 3_600 {
        return format!("{}h ago", delta / 3_600);
    }
    if delta >= 60 {
        return format!("{}m ago", delta / 60);
    }
    "just now".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn missing_timestamp_is_unknown() {
        assert_eq!(format_relative(None, NOW), "unknown");
    }

    #[test]
    fn current_and_future_are_just_now() {
        assert_eq!(format_relative(Some(NOW), NOW), "just now");
        assert_eq!(format_relative(Some(NOW + 100), NOW), "just now");
        assert_eq!(format_relative(Some(NOW - 30), NOW), "just now");
    }

    #[test]
    fn minutes_hours_days() {
        assert_eq!(format_relative(Some(NOW - 5 * 60), NOW), "5m ago");
        assert_eq!(format_relative(Some(NOW - 2 * 3_600), NOW), "2h ago");
        assert_eq!(format_relative(Some(NOW - 3 * 86_400), NOW), "3d ago");
    }

    #[test]
    fn same_input_same_output() {
        let a = format_relative(Some(NOW - 7_200), NOW);
        let b = format_relative(Some(NOW - 7_200), NOW);
        assert_eq!(a, b);
    }
}
