//! Relative timestamp formatting for posts and comments.

#[cfg(test)]
#[path = "time_ago_test.rs"]
mod time_ago_test;

/// Format a number of elapsed seconds as a coarse `Ns/Nm/Nh/Nd ago` label.
///
/// Negative inputs clamp to zero so clock skew never renders a future time.
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds < 60 {
        format!("{seconds}s ago")
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86_400)
    }
}

/// Format an ISO 8601 timestamp relative to the current wall clock.
///
/// Returns an empty string when the timestamp cannot be parsed or outside
/// the browser.
pub fn time_ago(timestamp: &str) -> String {
    #[cfg(feature = "hydrate")]
    {
        let then_ms = js_sys::Date::parse(timestamp);
        if !then_ms.is_finite() {
            return String::new();
        }
        #[allow(clippy::cast_possible_truncation)]
        let elapsed = ((js_sys::Date::now() - then_ms) / 1000.0) as i64;
        format_elapsed(elapsed)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = timestamp;
        String::new()
    }
}
