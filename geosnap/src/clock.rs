//! Wall clock and local timezone.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Display format for local times (e.g. `2026-10-18 14:03:59`).
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timezone id used when the system zone cannot be determined.
pub const FALLBACK_TIME_ZONE: &str = "UTC";

/// Source of wall-clock time and timezone information.
pub trait Clock: Send + Sync {
    /// Current time as Unix epoch milliseconds.
    fn now_millis(&self) -> i64;

    /// IANA id of the local timezone (e.g. `Asia/Shanghai`).
    fn time_zone_id(&self) -> String;

    /// Format epoch milliseconds as local time.
    fn format_local(&self, millis: i64) -> String;

    /// Current local time, formatted.
    fn format_now(&self) -> String {
        self.format_local(self.now_millis())
    }
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn time_zone_id(&self) -> String {
        iana_time_zone::get_timezone().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Could not determine system timezone");
            FALLBACK_TIME_ZONE.to_string()
        })
    }

    fn format_local(&self, millis: i64) -> String {
        match Local.timestamp_millis_opt(millis).single() {
            Some(time) => time.format(LOCAL_TIME_FORMAT).to_string(),
            None => String::new(),
        }
    }
}

/// Clock frozen at one instant, formatting in UTC.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now_millis: i64,
    time_zone_id: String,
}

impl FixedClock {
    /// Create a clock that always reports `now_millis` in zone `time_zone_id`.
    pub fn new(now_millis: i64, time_zone_id: impl Into<String>) -> Self {
        Self {
            now_millis,
            time_zone_id: time_zone_id.into(),
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now_millis
    }

    fn time_zone_id(&self) -> String {
        self.time_zone_id.clone()
    }

    fn format_local(&self, millis: i64) -> String {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|t| t.format(LOCAL_TIME_FORMAT).to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(1_700_000_000_000, "Asia/Shanghai");
        assert_eq!(clock.now_millis(), 1_700_000_000_000);
        assert_eq!(clock.time_zone_id(), "Asia/Shanghai");
        assert_eq!(clock.format_now(), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_system_clock_basics() {
        let clock = SystemClock;
        assert!(clock.now_millis() > 1_600_000_000_000);
        assert!(!clock.time_zone_id().is_empty());
        assert_eq!(clock.format_now().len(), "2026-01-01 00:00:00".len());
    }
}
