//! Rolling-window resolution.

use chrono::{DateTime, Utc};

use crate::models::{TimeRange, WindowPreset};

/// Concrete `[now - lookback, now]` range for a preset.
pub fn resolve_window(preset: WindowPreset, now: DateTime<Utc>) -> TimeRange {
    TimeRange::new(now - preset.lookback(), now)
}

/// Resolve a preset given by name; unknown names use the one-week lookback.
pub fn resolve_named_window(preset: &str, now: DateTime<Utc>) -> TimeRange {
    resolve_window(WindowPreset::parse_or_default(preset), now)
}
