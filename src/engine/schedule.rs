use chrono::NaiveDateTime;
use tracing::debug;

use super::types::{DeviceStatus, ScheduledDevice};

/// Forces on every scheduled device whose time matches `now` exactly.
///
/// Devices not otherwise tracked are added. Returns the number of overrides applied.
pub fn apply_overrides(
    status: &mut DeviceStatus,
    schedule: &[ScheduledDevice],
    now: NaiveDateTime,
) -> usize {
    let mut applied = 0;
    for entry in schedule.iter().filter(|e| e.scheduled_time == now) {
        status.set(&entry.device_name, true);
        debug!(device = %entry.device_name, "scheduled override");
        applied += 1;
    }
    applied
}
