//! Load shedding under the daily energy cap.

use std::collections::BTreeMap;

use tracing::debug;

use super::policy::{COOLING, ESSENTIAL_PRIORITY, EnginePolicy, HEATING};
use super::types::DeviceStatus;

/// Result of a shedding pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ShedOutcome {
    /// Energy used after crediting every shed device.
    pub energy_used: f64,
    /// Devices turned off, in shed order.
    pub shed: Vec<String>,
}

/// Effective priority of a tracked device.
///
/// Climate devices missing from the table fall back to the policy's
/// climate priority; any other untracked device is treated as essential.
fn effective_priority(
    device: &str,
    priorities: &BTreeMap<String, i32>,
    policy: &EnginePolicy,
) -> i32 {
    match priorities.get(device) {
        Some(&p) => p,
        None if device == HEATING || device == COOLING => policy.climate_device_priority,
        None => ESSENTIAL_PRIORITY,
    }
}

/// Active non-essential devices, least important first.
///
/// Sorted by descending priority; ties keep name order.
pub fn shed_candidates(
    status: &DeviceStatus,
    priorities: &BTreeMap<String, i32>,
    policy: &EnginePolicy,
) -> Vec<(String, i32)> {
    let mut candidates: Vec<(String, i32)> = status
        .active_devices()
        .map(|d| (d.to_string(), effective_priority(d, priorities, policy)))
        .filter(|(_, p)| *p > ESSENTIAL_PRIORITY)
        .collect();
    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates
}

/// Turns off devices until usage no longer exceeds `limit` or nothing is left to shed.
///
/// Each shed device credits `policy.shed_cost_per_device`. The loop stops as
/// soon as usage drops to or below the limit, so usage never undershoots the
/// limit by a full device cost.
pub fn shed_load(
    status: &mut DeviceStatus,
    priorities: &BTreeMap<String, i32>,
    used_today: f64,
    limit: f64,
    policy: &EnginePolicy,
) -> ShedOutcome {
    let mut used = used_today;
    let mut shed = Vec::new();

    if used <= limit {
        return ShedOutcome {
            energy_used: used,
            shed,
        };
    }

    let candidates = shed_candidates(status, priorities, policy);
    for (device, priority) in candidates {
        if used <= limit {
            break;
        }
        status.set(&device, false);
        used -= policy.shed_cost_per_device;
        debug!(device = %device, priority, used, limit, "shed device");
        shed.push(device);
        if used < limit {
            break;
        }
    }

    if used > limit {
        debug!(used, limit, "no sheddable devices left, still over cap");
    }

    ShedOutcome {
        energy_used: used,
        shed,
    }
}
