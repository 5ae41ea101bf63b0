use tracing::debug;

use super::policy::{COOLING, HEATING};
use super::types::{DeviceStatus, TemperatureRange};

/// Switches heating or cooling to bring `temperature` back into `range`.
///
/// Always writes both climate devices. Returns `true` when one of them was
/// switched on; temperatures equal to either bound need no regulation.
pub fn regulate(status: &mut DeviceStatus, temperature: f64, range: TemperatureRange) -> bool {
    let (heating, cooling) = if temperature < range.low {
        (true, false)
    } else if temperature > range.high {
        (false, true)
    } else {
        (false, false)
    };

    status.set(HEATING, heating);
    status.set(COOLING, cooling);
    debug!(temperature, heating, cooling, "thermostat regulated");
    heating || cooling
}
