use crate::bus::{PortHandle, Transport};
use crate::codec::DEVICE_TYPE_VISION;
use tracing::{debug, info};

/// Scan every port, first to last, and return the first one reporting a vision sensor.
///
/// Nothing is cached; devices can be plugged in or removed between calls.
/// A port whose device-info query fails is treated as empty.
pub fn find_first_sensor<T: Transport>(transport: &mut T) -> Option<PortHandle> {
    for port in PortHandle::all() {
        match transport.query_device_type(port) {
            Ok(DEVICE_TYPE_VISION) => {
                info!("[registry] found vision sensor on {}", port);
                return Some(port);
            }
            Ok(device_type) => debug!("[registry] {} device type {:#04x}", port, device_type),
            Err(e) => debug!("[registry] {} not available: {}", port, e),
        }
    }
    debug!("[registry] no vision sensor found");
    None
}
