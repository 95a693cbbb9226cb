//! Microphone access check.
//!
//! Desktop platforms surface a denied microphone permission as either a
//! missing default input device or one whose input configuration cannot be
//! queried; both count as "no access" here.

use cpal::traits::DeviceTrait;

use crate::device_enumerator::DeviceEnumerator;

/// Check whether the default microphone can be opened for capture.
pub fn check_microphone_access() -> bool {
    let device = match DeviceEnumerator::new().find_capture_device(None) {
        Ok(device) => device,
        Err(e) => {
            log::debug!("Microphone access check: {}", e);
            return false;
        }
    };

    match device.default_input_config() {
        Ok(_) => true,
        Err(e) => {
            log::warn!("Default microphone has no usable input config: {}", e);
            false
        }
    }
}
