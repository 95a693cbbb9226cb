//! Input device enumeration via the cpal default host.
//!
//! cpal exposes no stable device identifiers, so the device name doubles
//! as its id.

use cpal::traits::{DeviceTrait, HostTrait};

use mic_capture_core::models::audio_models::InputDevice;
use mic_capture_core::models::error::CaptureError;

/// Audio device enumerator over the platform's default cpal host.
pub struct DeviceEnumerator {
    host: cpal::Host,
}

impl DeviceEnumerator {
    pub fn new() -> Self {
        Self {
            host: cpal::default_host(),
        }
    }

    /// List input (microphone) devices.
    pub fn list_capture_devices(&self) -> Result<Vec<InputDevice>, CaptureError> {
        let default_name = self.default_capture_device_name();
        let devices = self
            .host
            .input_devices()
            .map_err(|e| CaptureError::DeviceUnavailable(format!("failed to list input devices: {}", e)))?;

        Ok(devices
            .filter_map(|device| device.name().ok())
            .map(|name| InputDevice {
                id: name.clone(),
                is_default: default_name.as_deref() == Some(name.as_str()),
                name,
            })
            .collect())
    }

    /// Name of the default input device, if there is one.
    pub fn default_capture_device_name(&self) -> Option<String> {
        self.host
            .default_input_device()
            .and_then(|device| device.name().ok())
    }

    /// Resolve an input device by name, or the default when `name` is None.
    pub fn find_capture_device(&self, name: Option<&str>) -> Result<cpal::Device, CaptureError> {
        let Some(name) = name else {
            return self
                .host
                .default_input_device()
                .ok_or_else(|| CaptureError::DeviceUnavailable("no default input device".into()));
        };

        let mut devices = self
            .host
            .input_devices()
            .map_err(|e| CaptureError::DeviceUnavailable(format!("failed to list input devices: {}", e)))?;

        devices
            .find(|device| device.name().map(|n| n == name).unwrap_or(false))
            .ok_or_else(|| CaptureError::DeviceUnavailable(format!("input device '{}' not found", name)))
    }
}

impl Default for DeviceEnumerator {
    fn default() -> Self {
        Self::new()
    }
}
