//! Camera device filtering and default-camera selection.

use crate::platform::DeviceDescriptor;

use super::types::{CameraDevice, DeviceKind};

/// Label fragments that suggest a rear-facing camera.
pub const REAR_LABEL_HINTS: [&str; 3] = ["back", "rear", "environment"];

/// Keep only video inputs and project them to [`CameraDevice`].
pub fn video_inputs(devices: Vec<DeviceDescriptor>) -> Vec<CameraDevice> {
    devices
        .into_iter()
        .filter(|d| d.kind == DeviceKind::VideoInput)
        .map(|d| CameraDevice {
            device_id: d.device_id,
            kind: d.kind,
            label: d.label,
            group_id: d.group_id,
        })
        .collect()
}

/// True if the label (case-insensitively) looks like a rear camera.
pub fn is_rear_facing(label: &str) -> bool {
    let label = label.to_lowercase();
    REAR_LABEL_HINTS.iter().any(|hint| label.contains(hint))
}

/// Pick the default camera: the first rear-looking device, else the first
/// device, else nothing.
pub fn pick_default(cameras: &[CameraDevice]) -> Option<&CameraDevice> {
    cameras
        .iter()
        .find(|c| is_rear_facing(&c.label))
        .or_else(|| cameras.first())
}
