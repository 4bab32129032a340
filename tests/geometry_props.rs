//! Property tests for aspect-ratio geometry and default-camera selection.

use label_scanner::camera::{
    calculate_aspect_ratio, is_rear_facing, maintain_aspect_ratio, pick_default, CameraDevice,
    DeviceKind, DEFAULT_ASPECT_RATIO,
};
use proptest::prelude::*;

fn label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Front Camera".to_string()),
        Just("Back Camera".to_string()),
        Just("Rear Camera".to_string()),
        Just("Environment Camera".to_string()),
        Just("User Camera".to_string()),
        "[a-zA-Z ]{0,16}",
    ]
}

fn cameras() -> impl Strategy<Value = Vec<CameraDevice>> {
    prop::collection::vec(("[a-z0-9]{1,8}", label()), 0..6).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(id, label)| CameraDevice {
                device_id: id,
                kind: DeviceKind::VideoInput,
                label,
                group_id: String::new(),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn zero_height_gives_default_ratio(width in 1.0f64..10_000.0) {
        prop_assert_eq!(calculate_aspect_ratio(width, 0.0), DEFAULT_ASPECT_RATIO);
    }

    #[test]
    fn ratio_is_width_over_height(width in 1.0f64..10_000.0, height in 1.0f64..10_000.0) {
        prop_assert!((calculate_aspect_ratio(width, height) - width / height).abs() < 1e-10);
    }

    #[test]
    fn fit_preserves_ratio_and_stays_inside(
        container_width in 1.0f64..4_000.0,
        container_height in 1.0f64..4_000.0,
        video_ratio in 0.1f64..10.0,
    ) {
        let fit = maintain_aspect_ratio(container_width, container_height, video_ratio);

        prop_assert!(fit.width > 0.0);
        prop_assert!(fit.height > 0.0);
        prop_assert!(fit.width <= container_width + 1e-9);
        prop_assert!(fit.height <= container_height + 1e-9);
        prop_assert!((fit.width / fit.height - video_ratio).abs() < 0.01);
    }

    #[test]
    fn fit_fills_one_axis(
        container_width in 1.0f64..4_000.0,
        container_height in 1.0f64..4_000.0,
        video_ratio in 0.1f64..10.0,
    ) {
        let fit = maintain_aspect_ratio(container_width, container_height, video_ratio);
        prop_assert!(fit.width == container_width || fit.height == container_height);
    }

    #[test]
    fn default_camera_prefers_rear_then_first(cameras in cameras()) {
        let chosen = pick_default(&cameras).map(|c| c.device_id.clone());
        let rear = cameras.iter().find(|c| {
            let label = c.label.to_lowercase();
            label.contains("back") || label.contains("rear") || label.contains("environment")
        });

        match (rear, cameras.first()) {
            (Some(rear), _) => prop_assert_eq!(chosen, Some(rear.device_id.clone())),
            (None, Some(first)) => prop_assert_eq!(chosen, Some(first.device_id.clone())),
            (None, None) => prop_assert!(chosen.is_none()),
        }
    }

    #[test]
    fn rear_detection_ignores_case(prefix in "[a-z ]{0,8}", hint in prop_oneof![Just("back"), Just("rear"), Just("environment")]) {
        let label = format!("{}{}", prefix, hint.to_uppercase());
        prop_assert!(is_rear_facing(&label));
    }
}
