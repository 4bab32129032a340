//! label-scanner library crate.
//!
//! Camera acquisition and still capture for nutrition-label scanning.
//! [`camera::CameraManager`] drives any platform implementing the traits in
//! [`platform`]; [`scan`] hands captured photos to text recognition.

pub mod camera;
pub mod cli;
pub mod config;
pub mod platform;
pub mod scan;
