//! # mixer-control-windows
//!
//! Windows winmm backend for the mixer-control kit.
//!
//! Provides:
//! - `WinmmMixer`: `MixerApi` over the legacy multimedia mixer API
//! - `device_names`: wave-out/wave-in device-name enumeration
//! - `open`/`open_capture`/`map_to_output_device`/`map_to_capture_device`:
//!   handle acquisition plus control resolution in one step
//!
//! ## Usage
//! ```ignore
//! use mixer_control_core::Param;
//!
//! let mut mixer = mixer_control_windows::map_to_output_device("Generic Software")?;
//! mixer.set_float(Param::MasterVolume, 0.8);
//! ```
//!
//! Calls on one handle must stay on one thread at a time; the winmm handle
//! is not reentrant.

#[cfg(target_os = "windows")]
pub mod device_names;
#[cfg(target_os = "windows")]
pub mod open;
#[cfg(target_os = "windows")]
pub mod winmm_mixer;

#[cfg(target_os = "windows")]
pub use device_names::{capture_device_names, playback_device_names};
#[cfg(target_os = "windows")]
pub use open::{map_to_capture_device, map_to_output_device, open, open_capture};
#[cfg(target_os = "windows")]
pub use winmm_mixer::WinmmMixer;
