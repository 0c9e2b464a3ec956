//! Open and map entry points.
//!
//! `open`/`open_capture` take a name from our own enumeration and demand an
//! exact match. The `map_*` variants accept a playback-engine device string,
//! which rarely matches verbatim: they fall back to windowed substring
//! matching, and finally to the first enumerated device so generic engine
//! names ("Generic Software", "Generic Hardware") still bind to the default
//! hardware.

use mixer_control_core::binding::device::DeviceBinding;
use mixer_control_core::binding::facade::Mixer;
use mixer_control_core::binding::matching::match_or_first;
use mixer_control_core::models::error::MixerError;

use crate::device_names::{capture_device_names, playback_device_names};
use crate::winmm_mixer::WinmmMixer;

/// Open a playback mixer by exact device name and resolve its controls.
pub fn open(device_name: &str) -> Result<Mixer<WinmmMixer>, MixerError> {
    let names = playback_device_names();
    let index = names
        .iter()
        .position(|name| name == device_name)
        .ok_or(MixerError::InvalidDevice)?;

    let api = WinmmMixer::open_playback(index as u32)?;
    Ok(Mixer::new(DeviceBinding::resolve_playback(
        api,
        names[index].clone(),
    )))
}

/// Open a capture mixer by exact device name and resolve its controls.
pub fn open_capture(device_name: &str) -> Result<Mixer<WinmmMixer>, MixerError> {
    let names = capture_device_names();
    let index = names
        .iter()
        .position(|name| name == device_name)
        .ok_or(MixerError::InvalidDevice)?;

    let api = WinmmMixer::open_capture(index as u32)?;
    Ok(Mixer::new(DeviceBinding::resolve_capture(
        api,
        names[index].clone(),
    )))
}

/// Map a playback-engine output device name onto a mixer and open it.
pub fn map_to_output_device(engine_name: &str) -> Result<Mixer<WinmmMixer>, MixerError> {
    let names = playback_device_names();
    let chosen = match_or_first(engine_name, &names)
        .ok_or(MixerError::InvalidDevice)?
        .to_string();
    open(&chosen)
}

/// Map a playback-engine capture device name onto a mixer and open it.
pub fn map_to_capture_device(engine_name: &str) -> Result<Mixer<WinmmMixer>, MixerError> {
    let names = capture_device_names();
    let chosen = match_or_first(engine_name, &names)
        .ok_or(MixerError::InvalidDevice)?
        .to_string();
    open_capture(&chosen)
}
