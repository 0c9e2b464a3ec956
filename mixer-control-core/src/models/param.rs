use serde::{Deserialize, Serialize};

/// Recognized mixer parameters.
///
/// The vocabulary is deliberately small and fixed: volumes, mute flags,
/// source selection, and the specifier/count queries. Which entry points
/// accept which parameter is decided by the dispatch tables in
/// [`crate::binding::facade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    /// Master (speaker/headphone destination) volume, `f32` in [0.0, 1.0].
    /// As a boolean, the master mute flag.
    MasterVolume,
    /// Whether a PCM passthrough (wave-out) volume control exists.
    PcmOutput,
    /// PCM passthrough volume; as a boolean, its mute flag.
    PcmOutputVolume,
    /// Volume of the active input source.
    InputVolume,
    /// Playback device name (per handle) or playback device list.
    DeviceSpecifier,
    /// Capture device name (per handle) or capture device list.
    CaptureDeviceSpecifier,
    /// Input-source selection: integer index, per-index disabled flag.
    InputSource,
    /// Input-source names and count.
    InputSourceSpecifier,
    /// Per-index output volume and disabled flag.
    OutputVolume,
    /// Output names and count.
    OutputVolumeSpecifier,
}

/// Whether a handle was opened against a playback or a capture device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Playback,
    Capture,
}
