use serde::{Deserialize, Serialize};

/// Identifier of a line (node) in the platform mixer's routing graph.
///
/// Stable for the lifetime of the mixer handle that produced it, and no
/// longer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(pub u32);

/// Identifier of a control attached to a line.
///
/// Same lifetime rule as [`LineId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(pub u32);

/// Component type of a mixer line.
///
/// `Dst*` variants are destination lines (where audio ends up), `Src*`
/// variants are source lines feeding a destination. The platform assigns no
/// fixed IDs to semantic roles, so the resolver matches lines by component
/// type in priority order. Mapping to platform codes lives in the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    DstUndefined,
    DstDigital,
    DstLine,
    DstMonitor,
    DstSpeakers,
    DstHeadphones,
    DstTelephone,
    DstWaveIn,
    DstVoiceIn,
    SrcUndefined,
    SrcDigital,
    SrcLine,
    SrcMicrophone,
    SrcSynthesizer,
    SrcCompactDisc,
    SrcTelephone,
    SrcPcSpeaker,
    SrcWaveOut,
    SrcAuxiliary,
    SrcAnalog,
}

/// Kind of control attached to a line.
///
/// The full platform vocabulary is carried even though the resolver only
/// queries a handful (`Volume`, `Mute`, `Mux`, `Mixer`): callers binding
/// custom candidate lists need the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Custom,
    BooleanMeter,
    SignedMeter,
    PeakMeter,
    UnsignedMeter,
    Boolean,
    OnOff,
    Mute,
    Mono,
    Loudness,
    StereoEnh,
    BassBoost,
    Button,
    Decibels,
    Signed,
    Unsigned,
    Percent,
    Slider,
    Pan,
    QsoundPan,
    Fader,
    Volume,
    Bass,
    Treble,
    Equalizer,
    SingleSelect,
    Mux,
    MultipleSelect,
    Mixer,
    Microtime,
    Millitime,
}

/// Result of a line query against the mixer graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    pub id: LineId,
    /// Index of the destination this line belongs to.
    pub destination: u32,
    /// Number of source lines feeding this line (destinations only).
    pub connections: u32,
    /// Human-readable line name as reported by the driver.
    pub name: String,
}

/// A resolved `(line, control)` pair with its human-readable label.
///
/// `control` is `None` when the line exists but carries no control of the
/// requested kind; accessors treat that entry as feature-absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRef {
    pub name: String,
    pub line: LineId,
    pub control: Option<ControlId>,
}

/// Ordered table of resolved controls, one per enumerable line.
///
/// The position in the table is the externally visible index parameter.
/// Built once at open time and never resized.
pub type ControlTable = Vec<ControlRef>;
