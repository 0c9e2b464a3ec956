use crate::models::topology::{ComponentType, ControlId, ControlKind, LineId, LineInfo};

/// Interface to the platform mixer's query/set primitives.
///
/// This is the black-box seam between the resolver/binding logic and the
/// OS: every method is one synchronous platform call over the live mixer
/// handle the implementor owns. Implemented by:
/// - `WinmmMixer` (Windows, winmm mixer API)
/// - `FakeMixer` (in-memory topology, tests)
///
/// Failure convention: queries return `None`, writes return `false`. A
/// lookup miss means "this hardware doesn't have that", not a fault, so
/// nothing here returns `Result`; callers decide whether absence matters.
/// Calls are blocking and expected to complete quickly (local IPC to the
/// OS audio service); there are no retries or timeouts.
pub trait MixerApi {
    /// Find the line with the given component type.
    fn line_by_component(&self, component: ComponentType) -> Option<LineInfo>;

    /// Find the `index`-th source line feeding destination `destination`.
    fn connection_line(&self, destination: u32, index: u32) -> Option<LineInfo>;

    /// Find a control of the given kind on a line.
    fn control_on_line(&self, line: LineId, kind: ControlKind) -> Option<ControlId>;

    /// Read the raw unsigned value of a scalar control (volume range 0..=65535).
    fn unsigned_value(&self, control: ControlId) -> Option<u32>;

    /// Write a raw unsigned value. Returns whether the platform accepted it.
    fn set_unsigned_value(&self, control: ControlId, value: u32) -> bool;

    /// Read a boolean control (mute/on-off).
    fn boolean_value(&self, control: ControlId) -> Option<bool>;

    /// Write a boolean control. Returns whether the platform accepted it.
    fn set_boolean_value(&self, control: ControlId, value: bool) -> bool;

    /// Line identity of each item of a multi-item (mux) control.
    ///
    /// `count` is the caller's resolved source count; the platform is asked
    /// for exactly that many items.
    fn mux_item_lines(&self, control: ControlId, count: u32) -> Option<Vec<LineId>>;

    /// Live selection flags of a mux control, one per item, same order as
    /// [`MixerApi::mux_item_lines`].
    fn mux_selection(&self, control: ControlId, count: u32) -> Option<Vec<bool>>;

    /// Write the full selection vector of a mux control in one call.
    fn set_mux_selection(&self, control: ControlId, selected: &[bool]) -> bool;
}
