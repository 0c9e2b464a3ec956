//! Device binding: one resolved mixer handle plus its control-id table.
//!
//! A binding is built in one shot at open time (Closed → Open) and torn
//! down as a unit on drop (Open → Closed): the tables and the backend
//! handle live and die together, so no [`ControlId`] can outlive the handle
//! that produced it. Concurrent access to a single binding is not
//! supported; the platform handle is not guaranteed reentrant.

use crate::models::error::MixerError;
use crate::models::param::Direction;
use crate::models::topology::{ControlId, ControlKind, ControlTable};
use crate::resolve::resolver::{
    enumerate_controls, find_control, INPUT_DESTINATIONS, OUTPUT_DESTINATIONS, PCM_SOURCES,
    SELECTOR_CANDIDATES,
};
use crate::traits::mixer_api::MixerApi;

/// Raw range of a platform volume control. Volumes map linearly between
/// [0.0, 1.0] and 0..=65535, so the quantization step is 1/65535.
const VOLUME_STEPS: f32 = 65535.0;

/// A resolved mixer binding for exactly one logical device.
///
/// Every control is optional: hardware missing a PCM passthrough or a
/// master mute is normal, and each accessor answers its documented absent
/// value rather than failing. Unresolved controls stay unresolved for the
/// binding's lifetime; only the mux *selection state* is re-queried live.
pub struct DeviceBinding<A: MixerApi> {
    api: A,
    device_name: String,
    direction: Direction,

    master: Option<ControlId>,
    master_mute: Option<ControlId>,
    pcm: Option<ControlId>,
    pcm_mute: Option<ControlId>,

    outputs: ControlTable,
    output_mutes: ControlTable,
    inputs: ControlTable,
    input_mutes: ControlTable,

    /// Mux/mixer control when `input_mux`, otherwise the capture
    /// destination's own volume control standing in as the selector.
    selector: Option<ControlId>,
    /// Whether input selection is multiplexed (mutually exclusive
    /// single-select) as opposed to independently-gained sources.
    input_mux: bool,
}

impl<A: MixerApi> DeviceBinding<A> {
    /// Resolve the playback-side bindings over an opened mixer handle.
    pub fn resolve_playback(api: A, device_name: String) -> Self {
        let master = find_control(&api, OUTPUT_DESTINATIONS, ControlKind::Volume);
        let master_mute = master.and_then(|_| find_control(&api, OUTPUT_DESTINATIONS, ControlKind::Mute));

        let outputs = enumerate_controls(&api, OUTPUT_DESTINATIONS, ControlKind::Volume);
        let output_mutes = if outputs.is_empty() {
            Vec::new()
        } else {
            enumerate_controls(&api, OUTPUT_DESTINATIONS, ControlKind::Mute)
        };

        let pcm = find_control(&api, PCM_SOURCES, ControlKind::Volume);
        let pcm_mute = pcm.and_then(|_| find_control(&api, PCM_SOURCES, ControlKind::Mute));

        Self {
            api,
            device_name,
            direction: Direction::Playback,
            master,
            master_mute,
            pcm,
            pcm_mute,
            outputs,
            output_mutes,
            inputs: Vec::new(),
            input_mutes: Vec::new(),
            selector: None,
            input_mux: false,
        }
    }

    /// Resolve the capture-side bindings over an opened mixer handle.
    ///
    /// The selector is tried in priority order (mux, then mixer-combine);
    /// if neither exists the recording destination's volume control stands
    /// in and selection becomes meaningless (`input_mux == false`).
    pub fn resolve_capture(api: A, device_name: String) -> Self {
        let mut input_mux = false;
        let mut selector = None;
        for &(component, kind) in SELECTOR_CANDIDATES {
            selector = find_control(&api, &[component], kind);
            if selector.is_some() {
                input_mux = true;
                break;
            }
        }
        if selector.is_none() {
            selector = find_control(&api, INPUT_DESTINATIONS, ControlKind::Volume);
        }

        let inputs = enumerate_controls(&api, INPUT_DESTINATIONS, ControlKind::Volume);
        let input_mutes = if inputs.is_empty() {
            Vec::new()
        } else {
            enumerate_controls(&api, INPUT_DESTINATIONS, ControlKind::Mute)
        };

        Self {
            api,
            device_name,
            direction: Direction::Capture,
            master: None,
            master_mute: None,
            pcm: None,
            pcm_mute: None,
            outputs: Vec::new(),
            output_mutes: Vec::new(),
            inputs,
            input_mutes,
            selector,
            input_mux,
        }
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn input_mux(&self) -> bool {
        self.input_mux
    }

    // Master / PCM scalars

    pub fn master_volume(&self) -> Option<f32> {
        self.control_volume(self.master)
    }

    pub fn set_master_volume(&self, level: f32) -> Result<(), MixerError> {
        self.set_control_volume(self.master, level)
    }

    /// Master mute flag. Absent or unreadable reads as muted (fail-safe).
    pub fn master_muted(&self) -> bool {
        self.control_disabled(self.master_mute)
    }

    pub fn set_master_muted(&self, muted: bool) {
        self.set_control_disabled(self.master_mute, muted);
    }

    /// Whether a PCM passthrough volume was resolved on this hardware.
    pub fn has_pcm_volume(&self) -> bool {
        self.pcm.is_some()
    }

    pub fn pcm_volume(&self) -> Option<f32> {
        self.control_volume(self.pcm)
    }

    pub fn set_pcm_volume(&self, level: f32) -> Result<(), MixerError> {
        self.set_control_volume(self.pcm, level)
    }

    pub fn pcm_muted(&self) -> bool {
        self.control_disabled(self.pcm_mute)
    }

    pub fn set_pcm_muted(&self, muted: bool) {
        self.set_control_disabled(self.pcm_mute, muted);
    }

    // Output table

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn output_name(&self, index: usize) -> Option<&str> {
        self.outputs.get(index).map(|r| r.name.as_str())
    }

    pub fn output_volume(&self, index: usize) -> Option<f32> {
        self.control_volume(self.outputs.get(index)?.control)
    }

    pub fn set_output_volume(&self, index: usize, level: f32) -> Result<(), MixerError> {
        check_volume(level)?;
        match self.outputs.get(index) {
            Some(entry) => self.set_control_volume(entry.control, level),
            None => Ok(()),
        }
    }

    /// Disabled flag of an output. Out-of-range or absent reads as true.
    pub fn output_disabled(&self, index: usize) -> bool {
        if index >= self.outputs.len() {
            return true;
        }
        self.control_disabled(self.output_mutes.get(index).and_then(|r| r.control))
    }

    pub fn set_output_disabled(&self, index: usize, disabled: bool) {
        if let Some(entry) = self.output_mutes.get(index) {
            if index < self.outputs.len() {
                self.set_control_disabled(entry.control, disabled);
            }
        }
    }

    // Input table

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn input_name(&self, index: usize) -> Option<&str> {
        self.inputs.get(index).map(|r| r.name.as_str())
    }

    /// Volume of the active input: on a multiplexed binding, the currently
    /// selected source's own control (re-derived live); otherwise the
    /// destination volume standing in as selector.
    pub fn input_volume(&self) -> Option<f32> {
        if self.input_mux {
            let current = self.current_input()?;
            self.control_volume(self.inputs.get(current)?.control)
        } else {
            self.control_volume(self.selector)
        }
    }

    pub fn set_input_volume(&self, level: f32) -> Result<(), MixerError> {
        check_volume(level)?;
        if self.input_mux {
            if let Some(entry) = self.current_input().and_then(|i| self.inputs.get(i)) {
                self.set_control_volume(entry.control, level)?;
            }
            Ok(())
        } else {
            self.set_control_volume(self.selector, level)
        }
    }

    /// Disabled flag of an input source.
    ///
    /// Multiplexed: disabled means "not currently selected". Non-multiplexed:
    /// the raw mute flag *inverted*, as the hardware reports it.
    /// Out-of-range reads as true either way.
    pub fn input_disabled(&self, index: usize) -> bool {
        if index >= self.inputs.len() {
            return true;
        }
        if self.input_mux {
            self.current_input() != Some(index)
        } else {
            !self.control_disabled(self.input_mutes.get(index).and_then(|r| r.control))
        }
    }

    /// Index of the currently selected input source.
    ///
    /// Multiplexed bindings only; re-queries the mux's live selection on
    /// every call because the hardware can switch out-of-band. A mux always
    /// reports *some* selection, so when no item flags itself selected (or
    /// the queries fail) this answers index 0 rather than an error.
    pub fn current_input(&self) -> Option<usize> {
        if !self.input_mux || self.inputs.is_empty() {
            return None;
        }
        let selector = self.selector?;
        let count = self.inputs.len() as u32;

        let mut index = 0;
        if let (Some(items), Some(flags)) = (
            self.api.mux_item_lines(selector, count),
            self.api.mux_selection(selector, count),
        ) {
            index = flags.iter().position(|&f| f).unwrap_or(0);
            // Map the selected item's line identity back into our table;
            // item order and table order need not agree.
            if let Some(&line) = items.get(index) {
                if let Some(position) = self.inputs.iter().position(|r| r.line == line) {
                    index = position;
                }
            }
        }
        Some(index)
    }

    /// Select input `index` by writing an exclusive-selection vector (all
    /// false except the target) to the mux in one call. No-op when the
    /// binding is not multiplexed or the index is out of range.
    pub fn set_current_input(&self, index: usize) {
        if !self.input_mux || index >= self.inputs.len() {
            return;
        }
        let Some(selector) = self.selector else {
            return;
        };
        let count = self.inputs.len() as u32;
        let Some(items) = self.api.mux_item_lines(selector, count) else {
            return;
        };

        let target = self.inputs[index].line;
        let flags: Vec<bool> = items.iter().map(|&line| line == target).collect();
        self.api.set_mux_selection(selector, &flags);
    }

    // Shared control accessors

    fn control_volume(&self, control: Option<ControlId>) -> Option<f32> {
        let raw = self.api.unsigned_value(control?)?;
        Some(raw as f32 / VOLUME_STEPS)
    }

    fn set_control_volume(&self, control: Option<ControlId>, level: f32) -> Result<(), MixerError> {
        check_volume(level)?;
        if let Some(id) = control {
            // Write failures are tolerated like absent controls.
            self.api.set_unsigned_value(id, (level * VOLUME_STEPS) as u16 as u32);
        }
        Ok(())
    }

    fn control_disabled(&self, control: Option<ControlId>) -> bool {
        match control {
            Some(id) => self.api.boolean_value(id).unwrap_or(true),
            None => true,
        }
    }

    fn set_control_disabled(&self, control: Option<ControlId>, disabled: bool) {
        if let Some(id) = control {
            self.api.set_boolean_value(id, disabled);
        }
    }
}

fn check_volume(level: f32) -> Result<(), MixerError> {
    if (0.0..=1.0).contains(&level) {
        Ok(())
    } else {
        Err(MixerError::InvalidValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeMixer;
    use crate::models::topology::ComponentType;
    use approx::assert_relative_eq;

    fn quantized(level: f32) -> f32 {
        (level * 65535.0) as u16 as f32 / 65535.0
    }

    fn playback_fake() -> FakeMixer {
        let mut api = FakeMixer::new();
        api.add_destination(ComponentType::DstSpeakers, 10, 0, "Speakers");
        api.add_control(10, ControlKind::Volume, 100);
        api.add_control(10, ControlKind::Mute, 101);
        api.add_source(ComponentType::SrcWaveOut, 11, 0, "Wave Out");
        api.add_control(11, ControlKind::Volume, 110);
        api.add_control(11, ControlKind::Mute, 111);
        api.add_source(ComponentType::SrcSynthesizer, 12, 0, "SW Synth");
        api.add_control(12, ControlKind::Volume, 120);
        api.add_control(12, ControlKind::Mute, 121);
        api
    }

    fn playback() -> DeviceBinding<FakeMixer> {
        DeviceBinding::resolve_playback(playback_fake(), "Primary Sound Driver".into())
    }

    /// Three recording sources behind a mux, source 1 selected.
    fn capture_mux_fake() -> FakeMixer {
        let mut api = FakeMixer::new();
        api.add_destination(ComponentType::DstWaveIn, 50, 0, "Recording");
        api.add_control(50, ControlKind::Mux, 500);
        api.add_source(ComponentType::SrcMicrophone, 51, 0, "Microphone");
        api.add_control(51, ControlKind::Volume, 510);
        api.add_source(ComponentType::SrcLine, 52, 0, "Line In");
        api.add_control(52, ControlKind::Volume, 520);
        api.add_source(ComponentType::SrcCompactDisc, 53, 0, "CD Audio");
        api.add_control(53, ControlKind::Volume, 530);
        api.set_mux(500, vec![51, 52, 53], vec![false, true, false]);
        api
    }

    fn capture_mux() -> DeviceBinding<FakeMixer> {
        DeviceBinding::resolve_capture(capture_mux_fake(), "Microphone Array".into())
    }

    #[test]
    fn volume_round_trips_within_quantization() {
        let binding = playback();
        for level in [0.0, 0.25, 0.5, 0.73, 1.0] {
            binding.set_master_volume(level).unwrap();
            let first = binding.master_volume().unwrap();
            let second = binding.master_volume().unwrap();
            assert_relative_eq!(first, quantized(level), max_relative = 1e-6);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn volume_set_rejects_out_of_range_and_keeps_prior_value() {
        let binding = playback();
        binding.set_master_volume(0.5).unwrap();

        assert_eq!(binding.set_master_volume(-0.1), Err(MixerError::InvalidValue));
        assert_eq!(binding.set_master_volume(1.1), Err(MixerError::InvalidValue));
        assert_relative_eq!(binding.master_volume().unwrap(), quantized(0.5));
    }

    #[test]
    fn out_of_range_set_errors_even_when_control_absent() {
        let binding = DeviceBinding::resolve_playback(FakeMixer::new(), "Empty".into());
        assert_eq!(binding.set_master_volume(2.0), Err(MixerError::InvalidValue));
    }

    #[test]
    fn absent_controls_answer_sentinels_without_failing() {
        // No PCM passthrough line at all.
        let mut api = FakeMixer::new();
        api.add_destination(ComponentType::DstSpeakers, 10, 0, "Speakers");
        api.add_control(10, ControlKind::Volume, 100);
        let binding = DeviceBinding::resolve_playback(api, "Plain".into());

        assert!(!binding.has_pcm_volume());
        assert_eq!(binding.pcm_volume(), None);
        assert!(binding.pcm_muted());
        binding.set_pcm_volume(0.5).unwrap();
        binding.set_pcm_muted(false);
        // Master mute was not resolved either (volume without mute).
        assert!(binding.master_muted());
    }

    #[test]
    fn failed_platform_query_reads_like_absent() {
        let mut api = playback_fake();
        api.kill_control(100);
        api.kill_control(101);
        let binding = DeviceBinding::resolve_playback(api, "Flaky".into());

        assert_eq!(binding.master_volume(), None);
        assert!(binding.master_muted());
    }

    #[test]
    fn output_table_resolves_with_aligned_mutes() {
        let binding = playback();
        assert_eq!(binding.output_count(), 2);
        assert_eq!(binding.output_name(0), Some("Wave Out"));
        assert_eq!(binding.output_name(1), Some("SW Synth"));

        binding.set_output_volume(1, 0.8).unwrap();
        assert_relative_eq!(binding.output_volume(1).unwrap(), quantized(0.8));
        assert_eq!(binding.api.unsigned_of(120), Some((0.8f32 * 65535.0) as u16 as u32));

        binding.set_output_disabled(0, false);
        assert!(!binding.output_disabled(0));
        binding.set_output_disabled(0, true);
        assert!(binding.output_disabled(0));
        assert_eq!(binding.api.boolean_of(111), Some(true));
    }

    #[test]
    fn indexed_access_out_of_bounds_is_absent_not_adjacent() {
        let binding = playback();
        binding.set_output_volume(0, 0.4).unwrap();

        assert_eq!(binding.output_volume(2), None);
        assert_eq!(binding.output_name(2), None);
        assert!(binding.output_disabled(2));
        binding.set_output_volume(2, 0.9).unwrap();
        binding.set_output_disabled(2, false);
        // Neighbors untouched.
        assert_relative_eq!(binding.output_volume(0).unwrap(), quantized(0.4));
    }

    #[test]
    fn capture_resolves_mux_selector() {
        let binding = capture_mux();
        assert!(binding.input_mux());
        assert_eq!(binding.input_count(), 3);
        assert_eq!(binding.input_name(0), Some("Microphone"));
        assert_eq!(binding.current_input(), Some(1));
    }

    #[test]
    fn mux_selection_drives_disabled_flags() {
        let binding = capture_mux();
        assert!(binding.input_disabled(0));
        assert!(!binding.input_disabled(1));
        assert!(binding.input_disabled(2));
        assert!(binding.input_disabled(3));
    }

    #[test]
    fn set_current_input_writes_exclusive_selection() {
        let fake = capture_mux_fake();
        let binding = DeviceBinding::resolve_capture(fake, "Mic".into());
        binding.set_current_input(2);

        assert_eq!(binding.current_input(), Some(2));
        assert_eq!(binding.api.selection_of(500), Some(vec![false, false, true]));
        assert!(binding.input_disabled(0));
        assert!(binding.input_disabled(1));
        assert!(!binding.input_disabled(2));
    }

    #[test]
    fn set_current_input_out_of_range_is_a_no_op() {
        let binding = capture_mux();
        binding.set_current_input(3);
        assert_eq!(binding.current_input(), Some(1));
    }

    #[test]
    fn mux_with_no_selected_item_defaults_to_first() {
        let mut api = capture_mux_fake();
        api.set_mux(500, vec![51, 52, 53], vec![false, false, false]);
        let binding = DeviceBinding::resolve_capture(api, "Mic".into());

        assert_eq!(binding.current_input(), Some(0));
    }

    #[test]
    fn mux_item_order_maps_through_line_identity() {
        let mut api = capture_mux_fake();
        // Mux lists its items in reverse of the source table; item 0
        // (line 53) is selected.
        api.set_mux(500, vec![53, 52, 51], vec![true, false, false]);
        let binding = DeviceBinding::resolve_capture(api, "Mic".into());

        assert_eq!(binding.current_input(), Some(2));
    }

    #[test]
    fn input_volume_follows_live_selection() {
        let binding = capture_mux();
        binding.set_input_volume(0.6).unwrap();
        assert_relative_eq!(binding.input_volume().unwrap(), quantized(0.6));

        binding.set_current_input(0);
        binding.set_input_volume(0.3).unwrap();
        assert_relative_eq!(binding.input_volume().unwrap(), quantized(0.3));

        // Source 1 kept its own gain.
        binding.set_current_input(1);
        assert_relative_eq!(binding.input_volume().unwrap(), quantized(0.6));
    }

    #[test]
    fn capture_without_mux_falls_back_to_destination_volume() {
        let mut api = FakeMixer::new();
        api.add_destination(ComponentType::DstWaveIn, 50, 0, "Recording");
        api.add_control(50, ControlKind::Volume, 501);
        api.add_source(ComponentType::SrcMicrophone, 51, 0, "Microphone");
        api.add_control(51, ControlKind::Volume, 510);
        api.add_control(51, ControlKind::Mute, 511);
        let binding = DeviceBinding::resolve_capture(api, "Mic".into());

        assert!(!binding.input_mux());
        assert_eq!(binding.current_input(), None);
        binding.set_input_volume(0.9).unwrap();
        assert_relative_eq!(binding.input_volume().unwrap(), quantized(0.9));
        // Selection is meaningless without a mux.
        binding.set_current_input(0);
        assert_eq!(binding.current_input(), None);
    }

    #[test]
    fn non_mux_disabled_flag_is_inverted() {
        let mut api = FakeMixer::new();
        api.add_destination(ComponentType::DstWaveIn, 50, 0, "Recording");
        api.add_control(50, ControlKind::Volume, 501);
        api.add_source(ComponentType::SrcMicrophone, 51, 0, "Microphone");
        api.add_control(51, ControlKind::Volume, 510);
        api.add_control(51, ControlKind::Mute, 511);
        let binding = DeviceBinding::resolve_capture(api, "Mic".into());

        // Raw flag false → reported disabled; raw flag true → reported
        // enabled. Inverted on purpose, matching observed behavior.
        assert!(binding.input_disabled(0));
        binding.api.set_boolean_value(ControlId(511), true);
        assert!(!binding.input_disabled(0));
    }
}
