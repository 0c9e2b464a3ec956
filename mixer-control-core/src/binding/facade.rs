//! Sentinel-style compatibility facade over [`DeviceBinding`].
//!
//! The typed binding API distinguishes "absent" from "failed"; C-style
//! callers instead expect parameter-code dispatch, type-appropriate
//! sentinels (-1.0, -1, false, none) and a read-and-clear last-error slot.
//! This facade provides that contract with a per-handle error slot, so
//! handles never race on shared state.

use crate::binding::device::DeviceBinding;
use crate::models::error::MixerError;
use crate::models::param::{Direction, Param};
use crate::traits::mixer_api::MixerApi;

/// Sentinel returned by float queries that cannot answer. Distinguish it
/// from a genuinely silent control via `get_boolean(Param::PcmOutput)` and
/// friends.
pub const NO_VOLUME: f32 = -1.0;

/// A mixer handle with a C-style parameter-dispatch surface.
pub struct Mixer<A: MixerApi> {
    binding: DeviceBinding<A>,
    /// Single-slot, overwrite-on-write: a second failure before the slot is
    /// read replaces the first. Deliberate simplification, not a queue.
    last_error: Option<MixerError>,
}

impl<A: MixerApi> Mixer<A> {
    pub fn new(binding: DeviceBinding<A>) -> Self {
        Self {
            binding,
            last_error: None,
        }
    }

    /// The typed accessor surface, for callers that prefer `Option`/`Result`
    /// over sentinels.
    pub fn binding(&self) -> &DeviceBinding<A> {
        &self.binding
    }

    /// Most recent recorded error; reading clears the slot.
    pub fn take_error(&mut self) -> Option<MixerError> {
        self.last_error.take()
    }

    fn record(&mut self, error: MixerError) {
        self.last_error = Some(error);
    }

    pub fn get_float(&mut self, param: Param) -> f32 {
        let value = match param {
            Param::MasterVolume => self.binding.master_volume(),
            Param::PcmOutputVolume => self.binding.pcm_volume(),
            Param::InputVolume => self.binding.input_volume(),
            _ => {
                self.record(MixerError::InvalidEnum);
                None
            }
        };
        value.unwrap_or(NO_VOLUME)
    }

    pub fn set_float(&mut self, param: Param, value: f32) {
        let result = match param {
            Param::MasterVolume => self.binding.set_master_volume(value),
            Param::PcmOutputVolume => self.binding.set_pcm_volume(value),
            Param::InputVolume => self.binding.set_input_volume(value),
            _ => Err(MixerError::InvalidEnum),
        };
        if let Err(error) = result {
            self.record(error);
        }
    }

    pub fn get_boolean(&mut self, param: Param) -> bool {
        match param {
            Param::PcmOutput => self.binding.has_pcm_volume(),
            Param::MasterVolume => self.binding.master_muted(),
            Param::PcmOutputVolume => self.binding.pcm_muted(),
            _ => {
                self.record(MixerError::InvalidEnum);
                false
            }
        }
    }

    pub fn set_boolean(&mut self, param: Param, value: bool) {
        match param {
            Param::MasterVolume => self.binding.set_master_muted(value),
            Param::PcmOutputVolume => self.binding.set_pcm_muted(value),
            _ => self.record(MixerError::InvalidEnum),
        }
    }

    pub fn get_integer(&mut self, param: Param) -> i32 {
        match param {
            Param::OutputVolumeSpecifier => self.binding.output_count() as i32,
            Param::InputSourceSpecifier => self.binding.input_count() as i32,
            Param::InputSource => self
                .binding
                .current_input()
                .map(|i| i as i32)
                .unwrap_or(-1),
            _ => {
                self.record(MixerError::InvalidEnum);
                -1
            }
        }
    }

    pub fn set_integer(&mut self, param: Param, value: i32) {
        match param {
            Param::InputSource => {
                // Negative indices behave like any other out-of-range index.
                if let Ok(index) = usize::try_from(value) {
                    self.binding.set_current_input(index);
                }
            }
            _ => self.record(MixerError::InvalidEnum),
        }
    }

    pub fn get_string(&mut self, param: Param) -> Option<&str> {
        let wanted = match param {
            Param::DeviceSpecifier => Direction::Playback,
            Param::CaptureDeviceSpecifier => Direction::Capture,
            _ => {
                self.record(MixerError::InvalidEnum);
                return None;
            }
        };
        if self.binding.direction() != wanted {
            self.record(MixerError::InvalidDevice);
            return None;
        }
        Some(self.binding.device_name())
    }

    pub fn get_indexed_string(&mut self, param: Param, index: usize) -> Option<&str> {
        match param {
            Param::OutputVolumeSpecifier => self.binding.output_name(index),
            Param::InputSourceSpecifier => self.binding.input_name(index),
            _ => {
                self.record(MixerError::InvalidEnum);
                None
            }
        }
    }

    pub fn get_indexed_float(&mut self, param: Param, index: usize) -> f32 {
        match param {
            Param::OutputVolume => self.binding.output_volume(index).unwrap_or(NO_VOLUME),
            _ => {
                self.record(MixerError::InvalidEnum);
                NO_VOLUME
            }
        }
    }

    pub fn get_indexed_boolean(&mut self, param: Param, index: usize) -> bool {
        match param {
            Param::OutputVolume => self.binding.output_disabled(index),
            Param::InputSource => self.binding.input_disabled(index),
            _ => {
                self.record(MixerError::InvalidEnum);
                false
            }
        }
    }

    pub fn set_indexed_float(&mut self, param: Param, index: usize, value: f32) {
        let result = match param {
            Param::OutputVolume => self.binding.set_output_volume(index, value),
            _ => Err(MixerError::InvalidEnum),
        };
        if let Err(error) = result {
            self.record(error);
        }
    }

    pub fn set_indexed_boolean(&mut self, param: Param, index: usize, value: bool) {
        match param {
            Param::OutputVolume => self.binding.set_output_disabled(index, value),
            _ => self.record(MixerError::InvalidEnum),
        }
    }
}
