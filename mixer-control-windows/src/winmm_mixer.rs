//! Winmm mixer backend.
//!
//! Implements [`MixerApi`] over the legacy Windows multimedia mixer API
//! (`mixerOpen`, `mixerGetLineInfoW`, `mixerGetLineControlsW`,
//! `mixerGet/SetControlDetails`). The mixer is opened against a wave
//! device handle so control IDs resolve on the same hardware the waveform
//! path uses; both handles are owned here and closed exactly once on drop.

use windows::Win32::Media::Audio::*;
use windows::Win32::Media::Multimedia::*;

use mixer_control_core::models::error::MixerError;
use mixer_control_core::models::topology::{ComponentType, ControlId, ControlKind, LineId, LineInfo};
use mixer_control_core::traits::mixer_api::MixerApi;

/// Convert a fixed-size UTF-16 name buffer to an owned string.
pub(crate) fn wide_to_string(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

/// PCM format the wave handle is opened with. The handle only anchors the
/// mixer to a device; nothing is ever streamed through it, so the cheapest
/// format winmm accepts everywhere is used.
fn anchor_format() -> WAVEFORMATEX {
    let channels: u16 = 1;
    let bits: u16 = 16;
    let rate: u32 = 8000;
    let block_align = channels * bits / 8;
    WAVEFORMATEX {
        wFormatTag: WAVE_FORMAT_PCM as u16,
        nChannels: channels,
        nSamplesPerSec: rate,
        nAvgBytesPerSec: rate * block_align as u32,
        nBlockAlign: block_align,
        wBitsPerSample: bits,
        cbSize: 0,
    }
}

enum WaveHandle {
    Out(HWAVEOUT),
    In(HWAVEIN),
}

/// One opened winmm mixer, anchored to a wave device.
pub struct WinmmMixer {
    mixer: HMIXER,
    wave: WaveHandle,
}

// SAFETY: winmm handles may move between threads; calls on one handle must
// stay serialized, which the single-threaded binding contract guarantees.
unsafe impl Send for WinmmMixer {}

impl WinmmMixer {
    /// Open the mixer attached to playback (wave-out) device `index`.
    pub fn open_playback(index: u32) -> Result<Self, MixerError> {
        unsafe {
            let mut hwave = HWAVEOUT::default();
            let format = anchor_format();
            // Final arg is CALLBACK_NULL (0): no callback machinery.
            let res = waveOutOpen(Some(&mut hwave), index, &format, 0, 0, 0);
            if res != MMSYSERR_NOERROR {
                return Err(MixerError::InvalidDevice);
            }

            let mut mixer = HMIXER::default();
            let res = mixerOpen(Some(&mut mixer), hwave.0 as usize as u32, 0, 0, MIXER_OBJECTF_HWAVEOUT);
            if res != MMSYSERR_NOERROR {
                let _ = waveOutClose(hwave);
                return Err(MixerError::InvalidDevice);
            }

            log::debug!("opened playback mixer for wave-out device {index}");
            Ok(Self {
                mixer,
                wave: WaveHandle::Out(hwave),
            })
        }
    }

    /// Open the mixer attached to capture (wave-in) device `index`.
    pub fn open_capture(index: u32) -> Result<Self, MixerError> {
        unsafe {
            let mut hwave = HWAVEIN::default();
            let format = anchor_format();
            let res = waveInOpen(Some(&mut hwave), index, &format, 0, 0, 0);
            if res != MMSYSERR_NOERROR {
                return Err(MixerError::InvalidDevice);
            }

            let mut mixer = HMIXER::default();
            let res = mixerOpen(Some(&mut mixer), hwave.0 as usize as u32, 0, 0, MIXER_OBJECTF_HWAVEIN);
            if res != MMSYSERR_NOERROR {
                let _ = waveInClose(hwave);
                return Err(MixerError::InvalidDevice);
            }

            log::debug!("opened capture mixer for wave-in device {index}");
            Ok(Self {
                mixer,
                wave: WaveHandle::In(hwave),
            })
        }
    }

    fn obj(&self) -> HMIXEROBJ {
        HMIXEROBJ(self.mixer.0)
    }

    fn line_info_from(line: &MIXERLINEW) -> LineInfo {
        LineInfo {
            id: LineId(line.dwLineID),
            destination: line.dwDestination,
            connections: line.cConnections,
            name: wide_to_string(&line.szName),
        }
    }

    /// One `mixerGetControlDetails` call over a caller-provided payload.
    unsafe fn get_details(
        &self,
        control: ControlId,
        items: u32,
        item_size: usize,
        payload: *mut core::ffi::c_void,
        flags: u32,
    ) -> bool {
        let mut details = MIXERCONTROLDETAILS {
            cbStruct: std::mem::size_of::<MIXERCONTROLDETAILS>() as u32,
            dwControlID: control.0,
            cChannels: 1,
            cbDetails: item_size as u32,
            paDetails: payload,
            ..Default::default()
        };
        details.Anonymous.cMultipleItems = items;
        mixerGetControlDetails(self.obj(), &mut details, MIXER_OBJECTF_HMIXER | flags)
            == MMSYSERR_NOERROR
    }

    unsafe fn set_details(
        &self,
        control: ControlId,
        items: u32,
        item_size: usize,
        payload: *mut core::ffi::c_void,
    ) -> bool {
        let mut details = MIXERCONTROLDETAILS {
            cbStruct: std::mem::size_of::<MIXERCONTROLDETAILS>() as u32,
            dwControlID: control.0,
            cChannels: 1,
            cbDetails: item_size as u32,
            paDetails: payload,
            ..Default::default()
        };
        details.Anonymous.cMultipleItems = items;
        mixerSetControlDetails(
            self.obj(),
            &mut details,
            MIXER_OBJECTF_HMIXER | MIXER_SETCONTROLDETAILSF_VALUE,
        ) == MMSYSERR_NOERROR
    }
}

impl Drop for WinmmMixer {
    fn drop(&mut self) {
        unsafe {
            let _ = mixerClose(self.mixer);
            match self.wave {
                WaveHandle::Out(h) => {
                    let _ = waveOutClose(h);
                }
                WaveHandle::In(h) => {
                    let _ = waveInClose(h);
                }
            }
        }
    }
}

impl MixerApi for WinmmMixer {
    fn line_by_component(&self, component: ComponentType) -> Option<LineInfo> {
        unsafe {
            let mut line = MIXERLINEW {
                cbStruct: std::mem::size_of::<MIXERLINEW>() as u32,
                dwComponentType: component_code(component),
                ..Default::default()
            };
            let res = mixerGetLineInfoW(
                self.obj(),
                &mut line,
                MIXER_OBJECTF_HMIXER | MIXER_GETLINEINFOF_COMPONENTTYPE,
            );
            (res == MMSYSERR_NOERROR).then(|| Self::line_info_from(&line))
        }
    }

    fn connection_line(&self, destination: u32, index: u32) -> Option<LineInfo> {
        unsafe {
            let mut line = MIXERLINEW {
                cbStruct: std::mem::size_of::<MIXERLINEW>() as u32,
                dwDestination: destination,
                dwSource: index,
                ..Default::default()
            };
            let res = mixerGetLineInfoW(
                self.obj(),
                &mut line,
                MIXER_OBJECTF_HMIXER | MIXER_GETLINEINFOF_SOURCE,
            );
            (res == MMSYSERR_NOERROR).then(|| Self::line_info_from(&line))
        }
    }

    fn control_on_line(&self, line: LineId, kind: ControlKind) -> Option<ControlId> {
        unsafe {
            let mut control = MIXERCONTROLW {
                cbStruct: std::mem::size_of::<MIXERCONTROLW>() as u32,
                ..Default::default()
            };
            let mut controls = MIXERLINECONTROLSW {
                cbStruct: std::mem::size_of::<MIXERLINECONTROLSW>() as u32,
                dwLineID: line.0,
                cControls: 1,
                cbmxctrl: std::mem::size_of::<MIXERCONTROLW>() as u32,
                pamxctrl: &mut control,
                ..Default::default()
            };
            controls.Anonymous.dwControlType = control_code(kind);

            let res = mixerGetLineControlsW(
                self.obj(),
                &mut controls,
                MIXER_OBJECTF_HMIXER | MIXER_GETLINECONTROLSF_ONEBYTYPE,
            );
            (res == MMSYSERR_NOERROR).then(|| ControlId(control.dwControlID))
        }
    }

    fn unsigned_value(&self, control: ControlId) -> Option<u32> {
        unsafe {
            let mut value = MIXERCONTROLDETAILS_UNSIGNED::default();
            self.get_details(
                control,
                0,
                std::mem::size_of::<MIXERCONTROLDETAILS_UNSIGNED>(),
                &mut value as *mut _ as *mut _,
                MIXER_GETCONTROLDETAILSF_VALUE,
            )
            .then_some(value.dwValue)
        }
    }

    fn set_unsigned_value(&self, control: ControlId, value: u32) -> bool {
        unsafe {
            let mut value = MIXERCONTROLDETAILS_UNSIGNED { dwValue: value };
            self.set_details(
                control,
                0,
                std::mem::size_of::<MIXERCONTROLDETAILS_UNSIGNED>(),
                &mut value as *mut _ as *mut _,
            )
        }
    }

    fn boolean_value(&self, control: ControlId) -> Option<bool> {
        unsafe {
            let mut value = MIXERCONTROLDETAILS_BOOLEAN::default();
            self.get_details(
                control,
                0,
                std::mem::size_of::<MIXERCONTROLDETAILS_BOOLEAN>(),
                &mut value as *mut _ as *mut _,
                MIXER_GETCONTROLDETAILSF_VALUE,
            )
            .then(|| value.fValue != 0)
        }
    }

    fn set_boolean_value(&self, control: ControlId, value: bool) -> bool {
        unsafe {
            let mut value = MIXERCONTROLDETAILS_BOOLEAN {
                fValue: value as i32,
            };
            self.set_details(
                control,
                0,
                std::mem::size_of::<MIXERCONTROLDETAILS_BOOLEAN>(),
                &mut value as *mut _ as *mut _,
            )
        }
    }

    fn mux_item_lines(&self, control: ControlId, count: u32) -> Option<Vec<LineId>> {
        unsafe {
            let mut items = vec![MIXERCONTROLDETAILS_LISTTEXTW::default(); count as usize];
            self.get_details(
                control,
                count,
                std::mem::size_of::<MIXERCONTROLDETAILS_LISTTEXTW>(),
                items.as_mut_ptr() as *mut _,
                MIXER_GETCONTROLDETAILSF_LISTTEXT,
            )
            // Each list-text item reports the line it stands for in dwParam1.
            .then(|| items.iter().map(|item| LineId(item.dwParam1)).collect())
        }
    }

    fn mux_selection(&self, control: ControlId, count: u32) -> Option<Vec<bool>> {
        unsafe {
            let mut flags = vec![MIXERCONTROLDETAILS_BOOLEAN::default(); count as usize];
            self.get_details(
                control,
                count,
                std::mem::size_of::<MIXERCONTROLDETAILS_BOOLEAN>(),
                flags.as_mut_ptr() as *mut _,
                MIXER_GETCONTROLDETAILSF_VALUE,
            )
            .then(|| flags.iter().map(|f| f.fValue != 0).collect())
        }
    }

    fn set_mux_selection(&self, control: ControlId, selected: &[bool]) -> bool {
        unsafe {
            let mut flags: Vec<MIXERCONTROLDETAILS_BOOLEAN> = selected
                .iter()
                .map(|&on| MIXERCONTROLDETAILS_BOOLEAN { fValue: on as i32 })
                .collect();
            self.set_details(
                control,
                flags.len() as u32,
                std::mem::size_of::<MIXERCONTROLDETAILS_BOOLEAN>(),
                flags.as_mut_ptr() as *mut _,
            )
        }
    }
}

/// Platform code for a component type.
fn component_code(component: ComponentType) -> u32 {
    match component {
        ComponentType::DstUndefined => MIXERLINE_COMPONENTTYPE_DST_UNDEFINED,
        ComponentType::DstDigital => MIXERLINE_COMPONENTTYPE_DST_DIGITAL,
        ComponentType::DstLine => MIXERLINE_COMPONENTTYPE_DST_LINE,
        ComponentType::DstMonitor => MIXERLINE_COMPONENTTYPE_DST_MONITOR,
        ComponentType::DstSpeakers => MIXERLINE_COMPONENTTYPE_DST_SPEAKERS,
        ComponentType::DstHeadphones => MIXERLINE_COMPONENTTYPE_DST_HEADPHONES,
        ComponentType::DstTelephone => MIXERLINE_COMPONENTTYPE_DST_TELEPHONE,
        ComponentType::DstWaveIn => MIXERLINE_COMPONENTTYPE_DST_WAVEIN,
        ComponentType::DstVoiceIn => MIXERLINE_COMPONENTTYPE_DST_VOICEIN,
        ComponentType::SrcUndefined => MIXERLINE_COMPONENTTYPE_SRC_UNDEFINED,
        ComponentType::SrcDigital => MIXERLINE_COMPONENTTYPE_SRC_DIGITAL,
        ComponentType::SrcLine => MIXERLINE_COMPONENTTYPE_SRC_LINE,
        ComponentType::SrcMicrophone => MIXERLINE_COMPONENTTYPE_SRC_MICROPHONE,
        ComponentType::SrcSynthesizer => MIXERLINE_COMPONENTTYPE_SRC_SYNTHESIZER,
        ComponentType::SrcCompactDisc => MIXERLINE_COMPONENTTYPE_SRC_COMPACTDISC,
        ComponentType::SrcTelephone => MIXERLINE_COMPONENTTYPE_SRC_TELEPHONE,
        ComponentType::SrcPcSpeaker => MIXERLINE_COMPONENTTYPE_SRC_PCSPEAKER,
        ComponentType::SrcWaveOut => MIXERLINE_COMPONENTTYPE_SRC_WAVEOUT,
        ComponentType::SrcAuxiliary => MIXERLINE_COMPONENTTYPE_SRC_AUXILIARY,
        ComponentType::SrcAnalog => MIXERLINE_COMPONENTTYPE_SRC_ANALOG,
    }
}

/// Platform code for a control kind.
fn control_code(kind: ControlKind) -> u32 {
    match kind {
        ControlKind::Custom => MIXERCONTROL_CONTROLTYPE_CUSTOM,
        ControlKind::BooleanMeter => MIXERCONTROL_CONTROLTYPE_BOOLEANMETER,
        ControlKind::SignedMeter => MIXERCONTROL_CONTROLTYPE_SIGNEDMETER,
        ControlKind::PeakMeter => MIXERCONTROL_CONTROLTYPE_PEAKMETER,
        ControlKind::UnsignedMeter => MIXERCONTROL_CONTROLTYPE_UNSIGNEDMETER,
        ControlKind::Boolean => MIXERCONTROL_CONTROLTYPE_BOOLEAN,
        ControlKind::OnOff => MIXERCONTROL_CONTROLTYPE_ONOFF,
        ControlKind::Mute => MIXERCONTROL_CONTROLTYPE_MUTE,
        ControlKind::Mono => MIXERCONTROL_CONTROLTYPE_MONO,
        ControlKind::Loudness => MIXERCONTROL_CONTROLTYPE_LOUDNESS,
        ControlKind::StereoEnh => MIXERCONTROL_CONTROLTYPE_STEREOENH,
        ControlKind::BassBoost => MIXERCONTROL_CONTROLTYPE_BASS_BOOST,
        ControlKind::Button => MIXERCONTROL_CONTROLTYPE_BUTTON,
        ControlKind::Decibels => MIXERCONTROL_CONTROLTYPE_DECIBELS,
        ControlKind::Signed => MIXERCONTROL_CONTROLTYPE_SIGNED,
        ControlKind::Unsigned => MIXERCONTROL_CONTROLTYPE_UNSIGNED,
        ControlKind::Percent => MIXERCONTROL_CONTROLTYPE_PERCENT,
        ControlKind::Slider => MIXERCONTROL_CONTROLTYPE_SLIDER,
        ControlKind::Pan => MIXERCONTROL_CONTROLTYPE_PAN,
        ControlKind::QsoundPan => MIXERCONTROL_CONTROLTYPE_QSOUNDPAN,
        ControlKind::Fader => MIXERCONTROL_CONTROLTYPE_FADER,
        ControlKind::Volume => MIXERCONTROL_CONTROLTYPE_VOLUME,
        ControlKind::Bass => MIXERCONTROL_CONTROLTYPE_BASS,
        ControlKind::Treble => MIXERCONTROL_CONTROLTYPE_TREBLE,
        ControlKind::Equalizer => MIXERCONTROL_CONTROLTYPE_EQUALIZER,
        ControlKind::SingleSelect => MIXERCONTROL_CONTROLTYPE_SINGLESELECT,
        ControlKind::Mux => MIXERCONTROL_CONTROLTYPE_MUX,
        ControlKind::MultipleSelect => MIXERCONTROL_CONTROLTYPE_MULTIPLESELECT,
        ControlKind::Mixer => MIXERCONTROL_CONTROLTYPE_MIXER,
        ControlKind::Microtime => MIXERCONTROL_CONTROLTYPE_MICROTIME,
        ControlKind::Millitime => MIXERCONTROL_CONTROLTYPE_MILLITIME,
    }
}
