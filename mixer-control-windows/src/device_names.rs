//! Wave device-name enumeration.
//!
//! Returns owned string sequences instead of the classic flattened
//! double-null buffer, so repeated or concurrent enumerations cannot
//! clobber each other.

use windows::Win32::Media::Audio::*;
use windows::Win32::Media::Multimedia::*;

use crate::winmm_mixer::wide_to_string;

/// Names of all playback (wave-out) devices, in platform index order.
///
/// The position of a name in this list is the device index passed to
/// [`crate::winmm_mixer::WinmmMixer::open_playback`]. Devices whose
/// capability query fails are skipped.
pub fn playback_device_names() -> Vec<String> {
    unsafe {
        let count = waveOutGetNumDevs();
        let mut names = Vec::with_capacity(count as usize);
        for index in 0..count {
            let mut caps = WAVEOUTCAPSW::default();
            let res = waveOutGetDevCapsW(index as usize, &mut caps, std::mem::size_of::<WAVEOUTCAPSW>() as u32);
            if res == MMSYSERR_NOERROR {
                names.push(wide_to_string(&caps.szPname));
            }
        }
        names
    }
}

/// Names of all capture (wave-in) devices, in platform index order.
pub fn capture_device_names() -> Vec<String> {
    unsafe {
        let count = waveInGetNumDevs();
        let mut names = Vec::with_capacity(count as usize);
        for index in 0..count {
            let mut caps = WAVEINCAPSW::default();
            let res = waveInGetDevCapsW(index as usize, &mut caps, std::mem::size_of::<WAVEINCAPSW>() as u32);
            if res == MMSYSERR_NOERROR {
                names.push(wide_to_string(&caps.szPname));
            }
        }
        names
    }
}
