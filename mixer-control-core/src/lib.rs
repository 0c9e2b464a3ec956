//! # mixer-control-core
//!
//! Platform-agnostic core of the mixer hardware-control kit.
//!
//! Exposes OS audio-mixer controls (master volume, PCM output volume,
//! input-source selection, mute flags) over whatever backend implements the
//! `MixerApi` query/set primitives. The hard part lives here: the platform
//! mixer is a generic graph of lines and controls with no fixed IDs, so the
//! resolver walks it with ordered candidate queries to bind semantic roles
//! ("master volume", "recording mux") to concrete control IDs.
//!
//! ## Architecture
//!
//! ```text
//! mixer-control-core (this crate)
//! ├── models/    ← MixerError, Param, line/control topology types
//! ├── traits/    ← MixerApi (black-box platform query/set seam)
//! ├── resolve/   ← candidate-query resolver, control-table enumeration
//! └── binding/   ← DeviceBinding accessors, sentinel facade, name matching
//! ```
//!
//! Platform backends (Windows winmm) implement [`MixerApi`] and own the
//! handle lifecycle; everything above that seam is tested against an
//! in-memory fake. All operations are synchronous and single-threaded;
//! concurrent calls on one binding are not supported.

pub mod binding;
pub mod models;
pub mod resolve;
pub mod traits;

#[cfg(test)]
mod fake;

// Re-export key types at crate root for convenience.
pub use binding::device::DeviceBinding;
pub use binding::facade::{Mixer, NO_VOLUME};
pub use binding::matching::{device_names_match, match_or_first};
pub use models::error::MixerError;
pub use models::param::{Direction, Param};
pub use models::topology::{ComponentType, ControlId, ControlKind, ControlRef, ControlTable, LineId, LineInfo};
pub use resolve::resolver::{enumerate_controls, find_control};
pub use traits::mixer_api::MixerApi;
