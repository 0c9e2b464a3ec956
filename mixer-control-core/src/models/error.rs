use thiserror::Error;

/// Errors surfaced by public mixer operations.
///
/// A control that simply does not exist on the hardware is *not* an error;
/// accessors model that as an absent binding (`None`/no-op). These variants
/// cover genuine caller or platform faults only.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MixerError {
    /// No such device, or the device-name match/open failed.
    #[error("invalid device")]
    InvalidDevice,

    /// Parameter code not recognized by the entry point it was passed to.
    #[error("invalid enum")]
    InvalidEnum,

    /// Set argument outside its domain (e.g. volume not in [0.0, 1.0]).
    #[error("invalid value")]
    InvalidValue,

    /// Allocation failure while building a control table.
    #[error("out of memory")]
    OutOfMemory,
}
