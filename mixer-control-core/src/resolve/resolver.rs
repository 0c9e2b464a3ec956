//! Control resolution over the mixer line/control graph.
//!
//! The platform mixer is a generic graph with no canonical IDs: the same
//! semantic role ("master volume", "recording mux") lives on lines with
//! different component-type tags across vendors. Resolution therefore runs
//! an ordered list of candidate line queries and takes the first full
//! success. Candidates are never merged.

use crate::models::topology::{ComponentType, ControlId, ControlKind, ControlRef, ControlTable};
use crate::traits::mixer_api::MixerApi;

/// Candidate destinations for the master volume and the output table.
/// "Speakers" vs "Headphones" naming differs by hardware; speakers win ties.
pub const OUTPUT_DESTINATIONS: &[ComponentType] =
    &[ComponentType::DstSpeakers, ComponentType::DstHeadphones];

/// Candidate line for the PCM passthrough (wave-out) volume.
pub const PCM_SOURCES: &[ComponentType] = &[ComponentType::SrcWaveOut];

/// Candidate lines for the recording table and its fallback selector.
pub const INPUT_DESTINATIONS: &[ComponentType] = &[ComponentType::DstWaveIn];

/// Candidate `(line, control)` pairs for the input selector, tried in
/// priority order: a true single-select mux first, then a mixer-combine
/// control. Callers that exhaust this list fall back to treating the
/// destination's own volume as the selector.
pub const SELECTOR_CANDIDATES: &[(ComponentType, ControlKind)] = &[
    (ComponentType::DstWaveIn, ControlKind::Mux),
    (ComponentType::DstWaveIn, ControlKind::Mixer),
];

/// Resolve a single control: the first candidate whose line exists *and*
/// carries a control of `kind` wins. `None` means the feature is absent on
/// this hardware, not that anything failed.
pub fn find_control<A: MixerApi>(
    api: &A,
    candidates: &[ComponentType],
    kind: ControlKind,
) -> Option<ControlId> {
    candidates.iter().find_map(|&component| {
        let line = api.line_by_component(component)?;
        let control = api.control_on_line(line.id, kind);
        if let Some(id) = control {
            log::debug!("resolved {kind:?} on {component:?} (line {}, control {})", line.id.0, id.0);
        }
        control
    })
}

/// Resolve the full source table of the first candidate destination that
/// yields one: for each connection of the destination line, record the
/// sub-line's name, id, and its control of `kind` (or `None` when the
/// sub-line lacks it).
///
/// Partial-failure intolerant: if any *sub-line* lookup fails, the table for
/// that candidate is discarded wholesale. An empty or discarded table falls
/// through to the next candidate; results from two candidates are never
/// merged.
pub fn enumerate_controls<A: MixerApi>(
    api: &A,
    candidates: &[ComponentType],
    kind: ControlKind,
) -> ControlTable {
    for &component in candidates {
        let table = enumerate_one(api, component, kind);
        if !table.is_empty() {
            return table;
        }
    }
    Vec::new()
}

fn enumerate_one<A: MixerApi>(api: &A, component: ComponentType, kind: ControlKind) -> ControlTable {
    let Some(line) = api.line_by_component(component) else {
        return Vec::new();
    };

    let mut table = Vec::with_capacity(line.connections as usize);
    for index in 0..line.connections {
        let Some(sub) = api.connection_line(line.destination, index) else {
            log::warn!(
                "discarding {component:?} table: connection {index} of {} unresolvable",
                line.connections
            );
            return Vec::new();
        };
        let control = api.control_on_line(sub.id, kind);
        table.push(ControlRef {
            name: sub.name,
            line: sub.id,
            control,
        });
    }
    table
}
