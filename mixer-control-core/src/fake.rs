//! In-memory mixer topology implementing [`MixerApi`] for tests.
//!
//! Lets tests assemble an arbitrary line/control graph, inject lookup
//! failures, and inspect written values.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::models::topology::{ComponentType, ControlId, ControlKind, LineId, LineInfo};
use crate::traits::mixer_api::MixerApi;

struct FakeLine {
    component: ComponentType,
    id: u32,
    destination: u32,
    /// Position among its destination's sources; `None` for destination lines.
    source_index: Option<u32>,
    name: String,
    controls: Vec<(ControlKind, u32)>,
}

struct MuxState {
    items: Vec<u32>,
    selected: Vec<bool>,
}

/// Configurable fake mixer graph.
///
/// Interior mutability mirrors the real backend: the platform handle is
/// logically `&self` even for writes, and the whole model is single-threaded.
#[derive(Default)]
pub struct FakeMixer {
    lines: Vec<FakeLine>,
    unsigned: RefCell<HashMap<u32, u32>>,
    boolean: RefCell<HashMap<u32, bool>>,
    mux: RefCell<HashMap<u32, MuxState>>,
    broken_connections: Vec<(u32, u32)>,
    dead_controls: Vec<u32>,
}

impl FakeMixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_destination(&mut self, component: ComponentType, line: u32, destination: u32, name: &str) {
        self.lines.push(FakeLine {
            component,
            id: line,
            destination,
            source_index: None,
            name: name.into(),
            controls: Vec::new(),
        });
    }

    pub fn add_source(&mut self, component: ComponentType, line: u32, destination: u32, name: &str) {
        let index = self
            .lines
            .iter()
            .filter(|l| l.destination == destination && l.source_index.is_some())
            .count() as u32;
        self.lines.push(FakeLine {
            component,
            id: line,
            destination,
            source_index: Some(index),
            name: name.into(),
            controls: Vec::new(),
        });
    }

    /// Attach a control to a line, with a zeroed initial value.
    pub fn add_control(&mut self, line: u32, kind: ControlKind, control: u32) {
        match kind {
            ControlKind::Mute | ControlKind::Boolean | ControlKind::OnOff => {
                self.boolean.borrow_mut().insert(control, false);
            }
            ControlKind::Mux | ControlKind::Mixer | ControlKind::SingleSelect | ControlKind::MultipleSelect => {
                self.mux.borrow_mut().insert(
                    control,
                    MuxState {
                        items: Vec::new(),
                        selected: Vec::new(),
                    },
                );
            }
            _ => {
                self.unsigned.borrow_mut().insert(control, 0);
            }
        }
        if let Some(l) = self.lines.iter_mut().find(|l| l.id == line) {
            l.controls.push((kind, control));
        }
    }

    /// Configure the item list and live selection of a mux control.
    pub fn set_mux(&mut self, control: u32, items: Vec<u32>, selected: Vec<bool>) {
        self.mux
            .borrow_mut()
            .insert(control, MuxState { items, selected });
    }

    /// Make the sub-line lookup `(destination, index)` fail.
    pub fn break_connection(&mut self, destination: u32, index: u32) {
        self.broken_connections.push((destination, index));
    }

    /// Make every value query/write against `control` fail.
    pub fn kill_control(&mut self, control: u32) {
        self.dead_controls.push(control);
    }

    pub fn unsigned_of(&self, control: u32) -> Option<u32> {
        self.unsigned.borrow().get(&control).copied()
    }

    pub fn boolean_of(&self, control: u32) -> Option<bool> {
        self.boolean.borrow().get(&control).copied()
    }

    pub fn selection_of(&self, control: u32) -> Option<Vec<bool>> {
        self.mux.borrow().get(&control).map(|m| m.selected.clone())
    }

    fn info(line: &FakeLine, connections: u32) -> LineInfo {
        LineInfo {
            id: LineId(line.id),
            destination: line.destination,
            connections,
            name: line.name.clone(),
        }
    }

    fn connections_of(&self, destination: u32) -> u32 {
        self.lines
            .iter()
            .filter(|l| l.destination == destination && l.source_index.is_some())
            .count() as u32
    }

    fn dead(&self, control: ControlId) -> bool {
        self.dead_controls.contains(&control.0)
    }
}

impl MixerApi for FakeMixer {
    fn line_by_component(&self, component: ComponentType) -> Option<LineInfo> {
        let line = self.lines.iter().find(|l| l.component == component)?;
        Some(Self::info(line, self.connections_of(line.destination)))
    }

    fn connection_line(&self, destination: u32, index: u32) -> Option<LineInfo> {
        if self.broken_connections.contains(&(destination, index)) {
            return None;
        }
        let line = self
            .lines
            .iter()
            .find(|l| l.destination == destination && l.source_index == Some(index))?;
        Some(Self::info(line, 0))
    }

    fn control_on_line(&self, line: LineId, kind: ControlKind) -> Option<ControlId> {
        let line = self.lines.iter().find(|l| l.id == line.0)?;
        line.controls
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|&(_, id)| ControlId(id))
    }

    fn unsigned_value(&self, control: ControlId) -> Option<u32> {
        if self.dead(control) {
            return None;
        }
        self.unsigned.borrow().get(&control.0).copied()
    }

    fn set_unsigned_value(&self, control: ControlId, value: u32) -> bool {
        if self.dead(control) || !self.unsigned.borrow().contains_key(&control.0) {
            return false;
        }
        self.unsigned.borrow_mut().insert(control.0, value);
        true
    }

    fn boolean_value(&self, control: ControlId) -> Option<bool> {
        if self.dead(control) {
            return None;
        }
        self.boolean.borrow().get(&control.0).copied()
    }

    fn set_boolean_value(&self, control: ControlId, value: bool) -> bool {
        if self.dead(control) || !self.boolean.borrow().contains_key(&control.0) {
            return false;
        }
        self.boolean.borrow_mut().insert(control.0, value);
        true
    }

    fn mux_item_lines(&self, control: ControlId, _count: u32) -> Option<Vec<LineId>> {
        if self.dead(control) {
            return None;
        }
        self.mux
            .borrow()
            .get(&control.0)
            .map(|m| m.items.iter().map(|&id| LineId(id)).collect())
    }

    fn mux_selection(&self, control: ControlId, _count: u32) -> Option<Vec<bool>> {
        if self.dead(control) {
            return None;
        }
        self.mux.borrow().get(&control.0).map(|m| m.selected.clone())
    }

    fn set_mux_selection(&self, control: ControlId, selected: &[bool]) -> bool {
        if self.dead(control) {
            return false;
        }
        match self.mux.borrow_mut().get_mut(&control.0) {
            Some(m) => {
                m.selected = selected.to_vec();
                true
            }
            None => false,
        }
    }
}
