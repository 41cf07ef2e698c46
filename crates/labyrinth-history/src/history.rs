//! The step log and its cursor.

use std::collections::HashMap;

use labyrinth_grid::CellId;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{CellPatch, CellState};

/// Visual state of every touched cell, by id.
pub type StateMap = HashMap<CellId, CellState>;

/// One recorded step: what it did, and how to take it back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryStep {
    /// Coalesced patches, one per cell, in first-touched order.
    pub forward: Vec<CellPatch>,
    /// Exact pre-step snapshot of each touched cell.
    pub backward: Vec<CellPatch>,
}

/// Linear undo/redo log over cell visual state.
///
/// The cursor points at the last applied step. New steps drop everything
/// after the cursor.
#[derive(Debug, Clone, Default)]
pub struct CellHistory {
    state: StateMap,
    steps: Vec<HistoryStep>,
    /// Number of steps currently applied (`history_index() + 1`).
    applied: usize,
}

impl CellHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and apply one step.
    ///
    /// Patches for the same id are folded into one, later ones winning. An
    /// empty `patches` still records an (empty) step.
    pub fn apply_step(&mut self, patches: Vec<CellPatch>) {
        let forward = coalesce(patches, &self.state);
        let mut backward = Vec::with_capacity(forward.len());

        for patch in &forward {
            let id = patch.id();
            backward.push(snapshot(id, self.state.get(id)));
            self.apply_patch(patch);
        }

        self.steps.truncate(self.applied);
        self.steps.push(HistoryStep { forward, backward });
        self.applied += 1;

        trace!(index = self.history_index(), "applied history step");
    }

    /// Record several steps as a single one.
    pub fn apply_multiple_steps(&mut self, steps: Vec<Vec<CellPatch>>) {
        self.apply_step(steps.into_iter().flatten().collect());
    }

    /// Revert the current step. No-op at the start.
    pub fn undo(&mut self) {
        if !self.can_undo() {
            return;
        }

        self.applied -= 1;
        let patches = std::mem::take(&mut self.steps[self.applied].backward);
        for patch in &patches {
            self.apply_patch(patch);
        }
        self.steps[self.applied].backward = patches;
    }

    /// Re-apply the next step. No-op at the end.
    pub fn redo(&mut self) {
        if !self.can_redo() {
            return;
        }

        let patches = std::mem::take(&mut self.steps[self.applied].forward);
        for patch in &patches {
            self.apply_patch(patch);
        }
        self.steps[self.applied].forward = patches;
        self.applied += 1;
    }

    /// A copy of the current state.
    pub fn get_state(&self) -> StateMap {
        self.state.clone()
    }

    /// Borrow the state of one cell.
    pub fn cell(&self, id: &str) -> Option<&CellState> {
        self.state.get(id)
    }

    /// Drop all steps and state.
    pub fn clear(&mut self) {
        debug!(steps = self.steps.len(), "clearing cell history");
        self.state.clear();
        self.steps.clear();
        self.applied = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.steps.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Recorded step count, including undone ones.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Index of the last applied step, `-1` when none is applied.
    pub fn history_index(&self) -> isize {
        self.applied as isize - 1
    }

    /// The last applied step.
    pub fn history_current_step(&self) -> Option<&HistoryStep> {
        self.applied.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    fn apply_patch(&mut self, patch: &CellPatch) {
        let id = patch.id();
        match patch.apply(self.state.get(id)) {
            Some(next) => {
                self.state.insert(id.clone(), next);
            }
            None => {
                self.state.remove(id);
            }
        }
    }
}

/// One patch per id, in order of first appearance.
///
/// Patches that cannot be folded into one are played against `state` and
/// recorded as the resulting snapshot.
fn coalesce(patches: Vec<CellPatch>, state: &StateMap) -> Vec<CellPatch> {
    let mut order: HashMap<CellId, usize> = HashMap::with_capacity(patches.len());
    let mut groups: Vec<Vec<CellPatch>> = Vec::with_capacity(patches.len());

    for patch in patches {
        match order.get(patch.id()) {
            Some(&i) => groups[i].push(patch),
            None => {
                order.insert(patch.id().clone(), groups.len());
                groups.push(vec![patch]);
            }
        }
    }

    groups
        .into_iter()
        .filter_map(|group| fold_group(group, state))
        .collect()
}

fn fold_group(group: Vec<CellPatch>, state: &StateMap) -> Option<CellPatch> {
    let (first, rest) = group.split_first()?;
    if rest.is_empty() {
        return Some(first.clone());
    }

    let folded = rest
        .iter()
        .try_fold(first.clone(), |acc, later| acc.absorb(later.clone()));
    if folded.is_some() {
        return folded;
    }

    let id = first.id();
    trace!(%id, patches = group.len(), "step resets a value, recording a snapshot");
    let end = group
        .iter()
        .fold(state.get(id).cloned(), |current, patch| patch.apply(current.as_ref()));
    Some(snapshot(id, end.as_ref()))
}

fn snapshot(id: &CellId, state: Option<&CellState>) -> CellPatch {
    match state {
        Some(state) => CellPatch::replace(id.clone(), state.fields().clone()),
        None => CellPatch::delete(id.clone()),
    }
}
