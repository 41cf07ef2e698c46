//! Mapping solution steps to cell patches.
//!
//! Solvers know nothing about colours. A [`VisualSchema`] turns each
//! [`SolutionStep`] into [`CellPatch`]es for the history, the same way for
//! stepped playback and for jumping straight to the final state.

use labyrinth_grid::CellId;
use labyrinth_history::CellPatch;
use serde_json::{json, Value};

use crate::{ScoredCell, SolutionStep};

/// Field names written into cell state.
pub mod keys {
    pub const COLOR: &str = "color";
    pub const LINE_COLOR: &str = "line_color";
    pub const IS_PATH_CELL: &str = "is_path_cell";
    pub const PREV_CELL_ID: &str = "prev_cell_id";
    /// A* scores as `{"g": .., "h": .., "f": ..}`.
    pub const TEXT: &str = "text";
}

/// Colours of one search phase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellColors {
    pub background: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub line: Option<String>,
}

impl CellColors {
    pub fn new(background: impl Into<String>) -> Self {
        Self {
            background: background.into(),
            line: None,
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }
}

/// Colours for every phase of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisualSchema {
    pub enqueued: CellColors,
    pub visited: CellColors,
    pub found_path: CellColors,
}

impl Default for VisualSchema {
    fn default() -> Self {
        Self {
            enqueued: CellColors::new("#023047"),
            visited: CellColors::new("#b0c4b1"),
            found_path: CellColors::new("grey").with_line("#ffb703"),
        }
    }
}

impl VisualSchema {
    /// Patches for one step. Frontier cells come first, the expanded cell
    /// last.
    pub fn apply_visual(&self, step: &SolutionStep) -> Vec<CellPatch> {
        match step {
            SolutionStep::Search { visited, enqueued } => {
                let mut patches: Vec<_> = enqueued.iter().map(|id| self.frontier(id)).collect();
                patches.push(self.expanded(visited));
                patches
            }
            SolutionStep::Expand { visited, scored } => {
                let mut patches: Vec<_> = scored
                    .iter()
                    .map(|cell| self.frontier(&cell.id).with(keys::TEXT, score_text(cell)))
                    .collect();
                patches.push(self.expanded(visited));
                patches
            }
            SolutionStep::Path {
                found_path,
                prev_cell_id,
            } => {
                let line = self.found_path.line.clone().map_or(Value::Null, Value::from);
                vec![CellPatch::merge(found_path.clone())
                    .with(keys::COLOR, self.found_path.background.as_str())
                    .with(keys::LINE_COLOR, line)
                    .with(keys::PREV_CELL_ID, prev_cell_id.as_ref().map(CellId::as_str))
                    .with(keys::IS_PATH_CELL, true)]
            }
        }
    }

    /// Patches for each step, eagerly.
    pub fn apply_all<'a, I>(&self, steps: I) -> Vec<Vec<CellPatch>>
    where
        I: IntoIterator<Item = &'a SolutionStep>,
    {
        steps.into_iter().map(|step| self.apply_visual(step)).collect()
    }

    fn frontier(&self, id: &CellId) -> CellPatch {
        CellPatch::merge(id.clone())
            .with(keys::COLOR, self.enqueued.background.as_str())
            .with(keys::IS_PATH_CELL, false)
    }

    fn expanded(&self, id: &CellId) -> CellPatch {
        CellPatch::merge(id.clone())
            .with(keys::COLOR, self.visited.background.as_str())
            .with(keys::IS_PATH_CELL, false)
    }
}

fn score_text(cell: &ScoredCell) -> Value {
    json!({ "g": cell.g, "h": cell.h, "f": cell.f })
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_history::CellHistory;

    fn id(s: &str) -> CellId {
        CellId::from(s)
    }

    #[test]
    fn search_step_colors_frontier_then_visited() {
        let schema = VisualSchema::default();
        let patches = schema.apply_visual(&SolutionStep::Search {
            visited: id("0,0"),
            enqueued: vec![id("0,1"), id("1,0")],
        });

        let ids: Vec<_> = patches.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, ["0,1", "1,0", "0,0"]);
        assert_eq!(patches[0].get(keys::COLOR), Some(&json!("#023047")));
        assert_eq!(patches[2].get(keys::COLOR), Some(&json!("#b0c4b1")));
        assert_eq!(patches[2].get(keys::IS_PATH_CELL), Some(&json!(false)));
    }

    #[test]
    fn expand_step_carries_scores() {
        let patches = VisualSchema::default().apply_visual(&SolutionStep::Expand {
            visited: id("0,0"),
            scored: vec![ScoredCell { id: id("0,1"), g: 1, h: 7, f: 8 }],
        });

        assert_eq!(patches[0].get(keys::TEXT), Some(&json!({"g": 1, "h": 7, "f": 8})));
        assert_eq!(patches[1].get(keys::TEXT), None);
    }

    #[test]
    fn path_step_marks_the_path() {
        let patches = VisualSchema::default().apply_visual(&SolutionStep::Path {
            found_path: id("0,1"),
            prev_cell_id: Some(id("0,0")),
        });

        assert_eq!(patches.len(), 1);
        let patch = &patches[0];
        assert_eq!(patch.get(keys::COLOR), Some(&json!("grey")));
        assert_eq!(patch.get(keys::LINE_COLOR), Some(&json!("#ffb703")));
        assert_eq!(patch.get(keys::PREV_CELL_ID), Some(&json!("0,0")));
        assert_eq!(patch.get(keys::IS_PATH_CELL), Some(&json!(true)));
    }

    #[test]
    fn path_over_visited_cell_undoes_cleanly() {
        let schema = VisualSchema::default();
        let mut history = CellHistory::new();

        history.apply_step(schema.apply_visual(&SolutionStep::Search {
            visited: id("0,0"),
            enqueued: vec![],
        }));
        let before = history.get_state();

        history.apply_step(schema.apply_visual(&SolutionStep::Path {
            found_path: id("0,0"),
            prev_cell_id: Some(id("0,1")),
        }));
        assert_eq!(history.cell("0,0").unwrap().get_str(keys::LINE_COLOR), Some("#ffb703"));

        history.undo();
        assert_eq!(history.get_state(), before);
    }

    #[test]
    fn schema_without_line_color_leaves_it_unset() {
        let schema = VisualSchema {
            found_path: CellColors::new("red"),
            ..VisualSchema::default()
        };
        let mut history = CellHistory::new();
        history.apply_step(schema.apply_visual(&SolutionStep::Path {
            found_path: id("0,0"),
            prev_cell_id: None,
        }));

        let cell = history.cell("0,0").unwrap();
        assert_eq!(cell.get(keys::LINE_COLOR), None);
        assert_eq!(cell.get(keys::PREV_CELL_ID), None);
    }
}
