//! Cell patches and the state they build.
//!
//! A cell's visual state is a flat map of named JSON values. Patches change
//! that map in one of three ways:
//!
//! - [`CellPatch::Merge`] sets fields. `null` removes a field, and an object
//!   merges into an existing object key by key (recursively, with the same
//!   `null` rule).
//! - [`CellPatch::Replace`] overwrites the whole state.
//! - [`CellPatch::Delete`] removes the cell.
//!
//! Backward patches recorded by the history are always `Replace` or
//! `Delete`, so undoing a step never depends on how it was expressed.

use std::collections::BTreeMap;

use labyrinth_grid::CellId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named values of one cell.
pub type Fields = BTreeMap<String, Value>;

/// Accumulated visual state of one cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellState {
    fields: Fields,
}

impl CellState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The field as a string, if it is one.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Apply merge semantics for every entry of `fields`.
    pub(crate) fn merge(&mut self, fields: &Fields) {
        for (key, value) in fields {
            match value {
                Value::Null => {
                    self.fields.remove(key);
                }
                Value::Object(incoming) => {
                    let slot = self
                        .fields
                        .entry(key.clone())
                        .or_insert_with(|| Value::Object(Map::new()));
                    merge_object(slot, incoming);
                }
                other => {
                    self.fields.insert(key.clone(), other.clone());
                }
            }
        }
    }
}

impl From<Fields> for CellState {
    fn from(fields: Fields) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for CellState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Merge `incoming` into `slot`. A non-object slot is replaced.
fn merge_object(slot: &mut Value, incoming: &Map<String, Value>) {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    let Value::Object(target) = slot else {
        return;
    };

    for (key, value) in incoming {
        match value {
            Value::Null => {
                target.remove(key);
            }
            Value::Object(nested) => {
                let entry = target
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                merge_object(entry, nested);
            }
            other => {
                target.insert(key.clone(), other.clone());
            }
        }
    }
}

/// One change to one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CellPatch {
    /// Set or remove individual fields.
    Merge { id: CellId, fields: Fields },
    /// Overwrite the whole state.
    Replace { id: CellId, fields: Fields },
    /// Remove the cell.
    Delete { id: CellId },
}

impl CellPatch {
    /// An empty merge patch, filled with [`CellPatch::with`].
    pub fn merge(id: impl Into<CellId>) -> Self {
        CellPatch::Merge {
            id: id.into(),
            fields: Fields::new(),
        }
    }

    pub fn replace(id: impl Into<CellId>, fields: Fields) -> Self {
        CellPatch::Replace { id: id.into(), fields }
    }

    pub fn delete(id: impl Into<CellId>) -> Self {
        CellPatch::Delete { id: id.into() }
    }

    /// Set `key` to `value`. A no-op on [`CellPatch::Delete`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Some(fields) = self.fields_mut() {
            fields.insert(key.into(), value.into());
        }
        self
    }

    /// Mark `key` for removal. A no-op on [`CellPatch::Delete`].
    pub fn unset(self, key: impl Into<String>) -> Self {
        self.with(key, Value::Null)
    }

    pub fn id(&self) -> &CellId {
        match self {
            CellPatch::Merge { id, .. }
            | CellPatch::Replace { id, .. }
            | CellPatch::Delete { id } => id,
        }
    }

    pub fn fields(&self) -> Option<&Fields> {
        match self {
            CellPatch::Merge { fields, .. } | CellPatch::Replace { fields, .. } => Some(fields),
            CellPatch::Delete { .. } => None,
        }
    }

    fn fields_mut(&mut self) -> Option<&mut Fields> {
        match self {
            CellPatch::Merge { fields, .. } | CellPatch::Replace { fields, .. } => Some(fields),
            CellPatch::Delete { .. } => None,
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, CellPatch::Delete { .. })
    }

    /// The field value this patch writes, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields().and_then(|f| f.get(key))
    }

    /// State of the cell after applying this patch to `current`.
    ///
    /// `None` means the cell does not exist afterwards.
    pub fn apply(&self, current: Option<&CellState>) -> Option<CellState> {
        match self {
            CellPatch::Merge { fields, .. } => {
                let mut state = current.cloned().unwrap_or_default();
                state.merge(fields);
                Some(state)
            }
            CellPatch::Replace { fields, .. } => Some(CellState::from(fields.clone())),
            CellPatch::Delete { .. } => None,
        }
    }

    /// Fold a later patch for the same cell into this one.
    ///
    /// Later fields win and objects written by both combine key by key at
    /// every depth. A later `Replace` or `Delete` supersedes everything
    /// before it. `None` when the pair cannot be written as one patch: an
    /// object landing on an earlier `null` or scalar resets that value, which
    /// a merge cannot express.
    pub(crate) fn absorb(self, later: CellPatch) -> Option<CellPatch> {
        match (self, later) {
            (_, later @ (CellPatch::Replace { .. } | CellPatch::Delete { .. })) => Some(later),
            (CellPatch::Merge { id, fields: mut base }, CellPatch::Merge { fields, .. }) => {
                for (key, value) in fields {
                    let combined = combine_value(base.remove(&key), value)?;
                    base.insert(key, combined);
                }
                Some(CellPatch::Merge { id, fields: base })
            }
            (CellPatch::Replace { id, fields: base }, CellPatch::Merge { fields, .. }) => {
                let mut state = CellState::from(base);
                state.merge(&fields);
                Some(CellPatch::Replace { id, fields: state.into_fields() })
            }
            (CellPatch::Delete { id }, CellPatch::Merge { fields, .. }) => {
                let mut state = CellState::new();
                state.merge(&fields);
                Some(CellPatch::Replace { id, fields: state.into_fields() })
            }
        }
    }
}

/// One merge value standing for `earlier` followed by `later`.
///
/// Nulls stay as removal markers.
fn combine_value(earlier: Option<Value>, later: Value) -> Option<Value> {
    match (earlier, later) {
        (Some(Value::Object(mut base)), Value::Object(incoming)) => {
            for (key, value) in incoming {
                let combined = combine_value(base.remove(&key), value)?;
                base.insert(key, combined);
            }
            Some(Value::Object(base))
        }
        (Some(_), Value::Object(_)) => None,
        (_, later) => Some(later),
    }
}
