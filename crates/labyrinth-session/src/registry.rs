//! Available algorithms, passed into a session at construction.

use labyrinth_gen::GeneratorKind;
use labyrinth_solve::SolverKind;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// What a registered algorithm can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgoFeature {
    /// Can be advanced one step at a time.
    SteppedExecution,
    /// Can be run straight to its final result.
    JumpToFinal,
}

/// A pathfinding algorithm under a numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverEntry {
    pub id: u32,
    pub name: String,
    pub kind: SolverKind,
    pub features: Vec<AlgoFeature>,
}

impl SolverEntry {
    pub fn new(id: u32, kind: SolverKind) -> Self {
        Self {
            id,
            name: kind.name().to_owned(),
            kind,
            features: vec![AlgoFeature::SteppedExecution, AlgoFeature::JumpToFinal],
        }
    }

    pub fn supports(&self, feature: AlgoFeature) -> bool {
        self.features.contains(&feature)
    }

    pub(crate) fn require(&self, feature: AlgoFeature) -> Result<()> {
        if self.supports(feature) {
            Ok(())
        } else {
            Err(Error::Unsupported {
                algorithm: self.name.clone(),
                feature,
            })
        }
    }
}

/// Solvers known to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverRegistry {
    entries: Vec<SolverEntry>,
}

impl Default for SolverRegistry {
    /// A* under id 0, breadth-first search under id 1.
    fn default() -> Self {
        Self {
            entries: vec![
                SolverEntry::new(0, SolverKind::AStar),
                SolverEntry::new(1, SolverKind::BreadthFirstSearch),
            ],
        }
    }
}

impl SolverRegistry {
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add `entry`, replacing any entry with the same id.
    pub fn register(&mut self, entry: SolverEntry) {
        self.entries.retain(|e| e.id != entry.id);
        self.entries.push(entry);
    }

    pub fn by_id(&self, id: u32) -> Result<&SolverEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::UnknownSolver(format!("with id {id}")))
    }

    pub fn id_by_name(&self, name: &str) -> Result<u32> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.id)
            .ok_or_else(|| Error::UnknownSolver(format!("with name {name}")))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[SolverEntry] {
        &self.entries
    }
}

/// A maze generator under a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorEntry {
    pub name: String,
    pub kind: GeneratorKind,
}

/// Generators known to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorRegistry {
    entries: Vec<GeneratorEntry>,
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self {
            entries: GeneratorKind::ALL
                .into_iter()
                .map(|kind| GeneratorEntry {
                    name: kind.name().to_owned(),
                    kind,
                })
                .collect(),
        }
    }
}

impl GeneratorRegistry {
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add `kind` under `name`, replacing any entry with that name.
    pub fn register(&mut self, name: impl Into<String>, kind: GeneratorKind) {
        let name = name.into();
        self.entries.retain(|e| e.name != name);
        self.entries.push(GeneratorEntry { name, kind });
    }

    pub fn by_name(&self, name: &str) -> Result<&GeneratorEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| Error::UnknownGenerator(name.to_owned()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// The first registered generator, used when none is configured.
    pub fn first(&self) -> Option<&GeneratorEntry> {
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_solvers_keep_their_ids() {
        let solvers = SolverRegistry::default();

        assert_eq!(solvers.by_id(0).unwrap().kind, SolverKind::AStar);
        assert_eq!(solvers.by_id(1).unwrap().kind, SolverKind::BreadthFirstSearch);
        assert_eq!(solvers.id_by_name("breadth first search").unwrap(), 1);
        assert_eq!(solvers.names().collect::<Vec<_>>(), ["A*", "breadth first search"]);
    }

    #[test]
    fn unknown_solver_lookups_fail() {
        let solvers = SolverRegistry::default();

        assert!(matches!(solvers.by_id(7), Err(Error::UnknownSolver(_))));
        assert!(matches!(solvers.id_by_name("dfs"), Err(Error::UnknownSolver(_))));
    }

    #[test]
    fn register_replaces_same_id() {
        let mut solvers = SolverRegistry::default();
        let mut entry = SolverEntry::new(0, SolverKind::BreadthFirstSearch);
        entry.features = vec![AlgoFeature::JumpToFinal];
        solvers.register(entry);

        let entry = solvers.by_id(0).unwrap();
        assert_eq!(entry.kind, SolverKind::BreadthFirstSearch);
        assert!(!entry.supports(AlgoFeature::SteppedExecution));
        assert!(matches!(
            entry.require(AlgoFeature::SteppedExecution),
            Err(Error::Unsupported { feature: AlgoFeature::SteppedExecution, .. })
        ));
        assert_eq!(solvers.entries().len(), 2);
    }

    #[test]
    fn generators_by_name() {
        let generators = GeneratorRegistry::default();

        assert_eq!(generators.by_name("kruskal").unwrap().kind, GeneratorKind::Kruskal);
        assert_eq!(
            generators.by_name("recursive backtracking").unwrap().kind,
            GeneratorKind::RecursiveBacktracking
        );
        assert!(matches!(generators.by_name("prim"), Err(Error::UnknownGenerator(_))));
        assert_eq!(generators.first().unwrap().name, "kruskal");
    }

    #[test]
    fn custom_generator_names() {
        let mut generators = GeneratorRegistry::empty();
        generators.register("dfs", GeneratorKind::RecursiveBacktracking);

        assert_eq!(generators.names().collect::<Vec<_>>(), ["dfs"]);
        assert!(generators.by_name("kruskal").is_err());
        assert!(SolverRegistry::empty().by_id(0).is_err());
    }
}
