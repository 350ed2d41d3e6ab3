//! The gem table: every component of a build model, indexed by position.

use std::collections::HashMap;
use std::fmt;

use gemcut_util::errors::GemcutError;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

/// A single gem: its name, its build handle and the gems it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemEntry {
    pub name: String,
    /// Identifier the host build uses for this gem's init/final symbols.
    /// Never interpreted by the resolver.
    pub cname: String,
    /// Indices into the owning table, in declaration order.
    pub deps: Vec<usize>,
}

impl GemEntry {
    /// Create an entry whose `cname` is derived from `name`.
    pub fn new(name: impl Into<String>, deps: Vec<usize>) -> Self {
        let name = name.into();
        let cname = default_cname(&name);
        Self { name, cname, deps }
    }

    pub fn with_cname(mut self, cname: impl Into<String>) -> Self {
        self.cname = cname.into();
        self
    }
}

impl fmt::Display for GemEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Turn a gem name into a C identifier fragment (`mruby-print` -> `mruby_print`).
pub fn default_cname(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Whether `s` can be spliced into a C symbol name.
pub fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The immutable component table of one build model plus its name index.
///
/// Entries keep their construction order; a gem's position is its index.
/// Dependency edges are mirrored into a petgraph graph so both directions can
/// be walked without rescanning the table.
#[derive(Debug, Clone)]
pub struct GemTable {
    entries: Vec<GemEntry>,
    index: HashMap<String, usize>,
    graph: DiGraph<usize, ()>,
}

impl GemTable {
    /// Build a table, rejecting duplicate names, `cname`s that are not C
    /// identifiers, repeated dependencies and dependency indices outside the
    /// table.
    pub fn new(entries: Vec<GemEntry>) -> Result<Self, GemcutError> {
        let mut index = HashMap::with_capacity(entries.len());
        let mut graph = DiGraph::with_capacity(entries.len(), 0);

        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), i).is_some() {
                return Err(GemcutError::Manifest {
                    message: format!("gem '{}' is declared more than once", entry.name),
                });
            }
            if !is_c_identifier(&entry.cname) {
                return Err(GemcutError::Manifest {
                    message: format!(
                        "gem '{}' has cname '{}', which is not a C identifier",
                        entry.name, entry.cname
                    ),
                });
            }
            graph.add_node(i);
        }

        for (i, entry) in entries.iter().enumerate() {
            for (pos, &dep) in entry.deps.iter().enumerate() {
                if dep >= entries.len() {
                    return Err(GemcutError::Manifest {
                        message: format!(
                            "gem '{}' depends on index {dep}, but the table has {} gems",
                            entry.name,
                            entries.len()
                        ),
                    });
                }
                if entry.deps[..pos].contains(&dep) {
                    return Err(GemcutError::Manifest {
                        message: format!(
                            "gem '{}' lists dependency '{}' more than once",
                            entry.name, entries[dep].name
                        ),
                    });
                }
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(dep), ());
            }
        }

        tracing::debug!(gems = entries.len(), edges = graph.edge_count(), "built gem table");

        Ok(Self {
            entries,
            index,
            graph,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[GemEntry] {
        &self.entries
    }

    /// Panics if `idx` is out of range.
    pub fn entry(&self, idx: usize) -> &GemEntry {
        &self.entries[idx]
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.entries[idx].name
    }

    /// Look up a gem's index by exact, case-sensitive name.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Direct dependencies of a gem, in declaration order.
    pub fn dependencies_of(&self, idx: usize) -> &[usize] {
        &self.entries[idx].deps
    }

    /// Gems whose dependency list contains `idx`, ascending.
    pub fn dependents_of(&self, idx: usize) -> Vec<usize> {
        let mut dependents: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Incoming)
            .map(|n| self.graph[n])
            .collect();
        dependents.sort_unstable();
        dependents.dedup();
        dependents
    }

    /// Total number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
