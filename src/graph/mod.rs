mod builder;

pub use builder::CallGraphBuilder;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use thiserror::Error;

use crate::parser::FrontEndError;

/// Call graph errors
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("failed to enumerate callees: {0}")]
    FrontEnd(#[from] FrontEndError),

    #[error("call graph traversal failed: {0}")]
    Traversal(String),
}

/// One entry in a caller's callee list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
    /// A call target defined in this translation unit
    Defined(String),
    /// A call target with no visible definition in this translation unit.
    /// Carries the target's spelling so the caller can be warned about it,
    /// without the name being treated as a symbol to retain.
    Undefined { name: String },
}

/// Source of per-caller callee lists.
///
/// The closure engine traverses through this trait, so it can be driven by
/// a fabricated graph in tests as easily as by a real translation unit.
pub trait CalleeSource {
    fn callees_of(&self, caller: &str) -> Result<Vec<Callee>, GraphError>;
}

/// The static call graph of one translation unit.
///
/// Nodes are the unit's defined function names; edges point from caller to
/// callee. Calls to functions with no visible definition are kept off the
/// graph and recorded per caller. Built once, read-only afterwards.
#[derive(Debug, Default)]
pub struct CallGraph {
    /// The underlying directed graph; nodes carry function names
    inner: DiGraph<String, ()>,

    /// Map from function name to node index
    node_map: HashMap<String, NodeIndex>,

    /// Per-caller call targets with no definition in the unit
    undefined: HashMap<String, Vec<String>>,
}

impl CallGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a defined function to the graph (idempotent)
    pub fn add_function(&mut self, name: impl Into<String>) -> NodeIndex {
        let name = name.into();
        match self.node_map.get(&name) {
            Some(&index) => index,
            None => {
                let index = self.inner.add_node(name.clone());
                self.node_map.insert(name, index);
                index
            }
        }
    }

    /// Record a call between two defined functions. Both endpoints must
    /// already be in the graph; repeated calls to the same target collapse
    /// into one edge.
    pub fn add_call(&mut self, caller: &str, callee: &str) {
        if let (Some(&from), Some(&to)) = (self.node_map.get(caller), self.node_map.get(callee)) {
            if self.inner.find_edge(from, to).is_none() {
                self.inner.add_edge(from, to, ());
            }
        }
    }

    /// Record a call to a function with no definition in the unit,
    /// deduplicated per caller
    pub fn add_undefined_call(&mut self, caller: &str, callee: &str) {
        let targets = self.undefined.entry(caller.to_string()).or_default();
        if !targets.iter().any(|t| t == callee) {
            targets.push(callee.to_string());
        }
    }

    /// Check whether a function is defined in the unit
    pub fn is_defined(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Get the number of defined functions
    pub fn function_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Get the number of distinct defined-to-defined calls
    pub fn call_count(&self) -> usize {
        self.inner.edge_count()
    }
}

impl CalleeSource for CallGraph {
    /// The callees of a caller: defined targets first, then undefined
    /// markers. A caller that is not a defined function simply has no
    /// callees; that is not an error.
    fn callees_of(&self, caller: &str) -> Result<Vec<Callee>, GraphError> {
        let mut callees = Vec::new();

        if let Some(&index) = self.node_map.get(caller) {
            for edge in self
                .inner
                .edges_directed(index, petgraph::Direction::Outgoing)
            {
                if let Some(name) = self.inner.node_weight(edge.target()) {
                    callees.push(Callee::Defined(name.clone()));
                }
            }
        }

        if let Some(targets) = self.undefined.get(caller) {
            callees.extend(
                targets
                    .iter()
                    .map(|name| Callee::Undefined { name: name.clone() }),
            );
        }

        Ok(callees)
    }
}
