use crate::graph::{Callee, CalleeSource, GraphError};
use crate::symbols::SymbolSet;
use tracing::debug;

/// A call from a kept function to a function with no visible definition.
///
/// Non-fatal: the pruned output may reference a function absent from the
/// final file, and the user should hear about it. There is nothing to add
/// to the keep-set — an undefined symbol has no definition to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedCall {
    pub caller: String,
    pub callee: String,
}

/// Engine computing the reachability closure of a keep-set over the calls
/// relation: the smallest superset of the initial set in which every
/// defined callee of every member is itself a member.
pub struct ClosureEngine;

impl ClosureEngine {
    pub fn new() -> Self {
        Self
    }

    /// Expand `keep` in place to its closure under calls.
    ///
    /// Callees accumulate in a separate set rather than in `keep` itself, so
    /// `keep` is never mutated while being iterated; the accumulator is
    /// unioned back in once every traversal has finished. Idempotent
    /// insertion into the accumulator doubles as the visited marker:
    /// re-reaching an accumulated symbol is a no-op, which bounds the
    /// worklist by the number of distinct symbols and makes cycles safe
    /// without a separate guard.
    ///
    /// Undefined call targets are collected as warnings and never retained.
    /// Any hard error from the callee source aborts the whole computation.
    pub fn expand(
        &self,
        keep: &mut SymbolSet,
        graph: &impl CalleeSource,
    ) -> Result<Vec<UndefinedCall>, GraphError> {
        let mut callees = SymbolSet::new();
        let mut warnings = Vec::new();
        let mut worklist: Vec<String> = keep.iter().cloned().collect();

        while let Some(caller) = worklist.pop() {
            for callee in graph.callees_of(&caller)? {
                match callee {
                    Callee::Defined(name) => {
                        if callees.insert(name.clone()) {
                            worklist.push(name);
                        }
                    }
                    Callee::Undefined { name } => {
                        warnings.push(UndefinedCall {
                            caller: caller.clone(),
                            callee: name,
                        });
                    }
                }
            }
        }

        debug!(
            "closure reached {} callees from {} kept symbols",
            callees.len(),
            keep.len()
        );
        keep.union(callees);

        Ok(warnings)
    }
}

impl Default for ClosureEngine {
    fn default() -> Self {
        Self::new()
    }
}
