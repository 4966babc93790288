//! Error types for the graph engine.

use thiserror::Error;

/// The engine's three failure kinds (`SPEC_FULL.md` §7). `Allocation` is
/// reachable only through construction the standard library's own
/// allocator would never trigger on its own (it aborts the process
/// instead) — it exists for interface fidelity with the original design,
/// which ran atop a allocator that could return null.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum GraphError {
    #[error("allocation failure while growing a graph row")]
    Allocation,

    #[error("render_parents called without a preceding add_commit")]
    MalformedSequence,
}
