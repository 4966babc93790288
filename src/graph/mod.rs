//! The commit-graph rendering engine.
//!
//! [`Engine`] is the façade described in `SPEC_FULL.md` §4.7: it picks a
//! [`Strategy`] at construction time and forwards every operation to either
//! the legacy single-row engine ([`v1`]) or the richer four-row engine
//! ([`v2`]). Callers that only ever use one strategy can reach for
//! [`v1::V1Engine`] / [`v2::V2Engine`] directly; `Engine` exists for callers
//! (like the `railgraph` CLI) that want the strategy to be a runtime choice.

pub mod colors;
mod intern;
pub mod symbol;
pub mod v1;
pub mod v2;

use symbol::{LegacySymbol, Symbol};

pub use crate::error::GraphError;

/// Which rendering strategy an [`Engine`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The legacy, single-row strategy.
    V1,
    /// The richer previous/current/next/parents strategy.
    V2,
}

/// One column's rendered symbol, tagged with which strategy produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasSymbol {
    V1(LegacySymbol),
    V2(Symbol),
}

impl CanvasSymbol {
    pub fn commit(&self) -> bool {
        match self {
            CanvasSymbol::V1(s) => s.commit,
            CanvasSymbol::V2(s) => s.commit,
        }
    }

    pub fn merge(&self) -> bool {
        match self {
            CanvasSymbol::V1(s) => s.merge,
            CanvasSymbol::V2(s) => s.merge,
        }
    }

    pub fn initial(&self) -> bool {
        match self {
            CanvasSymbol::V1(s) => s.initial,
            CanvasSymbol::V2(s) => s.initial,
        }
    }

    pub fn boundary(&self) -> bool {
        match self {
            CanvasSymbol::V1(s) => s.boundary,
            CanvasSymbol::V2(s) => s.boundary,
        }
    }

    /// The color a caller iterating the canvas should key off of: the
    /// commit dot reports the distinguished commit color rather than
    /// whatever pool color the column itself carries.
    pub fn color_id(&self) -> u8 {
        match self {
            CanvasSymbol::V1(s) => s.color_id(),
            CanvasSymbol::V2(s) => s.color_id(),
        }
    }

    pub fn to_utf8(&self) -> &'static str {
        match self {
            CanvasSymbol::V1(s) => s.to_utf8(),
            CanvasSymbol::V2(s) => s.to_utf8(),
        }
    }

    pub fn to_ascii(&self) -> &'static str {
        match self {
            CanvasSymbol::V1(s) => s.to_ascii(),
            CanvasSymbol::V2(s) => s.to_ascii(),
        }
    }

    pub fn to_line_drawing(&self) -> [symbol::LineDrawing; 2] {
        match self {
            CanvasSymbol::V1(s) => s.to_line_drawing(),
            CanvasSymbol::V2(s) => s.to_line_drawing(),
        }
    }
}

/// The sequence of symbols emitted for one commit. Caller-owned and
/// append-only: the engine writes into it via [`Canvas::push`] during
/// `render_parents` and never touches it again afterward.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    symbols: Vec<CanvasSymbol>,
}

impl Canvas {
    pub fn push(&mut self, symbol: CanvasSymbol) {
        self.symbols.push(symbol);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[CanvasSymbol] {
        &self.symbols
    }

    /// The first symbol's `merge` flag — §6's `is_merge`.
    pub fn is_merge(&self) -> bool {
        self.symbols.first().map(CanvasSymbol::merge).unwrap_or(false)
    }

    /// Iterate symbols in column order, reporting whether each is the first
    /// in the canvas — §6's `foreach_symbol`.
    pub fn foreach_symbol(&self, mut visitor: impl FnMut(&CanvasSymbol, bool)) {
        for (i, symbol) in self.symbols.iter().enumerate() {
            visitor(symbol, i == 0);
        }
    }
}

/// Strategy-dispatching façade over [`v1::V1Engine`] / [`v2::V2Engine`].
#[derive(Debug)]
pub enum Engine {
    V1(v1::V1Engine),
    V2(v2::V2Engine),
}

impl Engine {
    pub fn new(strategy: Strategy) -> Self {
        match strategy {
            Strategy::V1 => Engine::V1(v1::V1Engine::new()),
            Strategy::V2 => Engine::V2(v2::V2Engine::new()),
        }
    }

    pub fn add_parent(&mut self, parent: Option<&str>) -> Result<(), GraphError> {
        match self {
            Engine::V1(e) => e.add_parent(parent),
            Engine::V2(e) => e.add_parent(parent),
        }
    }

    pub fn add_commit(
        &mut self,
        canvas: &mut Canvas,
        id: &str,
        parents: &str,
        is_boundary: bool,
    ) -> Result<(), GraphError> {
        match self {
            Engine::V1(e) => e.add_commit(canvas, id, parents, is_boundary),
            Engine::V2(e) => e.add_commit(canvas, id, parents, is_boundary),
        }
    }

    pub fn render_parents(&mut self, canvas: &mut Canvas) -> Result<(), GraphError> {
        match self {
            Engine::V1(e) => e.render_parents(canvas),
            Engine::V2(e) => e.render_parents(canvas),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_dispatches_to_selected_strategy() {
        for strategy in [Strategy::V1, Strategy::V2] {
            let mut engine = Engine::new(strategy);
            let mut canvas = Canvas::default();
            engine.add_commit(&mut canvas, "a", "", false).unwrap();
            engine.render_parents(&mut canvas).unwrap();
            assert_eq!(canvas.len(), 1);
            assert!(canvas.symbols()[0].commit());
            assert!(canvas.symbols()[0].initial());
        }
    }

    #[test]
    fn render_without_add_commit_is_malformed() {
        let mut engine = Engine::new(Strategy::V2);
        let mut canvas = Canvas::default();
        assert_eq!(
            engine.render_parents(&mut canvas),
            Err(GraphError::MalformedSequence)
        );
    }
}
