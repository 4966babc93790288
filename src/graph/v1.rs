//! The legacy (v1) rendering strategy.
//!
//! v1 decides each column's glyph from a single current row plus the
//! pending parents list — no lookback/lookahead rows, no interning, no
//! shift/flanked bookkeeping. It trades some visual richness (see
//! `SPEC_FULL.md` §4.6) for a simpler, single-row state machine. Every
//! quirk below (the `too`/`branched` dance in [`V1Engine::insert_parents`],
//! the last-empty-column tie-break in [`find_column_by_id`]) mirrors the
//! original engine rather than a cleaned-up reimplementation of its intent —
//! this strategy is kept precisely so that callers who select it get the
//! same picture they always did.

use super::colors::ColorPoolV1;
use super::symbol::LegacySymbol;
use super::{Canvas, CanvasSymbol, GraphError};

#[derive(Debug, Clone, Default)]
struct Column {
    /// Empty string means the column holds no tip, mirroring the original's
    /// `id[0] == 0` check on a fixed-width buffer.
    id: String,
    symbol: LegacySymbol,
}

impl Column {
    fn has_commit(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Unlike v2's `find_column_by_id`, this returns the *last* untracked empty
/// column seen before a match (or before running off the end), not the
/// first. That is the legacy engine's actual behavior, not a bug introduced
/// here — see `SPEC_FULL.md` §9.
fn find_column_by_id(row: &[Column], id: &str) -> usize {
    let mut free_column = row.len();
    for (i, column) in row.iter().enumerate() {
        if !column.has_commit() {
            free_column = i;
        } else if column.id == id {
            return i;
        }
    }
    free_column
}

fn insert_column(row: &mut Vec<Column>, pos: usize, id: &str, is_boundary: bool) {
    let column = Column {
        id: id.to_string(),
        symbol: LegacySymbol {
            boundary: is_boundary,
            ..Default::default()
        },
    };
    row.insert(pos, column);
}

#[derive(Debug, Default)]
pub struct V1Engine {
    row: Vec<Column>,
    parents: Vec<Column>,
    position: usize,
    expanded: usize,
    id: String,
    colors: ColorPoolV1,
    has_parents: bool,
    is_boundary: bool,
    commit_set: bool,
}

impl V1Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_parent(&mut self, parent: Option<&str>) -> Result<(), GraphError> {
        if self.has_parents {
            return Ok(());
        }
        let pos = self.parents.len();
        insert_column(&mut self.parents, pos, parent.unwrap_or(""), self.is_boundary);
        Ok(())
    }

    /// `canvas` is accepted but unused, matching the original engine's
    /// per-strategy function-pointer shape: `render_parents` is the call
    /// that actually appends to it.
    pub fn add_commit(
        &mut self,
        _canvas: &mut Canvas,
        id: &str,
        parents: &str,
        is_boundary: bool,
    ) -> Result<(), GraphError> {
        self.position = find_column_by_id(&self.row, id);
        self.id = id.to_string();
        self.is_boundary = is_boundary;
        self.has_parents = false;
        self.commit_set = true;

        let mut seen = 0;
        for token in parents.split_whitespace() {
            self.add_parent(Some(token))?;
            seen += 1;
        }
        if self.parents.is_empty() {
            self.add_parent(None)?;
        }
        self.has_parents = seen > 0;

        Ok(())
    }

    fn needs_expansion(&self) -> bool {
        self.position + self.parents.len() > self.row.len()
    }

    fn expand(&mut self) {
        while self.needs_expansion() {
            let pos = self.position + self.expanded;
            insert_column(&mut self.row, pos, "", self.is_boundary);
            self.expanded += 1;
        }
    }

    fn needs_collapsing(&self) -> bool {
        self.row.len() > 1 && !self.row[self.row.len() - 1].has_commit()
    }

    fn collapse(&mut self) {
        while self.needs_collapsing() {
            self.row.pop();
        }
    }

    fn insert_parents(&mut self, canvas: &mut Canvas) {
        let merge = self.parents.len() > 1;
        let mut branched = false;

        // Pass 1: columns to the left of the commit's own column.
        for pos in 0..self.position {
            let mut symbol = self.row[pos].symbol;

            if self.row[pos].has_commit() {
                let id = self.row[pos].id.clone();
                if find_column_by_id(&self.parents, &id) < self.parents.len() {
                    self.row[pos].symbol.initial = true;
                }
                symbol.branch = true;
            }

            symbol.vbranch = branched;
            if self.row[pos].id == self.id {
                branched = true;
                self.row[pos].id.clear();
            }

            canvas.push(CanvasSymbol::V1(symbol));
        }

        // Pass 2: the commit's own column and its parents' columns.
        for pos in self.position..self.position + self.parents.len() {
            let parent_idx = pos - self.position;
            let mut symbol = self.row[pos].symbol;
            symbol.merge = merge;

            if pos == self.position {
                symbol.commit = true;
                if self.parents[parent_idx].symbol.boundary {
                    symbol.boundary = true;
                } else if !self.parents[parent_idx].has_commit() {
                    symbol.initial = true;
                }
            } else if self.row[pos].id == self.parents[parent_idx].id {
                symbol.vbranch = true;
                symbol.branch = true;
            } else if self.parents.len() > 1 {
                symbol.merge = true;
                symbol.vbranch = pos != self.position + self.parents.len() - 1;
            } else if self.row[pos].has_commit() {
                symbol.branch = true;
            }

            canvas.push(CanvasSymbol::V1(symbol));

            if !self.row[pos].has_commit() {
                self.parents[parent_idx].symbol.color = self.colors.get_free_color();
            }
            self.row[pos] = self.parents[parent_idx].clone();
        }

        // Pass 3: columns to the right of the parents, unaffected by this commit.
        for pos in self.position + self.parents.len()..self.row.len() {
            let too = self.row[self.row.len() - 1].id == self.id;
            let mut symbol = self.row[pos].symbol;
            symbol.vbranch = too;

            if !self.row[pos].id.is_empty() {
                symbol.branch = true;
                if self.row[pos].id == self.id {
                    symbol.branched = true;
                    symbol.vbranch = too && pos != self.row.len() - 1;
                    self.row[pos].id.clear();
                }
            }

            canvas.push(CanvasSymbol::V1(symbol));
        }

        self.parents.clear();
        self.expanded = 0;
        self.position = 0;
    }

    pub fn render_parents(&mut self, canvas: &mut Canvas) -> Result<(), GraphError> {
        if !self.commit_set {
            return Err(GraphError::MalformedSequence);
        }
        self.expand();
        self.insert_parents(canvas);
        self.collapse();
        self.commit_set = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(engine: &mut V1Engine, id: &str, parents: &str, boundary: bool) -> Canvas {
        let mut canvas = Canvas::default();
        engine.add_commit(&mut canvas, id, parents, boundary).unwrap();
        engine.render_parents(&mut canvas).unwrap();
        canvas
    }

    #[test]
    fn linear_history_stays_in_one_column() {
        let mut engine = V1Engine::new();
        let a = render(&mut engine, "a", "b", false);
        let b = render(&mut engine, "b", "c", false);
        let c = render(&mut engine, "c", "", false);

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(c.len(), 1);
        assert!(a.symbols()[0].commit());
    }

    #[test]
    fn root_commit_is_initial() {
        let mut engine = V1Engine::new();
        let canvas = render(&mut engine, "r", "", false);
        assert!(canvas.symbols()[0].initial());
    }

    #[test]
    fn boundary_commit_is_flagged() {
        let mut engine = V1Engine::new();
        let canvas = render(&mut engine, "x", "y", true);
        assert!(canvas.symbols()[0].boundary());
    }

    #[test]
    fn merge_commit_sets_merge_flag() {
        let mut engine = V1Engine::new();
        let canvas = render(&mut engine, "m", "a b", false);
        assert!(canvas.is_merge());
    }
}
