//! The current (v2) rendering strategy.
//!
//! Unlike v1, this strategy looks at three adjacent rows at once
//! (`prev_row`/`row`/`next_row`) plus the pending `parents` row, and derives
//! each symbol from a cascade of small topology predicates (`continued_*`,
//! `parent_*`, `flanked`, `shift_left`, ...) rather than a handful of ad hoc
//! branch/vbranch flags. Identifiers are interned (see [`super::intern`]) so
//! every comparison below is a pointer comparison, matching the original
//! engine's `htab`-interned `const char *` identity checks.

use std::sync::Arc;

use super::colors::ColorPoolV2;
use super::intern::intern;
use super::symbol::Symbol;
use super::{Canvas, CanvasSymbol, GraphError};

#[derive(Debug, Clone, Default)]
struct Column {
    id: Option<Arc<str>>,
    symbol: Symbol,
}

impl Column {
    fn has_commit(&self) -> bool {
        self.id.is_some()
    }
}

fn ids_eq(a: &Option<Arc<str>>, b: &Option<Arc<str>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

fn id_matches(a: &Option<Arc<str>>, b: &Arc<str>) -> bool {
    matches!(a, Some(x) if Arc::ptr_eq(x, b))
}

fn insert_column(row: &mut Vec<Column>, pos: usize, id: Option<&str>, is_boundary: bool) {
    let column = Column {
        id: id.map(intern),
        symbol: Symbol {
            boundary: is_boundary,
            ..Default::default()
        },
    };
    row.insert(pos, column);
}

/// First untracked empty column, or `row.len()` if none and no match — the
/// opposite tie-break from v1's `find_column_by_id` (see `SPEC_FULL.md` §9).
fn find_column_by_id(row: &[Column], id: &Arc<str>) -> usize {
    let mut free_column = row.len();
    for (i, column) in row.iter().enumerate() {
        if !column.has_commit() {
            if free_column == row.len() {
                free_column = i;
            }
        } else if id_matches(&column.id, id) {
            return i;
        }
    }
    free_column
}

fn find_free_column(row: &[Column]) -> usize {
    row.iter().position(|c| !c.has_commit()).unwrap_or(row.len())
}

fn commits_in_row(row: &[Column]) -> usize {
    row.iter().filter(|c| c.has_commit()).count()
}

fn commit_is_in_row(id: &Option<Arc<str>>, row: &[Column]) -> bool {
    row.iter().any(|c| c.has_commit() && ids_eq(&c.id, id))
}

fn clear_commit(row: &mut [Column], id: &Arc<str>) {
    for column in row.iter_mut() {
        if id_matches(&column.id, id) {
            column.id = None;
        }
    }
}

fn continued_down(row: &[Column], next_row: &[Column], pos: usize) -> bool {
    ids_eq(&row[pos].id, &next_row[pos].id) && !row[pos].symbol.shift_left
}

fn shift_left(row: &[Column], prev_row: &[Column], pos: usize) -> bool {
    if !row[pos].has_commit() {
        return false;
    }
    let mut i = pos;
    while i > 0 {
        i -= 1;
        if !row[i].has_commit() {
            continue;
        }
        if !ids_eq(&row[i].id, &row[pos].id) {
            continue;
        }
        if !continued_down(prev_row, row, i) {
            return true;
        }
        break;
    }
    false
}

fn new_column(row: &[Column], prev_row: &[Column], pos: usize) -> bool {
    if !prev_row[pos].has_commit() {
        return true;
    }
    for i in pos..row.len() {
        if ids_eq(&row[pos].id, &prev_row[i].id) {
            return false;
        }
    }
    true
}

fn continued_right(row: &[Column], pos: usize, commit_pos: usize) -> bool {
    let end = if pos < commit_pos { commit_pos } else { row.len() };
    for i in pos + 1..end {
        if ids_eq(&row[pos].id, &row[i].id) {
            return true;
        }
    }
    false
}

fn continued_left(row: &[Column], pos: usize, commit_pos: usize) -> bool {
    let start = if pos < commit_pos { 0 } else { commit_pos };
    for i in start..pos {
        if !row[i].has_commit() {
            continue;
        }
        if ids_eq(&row[pos].id, &row[i].id) {
            return true;
        }
    }
    false
}

fn parent_down(parents: &[Column], next_row: &[Column], pos: usize) -> bool {
    parents
        .iter()
        .any(|p| p.has_commit() && ids_eq(&p.id, &next_row[pos].id))
}

fn parent_right(parents: &[Column], row: &[Column], next_row: &[Column], pos: usize) -> bool {
    for parent in parents.iter().filter(|p| p.has_commit()) {
        for i in pos + 1..next_row.len() {
            if !ids_eq(&parent.id, &next_row[i].id) {
                continue;
            }
            if !ids_eq(&parent.id, &row[i].id) {
                return true;
            }
        }
    }
    false
}

fn flanked(row: &[Column], pos: usize, commit_pos: usize, commit_id: &Arc<str>) -> bool {
    let (start, end) = if pos < commit_pos {
        (0, pos)
    } else {
        (pos + 1, row.len())
    };
    for column in &row[start..end] {
        if id_matches(&column.id, commit_id) {
            return true;
        }
    }
    false
}

fn below_commit(pos: usize, row: &[Column], prev_row: &[Column], prev_position: usize) -> bool {
    pos == prev_position && ids_eq(&row[pos].id, &prev_row[pos].id)
}

fn remove_collapsed_columns(
    next_row: &mut Vec<Column>,
    prev_row: &[Column],
    parents: &[Column],
    position: usize,
    id: &Arc<str>,
) {
    if next_row.is_empty() {
        return;
    }
    let mut i = next_row.len() - 1;
    while i > 0 {
        if i == position || i == position + 1 {
            i -= 1;
            continue;
        }
        if id_matches(&next_row[i].id, id) {
            i -= 1;
            continue;
        }
        if !ids_eq(&next_row[i].id, &next_row[i - 1].id) {
            i -= 1;
            continue;
        }
        if commit_is_in_row(&next_row[i].id, parents) && !prev_row[i].has_commit() {
            i -= 1;
            continue;
        }
        let prev_mismatch =
            !ids_eq(&next_row[i - 1].id, &prev_row[i - 1].id) || prev_row[i - 1].symbol.shift_left;
        if prev_mismatch {
            if i + 1 >= next_row.len() {
                next_row[i] = Column::default();
            } else {
                next_row[i] = next_row[i + 1].clone();
            }
        }
        i -= 1;
    }
}

fn fill_empty_columns(next_row: &mut [Column]) {
    if next_row.len() < 2 {
        return;
    }
    let mut i = next_row.len() - 2;
    loop {
        if !next_row[i].has_commit() {
            next_row[i] = next_row[i + 1].clone();
        }
        if i == 0 {
            break;
        }
        i -= 1;
    }
}

#[derive(Debug)]
pub struct V2Engine {
    prev_row: Vec<Column>,
    row: Vec<Column>,
    next_row: Vec<Column>,
    parents: Vec<Column>,
    position: usize,
    prev_position: usize,
    id: Arc<str>,
    colors: ColorPoolV2,
    has_parents: bool,
    is_boundary: bool,
    commit_set: bool,
}

impl Default for V2Engine {
    fn default() -> Self {
        Self {
            prev_row: Vec::new(),
            row: Vec::new(),
            next_row: Vec::new(),
            parents: Vec::new(),
            position: 0,
            prev_position: 0,
            id: intern(""),
            colors: ColorPoolV2::default(),
            has_parents: false,
            is_boundary: false,
            commit_set: false,
        }
    }
}

impl V2Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_parent(&mut self, parent: Option<&str>) -> Result<(), GraphError> {
        if self.has_parents {
            return Ok(());
        }
        let pos = self.parents.len();
        insert_column(&mut self.parents, pos, parent, self.is_boundary);
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
        let interned = intern(id);
        self.position = find_column_by_id(&self.row, &interned);
        self.id = interned;
        self.is_boundary = is_boundary;
        self.has_parents = false;
        self.commit_set = true;

        let mut seen = 0;
        for token in parents.split_whitespace() {
            self.add_parent(Some(token))?;
            seen += 1;
        }
        self.has_parents = seen > 0;

        Ok(())
    }

    fn needs_expansion(&self) -> bool {
        self.position + self.parents.len() > self.row.len()
    }

    fn expand(&mut self) {
        let is_boundary = self.is_boundary;
        while self.needs_expansion() {
            insert_column(&mut self.prev_row, self.prev_row.len(), None, is_boundary);
            insert_column(&mut self.row, self.row.len(), None, is_boundary);
            insert_column(&mut self.next_row, self.next_row.len(), None, is_boundary);
        }
    }

    fn needs_collapsing(&self) -> bool {
        self.row.len() > 1 && !self.row[self.row.len() - 1].has_commit()
    }

    fn collapse(&mut self) {
        while self.needs_collapsing() {
            self.prev_row.pop();
            self.row.pop();
            self.next_row.pop();
        }
    }

    fn insert_parents(&mut self) {
        let is_boundary = self.is_boundary;
        let parents = self.parents.clone();
        for parent in &parents {
            if !parent.has_commit() {
                continue;
            }
            let match_idx = find_free_column(&self.next_row);
            let grow = match_idx == self.next_row.len()
                && self.next_row.last().map_or(false, Column::has_commit);
            if grow {
                let id_owned = parent.id.as_deref().map(|s| s.to_string());
                insert_column(&mut self.next_row, self.next_row.len(), id_owned.as_deref(), is_boundary);
                insert_column(&mut self.row, self.row.len(), None, is_boundary);
                insert_column(&mut self.prev_row, self.prev_row.len(), None, is_boundary);
            } else {
                self.next_row[match_idx] = parent.clone();
            }
        }
    }

    fn generate_next_row(&mut self) {
        let id = self.id.clone();
        clear_commit(&mut self.next_row, &id);
        self.insert_parents();
        remove_collapsed_columns(
            &mut self.next_row,
            &self.prev_row,
            &self.parents,
            self.position,
            &id,
        );
        fill_empty_columns(&mut self.next_row);
    }

    fn commit_next_row(&mut self) {
        let has_parent_commits = commits_in_row(&self.parents) > 0;
        for i in 0..self.row.len() {
            self.prev_row[i] = self.row[i].clone();
            if i == self.position && has_parent_commits {
                self.prev_row[i] = self.next_row[i].clone();
            }
            if !self.prev_row[i].has_commit() {
                self.prev_row[i] = self.next_row[i].clone();
            }
            self.row[i] = self.next_row[i].clone();
        }
        self.prev_position = self.position;
    }

    fn generate_symbols(&mut self, canvas: &mut Canvas) {
        let commits = commits_in_row(&self.parents);
        let initial = commits < 1;
        let merge = commits > 1;
        let position = self.position;
        let commit_id = self.id.clone();
        let len = self.row.len();

        for pos in 0..len {
            let has_commit = self.row[pos].has_commit();
            let mut symbol = Symbol {
                commit: pos == position,
                boundary: pos == position && self.next_row[pos].symbol.boundary,
                initial,
                merge,
                continued_down: continued_down(&self.row, &self.next_row, pos),
                continued_up: continued_down(&self.prev_row, &self.row, pos),
                continued_right: continued_right(&self.row, pos, position),
                continued_left: continued_left(&self.row, pos, position),
                continued_up_left: continued_left(&self.prev_row, pos, self.prev_row.len()),
                parent_down: parent_down(&self.parents, &self.next_row, pos),
                parent_right: pos > position
                    && parent_right(&self.parents, &self.row, &self.next_row, pos),
                below_commit: below_commit(pos, &self.row, &self.prev_row, self.prev_position),
                flanked: flanked(&self.row, pos, position, &commit_id),
                next_right: continued_right(&self.next_row, pos, 0),
                matches_commit: id_matches(&self.row[pos].id, &commit_id),
                shift_left: shift_left(&self.row, &self.prev_row, pos),
                continue_shift: false,
                below_shift: self.prev_row[pos].symbol.shift_left,
                new_column: new_column(&self.row, &self.prev_row, pos),
                empty: !has_commit,
                color: 0,
            };
            symbol.continue_shift = if pos + 1 < len {
                shift_left(&self.row, &self.prev_row, pos + 1)
            } else {
                false
            };

            let effective_id = if has_commit {
                self.row[pos].id.clone()
            } else {
                self.next_row[pos].id.clone()
            };
            let color_key = effective_id.unwrap_or_else(|| intern(""));
            symbol.color = self.colors.get_color(&color_key);

            self.row[pos].symbol = symbol;
            canvas.push(CanvasSymbol::V2(symbol));
        }

        self.colors.release(&commit_id);
    }

    pub fn render_parents(&mut self, canvas: &mut Canvas) -> Result<(), GraphError> {
        if !self.commit_set {
            return Err(GraphError::MalformedSequence);
        }
        if self.parents.is_empty() {
            self.add_parent(None)?;
        }
        self.expand();
        self.generate_next_row();
        self.generate_symbols(canvas);
        self.commit_next_row();

        self.parents.clear();
        self.position = 0;

        self.collapse();
        self.commit_set = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn render(engine: &mut V2Engine, id: &str, parents: &str, boundary: bool) -> Canvas {
        let mut canvas = Canvas::default();
        engine.add_commit(&mut canvas, id, parents, boundary).unwrap();
        engine.render_parents(&mut canvas).unwrap();
        canvas
    }

    /// Same DAG-generation shape as `tests/graph_properties.rs`: commit `i`'s
    /// parents are a subset (capped at three) of the commits after it, so
    /// feeding `0..n` in order is always a valid newest-first walk.
    fn build_parents(flags: &[Vec<bool>]) -> Vec<Vec<usize>> {
        let n = flags.len();
        let mut parents = vec![Vec::new(); n];
        for i in 0..n {
            let mut chosen = Vec::new();
            for (offset, &flag) in flags[i].iter().enumerate() {
                let candidate = i + 1 + offset;
                if flag && candidate < n {
                    chosen.push(candidate);
                }
                if chosen.len() == 3 {
                    break;
                }
            }
            parents[i] = chosen;
        }
        parents
    }

    fn row_ids(row: &[Column]) -> HashSet<String> {
        row.iter()
            .filter_map(|c| c.id.as_ref().map(|s| s.to_string()))
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        /// §8's tip-threading property, checked against the engine's actual
        /// `id`s rather than the public glyph surface (which carries no id):
        /// a tip column can only vanish from `row` in the same step that its
        /// own commit is processed (§4.3 step 1's `clear_commit`) — it must
        /// never disappear while some other commit is being rendered.
        #[test]
        fn tip_ids_survive_until_their_own_commit(
            flags in prop::collection::vec(prop::collection::vec(any::<bool>(), 0..6), 2..16)
        ) {
            let parents = build_parents(&flags);
            let n = parents.len();
            let mut engine = V2Engine::new();

            for i in 0..n {
                let this_id = format!("t{i}");
                let ids_before = row_ids(&engine.row);

                let parent_str = parents[i]
                    .iter()
                    .map(|&p| format!("t{p}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                let mut canvas = Canvas::default();
                engine
                    .add_commit(&mut canvas, &this_id, &parent_str, false)
                    .unwrap();
                engine.render_parents(&mut canvas).unwrap();

                let ids_after = row_ids(&engine.row);

                for vanished in ids_before.difference(&ids_after) {
                    prop_assert_eq!(vanished.as_str(), this_id.as_str());
                }
            }
        }
    }

    #[test]
    fn linear_history_stays_in_one_column() {
        let mut engine = V2Engine::new();
        let a = render(&mut engine, "v2-a", "v2-b", false);
        let b = render(&mut engine, "v2-b", "v2-c", false);
        let c = render(&mut engine, "v2-c", "", false);

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(c.len(), 1);
        assert!(a.symbols()[0].commit());
    }

    #[test]
    fn root_commit_is_initial() {
        let mut engine = V2Engine::new();
        let canvas = render(&mut engine, "v2-root", "", false);
        assert!(canvas.symbols()[0].initial());
    }

    #[test]
    fn boundary_commit_is_flagged() {
        let mut engine = V2Engine::new();
        let canvas = render(&mut engine, "v2-x", "v2-y", true);
        assert!(canvas.symbols()[0].boundary());
    }

    #[test]
    fn merge_commit_sets_merge_flag() {
        let mut engine = V2Engine::new();
        let canvas = render(&mut engine, "v2-m", "v2-a v2-b", false);
        assert!(canvas.is_merge());
    }

    #[test]
    fn fork_opens_a_second_column() {
        let mut engine = V2Engine::new();
        render(&mut engine, "v2-base", "v2-left v2-right", false);
        let left = render(&mut engine, "v2-left", "v2-tail", false);
        assert_eq!(left.len(), 2);
        assert!(left.symbols()[0].commit());
    }

    #[test]
    fn self_loop_does_not_panic() {
        let mut engine = V2Engine::new();
        let canvas = render(&mut engine, "v2-loop", "v2-loop", false);
        assert_eq!(canvas.len(), 1);
    }
}
