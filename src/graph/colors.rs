//! Branch color allocation.
//!
//! Two variants mirror the two rendering strategies: [`ColorPoolV1`] is a
//! bare counter array indexed by color, used only when a brand new tip
//! appears; [`ColorPoolV2`] additionally remembers which interned tip
//! currently holds each color so that `release` can give it back.
//!
//! Both pick the color with the smallest reference count, ties broken by the
//! lowest index — this is the tie-break the legacy engine used and the one
//! this implementation is required to reproduce (see `SPEC_FULL.md` §9).

use std::collections::HashMap;
use std::sync::Arc;

/// Number of colors in the rotation. Canonical value per the specification.
pub const GRAPH_COLORS: usize = 14;

/// Distinguished color used for the commit dot itself; never handed out by
/// [`ColorPoolV1::get_free_color`] / [`ColorPoolV2::get_color`].
pub const GRAPH_COMMIT_COLOR: u8 = u8::MAX;

fn least_used(count: &[usize; GRAPH_COLORS]) -> u8 {
    let mut free_color = 0usize;
    let mut lowest = usize::MAX;
    for (i, &c) in count.iter().enumerate() {
        if c < lowest {
            lowest = c;
            free_color = i;
        }
    }
    free_color as u8
}

/// v1's color allocator: a fixed-size reference-count array. A color is
/// picked only when a genuinely new tip is seen; v1 never explicitly
/// releases a color (branches simply stop being drawn once their column
/// collapses).
#[derive(Debug, Default)]
pub struct ColorPoolV1 {
    count: [usize; GRAPH_COLORS],
}

impl ColorPoolV1 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh color for a newly-seen tip.
    pub fn get_free_color(&mut self) -> u8 {
        let color = least_used(&self.count);
        self.count[color as usize] += 1;
        color
    }
}

/// v2's color allocator: a map from interned tip id to the color currently
/// assigned to it, plus the same reference-count array v1 uses.
#[derive(Debug, Default)]
pub struct ColorPoolV2 {
    assigned: HashMap<Arc<str>, u8>,
    count: [usize; GRAPH_COLORS],
}

impl ColorPoolV2 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `id`'s color, allocating a fresh one the first time `id` is
    /// seen.
    pub fn get_color(&mut self, id: &Arc<str>) -> u8 {
        if let Some(&color) = self.assigned.get(id) {
            return color;
        }

        let color = least_used(&self.count);
        self.count[color as usize] += 1;
        self.assigned.insert(Arc::clone(id), color);
        color
    }

    /// Release `id`'s color, if it currently holds one.
    pub fn release(&mut self, id: &Arc<str>) {
        if let Some(color) = self.assigned.remove(id) {
            self.count[color as usize] = self.count[color as usize].saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_picks_lowest_index_on_ties() {
        let mut pool = ColorPoolV1::new();
        assert_eq!(pool.get_free_color(), 0);
        assert_eq!(pool.get_free_color(), 1);
    }

    #[test]
    fn v2_reuses_color_for_same_tip() {
        let mut pool = ColorPoolV2::new();
        let a = crate::graph::intern::intern("aaaa");
        let first = pool.get_color(&a);
        let second = pool.get_color(&a);
        assert_eq!(first, second);
    }

    #[test]
    fn v2_frees_color_on_release() {
        let mut pool = ColorPoolV2::new();
        let a = crate::graph::intern::intern("bbbb");
        let b = crate::graph::intern::intern("cccc");
        let ca = pool.get_color(&a);
        pool.release(&a);
        // After release, a fresh tip should be able to reclaim that color
        // since its count dropped back to the minimum.
        let cb = pool.get_color(&b);
        assert_eq!(ca, cb);
    }
}
