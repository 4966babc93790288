//! The `Symbol` bit-record and the three glyph encodings.
//!
//! [`Symbol`] is the v2 strategy's topology record (§3/§4.4 of
//! `SPEC_FULL.md`); [`LegacySymbol`] is v1's smaller, differently-named
//! record (§4.6). Both carry a `color` and know how to render themselves in
//! three encodings; the classifier cascade in §4.5 is implemented as private
//! methods on `Symbol` so that `to_utf8`/`to_ascii`/`to_line_drawing` share a
//! single decision path and can never disagree on topology.

/// Topology record produced by the v2 symbol synthesizer for one column of
/// one row. See `SPEC_FULL.md` §3 for the meaning of each field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Symbol {
    pub color: u8,

    pub commit: bool,
    pub boundary: bool,
    pub initial: bool,
    pub merge: bool,

    pub continued_down: bool,
    pub continued_up: bool,
    pub continued_right: bool,
    pub continued_left: bool,
    pub continued_up_left: bool,

    pub parent_down: bool,
    pub parent_right: bool,

    pub below_commit: bool,
    pub flanked: bool,
    pub next_right: bool,
    pub matches_commit: bool,

    pub shift_left: bool,
    pub continue_shift: bool,
    pub below_shift: bool,

    pub new_column: bool,
    pub empty: bool,
}

/// Line-drawing primitives used by the third encoding. Stands in for the
/// original engine's raw curses `chtype` cell values, which have no
/// analogue without a curses layer; a caller driving an actual terminal
/// library maps these onto its own cell/attribute representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDrawing {
    Blank,
    HLine,
    VLine,
    Plus,
    LTee,
    RTee,
    TTee,
    BTee,
    ULCorner,
    URCorner,
    LLCorner,
    LRCorner,
    Diamond,
    CommitChar(char),
}

impl LineDrawing {
    /// The nearest single UTF-8 box-drawing character for a caller with no
    /// curses surface to draw onto (see `railgraph --chtype`).
    pub fn as_char(&self) -> char {
        match self {
            LineDrawing::Blank => ' ',
            LineDrawing::HLine => '─',
            LineDrawing::VLine => '│',
            LineDrawing::Plus => '┼',
            LineDrawing::LTee => '├',
            LineDrawing::RTee => '┤',
            LineDrawing::TTee => '┬',
            LineDrawing::BTee => '┴',
            LineDrawing::ULCorner => '╭',
            LineDrawing::URCorner => '╮',
            LineDrawing::LLCorner => '╰',
            LineDrawing::LRCorner => '╯',
            LineDrawing::Diamond => '◆',
            LineDrawing::CommitChar(c) => *c,
        }
    }
}

impl Symbol {
    fn is_cross_merge(&self) -> bool {
        if self.empty {
            return false;
        }
        if !self.continued_up && !self.new_column && !self.below_commit {
            return false;
        }
        if self.shift_left && self.continued_up_left {
            return false;
        }
        if self.next_right {
            return false;
        }
        self.merge && self.continued_up && self.continued_right && self.continued_left && self.parent_down
    }

    fn is_vertical_merge(&self) -> bool {
        if self.empty {
            return false;
        }
        if !self.continued_up && !self.new_column && !self.below_commit {
            return false;
        }
        if self.shift_left && self.continued_up_left {
            return false;
        }
        if self.next_right {
            return false;
        }
        if !self.matches_commit {
            return false;
        }
        self.merge && self.continued_up && self.continued_left && self.parent_down && !self.continued_right
    }

    fn is_cross_over(&self) -> bool {
        if self.empty {
            return false;
        }
        if !self.continued_down {
            return false;
        }
        if !self.continued_up && !self.new_column && !self.below_commit {
            return false;
        }
        if self.shift_left {
            return false;
        }
        if self.parent_right && self.merge {
            return true;
        }
        self.flanked
    }

    fn is_vertical_bar(&self) -> bool {
        if self.empty {
            return false;
        }
        if self.shift_left {
            return false;
        }
        if !self.continued_down {
            return false;
        }
        if self.continued_up {
            return true;
        }
        if self.parent_right {
            return false;
        }
        if self.flanked {
            return false;
        }
        !self.continued_right
    }

    fn is_turn_left(&self) -> bool {
        if self.matches_commit && self.continued_right && !self.continued_down {
            return false;
        }
        if self.continue_shift {
            return false;
        }
        if self.continued_up || self.new_column || self.below_commit {
            if self.matches_commit {
                return true;
            }
            if self.shift_left {
                return true;
            }
        }
        false
    }

    fn is_multi_branch(&self) -> bool {
        if self.continued_down {
            return false;
        }
        if !self.continued_right {
            return false;
        }
        if self.below_shift {
            return false;
        }
        if self.continued_up || self.new_column || self.below_commit {
            if self.matches_commit {
                return true;
            }
            if self.shift_left {
                return true;
            }
        }
        false
    }

    fn is_horizontal_bar(&self) -> bool {
        if !self.next_right {
            return false;
        }
        if self.shift_left {
            return true;
        }
        if self.continued_down {
            return false;
        }
        if !self.parent_right && !self.continued_right {
            return false;
        }
        if self.continued_up && !self.continued_up_left {
            return false;
        }
        !self.below_commit
    }

    fn is_forks(&self) -> bool {
        self.continued_down && self.continued_right && self.continued_up
    }

    fn is_turn_down_cross_over(&self) -> bool {
        if !self.continued_down || !self.continued_right {
            return false;
        }
        if !self.parent_right && !self.flanked {
            return false;
        }
        if self.flanked {
            return true;
        }
        self.merge
    }

    fn is_turn_down(&self) -> bool {
        self.continued_down && self.continued_right
    }

    fn is_merge_glyph(&self) -> bool {
        !self.continued_down && self.parent_down && !self.parent_right && !self.continued_right
    }

    fn is_multi_merge(&self) -> bool {
        self.parent_down && (self.parent_right || self.continued_right)
    }

    /// The color to report to a caller iterating a canvas: the commit dot
    /// always reports [`super::colors::GRAPH_COMMIT_COLOR`] regardless of
    /// which pool color the column itself carries.
    pub fn color_id(&self) -> u8 {
        if self.commit {
            super::colors::GRAPH_COMMIT_COLOR
        } else {
            self.color
        }
    }

    pub fn to_utf8(&self) -> &'static str {
        if self.commit {
            return if self.boundary {
                " ◯"
            } else if self.initial {
                " ◎"
            } else if self.merge {
                " ●"
            } else {
                " ∙"
            };
        }

        if self.is_cross_merge() {
            "─┼"
        } else if self.is_vertical_merge() {
            "─┤"
        } else if self.is_cross_over() {
            "─│"
        } else if self.is_vertical_bar() {
            " │"
        } else if self.is_turn_left() {
            "─╯"
        } else if self.is_multi_branch() {
            "─┴"
        } else if self.is_horizontal_bar() {
            "──"
        } else if self.is_forks() {
            " ├"
        } else if self.is_turn_down_cross_over() {
            "─╭"
        } else if self.is_turn_down() {
            " ╭"
        } else if self.is_merge_glyph() {
            "─╮"
        } else if self.is_multi_merge() {
            "─┬"
        } else {
            "  "
        }
    }

    pub fn to_ascii(&self) -> &'static str {
        if self.commit {
            return if self.boundary {
                " o"
            } else if self.initial {
                " I"
            } else if self.merge {
                " M"
            } else {
                " *"
            };
        }

        if self.is_cross_merge() {
            "-+"
        } else if self.is_vertical_merge() {
            "-|"
        } else if self.is_cross_over() {
            "-|"
        } else if self.is_vertical_bar() {
            " |"
        } else if self.is_turn_left() {
            "-'"
        } else if self.is_multi_branch() {
            "-+"
        } else if self.is_horizontal_bar() {
            "--"
        } else if self.is_forks() {
            " +"
        } else if self.is_turn_down_cross_over() {
            "-."
        } else if self.is_turn_down() {
            " ."
        } else if self.is_merge_glyph() {
            "-."
        } else if self.is_multi_merge() {
            "-+"
        } else {
            "  "
        }
    }

    /// Line-drawing encoding: same classifier cascade as `to_utf8`/`to_ascii`,
    /// so topology agreement across all three encodings (§8) is structural
    /// rather than incidental.
    pub fn to_line_drawing(&self) -> [LineDrawing; 2] {
        use LineDrawing::*;

        if self.commit {
            let c = if self.boundary {
                'o'
            } else if self.initial {
                'I'
            } else if self.merge {
                'M'
            } else {
                'o'
            };
            return [Blank, CommitChar(c)];
        }

        if self.is_cross_merge() {
            [HLine, Plus]
        } else if self.is_vertical_merge() {
            [HLine, RTee]
        } else if self.is_cross_over() {
            [HLine, VLine]
        } else if self.is_vertical_bar() {
            [Blank, VLine]
        } else if self.is_turn_left() {
            [HLine, LRCorner]
        } else if self.is_multi_branch() {
            [HLine, BTee]
        } else if self.is_horizontal_bar() {
            [HLine, HLine]
        } else if self.is_forks() {
            [Blank, LTee]
        } else if self.is_turn_down_cross_over() {
            [HLine, ULCorner]
        } else if self.is_turn_down() {
            [Blank, ULCorner]
        } else if self.is_merge_glyph() {
            [HLine, URCorner]
        } else if self.is_multi_merge() {
            [HLine, TTee]
        } else {
            [Blank, Blank]
        }
    }
}

/// v1's topology record. Deliberately a different, smaller vocabulary than
/// [`Symbol`] — see `SPEC_FULL.md` §4.6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacySymbol {
    pub color: u8,

    pub commit: bool,
    pub branch: bool,
    pub boundary: bool,
    pub initial: bool,
    pub merge: bool,
    pub vbranch: bool,
    pub branched: bool,
}

impl LegacySymbol {
    pub fn color_id(&self) -> u8 {
        if self.commit {
            super::colors::GRAPH_COMMIT_COLOR
        } else {
            self.color
        }
    }

    pub fn to_utf8(&self) -> &'static str {
        if self.commit {
            return if self.boundary {
                " ◯"
            } else if self.initial {
                " ◎"
            } else if self.merge {
                " ●"
            } else {
                " ∙"
            };
        }

        if self.merge {
            return if self.branch {
                "━┪"
            } else if self.vbranch {
                "━┯"
            } else {
                "━┑"
            };
        }

        if self.branch {
            return if self.branched {
                if self.vbranch {
                    "─┴"
                } else {
                    "─┘"
                }
            } else if self.vbranch {
                "─│"
            } else {
                " │"
            };
        }

        if self.vbranch {
            return "──";
        }

        "  "
    }

    pub fn to_ascii(&self) -> &'static str {
        if self.commit {
            return if self.boundary {
                " o"
            } else if self.initial {
                " I"
            } else if self.merge {
                " M"
            } else {
                " *"
            };
        }

        if self.merge {
            return if self.branch { "-+" } else { "-." };
        }

        if self.branch {
            return if self.branched {
                if self.vbranch {
                    "-+"
                } else {
                    "-'"
                }
            } else if self.vbranch {
                "-|"
            } else {
                " |"
            };
        }

        if self.vbranch {
            return "--";
        }

        "  "
    }

    pub fn to_line_drawing(&self) -> [LineDrawing; 2] {
        use LineDrawing::*;

        if self.commit {
            let c = if self.boundary {
                'o'
            } else if self.initial {
                'I'
            } else if self.merge {
                'M'
            } else {
                'o'
            };
            return [Blank, CommitChar(c)];
        }

        if self.merge {
            return if self.branch {
                [HLine, RTee]
            } else {
                [HLine, URCorner]
            };
        }

        if self.branch {
            if self.branched {
                return if self.vbranch {
                    [HLine, BTee]
                } else {
                    [HLine, LRCorner]
                };
            }
            return [if self.vbranch { HLine } else { Blank }, VLine];
        }

        if self.vbranch {
            return [HLine, HLine];
        }

        [Blank, Blank]
    }
}
