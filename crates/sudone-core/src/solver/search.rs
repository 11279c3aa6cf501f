//! The backtracking search phase.
//!
//! Search works off the availability tables alone: undoing a tentative value
//! is a single boolean write per table, while keeping candidates in sync
//! would take a loop per undo. The candidate sets of a [`SearchGrid`] are
//! therefore stale and must never be read; the type exists to make that
//! one-way transition explicit.

use std::fmt;

use crate::grid::{render, CellValues, Grid, Position};

/// Search-phase grid: placed values plus availability tables.
///
/// Produced by [`Grid::into_search`]; there is no way back. Only values may
/// be read out.
#[derive(Debug, Clone)]
pub struct SearchGrid {
    grid: Grid,
}

impl Grid {
    /// Enter the search phase, giving up the candidate invariant.
    pub fn into_search(self) -> SearchGrid {
        SearchGrid { grid: self }
    }
}

impl SearchGrid {
    /// Positions of the cells still empty, in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.grid.empty_positions()
    }

    #[inline]
    fn possible(&self, row: usize, col: usize, value: u8) -> bool {
        self.grid.possible(row, col, value)
    }

    #[inline]
    fn possible_count(&self, row: usize, col: usize) -> u32 {
        self.grid.possible_count(row, col)
    }

    /// Fill the cells at `empties[i..]` by depth-first search, trying values
    /// in ascending order. Returns whether a complete assignment was found;
    /// on failure the availability tables are restored, while cell values
    /// along the abandoned branch are meaningless.
    pub(crate) fn backtrack(&mut self, empties: &mut [Position], i: usize) -> bool {
        if i == empties.len() {
            return true;
        }
        debug_assert!(i < empties.len());

        self.swap_most_constrained(empties, i);
        let pos = empties[i];

        for value in 1..=self.grid.side() as u8 {
            if self.possible(pos.row, pos.col, value) {
                // Tentatively take the value; candidates are not touched.
                self.grid.mark_value_free(pos.row, pos.col, value, false);

                if self.backtrack(empties, i + 1) {
                    self.grid.set_value_raw(pos.row, pos.col, value);
                    return true;
                }

                self.grid.mark_value_free(pos.row, pos.col, value, true);
            }
        }

        false
    }

    /// Swap the most constrained cell of `empties[i..]` into slot `i`:
    /// fewest placeable values, earliest index on ties.
    fn swap_most_constrained(&self, empties: &mut [Position], i: usize) {
        debug_assert!(i < empties.len());

        let mut i_min = i;
        let mut count_min = self.possible_count(empties[i].row, empties[i].col);

        for j in i + 1..empties.len() {
            let count = self.possible_count(empties[j].row, empties[j].col);
            if count < count_min {
                i_min = j;
                count_min = count;
            }
        }

        empties.swap(i, i_min);
    }
}

impl CellValues for SearchGrid {
    fn n(&self) -> usize {
        self.grid.n()
    }

    fn value_at(&self, row: usize, col: usize) -> u8 {
        self.grid.value_at(row, col)
    }
}

impl fmt::Display for SearchGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}
