//! Solver: deterministic techniques iterated to fixpoint, then backtracking
//! on whatever remains.

mod search;
mod techniques;

pub use search::SearchGrid;
pub use techniques::x_wing;

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// The per-cell techniques, in order of increasing complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technique {
    NakedSingle,
    HiddenSingle,
    NakedPair,
    HiddenPair,
}

/// Application order of the per-cell techniques. X-wing is not listed: it is
/// grid-global and runs between sweeps.
pub const CELL_TECHNIQUES: [Technique; 4] = [
    Technique::NakedSingle,
    Technique::HiddenSingle,
    Technique::NakedPair,
    Technique::HiddenPair,
];

impl Technique {
    /// Run this technique against the cell at `(row, col)`, returning
    /// whether any candidate was eliminated or value committed.
    pub fn apply(self, grid: &mut Grid, row: usize, col: usize) -> bool {
        match self {
            Technique::NakedSingle => techniques::naked_single(grid, row, col),
            Technique::HiddenSingle => techniques::hidden_single(grid, row, col),
            Technique::NakedPair => techniques::naked_pair(grid, row, col),
            Technique::HiddenPair => techniques::hidden_pair(grid, row, col),
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Technique::NakedSingle => write!(f, "Naked Single"),
            Technique::HiddenSingle => write!(f, "Hidden Single"),
            Technique::NakedPair => write!(f, "Naked Pair"),
            Technique::HiddenPair => write!(f, "Hidden Pair"),
        }
    }
}

/// One sweep of the per-cell techniques over every empty cell, in row-major
/// order. As soon as a cell acquires a value the sweep moves to the next one.
pub fn perform_simple_techniques(grid: &mut Grid) -> bool {
    let side = grid.side();
    let mut progress = false;

    for row in 0..side {
        for col in 0..side {
            if grid.cell(row, col).has_value() {
                continue;
            }
            for technique in CELL_TECHNIQUES {
                progress |= technique.apply(grid, row, col);
                if grid.cell(row, col).has_value() {
                    break;
                }
            }
        }
    }

    progress
}

/// The search exhausted every assignment without completing the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsolvable;

impl fmt::Display for Unsolvable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid has no solution")
    }
}

impl std::error::Error for Unsolvable {}

/// Sudoku solver: propagation to fixpoint, backtracking as the completeness
/// guarantee.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Solve the puzzle, consuming the grid.
    ///
    /// The result is value-complete; per the [`SearchGrid`] contract, only
    /// values may be read out of it. On failure the partial grid is dropped,
    /// its values being meaningless.
    pub fn solve(&self, mut grid: Grid) -> Result<SearchGrid, Unsolvable> {
        let mut passes = 0u32;
        loop {
            passes += 1;
            let mut progress = perform_simple_techniques(&mut grid);
            progress |= x_wing(&mut grid);
            if !progress {
                break;
            }
        }

        let mut empties = grid.empty_positions();
        debug!(
            "fixpoint after {passes} passes, {} empty cells remain",
            empties.len()
        );

        let mut search = grid.into_search();
        if empties.is_empty() || search.backtrack(&mut empties, 0) {
            Ok(search)
        } else {
            Err(Unsolvable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellValues;

    #[test]
    fn test_sweep_solves_a_naked_single_chain() {
        // Row 0 misses only the 9; the rest of the grid is full.
        let mut values: Vec<u32> = vec![
            5, 3, 4, 6, 7, 8, 0, 1, 2, //
            6, 7, 2, 1, 9, 5, 3, 4, 8, //
            1, 9, 8, 3, 4, 2, 5, 6, 7, //
            8, 5, 9, 7, 6, 1, 4, 2, 3, //
            4, 2, 6, 8, 5, 3, 7, 9, 1, //
            7, 1, 3, 9, 2, 4, 8, 5, 6, //
            9, 6, 1, 5, 3, 7, 2, 8, 4, //
            2, 8, 7, 4, 1, 9, 6, 3, 5, //
            3, 4, 5, 2, 8, 6, 1, 7, 9,
        ];
        values[6] = 0;
        let mut grid = Grid::from_values(3, &values).unwrap();

        assert!(perform_simple_techniques(&mut grid));
        assert_eq!(grid.cell(0, 6).value(), Some(9));
        assert!(grid.empty_positions().is_empty());
        assert!(!perform_simple_techniques(&mut grid));
    }

    #[test]
    fn test_sweep_no_progress_on_unconstrained_grid() {
        let mut grid = Grid::from_values(3, &[0; 81]).unwrap();
        assert!(!perform_simple_techniques(&mut grid));
    }

    #[test]
    fn test_technique_order() {
        assert_eq!(
            CELL_TECHNIQUES,
            [
                Technique::NakedSingle,
                Technique::HiddenSingle,
                Technique::NakedPair,
                Technique::HiddenPair,
            ]
        );
        assert_eq!(Technique::HiddenPair.to_string(), "Hidden Pair");
    }

    #[test]
    fn test_solve_empty_4x4() {
        let grid = Grid::from_values(2, &[0; 16]).unwrap();
        let solved = Solver::new().solve(grid).unwrap();
        for row in 0..4 {
            let mut seen: Vec<u8> = (0..4).map(|col| solved.value_at(row, col)).collect();
            seen.sort_unstable();
            assert_eq!(seen, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_solve_presolved_is_identity() {
        let values: Vec<u32> = "534678912672195348198342567859761423426853791713924856961537284287419635345286179"
            .chars()
            .map(|ch| ch as u32 - '0' as u32)
            .collect();
        let grid = Grid::from_values(3, &values).unwrap();
        let solved = Solver::new().solve(grid).unwrap();
        for row in 0..9 {
            for col in 0..9 {
                assert_eq!(u32::from(solved.value_at(row, col)), values[row * 9 + col]);
            }
        }
    }
}
