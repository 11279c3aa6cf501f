//! The deterministic elimination techniques.
//!
//! Each per-cell technique targets one empty cell and reports whether it
//! eliminated a candidate or committed a value somewhere. X-wing is the
//! exception: it scans the whole grid.

use crate::grid::{Grid, Position};

/// Naked single: a cell with one remaining candidate must hold it.
///
/// The candidate is removed from the cell's row, column, and block. The
/// removal reaches the cell itself, which commits the value there; any other
/// cell whose last candidate this was commits the same way.
pub(crate) fn naked_single(grid: &mut Grid, row: usize, col: usize) -> bool {
    if grid.cell(row, col).candidate_count() != 1 {
        return false;
    }
    let candidate = grid
        .cell(row, col)
        .first_candidate()
        .expect("cell has exactly one candidate");

    let mut progress = grid.remove_candidate_from_row(row, candidate);
    progress |= grid.remove_candidate_from_column(col, candidate);
    progress |= grid.remove_candidate_from_block(row, col, candidate);
    progress
}

/// Hidden single: a value with a single possible home in a group goes there.
///
/// The block, row, and column of the target cell are searched in that order.
/// After placing, the value is removed from the two groups that were not
/// just searched; the searched group held it nowhere else by construction.
pub(crate) fn hidden_single(grid: &mut Grid, row: usize, col: usize) -> bool {
    let n = grid.n();
    let side = grid.side();
    let block_row = grid.block_start(row);
    let block_col = grid.block_start(col);
    let mut progress = false;

    // Block
    if let Some((candidate, pos)) =
        find_unique_candidate(grid, block_row, block_row + n, block_col, block_col + n)
    {
        grid.provide_value(pos.row, pos.col, candidate);
        grid.remove_candidate_from_row(pos.row, candidate);
        grid.remove_candidate_from_column(pos.col, candidate);
        progress = true;
    }
    // Row
    if let Some((candidate, pos)) = find_unique_candidate(grid, row, row + 1, 0, side) {
        grid.provide_value(pos.row, pos.col, candidate);
        grid.remove_candidate_from_block(pos.row, pos.col, candidate);
        grid.remove_candidate_from_column(pos.col, candidate);
        progress = true;
    }
    // Column
    if let Some((candidate, pos)) = find_unique_candidate(grid, 0, side, col, col + 1) {
        grid.provide_value(pos.row, pos.col, candidate);
        grid.remove_candidate_from_block(pos.row, pos.col, candidate);
        grid.remove_candidate_from_row(pos.row, candidate);
        progress = true;
    }

    progress
}

/// Lowest value held as a candidate by exactly one cell of the rectangular
/// region, with the holding cell's position.
///
/// Only the lowest qualifying value is reported; later ones are picked up on
/// subsequent passes.
fn find_unique_candidate(
    grid: &Grid,
    r_start: usize,
    r_end: usize,
    c_start: usize,
    c_end: usize,
) -> Option<(u8, Position)> {
    let side = grid.side();
    let mut counts = vec![0u32; side + 1];
    for r in r_start..r_end {
        for c in c_start..c_end {
            for candidate in grid.cell(r, c).candidates().iter() {
                counts[candidate as usize] += 1;
            }
        }
    }

    let candidate = (1..=side as u8).find(|&value| counts[value as usize] == 1)?;

    for r in r_start..r_end {
        for c in c_start..c_end {
            if grid.cell(r, c).has_candidate(candidate) {
                return Some((candidate, Position::new(r, c)));
            }
        }
    }
    unreachable!("a candidate counted once has a holding cell");
}

/// Naked pair: two cells of a block holding exactly the same two candidates
/// exclude those candidates from the rest of the block.
///
/// Deliberately block-scoped; rows and columns are not searched.
pub(crate) fn naked_pair(grid: &mut Grid, row: usize, col: usize) -> bool {
    if grid.cell(row, col).candidate_count() != 2 {
        return false;
    }
    let cell = grid.cell(row, col);
    let pair = [
        cell.candidate_at(1).expect("cell has two candidates"),
        cell.candidate_at(2).expect("cell has two candidates"),
    ];

    let n = grid.n();
    let block_row = grid.block_start(row);
    let block_col = grid.block_start(col);

    // Count the target plus partners holding exactly this pair, stopping at
    // the first partner found.
    let mut pair_cells = 1;
    'scan: for r in block_row..block_row + n {
        for c in block_col..block_col + n {
            if (r != row || c != col) && is_pair_cell(grid, r, c, pair) {
                pair_cells += 1;
                if pair_cells == 2 {
                    break 'scan;
                }
            }
        }
    }
    if pair_cells != 2 {
        return false;
    }

    let mut progress = false;
    for r in block_row..block_row + n {
        for c in block_col..block_col + n {
            // Pair-cell membership is re-tested as removals land.
            if !is_pair_cell(grid, r, c, pair) {
                progress |= grid.remove_candidate(r, c, pair[0]);
                progress |= grid.remove_candidate(r, c, pair[1]);
            }
        }
    }
    progress
}

fn is_pair_cell(grid: &Grid, row: usize, col: usize, pair: [u8; 2]) -> bool {
    let cell = grid.cell(row, col);
    cell.candidate_count() == 2 && cell.has_candidate(pair[0]) && cell.has_candidate(pair[1])
}

/// Hidden pair: two values confined to the same two cells of a group let
/// those cells shed every other candidate.
///
/// Applies to the block, the row, and the column of the target cell.
pub(crate) fn hidden_pair(grid: &mut Grid, row: usize, col: usize) -> bool {
    let n = grid.n();
    let side = grid.side();
    let block_row = grid.block_start(row);
    let block_col = grid.block_start(col);
    let target = Position::new(row, col);

    let groups = [
        (block_row, block_row + n, block_col, block_col + n),
        (row, row + 1, 0, side),
        (0, side, col, col + 1),
    ];

    let mut progress = false;
    for (r_start, r_end, c_start, c_end) in groups {
        if grid.cell(row, col).candidate_count() < 2 {
            continue;
        }
        if let Some((partner, pair)) = find_pair(grid, r_start, r_end, c_start, c_end, target) {
            progress |= clear_pair_cells(grid, [target, partner], pair);
        }
    }
    progress
}

/// Enumerate candidate pairs of the target cell in ascending order and
/// return the first one confined to the target and exactly one partner
/// within the region.
fn find_pair(
    grid: &Grid,
    r_start: usize,
    r_end: usize,
    c_start: usize,
    c_end: usize,
    target: Position,
) -> Option<(Position, [u8; 2])> {
    let first = grid.cell(target.row, target.col);
    debug_assert!(first.candidate_count() >= 2);

    let candidates: Vec<u8> = first.candidates().iter().collect();
    for (i, &v1) in candidates.iter().enumerate() {
        for &v2 in &candidates[i + 1..] {
            if let Some(partner) =
                find_pair_cells(grid, [v1, v2], r_start, r_end, c_start, c_end, target)
            {
                return Some((partner, [v1, v2]));
            }
        }
    }
    None
}

/// Check that exactly two cells of the region hold both pair values (the
/// target being one), that no other cell holds either value, and that at
/// least one of the two cells holds something else to shed. Returns the
/// partner cell.
fn find_pair_cells(
    grid: &Grid,
    pair: [u8; 2],
    r_start: usize,
    r_end: usize,
    c_start: usize,
    c_end: usize,
    target: Position,
) -> Option<Position> {
    let mut partner = None;
    let mut pair_cells = 1u32;
    let mut cells_with_extras = u32::from(grid.cell(target.row, target.col).candidate_count() > 2);

    for r in r_start..r_end {
        for c in c_start..c_end {
            if r == target.row && c == target.col {
                continue;
            }
            let cell = grid.cell(r, c);
            let has_first = cell.has_candidate(pair[0]);
            let has_second = cell.has_candidate(pair[1]);
            if has_first && has_second {
                pair_cells += 1;
                if pair_cells > 2 {
                    return None;
                }
                cells_with_extras += u32::from(cell.candidate_count() > 2);
                partner = Some(Position::new(r, c));
            } else if has_first || has_second {
                // A lone occurrence elsewhere breaks the confinement.
                return None;
            }
        }
    }

    if pair_cells == 2 && cells_with_extras > 0 {
        partner
    } else {
        None
    }
}

/// Strip every candidate except the pair from both pair cells.
fn clear_pair_cells(grid: &mut Grid, positions: [Position; 2], pair: [u8; 2]) -> bool {
    let side = grid.side() as u8;
    let mut progress = false;
    for pos in positions {
        for candidate in 1..=side {
            if candidate != pair[0] && candidate != pair[1] {
                progress |= grid.remove_candidate(pos.row, pos.col, candidate);
            }
        }
    }
    progress
}

/// X-wing: a candidate confined, in two columns, to cells on the same two
/// rows cannot appear elsewhere in those rows; dually for two rows against
/// the crossing columns.
pub fn x_wing(grid: &mut Grid) -> bool {
    let side = grid.side();
    let mut progress = false;

    // Vertical: column pairs define the rectangle, eliminations run along
    // the two rows.
    for c1 in 0..side {
        for c2 in c1 + 1..side {
            for candidate in 1..=side as u8 {
                let mut rows = [0usize; 2];
                let mut in_both = 0usize;
                let mut counts = [0u32; 2];
                for row in 0..side {
                    let first = grid.cell(row, c1).has_candidate(candidate);
                    let second = grid.cell(row, c2).has_candidate(candidate);
                    counts[0] += u32::from(first);
                    counts[1] += u32::from(second);
                    if first && second {
                        if in_both < 2 {
                            rows[in_both] = row;
                        }
                        in_both += 1;
                    }
                }
                if in_both == 2 && counts == [2, 2] {
                    for col in 0..side {
                        // The four corners of the rectangle keep the candidate.
                        if col != c1 && col != c2 {
                            progress |= grid.remove_candidate(rows[0], col, candidate);
                            progress |= grid.remove_candidate(rows[1], col, candidate);
                        }
                    }
                }
            }
        }
    }

    // Horizontal: row pairs define the rectangle, eliminations run along
    // the two columns.
    for r1 in 0..side {
        for r2 in r1 + 1..side {
            for candidate in 1..=side as u8 {
                let mut cols = [0usize; 2];
                let mut in_both = 0usize;
                let mut counts = [0u32; 2];
                for col in 0..side {
                    let first = grid.cell(r1, col).has_candidate(candidate);
                    let second = grid.cell(r2, col).has_candidate(candidate);
                    counts[0] += u32::from(first);
                    counts[1] += u32::from(second);
                    if first && second {
                        if in_both < 2 {
                            cols[in_both] = col;
                        }
                        in_both += 1;
                    }
                }
                if in_both == 2 && counts == [2, 2] {
                    for row in 0..side {
                        if row != r1 && row != r2 {
                            progress |= grid.remove_candidate(row, cols[0], candidate);
                            progress |= grid.remove_candidate(row, cols[1], candidate);
                        }
                    }
                }
            }
        }
    }

    progress
}
