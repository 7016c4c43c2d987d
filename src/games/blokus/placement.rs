//! Placement legality and legal-move enumeration.

use std::collections::HashSet;

use super::board::Board;
use super::error::GameError;
use super::geometry::{absolute_cells, apply, Shape};
use super::pieces::{Catalog, Inventory};
use super::types::{Color, Coord, Move, Orientation};

/// Check one placement for `color`.
///
/// `first_move_corner` is `Some(corner)` only for the player's first piece,
/// which must cover that corner and is exempt from the corner-contact rule.
/// Checks run cheapest first: bounds, occupancy, starting corner, then the
/// same-color adjacency scans. Returns the absolute cells on success.
pub fn validate_placement(
    board: &Board,
    color: Color,
    first_move_corner: Option<Coord>,
    shape: &Shape,
    orientation: Orientation,
    anchor: Coord,
) -> Result<Vec<Coord>, GameError> {
    let cells = absolute_cells(&apply(shape, orientation), anchor)?;
    check_cells(board, color, first_move_corner, &cells)?;
    Ok(cells)
}

fn check_cells(
    board: &Board,
    color: Color,
    first_move_corner: Option<Coord>,
    cells: &[Coord],
) -> Result<(), GameError> {
    if let Some(&c) = cells.iter().find(|&&c| !board.contains(c)) {
        return Err(GameError::OutOfBounds(c));
    }

    if let Some(&c) = cells.iter().find(|&&c| board.owner(c).is_some()) {
        return Err(GameError::CellOccupied(c));
    }

    if let Some(corner) = first_move_corner {
        if !cells.contains(&corner) {
            return Err(GameError::MustCoverStartingCorner(corner));
        }
    }

    // Off-board neighbors read as unowned.
    if let Some(&c) = cells.iter().find(|&&c| {
        c.orthogonal_neighbors()
            .iter()
            .any(|&n| board.owner(n) == Some(color))
    }) {
        return Err(GameError::EdgeAdjacentSameColor(c));
    }

    if first_move_corner.is_none() {
        let touches_corner = cells.iter().any(|c| {
            c.diagonal_neighbors()
                .iter()
                .any(|&n| board.owner(n) == Some(color))
        });
        if !touches_corner {
            return Err(GameError::NoCornerContact);
        }
    }

    Ok(())
}

/// Empty cells a new piece of `color` could legally cover to satisfy the
/// adjacency rules, row-major.
pub fn candidate_targets(
    board: &Board,
    color: Color,
    first_move_corner: Option<Coord>,
) -> Vec<Coord> {
    if let Some(corner) = first_move_corner {
        return match board.cell_at(corner) {
            Ok(None) => vec![corner],
            _ => vec![],
        };
    }
    board
        .coords()
        .filter(|&c| board.owner(c).is_none())
        .filter(|&c| {
            c.diagonal_neighbors()
                .iter()
                .any(|&n| board.owner(n) == Some(color))
        })
        .filter(|&c| {
            !c.orthogonal_neighbors()
                .iter()
                .any(|&n| board.owner(n) == Some(color))
        })
        .collect()
}

/// Every legal move for `color` with the pieces left in `inventory`.
///
/// Order is deterministic: by piece index, then orientation, then target cell.
pub fn legal_moves(
    board: &Board,
    catalog: &Catalog,
    inventory: &Inventory,
    color: Color,
    first_move_corner: Option<Coord>,
) -> Vec<Move> {
    let mut moves = Vec::new();
    scan_moves(board, catalog, inventory, color, first_move_corner, |mv| {
        moves.push(mv);
        true
    });
    moves
}

/// Whether `color` has at least one legal move.
pub fn has_legal_move(
    board: &Board,
    catalog: &Catalog,
    inventory: &Inventory,
    color: Color,
    first_move_corner: Option<Coord>,
) -> bool {
    let mut found = false;
    scan_moves(board, catalog, inventory, color, first_move_corner, |_| {
        found = true;
        false
    });
    found
}

/// Feed legal moves to `visit` until it returns false.
fn scan_moves(
    board: &Board,
    catalog: &Catalog,
    inventory: &Inventory,
    color: Color,
    first_move_corner: Option<Coord>,
    mut visit: impl FnMut(Move) -> bool,
) {
    let targets = candidate_targets(board, color, first_move_corner);
    if targets.is_empty() {
        return;
    }

    for piece_index in inventory.remaining() {
        for (orientation, shape) in catalog.orientations(piece_index) {
            // Several (target, cell) pairs can produce the same anchor.
            let mut tried: HashSet<Coord> = HashSet::new();
            for &target in &targets {
                for &offset in shape.cells() {
                    let anchor = target - offset;
                    if !tried.insert(anchor) {
                        continue;
                    }
                    let Ok(cells) = absolute_cells(shape, anchor) else {
                        continue;
                    };
                    if check_cells(board, color, first_move_corner, &cells).is_ok() {
                        let mv = Move {
                            piece_index,
                            orientation: *orientation,
                            anchor,
                        };
                        if !visit(mv) {
                            return;
                        }
                    }
                }
            }
        }
    }
}
