//! Final scoring: minus one per unplaced cell, bonus for finishing.

use std::collections::BTreeMap;

use super::game::{Game, Player};
use super::pieces::Catalog;
use super::types::Color;

/// Bonus for placing every piece.
pub const ALL_PLACED_BONUS: i64 = 15;
/// Extra bonus when the last piece placed was the monomino.
pub const MONOMINO_LAST_BONUS: i64 = 5;

pub fn score_player(player: &Player, catalog: &Catalog) -> i64 {
    if player.is_exhausted() {
        let monomino_last = player
            .last_placed
            .and_then(|i| catalog.get(i))
            .is_some_and(|s| s.len() == 1);
        return if monomino_last {
            ALL_PLACED_BONUS + MONOMINO_LAST_BONUS
        } else {
            ALL_PLACED_BONUS
        };
    }
    -(player.inventory.remaining_cells(catalog) as i64)
}

/// Score per color.
pub fn final_scores(game: &Game) -> BTreeMap<Color, i64> {
    game.players()
        .iter()
        .map(|p| (p.color, score_player(p, game.catalog())))
        .collect()
}

/// Colors sharing the best score.
pub fn winners(game: &Game) -> Vec<Color> {
    let scores = final_scores(game);
    let Some(&best) = scores.values().max() else {
        return vec![];
    };
    scores
        .into_iter()
        .filter(|&(_, s)| s == best)
        .map(|(c, _)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::blokus::geometry::Shape;
    use crate::games::blokus::types::{Coord, Orientation};

    fn two_player(catalog: Catalog) -> Game {
        let mut game = Game::new(2, 20, catalog).unwrap();
        game.add_player("a", Color::Blue, Coord::new(0, 0)).unwrap();
        game.add_player("b", Color::Yellow, Coord::new(19, 19)).unwrap();
        game
    }

    #[test]
    fn test_initial_scores_are_negative_cell_counts() {
        let game = two_player(Catalog::standard());
        let scores = final_scores(&game);
        assert_eq!(scores.get(&Color::Blue), Some(&-89));
        assert_eq!(scores.get(&Color::Yellow), Some(&-89));
        assert_eq!(winners(&game), vec![Color::Blue, Color::Yellow]);
    }

    #[test]
    fn test_partial_placement_score() {
        let mut game = two_player(Catalog::standard());
        game.place_piece(Color::Blue, 9, Orientation::default(), Coord::new(0, 0))
            .unwrap();
        let scores = final_scores(&game);
        assert_eq!(scores[&Color::Blue], -84);
        assert_eq!(winners(&game), vec![Color::Blue]);
    }

    #[test]
    fn test_monomino_last_bonus() {
        let mut game = two_player(Catalog::monominoes(1).unwrap());
        game.place_piece(Color::Blue, 0, Orientation::default(), Coord::new(0, 0))
            .unwrap();
        assert_eq!(
            score_player(game.player(Color::Blue).unwrap(), game.catalog()),
            ALL_PLACED_BONUS + MONOMINO_LAST_BONUS
        );
        assert_eq!(final_scores(&game)[&Color::Yellow], -1);
    }

    #[test]
    fn test_all_placed_without_monomino_last() {
        let domino = Shape::from_offsets(&[(0, 0), (0, 1)]).unwrap();
        let mut game = two_player(Catalog::new(vec![domino]).unwrap());
        game.place_piece(Color::Blue, 0, Orientation::default(), Coord::new(0, 0))
            .unwrap();
        assert_eq!(final_scores(&game)[&Color::Blue], ALL_PLACED_BONUS);
    }
}
