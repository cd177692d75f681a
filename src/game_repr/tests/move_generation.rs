use super::*;
use crate::error::GameError;
use crate::game_repr::bitboards::{dilate, popcount};

// ==================== OPENING MOVES ====================

#[test]
fn test_starting_position_has_four_moves() {
    let pos = Position::new();
    let moves: Vec<String> = pos.legal_moves().iter().map(|c| c.to_string()).collect();

    // Ascending bit order is part of the move-ordering contract
    assert_eq!(moves, vec!["d3", "c4", "f5", "e6"]);
}

#[test]
fn test_place_flips_enveloped_disc() {
    let mut pos = Position::new();
    pos.place(cell("d3")).unwrap();

    assert_eq!(pos.tile(cell("d4")), Tile::Black, "d4 should flip");
    assert_eq!(pos.disc_count(Color::Black), 4);
    assert_eq!(pos.disc_count(Color::White), 1);
    assert_eq!(pos.current_player(), Color::White);
    assert_eq!(pos.last_move(), Some(cell("d3")));
    assert_eq!(pos.moves_played(), 1);
    assert_eq!(pos.remaining_moves(), 59);
}

#[test]
fn test_place_flips_several_directions() {
    // Black dropping on d4 takes the column run and the diagonal run at once
    let mut pos = Position::from_diagram(
        "
        ...X....
        ...O.X..
        ...OO...
        ........
        ........
        ........
        ........
        ........
        ",
        Color::Black,
    )
    .unwrap();
    // (2,3) and (1,3) flip through the column, (2,4) through the diagonal to (1,5)
    pos.place(Cell::new(3, 3).unwrap()).unwrap();

    assert_eq!(pos.tile(Cell::new(2, 3).unwrap()), Tile::Black);
    assert_eq!(pos.tile(Cell::new(1, 3).unwrap()), Tile::Black);
    assert_eq!(pos.tile(Cell::new(2, 4).unwrap()), Tile::Black);
    assert_eq!(pos.disc_count(Color::White), 0);
}

#[test]
fn test_illegal_placement_is_rejected() {
    let mut pos = Position::new();
    let before = pos.clone();

    // Occupied cell
    assert_eq!(
        pos.place(cell("d4")),
        Err(GameError::InvalidMove { cell: cell("d4"), player: Color::Black })
    );
    // Empty but not adjacent to anything
    assert!(pos.place(cell("a1")).is_err());
    // Adjacent but envelops nothing
    assert!(pos.place(cell("c3")).is_err());

    assert_eq!(pos, before, "a rejected move must not touch the position");
}

#[test]
fn test_can_place_matches_legal_moves() {
    let pos = Position::new();
    let legal = pos.legal_moves();
    for index in 0..64 {
        let c = Cell::from_index(index).unwrap();
        assert_eq!(pos.can_place(c), legal.contains(&c), "{c}");
    }
}

// ==================== INVARIANTS OVER RANDOM GAMES ====================

#[test]
fn test_bitboard_invariants_hold_through_random_games() {
    for seed in 0..20 {
        random_game(seed, |pos| {
            let occupied = pos.occupied();
            let black = pos.discs(Color::Black);
            let white = pos.discs(Color::White);

            assert_eq!(black & white, 0);
            assert_eq!(black | white, occupied);
            assert_eq!(pos.neighbors(), dilate(occupied) & !occupied);
            assert_eq!(
                pos.disc_count(Color::Black) + pos.disc_count(Color::White),
                popcount(occupied)
            );
        });
    }
}

#[test]
fn test_matches_reference_board_through_random_games() {
    for seed in 100..130 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pos = Position::new();
        let mut reference = ReferenceBoard::new();

        loop {
            let legal: Vec<usize> = pos.legal_moves().iter().map(|c| c.index()).collect();
            assert_eq!(legal, reference.legal_moves(reference.to_move), "seed {seed}");
            assert_eq!(pos.disc_count(Color::Black), reference.count(Color::Black));
            assert_eq!(pos.disc_count(Color::White), reference.count(Color::White));
            assert_eq!(pos.is_terminal(), reference.is_terminal());
            assert_eq!(pos.to_snapshot(), reference.grid);
            assert_eq!(pos.current_player(), reference.to_move);

            if pos.is_terminal() {
                break;
            }

            if legal.is_empty() {
                pos.skip_turn().unwrap();
                reference.pass();
            } else {
                let index = legal[rng.gen_range(0..legal.len())];
                pos.place(Cell::from_index(index).unwrap()).unwrap();
                reference.play(index / 8, index % 8);
            }
        }
    }
}

#[test]
fn test_snapshot_round_trip() {
    let end = random_game(7, |_| {});
    let rebuilt = Position::from_snapshot(&end.to_snapshot(), end.current_player());
    assert_eq!(rebuilt.to_snapshot(), end.to_snapshot());
    assert_eq!(rebuilt.hash().key(), end.hash().key());
}

#[test]
fn test_winner_of_finished_game() {
    let end = random_game(3, |_| {});
    assert!(end.is_terminal());
    let black = end.disc_count(Color::Black);
    let white = end.disc_count(Color::White);
    match end.winner() {
        Some(Color::Black) => assert!(black > white),
        Some(Color::White) => assert!(white > black),
        None => assert_eq!(black, white),
    }
}
