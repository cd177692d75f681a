use super::*;
use crate::error::BookError;
use std::collections::HashMap;
use std::io::{BufReader, Cursor};

fn midgame_positions(count: u64) -> Vec<Position> {
    (0..count * 2)
        .filter_map(|seed| random_position(seed, 40))
        .take(count as usize)
        .collect()
}

// ==================== REGISTER / READ ====================

#[test]
fn test_register_then_read_returns_what_was_stored() {
    let table = TranspositionTable::with_slots(1 << 12);
    for pos in midgame_positions(10) {
        let mv = pos.legal_moves()[0];
        table.register(&pos, -12.5, Some(mv), 7, false, true);

        let entry = table.read_entry(&pos).unwrap();
        assert_eq!(
            entry,
            TableEntry {
                heuristic: -12.5,
                best_move: Some(mv),
                depth_below: 7,
                is_exact: false,
                is_alpha: true,
            }
        );
    }
}

#[test]
fn test_move_read_from_any_orientation_is_the_image_of_the_stored_move() {
    let table = TranspositionTable::with_slots(1 << 12);
    for pos in midgame_positions(6) {
        let moves = pos.legal_moves();
        let mv = moves[moves.len() / 2];
        table.register(&pos, 1.0, Some(mv), 3, true, false);

        let mut after = pos.clone();
        after.place(mv).unwrap();

        for o in Orientation::ALL {
            let image = pos.oriented(o);
            let read = table.read_entry(&image).unwrap().best_move.unwrap();

            // Symmetric positions may hand back an equivalent move; either way
            // it must lead to the same canonical position
            let mut image_after = image.clone();
            image_after.place(read).unwrap();
            assert_eq!(image_after.hash().key(), after.hash().key(), "{o:?}");
            if !has_self_symmetry(&pos) {
                assert_eq!(read, o.transform(mv), "{o:?}");
            }
        }
    }
}

fn has_self_symmetry(pos: &Position) -> bool {
    Orientation::ALL[1..]
        .iter()
        .any(|&o| pos.oriented(o).to_snapshot() == pos.to_snapshot())
}

#[test]
fn test_read_of_unknown_position_misses() {
    let table = TranspositionTable::with_slots(1 << 10);
    assert_eq!(table.read_entry(&Position::new()), None);
    assert_eq!(table.misses(), 1);
    assert_eq!(table.hits(), 0);

    table.register(&Position::new(), 0.0, None, 1, true, false);
    assert!(table.read_entry(&Position::new()).is_some());
    assert_eq!(table.hit_rate(), 0.5);
}

#[test]
fn test_deeper_entry_is_not_replaced_by_shallower_one() {
    let table = TranspositionTable::with_slots(1 << 10);
    let pos = Position::new();
    table.register(&pos, 5.0, None, 6, true, false);
    table.register(&pos, 9.0, None, 2, true, false);
    assert_eq!(table.read_entry(&pos).unwrap().heuristic, 5.0);

    table.register(&pos, 7.0, None, 6, false, false);
    let entry = table.read_entry(&pos).unwrap();
    assert_eq!(entry.heuristic, 7.0);
    assert!(!entry.is_exact);
}

// ==================== COLLISIONS ====================

#[test]
fn test_collision_counter_with_single_slot() {
    let table = TranspositionTable::with_slots(1);
    let start = Position::new();
    let mut next = start.clone();
    next.place(cell("d3")).unwrap();

    table.register(&start, 0.0, None, 1, true, false);
    assert_eq!(table.collisions(), 0, "first write into an empty slot");

    table.register(&start, 0.0, None, 1, true, false);
    assert_eq!(table.collisions(), 0, "same key again");

    table.register(&next, 0.0, None, 1, true, false);
    assert_eq!(table.collisions(), 1);

    table.register(&start, 0.0, None, 1, true, false);
    assert_eq!(table.collisions(), 2);

    // The slot now holds `start`; `next` was evicted
    assert!(table.read_entry(&next).is_none());
    assert!(table.read_entry(&start).is_some());
}

#[test]
fn test_clear_empties_every_slot() {
    let table = TranspositionTable::with_slots(1 << 8);
    for pos in midgame_positions(5) {
        table.register(&pos, 1.0, None, 1, true, false);
    }
    assert!(table.size() > 0);

    table.clear();
    assert_eq!(table.size(), 0);
    assert_eq!(table.collisions(), 0);
}

// ==================== CONCURRENT ACCESS ====================

const WRITERS: usize = 4;

/// What writer `writer` stores for the `i`th position
fn written_by(writer: usize, i: usize, pos: &Position) -> (f32, Cell, u8) {
    let moves = pos.legal_moves();
    let mv = moves[(writer + i) % moves.len()];
    ((i * WRITERS + writer) as f32, mv, writer as u8 + 1)
}

#[test]
fn test_racing_writers_never_expose_a_foreign_entry() {
    // Far more positions than slots, so threads keep evicting each other
    let table = TranspositionTable::with_slots(7);
    let positions = midgame_positions(40);

    let mut stored: HashMap<u64, Vec<(f32, u8)>> = HashMap::new();
    for (i, pos) in positions.iter().enumerate() {
        for writer in 0..WRITERS {
            let (value, _, depth) = written_by(writer, i, pos);
            stored.entry(pos.hash().key()).or_default().push((value, depth));
        }
    }

    std::thread::scope(|scope| {
        for writer in 0..WRITERS {
            let (table, positions, stored) = (&table, &positions, &stored);
            scope.spawn(move || {
                for round in 0..200 {
                    for (i, pos) in positions.iter().enumerate() {
                        let (value, mv, depth) = written_by(writer, i, pos);
                        table.register(pos, value, Some(mv), depth, round % 2 == 0, false);

                        let probe = &positions[(i * 7 + round + writer) % positions.len()];
                        let Some(entry) = table.read_entry(probe) else {
                            continue;
                        };
                        let mv = entry.best_move.expect("every writer stores a move");
                        assert!(probe.can_place(mv), "illegal {mv}\n{probe}");
                        assert!(
                            stored[&probe.hash().key()]
                                .contains(&(entry.heuristic, entry.depth_below)),
                            "no writer stored {entry:?} for this key"
                        );
                    }
                }
            });
        }
    });

    assert!(table.size() <= 7);
    assert!(table.hits() + table.misses() > 0);
}

// ==================== BOOK DUMP / FILL ====================

fn seeded_table(slots: usize) -> (TranspositionTable, Vec<Position>) {
    let table = TranspositionTable::with_slots(slots);
    let positions = midgame_positions(12);
    for (i, pos) in positions.iter().enumerate() {
        let mv = pos.legal_moves()[0];
        table.register(pos, i as f32 - 4.0, Some(mv), i as u8, i % 2 == 0, i % 3 == 0);
    }
    (table, positions)
}

#[test]
fn test_book_round_trip_through_file() {
    let (table, positions) = seeded_table(1 << 10);
    let file = tempfile::NamedTempFile::new().unwrap();

    let written = table.dump(file.reopen().unwrap()).unwrap();
    assert_eq!(written, table.size());

    let reloaded = TranspositionTable::with_slots(1 << 10);
    let read = reloaded
        .fill(BufReader::new(file.reopen().unwrap()))
        .unwrap();
    assert_eq!(read, written);

    for pos in &positions {
        assert_eq!(reloaded.read_entry(pos), table.read_entry(pos));
    }
}

#[test]
fn test_book_format_is_header_then_word_pairs() {
    let table = TranspositionTable::with_slots(16);
    table.register(&Position::new(), 2.0, None, 1, true, false);

    let mut out = Vec::new();
    table.dump(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "# slots 16");
    assert_eq!(lines.len(), 3);
    let check: u64 = lines[1].parse().unwrap();
    let entry: u64 = lines[2].parse().unwrap();
    assert_eq!(check ^ entry, Position::new().hash().key());
}

#[test]
fn test_headerless_book_is_accepted() {
    let (table, positions) = seeded_table(1 << 10);
    let mut out = Vec::new();
    table.dump(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let body: String = text.lines().skip(1).map(|l| format!("{l}\n")).collect();

    let reloaded = TranspositionTable::with_slots(1 << 10);
    reloaded.fill(Cursor::new(body)).unwrap();
    assert_eq!(reloaded.read_entry(&positions[0]), table.read_entry(&positions[0]));
}

#[test]
fn test_size_mismatch_is_rejected_and_table_left_empty() {
    let (table, _) = seeded_table(1 << 10);
    let mut out = Vec::new();
    table.dump(&mut out).unwrap();

    let other = TranspositionTable::with_slots(1 << 9);
    other.register(&Position::new(), 0.0, None, 1, true, false);

    let err = other.fill(Cursor::new(out)).unwrap_err();
    assert!(
        matches!(err, BookError::SizeMismatch { expected: 512, found: 1024 }),
        "{err}"
    );
    assert_eq!(other.size(), 0);
}

#[test]
fn test_malformed_book_resets_the_table() {
    let (table, positions) = seeded_table(1 << 10);
    let book = "# slots 1024\n12345\nnot-a-number\n";

    let err = table.fill(Cursor::new(book)).unwrap_err();
    assert!(matches!(err, BookError::Malformed { line: 3, .. }), "{err}");
    assert_eq!(table.size(), 0);
    assert!(table.read_entry(&positions[0]).is_none());
}

#[test]
fn test_dangling_verification_word_is_malformed() {
    let table = TranspositionTable::with_slots(1 << 4);
    let valid_entry = TableEntry::VALID_BIT;
    let book = format!("# slots 16\n1\n{valid_entry}\n\n3\n");
    let err = table.fill(Cursor::new(book)).unwrap_err();
    assert!(matches!(err, BookError::Malformed { line: 5, .. }), "{err}");
}

#[test]
fn test_missing_book_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let player = AiPlayer::new(
        crate::config::EngineConfig::default().with_table_slots(64),
        "io".to_string(),
    );
    let err = player.load_book(dir.path().join("absent.book")).unwrap_err();
    assert!(matches!(err, BookError::Io(_)), "{err}");
}
