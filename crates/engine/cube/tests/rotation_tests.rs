//! Algebraic properties of face turns

mod common;

use common::{moves, tilted_definition, EPSILON};
use cube::{CubieSlot, Face, Move, Turn};

#[test]
fn test_empty_algorithm_is_identity() {
    let definition = tilted_definition();
    assert_eq!(definition.apply_algorithm(&[]), definition);
}

#[test]
fn test_quarter_turn_has_order_four() {
    let definition = tilted_definition();
    for face in Face::ALL {
        for turn in [Turn::Clockwise, Turn::CounterClockwise] {
            let mv = Move::new(face, turn);
            let result = definition.apply_algorithm(&[mv; 4]);
            assert!(definition.approx_eq(&result, EPSILON), "{mv} x4");

            let partial = definition.apply_algorithm(&[mv; 2]);
            assert!(!definition.approx_eq(&partial, EPSILON), "{mv} x2");
        }
    }
}

#[test]
fn test_two_quarter_turns_equal_half_turn() {
    let definition = tilted_definition();
    for face in Face::ALL {
        let half = definition.apply_algorithm(&[Move::new(face, Turn::Half)]);
        let cw = definition.apply_algorithm(&[Move::new(face, Turn::Clockwise); 2]);
        let ccw = definition.apply_algorithm(&[Move::new(face, Turn::CounterClockwise); 2]);
        assert!(half.approx_eq(&cw, EPSILON), "{:?}", face);
        assert!(half.approx_eq(&ccw, EPSILON), "{:?}", face);
    }
}

#[test]
fn test_half_turn_matches_quarter_turns_in_sign() {
    let definition = tilted_definition();
    for face in [Face::U, Face::F, Face::R] {
        let half = definition.apply_algorithm(&[Move::new(face, Turn::Half)]);
        let cw = definition.apply_algorithm(&[Move::new(face, Turn::Clockwise); 2]);
        for slot in face.grid() {
            assert!(
                half[slot].orientation().abs_diff_eq(cw[slot].orientation(), EPSILON),
                "{:?} {slot}",
                face
            );
        }
    }
}

#[test]
fn test_move_followed_by_inverse_is_identity() {
    let definition = tilted_definition();
    for mv in Move::ALL {
        let result = definition.apply_algorithm(&[mv, mv.inverse()]);
        assert!(definition.approx_eq(&result, EPSILON), "{mv} {}", mv.inverse());
    }
}

#[test]
fn test_turn_leaves_other_slots_untouched() {
    let definition = tilted_definition();
    for mv in Move::ALL {
        let face = mv.face().unwrap();
        let result = definition.apply_algorithm(&[mv]);
        for slot in CubieSlot::ALL {
            if !face.grid().contains(&slot) {
                assert_eq!(result[slot], definition[slot], "{mv} changed {slot}");
            }
        }
        // every slot of the layer, centre included, is re-oriented
        assert_eq!(result.changed_slots(&definition).len(), 9, "{mv}");
    }
}

#[test]
fn test_unknown_moves_are_skipped() {
    let definition = tilted_definition();
    let with_noise = definition.apply_algorithm(&[
        Move::parse("R"),
        Move::parse("X"),
        Move::parse("U3"),
        Move::parse("U"),
    ]);
    let clean = definition.apply_algorithm(&moves("R U"));
    assert_eq!(with_noise, clean);
}

#[test]
fn test_sexy_move_has_order_six() {
    let scramble = moves("F2 L' B D2 R U' F B2 L2 D' R2 U F' D B' L");
    let start = tilted_definition().apply_algorithm(&scramble);

    let sexy = moves("R U R' U'");
    let mut state = start.clone();
    for round in 1..=6 {
        state = state.apply_algorithm(&sexy);
        if round < 6 {
            assert!(!state.approx_eq(&start, EPSILON), "returned after {round}");
        }
    }
    assert!(state.approx_eq(&start, EPSILON));
}

#[test]
fn test_scramble_then_inverse_restores() {
    let scramble = moves("R U2 F' L D B2 R' U F2 D' L2 B");
    let inverse: Vec<Move> = scramble.iter().rev().map(|mv| mv.inverse()).collect();

    let start = tilted_definition();
    let restored = start.apply_algorithm(&scramble).apply_algorithm(&inverse);
    assert!(start.approx_eq(&restored, EPSILON));
}

#[test]
fn test_apply_algorithm_does_not_mutate_input() {
    let definition = tilted_definition();
    let snapshot = definition.clone();
    let _ = definition.apply_algorithm(&moves("R U F"));
    assert_eq!(definition, snapshot);
}

#[test]
fn test_deterministic() {
    let definition = tilted_definition();
    let algorithm = moves("L2 D F' R B U2");
    assert_eq!(
        definition.apply_algorithm(&algorithm),
        definition.apply_algorithm(&algorithm)
    );
}
