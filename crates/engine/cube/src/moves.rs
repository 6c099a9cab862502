//! Face-turn notation and the fixed algebra bound to each move.
//!
//! A move is a face plus a turn class. Every move carries a base rotation
//! quaternion and a permutation of its face's 3x3 grid. Clockwise is measured
//! looking at the face from outside, which is a -90 degree right-handed
//! rotation about the face's outward normal.

use crate::error::MoveError;
use crate::face::Face;
use glam::Quat;
use std::f32::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

/// Tokens accepted by [`Move::from_str`], in [`Move::ALL`] order
pub const NOTATION: [&str; 18] = [
    "U", "D", "F", "B", "L", "R", "U'", "D'", "F'", "B'", "L'", "R'", "U2", "D2", "F2", "B2", "L2",
    "R2",
];

// Clockwise quarter turns: (-n * sin(pi/4), cos(pi/4)) for outward normal n.
const Q_U: Quat = Quat::from_xyzw(0.0, -FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2);
const Q_D: Quat = Quat::from_xyzw(0.0, FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2);
const Q_F: Quat = Quat::from_xyzw(0.0, 0.0, -FRAC_1_SQRT_2, FRAC_1_SQRT_2);
const Q_B: Quat = Quat::from_xyzw(0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2);
const Q_L: Quat = Quat::from_xyzw(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2);
const Q_R: Quat = Quat::from_xyzw(-FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2);

// Half turns, one per axis, signed as the square of the U, F and R quarter turns.
const Q_UD2: Quat = Quat::from_xyzw(0.0, -1.0, 0.0, 0.0);
const Q_FB2: Quat = Quat::from_xyzw(0.0, 0.0, -1.0, 0.0);
const Q_LR2: Quat = Quat::from_xyzw(-1.0, 0.0, 0.0, 0.0);

/// Rotation class of a face turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// 90 degrees clockwise (`R`)
    Clockwise,
    /// 90 degrees counter-clockwise (`R'`)
    CounterClockwise,
    /// 180 degrees (`R2`)
    Half,
}

impl Turn {
    /// Notation suffix
    pub fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        }
    }

    /// Grid permutation: entry `k` is the grid index whose cubie lands on
    /// grid position `k`.
    pub fn permutation(self) -> [usize; 9] {
        match self {
            Turn::Clockwise => [6, 3, 0, 7, 4, 1, 8, 5, 2],
            Turn::CounterClockwise => [2, 5, 8, 1, 4, 7, 0, 3, 6],
            Turn::Half => [8, 7, 6, 5, 4, 3, 2, 1, 0],
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }
}

/// One face turn, or the no-op sentinel for unrecognized notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Turn(Face, Turn),
    Unknown,
}

impl Move {
    /// The 18 legal moves: clockwise turns, then counter-clockwise, then half turns
    pub const ALL: [Move; 18] = {
        use Face::*;
        use Turn::*;
        [
            Move::Turn(U, Clockwise),
            Move::Turn(D, Clockwise),
            Move::Turn(F, Clockwise),
            Move::Turn(B, Clockwise),
            Move::Turn(L, Clockwise),
            Move::Turn(R, Clockwise),
            Move::Turn(U, CounterClockwise),
            Move::Turn(D, CounterClockwise),
            Move::Turn(F, CounterClockwise),
            Move::Turn(B, CounterClockwise),
            Move::Turn(L, CounterClockwise),
            Move::Turn(R, CounterClockwise),
            Move::Turn(U, Half),
            Move::Turn(D, Half),
            Move::Turn(F, Half),
            Move::Turn(B, Half),
            Move::Turn(L, Half),
            Move::Turn(R, Half),
        ]
    };

    pub const fn new(face: Face, turn: Turn) -> Self {
        Move::Turn(face, turn)
    }

    /// Permissive parse: anything outside the 18 legal tokens yields
    /// [`Move::Unknown`], which rotates nothing.
    pub fn parse(token: &str) -> Self {
        let mut chars = token.chars();
        let Some(face) = chars.next().and_then(Face::from_letter) else {
            return Move::Unknown;
        };
        let turn = match (chars.next(), chars.next()) {
            (None, _) => Turn::Clockwise,
            (Some('\''), None) => Turn::CounterClockwise,
            (Some('2'), None) => Turn::Half,
            _ => return Move::Unknown,
        };
        Move::Turn(face, turn)
    }

    pub fn face(self) -> Option<Face> {
        match self {
            Move::Turn(face, _) => Some(face),
            Move::Unknown => None,
        }
    }

    pub fn turn(self) -> Option<Turn> {
        match self {
            Move::Turn(_, turn) => Some(turn),
            Move::Unknown => None,
        }
    }

    /// Move that undoes this one
    pub fn inverse(self) -> Self {
        match self {
            Move::Turn(face, turn) => Move::Turn(face, turn.inverse()),
            Move::Unknown => Move::Unknown,
        }
    }

    /// Base rotation composed onto every cubie of the turned layer.
    ///
    /// A counter-clockwise turn is the clockwise turn of the opposite face;
    /// half turns share one quaternion per axis. `Unknown` maps to identity.
    pub fn base_rotation(self) -> Quat {
        match self {
            Move::Turn(face, Turn::Clockwise) => clockwise_rotation(face),
            Move::Turn(face, Turn::CounterClockwise) => clockwise_rotation(face.opposite()),
            Move::Turn(Face::U | Face::D, Turn::Half) => Q_UD2,
            Move::Turn(Face::F | Face::B, Turn::Half) => Q_FB2,
            Move::Turn(Face::L | Face::R, Turn::Half) => Q_LR2,
            Move::Unknown => Quat::IDENTITY,
        }
    }
}

fn clockwise_rotation(face: Face) -> Quat {
    match face {
        Face::U => Q_U,
        Face::D => Q_D,
        Face::F => Q_F,
        Face::B => Q_B,
        Face::L => Q_L,
        Face::R => Q_R,
    }
}

impl FromStr for Move {
    type Err = MoveError;

    /// Strict parse over the same vocabulary as [`Move::parse`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Move::parse(s) {
            Move::Unknown => Err(MoveError::InvalidToken(s.to_string())),
            mv => Ok(mv),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Turn(face, turn) => write!(f, "{}{}", face.letter(), turn.suffix()),
            Move::Unknown => f.write_str("?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::CubieSlot;
    use glam::IVec3;

    fn rotate_position(q: Quat, p: IVec3) -> IVec3 {
        (q * p.as_vec3()).round().as_ivec3()
    }

    #[test]
    fn test_parse_all_notation() {
        for (token, expected) in NOTATION.iter().zip(Move::ALL) {
            assert_eq!(Move::parse(token), expected);
            assert_eq!(expected.to_string(), *token);
        }
    }

    #[test]
    fn test_parse_unknown_tokens() {
        for token in ["", "X", "u", "R3", "R''", "R2'", "RR", "U'2", " R"] {
            assert_eq!(Move::parse(token), Move::Unknown, "{token:?}");
            assert!(token.parse::<Move>().is_err(), "{token:?}");
        }
    }

    #[test]
    fn test_nine_unique_rotations() {
        let mut unique: Vec<Quat> = Vec::new();
        for mv in Move::ALL {
            let q = mv.base_rotation();
            assert!(q.is_normalized());
            if !unique.iter().any(|u| u.abs_diff_eq(q, 1e-6)) {
                unique.push(q);
            }
        }
        assert_eq!(unique.len(), 9);
    }

    #[test]
    fn test_base_rotation_matches_axis_angle() {
        for face in Face::ALL {
            let expected = Quat::from_axis_angle(face.normal_vec3(), -std::f32::consts::FRAC_PI_2);
            let actual = Move::new(face, Turn::Clockwise).base_rotation();
            assert!(actual.abs_diff_eq(expected, 1e-6), "{:?}", face);
        }
    }

    #[test]
    fn test_half_turn_is_signed_square_of_quarter_turn() {
        for face in [Face::U, Face::F, Face::R] {
            let quarter = Move::new(face, Turn::Clockwise).base_rotation();
            let half = Move::new(face, Turn::Half).base_rotation();
            assert!((quarter * quarter).abs_diff_eq(half, 1e-6), "{:?}", face);
            // the opposite face shares the half turn, equal up to sign
            let opposite = Move::new(face.opposite(), Turn::Clockwise).base_rotation();
            assert!((opposite * opposite).abs_diff_eq(-half, 1e-6), "{:?}", face);
        }
    }

    #[test]
    fn test_permutation_agrees_with_rotation() {
        // The cubie that lands on grid position k came from permutation[k];
        // rotating its home position by the base rotation must land on k.
        for mv in Move::ALL {
            let (face, turn) = (mv.face().unwrap(), mv.turn().unwrap());
            let grid = face.grid();
            let q = mv.base_rotation();
            for (k, src) in turn.permutation().into_iter().enumerate() {
                assert_eq!(
                    rotate_position(q, grid[src].position()),
                    grid[k].position(),
                    "{mv} slot {}",
                    grid[k]
                );
            }
        }
    }

    #[test]
    fn test_clockwise_u_moves_front_left_to_back_left() {
        let grid = Face::U.grid();
        let source = grid[Turn::Clockwise.permutation()[0]];
        assert_eq!(grid[0], CubieSlot::UBL);
        assert_eq!(source, CubieSlot::UFL);
    }

    #[test]
    fn test_inverse() {
        for mv in Move::ALL {
            assert_eq!(mv.inverse().inverse(), mv);
        }
        assert_eq!(Move::Unknown.inverse(), Move::Unknown);
        assert_eq!(Move::Unknown.base_rotation(), Quat::IDENTITY);
    }
}
