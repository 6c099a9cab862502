use crate::slot::CubieSlot;
use glam::{IVec3, Vec3};

/// One of the six outer layers of the puzzle, in standard notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    U, // +Y
    D, // -Y
    F, // +Z
    B, // -Z
    L, // -X
    R, // +X
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::F, Face::B, Face::L, Face::R];

    /// Notation letter
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
            Face::L => 'L',
            Face::R => 'R',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            'L' => Some(Face::L),
            'R' => Some(Face::R),
            _ => None,
        }
    }

    /// Face on the other side of the same axis
    pub fn opposite(self) -> Self {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::F => Face::B,
            Face::B => Face::F,
            Face::L => Face::R,
            Face::R => Face::L,
        }
    }

    /// Outward unit normal (integer)
    #[inline]
    pub fn normal(self) -> IVec3 {
        const TABLE: [IVec3; 6] = [
            IVec3::Y,
            IVec3::NEG_Y,
            IVec3::Z,
            IVec3::NEG_Z,
            IVec3::NEG_X,
            IVec3::X,
        ];
        TABLE[self as usize]
    }

    /// Outward unit normal
    #[inline]
    pub fn normal_vec3(self) -> Vec3 {
        self.normal().as_vec3()
    }

    /// The nine slots of this layer as a 3x3 grid, read row-major while
    /// looking at the face from outside the cube.
    pub fn grid(self) -> [CubieSlot; 9] {
        use CubieSlot::*;
        match self {
            Face::U => [UBL, UB, UBR, UL, U, UR, UFL, UF, UFR],
            Face::D => [DFL, DF, DFR, DL, D, DR, DBL, DB, DBR],
            Face::F => [UFL, UF, UFR, FL, F, FR, DFL, DF, DFR],
            Face::B => [UBR, UB, UBL, BR, B, BL, DBR, DB, DBL],
            Face::L => [UBL, UL, UFL, BL, L, FL, DBL, DL, DFL],
            Face::R => [UFR, UR, UBR, FR, R, BR, DFR, DR, DBR],
        }
    }

    /// Whether a slot belongs to this layer
    pub fn contains(self, slot: CubieSlot) -> bool {
        slot.position().dot(self.normal()) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for face in Face::ALL {
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.opposite().normal(), -face.normal());
        }
    }

    #[test]
    fn test_grid_center_is_face_center() {
        for face in Face::ALL {
            let grid = face.grid();
            assert_eq!(grid[4].position(), face.normal());
        }
    }

    #[test]
    fn test_grid_covers_exactly_the_layer() {
        for face in Face::ALL {
            let grid = face.grid();
            for slot in grid {
                assert!(face.contains(slot), "{slot} not in {:?}", face);
            }
            let in_layer = CubieSlot::ALL.iter().filter(|s| face.contains(**s)).count();
            assert_eq!(in_layer, 9);
        }
    }

    #[test]
    fn test_grid_is_read_from_outside() {
        // Row-major from outside: the first row's right-hand neighbour lies at
        // `right = up x normal` relative to the centre.
        for face in Face::ALL {
            let grid = face.grid();
            let center = grid[4].position();
            let up = grid[1].position() - center;
            let right = grid[5].position() - center;
            assert_eq!(up.cross(face.normal()), right, "{:?}", face);
        }
    }

    #[test]
    fn test_letters_round_trip() {
        for face in Face::ALL {
            assert_eq!(Face::from_letter(face.letter()), Some(face));
        }
        assert_eq!(Face::from_letter('X'), None);
    }
}
