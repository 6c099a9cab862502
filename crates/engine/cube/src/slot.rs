use glam::IVec3;
use std::fmt;

/// Named position of a cubie inside the 3x3x3 puzzle
///
/// 8 corners, 12 edges and 6 centers. The declaration order is the canonical
/// order used both when reading templates and when emitting node lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CubieSlot {
    UBL,
    UB,
    UBR,
    UL,
    U,
    UR,
    UFL,
    UF,
    UFR,
    BL,
    B,
    BR,
    L,
    R,
    FL,
    F,
    FR,
    DBL,
    DB,
    DBR,
    DL,
    D,
    DR,
    DFL,
    DF,
    DFR,
}

impl CubieSlot {
    /// Number of slots in a 3x3x3 cube (the hidden core has no node)
    pub const COUNT: usize = 26;

    /// All slots in canonical order
    pub const ALL: [CubieSlot; Self::COUNT] = [
        CubieSlot::UBL,
        CubieSlot::UB,
        CubieSlot::UBR,
        CubieSlot::UL,
        CubieSlot::U,
        CubieSlot::UR,
        CubieSlot::UFL,
        CubieSlot::UF,
        CubieSlot::UFR,
        CubieSlot::BL,
        CubieSlot::B,
        CubieSlot::BR,
        CubieSlot::L,
        CubieSlot::R,
        CubieSlot::FL,
        CubieSlot::F,
        CubieSlot::FR,
        CubieSlot::DBL,
        CubieSlot::DB,
        CubieSlot::DBR,
        CubieSlot::DL,
        CubieSlot::D,
        CubieSlot::DR,
        CubieSlot::DFL,
        CubieSlot::DF,
        CubieSlot::DFR,
    ];

    /// Canonical index (0..26)
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Face letters naming this slot, e.g. `"UBL"`
    pub fn code(self) -> &'static str {
        match self {
            CubieSlot::UBL => "UBL",
            CubieSlot::UB => "UB",
            CubieSlot::UBR => "UBR",
            CubieSlot::UL => "UL",
            CubieSlot::U => "U",
            CubieSlot::UR => "UR",
            CubieSlot::UFL => "UFL",
            CubieSlot::UF => "UF",
            CubieSlot::UFR => "UFR",
            CubieSlot::BL => "BL",
            CubieSlot::B => "B",
            CubieSlot::BR => "BR",
            CubieSlot::L => "L",
            CubieSlot::R => "R",
            CubieSlot::FL => "FL",
            CubieSlot::F => "F",
            CubieSlot::FR => "FR",
            CubieSlot::DBL => "DBL",
            CubieSlot::DB => "DB",
            CubieSlot::DBR => "DBR",
            CubieSlot::DL => "DL",
            CubieSlot::D => "D",
            CubieSlot::DR => "DR",
            CubieSlot::DFL => "DFL",
            CubieSlot::DF => "DF",
            CubieSlot::DFR => "DFR",
        }
    }

    /// Look up a slot by its face letters
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.code() == code)
    }

    /// Name of the template node bound to this slot: 1-based canonical index,
    /// zero-padded to two digits, then the slot code (`"01_UBL"`, `"26_DFR"`).
    pub fn node_name(self) -> String {
        format!("{:02}_{}", self.index() + 1, self.code())
    }

    /// Inverse of [`CubieSlot::node_name`]
    pub fn from_node_name(name: &str) -> Option<Self> {
        let slot = Self::from_code(name.split_once('_')?.1)?;
        (slot.node_name() == name).then_some(slot)
    }

    /// Home grid position in {-1, 0, 1}^3 (X right, Y up, Z front)
    pub fn position(self) -> IVec3 {
        self.code().chars().fold(IVec3::ZERO, |pos, letter| match letter {
            'U' => pos.with_y(1),
            'D' => pos.with_y(-1),
            'F' => pos.with_z(1),
            'B' => pos.with_z(-1),
            'R' => pos.with_x(1),
            'L' => pos.with_x(-1),
            _ => pos,
        })
    }

    pub fn is_corner(self) -> bool {
        self.code().len() == 3
    }

    pub fn is_edge(self) -> bool {
        self.code().len() == 2
    }

    pub fn is_center(self) -> bool {
        self.code().len() == 1
    }
}

impl fmt::Display for CubieSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, slot) in CubieSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_piece_counts() {
        let corners = CubieSlot::ALL.iter().filter(|s| s.is_corner()).count();
        let edges = CubieSlot::ALL.iter().filter(|s| s.is_edge()).count();
        let centers = CubieSlot::ALL.iter().filter(|s| s.is_center()).count();
        assert_eq!((corners, edges, centers), (8, 12, 6));
    }

    #[test]
    fn test_positions_are_unique_and_exclude_core() {
        let positions: HashSet<IVec3> = CubieSlot::ALL.iter().map(|s| s.position()).collect();
        assert_eq!(positions.len(), CubieSlot::COUNT);
        assert!(!positions.contains(&IVec3::ZERO));
        assert_eq!(CubieSlot::UFR.position(), IVec3::new(1, 1, 1));
        assert_eq!(CubieSlot::DBL.position(), IVec3::new(-1, -1, -1));
    }

    #[test]
    fn test_node_names() {
        assert_eq!(CubieSlot::UBL.node_name(), "01_UBL");
        assert_eq!(CubieSlot::R.node_name(), "14_R");
        assert_eq!(CubieSlot::DFR.node_name(), "26_DFR");

        for slot in CubieSlot::ALL {
            assert_eq!(CubieSlot::from_node_name(&slot.node_name()), Some(slot));
        }
    }

    #[test]
    fn test_node_name_rejects_mismatched_prefix() {
        assert_eq!(CubieSlot::from_node_name("02_UBL"), None);
        assert_eq!(CubieSlot::from_node_name("1_UBL"), None);
        assert_eq!(CubieSlot::from_node_name("+1_UBL"), None);
        assert_eq!(CubieSlot::from_node_name("001_UBL"), None);
        assert_eq!(CubieSlot::from_node_name("UBL"), None);
        assert_eq!(CubieSlot::from_node_name("01_XYZ"), None);
    }
}
