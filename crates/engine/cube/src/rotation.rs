//! Face turns applied to a cube definition.
//!
//! A turn reads the nine nodes of the turned layer in grid order, composes
//! each node's orientation with the move's base rotation as
//! `orientation * base` (never the reverse), and writes the nodes back
//! permuted by the turn class. The other 17 slots are not touched.

use crate::definition::CubeDefinition;
use crate::moves::Move;
use crate::scene::Node;
use crate::slot::CubieSlot;

impl CubeDefinition {
    /// Apply one move in place. `Move::Unknown` leaves the definition as is.
    pub fn rotate_mut(&mut self, mv: Move) {
        let Move::Turn(face, turn) = mv else {
            return;
        };
        let base = mv.base_rotation();
        let grid = face.grid();

        let rotated: [Node; 9] = grid.map(|slot| {
            let mut node = self.get(slot).clone();
            node.set_orientation(node.orientation() * base);
            node
        });

        for (slot, source) in grid.into_iter().zip(turn.permutation()) {
            *self.get_mut(slot) = rotated[source].clone();
        }
    }

    /// Apply one move, returning the new definition
    pub fn rotate(mut self, mv: Move) -> Self {
        self.rotate_mut(mv);
        self
    }

    /// Fold moves left to right over a copy of this definition
    pub fn apply_algorithm<'a, I>(&self, moves: I) -> Self
    where
        I: IntoIterator<Item = &'a Move>,
    {
        moves
            .into_iter()
            .fold(self.clone(), |definition, mv| definition.rotate(*mv))
    }

    /// Structural equality up to float error in orientations.
    ///
    /// Every non-rotation field must match exactly; orientations must be the
    /// same rotation within `epsilon`, where `q` and `-q` count as equal.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        CubieSlot::ALL.into_iter().all(|slot| {
            let (a, b) = (self.get(slot), other.get(slot));
            let same_rotation = 1.0 - a.orientation().dot(b.orientation()).abs() <= epsilon;
            let same_payload = Node {
                rotation: None,
                ..a.clone()
            } == Node {
                rotation: None,
                ..b.clone()
            };
            same_rotation && same_payload
        })
    }

    /// Slots whose node differs from `other`
    pub fn changed_slots(&self, other: &Self) -> Vec<CubieSlot> {
        CubieSlot::ALL
            .into_iter()
            .filter(|slot| self.get(*slot) != other.get(*slot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::Face;
    use crate::moves::Turn;
    use glam::Quat;

    fn labelled() -> CubeDefinition {
        let nodes = CubieSlot::ALL.map(|slot| {
            let mut node = Node::named(slot.node_name());
            node.mesh = Some(slot.index() as u32);
            node
        });
        CubeDefinition::from_canonical(nodes)
    }

    #[test]
    fn test_unknown_is_noop() {
        let definition = labelled();
        assert_eq!(definition.clone().rotate(Move::Unknown), definition);
    }

    #[test]
    fn test_clockwise_permutation() {
        let start = labelled();
        let turned = start.clone().rotate(Move::new(Face::U, Turn::Clockwise));
        // (n7, n4, n1, n8, n5, n2, n9, n6, n3)
        let expected = [
            CubieSlot::UFL,
            CubieSlot::UL,
            CubieSlot::UBL,
            CubieSlot::UF,
            CubieSlot::U,
            CubieSlot::UB,
            CubieSlot::UFR,
            CubieSlot::UR,
            CubieSlot::UBR,
        ];
        for (slot, from) in Face::U.grid().into_iter().zip(expected) {
            assert_eq!(turned[slot].mesh, start[from].mesh, "{slot}");
        }
    }

    #[test]
    fn test_counter_clockwise_and_half_permutations() {
        let start = labelled();
        let ccw = start.clone().rotate(Move::new(Face::F, Turn::CounterClockwise));
        let half = start.clone().rotate(Move::new(Face::F, Turn::Half));
        let grid = Face::F.grid();
        // (n3, n6, n9, n2, n5, n8, n1, n4, n7)
        assert_eq!(ccw[grid[0]].mesh, start[grid[2]].mesh);
        assert_eq!(ccw[grid[1]].mesh, start[grid[5]].mesh);
        assert_eq!(ccw[grid[6]].mesh, start[grid[0]].mesh);
        // (n9, n8, ..., n1)
        assert_eq!(half[grid[0]].mesh, start[grid[8]].mesh);
        assert_eq!(half[grid[3]].mesh, start[grid[5]].mesh);
        assert_eq!(half[grid[4]].mesh, start[grid[4]].mesh);
    }

    #[test]
    fn test_orientation_is_right_multiplied() {
        let mut start = labelled();
        let existing = Quat::from_rotation_x(0.3);
        start[CubieSlot::UFL].set_orientation(existing);

        let mv = Move::new(Face::U, Turn::Clockwise);
        let turned = start.rotate(mv);
        let expected = existing * mv.base_rotation();
        assert!(turned[CubieSlot::UBL].orientation().abs_diff_eq(expected, 1e-6));
        assert!(!turned[CubieSlot::UBL]
            .orientation()
            .abs_diff_eq(mv.base_rotation() * existing, 1e-3));
    }

    #[test]
    fn test_changed_slots_limited_to_layer() {
        let start = labelled();
        for mv in Move::ALL {
            let turned = start.clone().rotate(mv);
            let face = mv.face().unwrap();
            for slot in turned.changed_slots(&start) {
                assert!(face.contains(slot), "{mv} touched {slot}");
            }
        }
    }

    #[test]
    fn test_approx_eq_ignores_quaternion_sign() {
        let mut a = labelled();
        let mut b = labelled();
        let q = Quat::from_rotation_z(0.7);
        a[CubieSlot::R].set_orientation(q);
        b[CubieSlot::R].set_orientation(-q);
        assert!(a.approx_eq(&b, 1e-6));

        b[CubieSlot::R].mesh = Some(1000);
        assert!(!a.approx_eq(&b, 1e-6));
    }
}
