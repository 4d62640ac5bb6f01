//! The transform chain: the ordered sequence of movement behaviors
//! attached to one piece.
//!
//! Each node holds an action point in shape-space, the coordinate a
//! player clicks to trigger it. Rotations and flips change shape-space
//! itself, so applying either one must update every node's action point
//! (and direction mask, and axis/handedness flag) in the same step, or
//! later clicks would land on stale coordinates. The chain owns its
//! nodes as an index-addressed list: `nodes[0]` is the innermost
//! behavior, the last element the most recently attached.

use tracing::trace;

use crate::geometry::{
    mirror_point, rotate_point, Axis, Coord, Direction, DirectionSet, Pointer,
};
use crate::piece::PieceCore;

/// One movement behavior and its state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    /// One-cell slides, gated by an allowed-direction mask. `current`
    /// remembers the last direction used so a center click repeats it.
    Translation {
        allowed: DirectionSet,
        current: Direction,
    },
    /// Quarter turns; `clockwise` flips sign whenever the piece is
    /// mirrored, because mirroring reverses handedness.
    Rotation { clockwise: bool },
    /// Mirror flips; the axis toggles whenever the piece is rotated.
    Flip { axis: Axis },
}

/// A link in a piece's transform chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformNode {
    kind: NodeKind,
    action_point: Coord,
}

impl TransformNode {
    pub fn slide(action_point: Coord, allowed: DirectionSet) -> Self {
        Self {
            kind: NodeKind::Translation {
                allowed,
                current: Direction::North,
            },
            action_point,
        }
    }

    pub fn spin(action_point: Coord, clockwise: bool) -> Self {
        Self {
            kind: NodeKind::Rotation { clockwise },
            action_point,
        }
    }

    pub fn mirror(action_point: Coord, axis: Axis) -> Self {
        Self {
            kind: NodeKind::Flip { axis },
            action_point,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn action_point(&self) -> Coord {
        self.action_point
    }
}

/// What a node at a given point would do, resolved from its current
/// orientation state. Used by the renderer for icon selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Slide,
    RotateCw,
    RotateCcw,
    FlipX,
    FlipY,
}

/// The ordered behavior chain wrapping one [`PieceCore`].
#[derive(Clone, Debug, PartialEq)]
pub struct TransformChain {
    core: PieceCore,
    nodes: Vec<TransformNode>,
}

impl TransformChain {
    pub fn new(core: PieceCore) -> Self {
        Self {
            core,
            nodes: Vec::new(),
        }
    }

    /// Attaches a node as the new outermost behavior.
    pub fn push(&mut self, node: TransformNode) {
        self.nodes.push(node);
    }

    pub fn core(&self) -> &PieceCore {
        &self.core
    }

    pub fn nodes(&self) -> &[TransformNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &TransformNode {
        &self.nodes[index]
    }

    /// Finds the node owning `point`, scanning from the outermost
    /// (most recently attached) node inward. When layered nodes share an
    /// action point the outermost match wins.
    pub fn find_node(&self, point: Coord) -> Option<usize> {
        (0..self.nodes.len())
            .rev()
            .find(|&i| self.nodes[i].action_point == point)
    }

    /// Resolves the icon kind for the node at `point`, if any.
    pub fn action_kind(&self, point: Coord) -> Option<ActionKind> {
        let index = self.find_node(point)?;
        Some(match self.nodes[index].kind {
            NodeKind::Translation { .. } => ActionKind::Slide,
            NodeKind::Rotation { clockwise: true } => ActionKind::RotateCw,
            NodeKind::Rotation { clockwise: false } => ActionKind::RotateCcw,
            NodeKind::Flip { axis: Axis::X } => ActionKind::FlipX,
            NodeKind::Flip { axis: Axis::Y } => ActionKind::FlipY,
        })
    }

    /// Picks the slide direction a pointer requests from a translation
    /// node: the cell quadrant nearest an edge, falling back to the
    /// node's current direction for a center pointer, filtered by the
    /// allowed mask. `None` means the slide is disallowed (or the node is
    /// not a translation) and nothing may be mutated.
    pub fn resolve_slide(&self, index: usize, pointer: Pointer) -> Option<Direction> {
        match self.nodes[index].kind {
            NodeKind::Translation { allowed, current } => {
                let candidate = pointer.direction_hint().unwrap_or(current);
                allowed.contains(candidate).then_some(candidate)
            }
            _ => None,
        }
    }

    pub(crate) fn set_slide_direction(&mut self, index: usize, direction: Direction) {
        if let NodeKind::Translation { current, .. } = &mut self.nodes[index].kind {
            *current = direction;
        }
    }

    /// Applies the transform at `index` to the core, keeping every
    /// node's state shape-space-consistent. No collision checking here;
    /// the caller validates and reverses on failure.
    pub(crate) fn apply(&mut self, index: usize) {
        match self.nodes[index].kind {
            NodeKind::Translation { current, .. } => self.translate(current),
            NodeKind::Rotation { clockwise } => self.turn(index, clockwise),
            NodeKind::Flip { axis } => self.mirror_shape(index, axis),
        }
    }

    /// Exactly reverses a prior `apply` at the same node: translations
    /// step the opposite way (the stored direction is preserved),
    /// rotations turn the other way, flips reapply themselves.
    pub(crate) fn reverse(&mut self, index: usize) {
        match self.nodes[index].kind {
            NodeKind::Translation { current, .. } => self.translate(current.opposite()),
            NodeKind::Rotation { clockwise } => self.turn(index, !clockwise),
            NodeKind::Flip { axis } => self.mirror_shape(index, axis),
        }
    }

    fn translate(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        let pos = self.core.position();
        self.core.set_position(Coord::new(pos.x + dx, pos.y + dy));
        trace!(%direction, position = %self.core.position(), "piece translated");
    }

    /// Quarter-turns the piece around the acting node's action point.
    ///
    /// Ordering matters: the position is re-anchored against the old
    /// fixture point and the old action point, then every action point is
    /// rotated in the pre-rotation dimensions, and only then are the
    /// shape and the new fixture point (the acting node's rotated action
    /// point) installed.
    fn turn(&mut self, index: usize, clockwise: bool) {
        let width = self.core.shape().width() as i32;
        let height = self.core.shape().height() as i32;
        let action = self.nodes[index].action_point;

        self.core.add_rotation(clockwise);
        self.reanchor(action);

        for node in &mut self.nodes {
            node.action_point = rotate_point(node.action_point, width, height, clockwise);
            match &mut node.kind {
                NodeKind::Translation { allowed, .. } => *allowed = allowed.rotated(clockwise),
                NodeKind::Flip { axis } => *axis = axis.toggled(),
                NodeKind::Rotation { .. } => {}
            }
        }

        let rotated = self.core.shape().rotated(clockwise);
        self.core.set_shape(rotated);
        self.core.set_fixture_point(self.nodes[index].action_point);
        trace!(clockwise, offset = %self.core.offset(), "piece rotated");
    }

    /// Mirrors the piece across `axis`, pivoting on the acting node's
    /// action point. Same ordering discipline as [`Self::turn`].
    fn mirror_shape(&mut self, index: usize, axis: Axis) {
        let width = self.core.shape().width() as i32;
        let height = self.core.shape().height() as i32;
        let action = self.nodes[index].action_point;

        self.core.add_flip(axis);
        self.reanchor(action);

        for node in &mut self.nodes {
            node.action_point = mirror_point(node.action_point, width, height, axis);
            match &mut node.kind {
                NodeKind::Translation { allowed, .. } => *allowed = allowed.mirrored(axis),
                NodeKind::Rotation { clockwise } => *clockwise = !*clockwise,
                NodeKind::Flip { .. } => {}
            }
        }

        let mirrored = self.core.shape().mirrored(axis);
        self.core.set_shape(mirrored);
        self.core.set_fixture_point(self.nodes[index].action_point);
        trace!(?axis, offset = %self.core.offset(), "piece mirrored");
    }

    /// Shifts the position so the world cell under `action` stays fixed
    /// while the fixture point moves onto it.
    fn reanchor(&mut self, action: Coord) {
        let fixture = self.core.fixture_point();
        let pos = self.core.position();
        self.core.set_position(Coord::new(
            pos.x - (fixture.x - action.x),
            pos.y - (fixture.y - action.y),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::ColorTag;
    use crate::shape::Shape;

    fn core(pattern: &[&str], position: Coord, fixture: Coord) -> PieceCore {
        PieceCore::new(
            Shape::from_pattern(pattern).unwrap(),
            position,
            fixture,
            ColorTag::Blue,
            "test",
        )
    }

    /// L-shaped 2x2 piece with a rotation node, as in the level editor's
    /// simplest rotating piece.
    fn l_chain() -> TransformChain {
        let mut chain = TransformChain::new(core(
            &["11", "01"],
            Coord::new(3, 3),
            Coord::new(1, 1),
        ));
        chain.push(TransformNode::spin(Coord::new(1, 1), true));
        chain
    }

    #[test]
    fn test_clockwise_turn_of_l_shape() {
        let mut chain = l_chain();
        chain.apply(0);
        assert_eq!(
            chain.core().shape(),
            &Shape::from_pattern(&["01", "11"]).unwrap()
        );
        assert_eq!(chain.core().rotations(), 1);
    }

    #[test]
    fn test_four_turns_are_the_identity() {
        let mut chain = l_chain();
        let initial = chain.clone();
        for _ in 0..4 {
            chain.apply(0);
        }
        assert_eq!(chain, initial);
    }

    #[test]
    fn test_double_flip_is_the_identity() {
        let mut chain = TransformChain::new(core(
            &["110", "011"],
            Coord::new(2, 2),
            Coord::new(0, 0),
        ));
        chain.push(TransformNode::mirror(Coord::new(0, 0), Axis::Y));
        let initial = chain.clone();
        chain.apply(0);
        assert_ne!(chain.core().shape(), initial.core().shape());
        assert!(chain.core().y_flipped());
        chain.apply(0);
        assert_eq!(chain, initial);
    }

    #[test]
    fn test_turn_then_reverse_restores_node_state_exactly() {
        // fixture point starts on the acting node's action point, so the
        // reversal is bit-exact on the whole chain
        let mut chain = l_chain();
        let initial = chain.clone();
        chain.apply(0);
        chain.reverse(0);
        assert_eq!(chain, initial);
    }

    #[test]
    fn test_reverse_restores_world_placement_for_any_fixture() {
        // fixture point away from the action point: position and fixture
        // re-anchor onto the acting point, but the world placement, the
        // shape, and every node's state come back exactly
        let mut chain = TransformChain::new(core(
            &["111", "100"],
            Coord::new(4, 2),
            Coord::new(0, 0),
        ));
        chain.push(TransformNode::slide(Coord::new(0, 1), DirectionSet::ALL));
        chain.push(TransformNode::spin(Coord::new(2, 0), true));

        let before = chain.clone();
        chain.apply(1);
        chain.reverse(1);

        assert_eq!(chain.core().offset(), before.core().offset());
        assert_eq!(chain.core().shape(), before.core().shape());
        assert_eq!(chain.core().rotations(), before.core().rotations());
        assert_eq!(chain.nodes(), before.nodes());
    }

    #[test]
    fn test_turn_keeps_the_action_cell_fixed_in_world_space() {
        let mut chain = l_chain();
        let action_world = {
            let offset = chain.core().offset();
            let action = chain.node(0).action_point();
            Coord::new(offset.x + action.x, offset.y + action.y)
        };
        chain.apply(0);
        let offset = chain.core().offset();
        let action = chain.node(0).action_point();
        assert_eq!(
            Coord::new(offset.x + action.x, offset.y + action.y),
            action_world
        );
    }

    #[test]
    fn test_turn_rotates_sibling_masks_and_axes() {
        let mut chain = TransformChain::new(core(
            &["11", "11"],
            Coord::new(2, 2),
            Coord::new(0, 0),
        ));
        chain.push(TransformNode::slide(
            Coord::new(0, 0),
            DirectionSet::single(Direction::North),
        ));
        chain.push(TransformNode::mirror(Coord::new(0, 1), Axis::X));
        chain.push(TransformNode::spin(Coord::new(1, 1), true));

        chain.apply(2);

        match *chain.node(0).kind() {
            NodeKind::Translation { allowed, .. } => {
                assert!(allowed.contains(Direction::East));
                assert!(!allowed.contains(Direction::North));
            }
            ref other => panic!("expected translation node, got {other:?}"),
        }
        assert_eq!(*chain.node(1).kind(), NodeKind::Flip { axis: Axis::Y });
        // a rotation never changes another rotation's handedness
        assert_eq!(
            *chain.node(2).kind(),
            NodeKind::Rotation { clockwise: true }
        );
    }

    #[test]
    fn test_flip_mirrors_sibling_masks_and_inverts_handedness() {
        let mut chain = TransformChain::new(core(
            &["11", "11"],
            Coord::new(2, 2),
            Coord::new(0, 0),
        ));
        chain.push(TransformNode::slide(
            Coord::new(0, 0),
            DirectionSet::from_flags([true, true, false, false]),
        ));
        chain.push(TransformNode::spin(Coord::new(1, 0), true));
        chain.push(TransformNode::mirror(Coord::new(0, 1), Axis::Y));

        chain.apply(2);

        match *chain.node(0).kind() {
            NodeKind::Translation { allowed, .. } => {
                // Y-axis flip swaps east and west, leaves north alone
                assert!(allowed.contains(Direction::North));
                assert!(allowed.contains(Direction::West));
                assert!(!allowed.contains(Direction::East));
            }
            ref other => panic!("expected translation node, got {other:?}"),
        }
        assert_eq!(
            *chain.node(1).kind(),
            NodeKind::Rotation { clockwise: false }
        );
        // a flip does not change another flip's axis
        assert_eq!(*chain.node(2).kind(), NodeKind::Flip { axis: Axis::Y });
    }

    #[test]
    fn test_outermost_node_wins_on_shared_action_point() {
        let mut chain = TransformChain::new(core(
            &["11"],
            Coord::new(0, 0),
            Coord::new(0, 0),
        ));
        chain.push(TransformNode::spin(Coord::new(0, 0), true));
        chain.push(TransformNode::slide(Coord::new(0, 0), DirectionSet::ALL));

        assert_eq!(chain.find_node(Coord::new(0, 0)), Some(1));
        assert_eq!(chain.action_kind(Coord::new(0, 0)), Some(ActionKind::Slide));
        assert_eq!(chain.find_node(Coord::new(1, 0)), None);
    }

    #[test]
    fn test_action_kind_tracks_orientation_state() {
        let mut chain = TransformChain::new(core(
            &["11", "11"],
            Coord::new(1, 1),
            Coord::new(0, 0),
        ));
        chain.push(TransformNode::spin(Coord::new(1, 1), true));
        chain.push(TransformNode::mirror(Coord::new(0, 0), Axis::Y));

        assert_eq!(
            chain.action_kind(Coord::new(1, 1)),
            Some(ActionKind::RotateCw)
        );
        // flipping inverts the rotation node's handedness
        chain.apply(1);
        assert_eq!(
            chain.action_kind(Coord::new(0, 1)),
            Some(ActionKind::RotateCcw)
        );
    }

    #[test]
    fn test_resolve_slide_filters_by_mask() {
        let mut chain = TransformChain::new(core(
            &["11"],
            Coord::new(0, 0),
            Coord::new(0, 0),
        ));
        chain.push(TransformNode::slide(
            Coord::new(0, 0),
            DirectionSet::from_flags([false, true, false, false]),
        ));

        assert_eq!(
            chain.resolve_slide(0, Pointer::toward(Direction::East)),
            Some(Direction::East)
        );
        assert_eq!(chain.resolve_slide(0, Pointer::toward(Direction::North)), None);
        // center pointer falls back to the current direction (north), which
        // the mask rejects
        assert_eq!(chain.resolve_slide(0, Pointer::center()), None);
    }
}
