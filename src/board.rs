//! The piece set for one level: every transform chain, every target,
//! the dispatch protocol, and the collision detector.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::arena::Arena;
use crate::geometry::{Axis, Coord, Pointer};
use crate::history::MoveRecord;
use crate::shape::Shape;
use crate::transform::{NodeKind, TransformChain};

/// A destination placement one piece must reach.
///
/// The expected shape is computed once, when the target is created, by
/// replaying the authored orientation against a copy of the piece's
/// shape at that moment; the piece's later transforms never touch it.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    piece: usize,
    destination: Coord,
    shape: Shape,
}

impl Target {
    /// Builds the target for `chain`, applying `rotations` clockwise
    /// quarter turns, then the X flip, then the Y flip.
    pub fn for_piece(
        chain: &TransformChain,
        piece: usize,
        destination: Coord,
        rotations: u8,
        flip_x: bool,
        flip_y: bool,
    ) -> Self {
        let mut shape = chain.core().shape().clone();
        for _ in 0..rotations {
            shape = shape.rotated(true);
        }
        if flip_x {
            shape = shape.mirrored(Axis::X);
        }
        if flip_y {
            shape = shape.mirrored(Axis::Y);
        }
        Self {
            piece,
            destination,
            shape,
        }
    }

    pub fn piece(&self) -> usize {
        self.piece
    }

    pub fn destination(&self) -> Coord {
        self.destination
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Result of one dispatch call. The two side-effect signals the input
/// layer reacts to (move sound and counter, collision sound) are the
/// `Committed` and `Collision` variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The transform passed the collision check and is committed; the
    /// record can be pushed onto the caller's undo history.
    Committed(MoveRecord),
    /// The transform collided and was reversed in place.
    Collision,
    /// A translation was asked for a direction its mask disallows;
    /// nothing was mutated.
    Rejected,
    /// No node in the chain owns the clicked point.
    NoMatch,
}

impl DispatchOutcome {
    pub fn committed(&self) -> bool {
        matches!(self, DispatchOutcome::Committed(_))
    }

    pub fn into_record(self) -> Option<MoveRecord> {
        match self {
            DispatchOutcome::Committed(record) => Some(record),
            _ => None,
        }
    }
}

/// All transform chains and targets for one level.
#[derive(Clone, Debug, Default)]
pub struct PieceSet {
    chains: Vec<TransformChain>,
    targets: Vec<Target>,
}

impl PieceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_chain(&mut self, chain: TransformChain) {
        self.chains.push(chain);
    }

    pub fn push_target(&mut self, target: Target) {
        self.targets.push(target);
    }

    pub fn chains(&self) -> &[TransformChain] {
        &self.chains
    }

    pub fn chain(&self, index: usize) -> &TransformChain {
        &self.chains[index]
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Routes a clicked shape-space point to the owning node of one
    /// piece's chain and runs apply -> collision check -> commit or
    /// revert. Atomic: when this returns, the set is either fully in the
    /// new state or bit-exactly back in the old one.
    pub fn dispatch(
        &mut self,
        arena: &Arena,
        piece: usize,
        point: Coord,
        pointer: Pointer,
    ) -> DispatchOutcome {
        if piece >= self.chains.len() {
            return DispatchOutcome::NoMatch;
        }
        let Some(node) = self.chains[piece].find_node(point) else {
            debug!(piece, %point, "no node owns the clicked point");
            return DispatchOutcome::NoMatch;
        };

        // translations pick their direction from the pointer before
        // anything is mutated; a disallowed direction is a pure no-op
        let direction = match self.chains[piece].node(node).kind() {
            NodeKind::Translation { .. } => {
                match self.chains[piece].resolve_slide(node, pointer) {
                    Some(direction) => {
                        self.chains[piece].set_slide_direction(node, direction);
                        Some(direction)
                    }
                    None => {
                        debug!(piece, node, "slide direction disallowed");
                        return DispatchOutcome::Rejected;
                    }
                }
            }
            _ => None,
        };

        self.chains[piece].apply(node);

        if self.collides(arena, piece) {
            self.chains[piece].reverse(node);
            debug!(piece, node, "collision, transform reversed");
            DispatchOutcome::Collision
        } else {
            debug!(piece, node, "move committed");
            DispatchOutcome::Committed(MoveRecord::new(piece, node, direction))
        }
    }

    /// Collision verdict for one piece against the arena and every other
    /// piece. Pure: mutates nothing.
    pub fn collides(&self, arena: &Arena, piece: usize) -> bool {
        let core = self.chains[piece].core();
        let offset = core.offset();

        let mut occupied_by_others: FxHashSet<Coord> = FxHashSet::default();
        for (index, chain) in self.chains.iter().enumerate() {
            if index == piece {
                continue;
            }
            let other_offset = chain.core().offset();
            for cell in chain.core().shape().occupied() {
                occupied_by_others.insert(Coord::new(
                    other_offset.x + cell.x,
                    other_offset.y + cell.y,
                ));
            }
        }

        for cell in core.shape().occupied() {
            let world = Coord::new(offset.x + cell.x, offset.y + cell.y);
            // out-of-bounds cells are unplayable by definition
            if !arena.playable(world.x, world.y) {
                debug!(piece, %world, "cell outside the playable area");
                return true;
            }
            if occupied_by_others.contains(&world) {
                debug!(piece, %world, "cell occupied by another piece");
                return true;
            }
        }
        false
    }

    /// Win verdict: every target's piece sits exactly on its destination
    /// with exactly the expected shape.
    pub fn check_win(&self) -> bool {
        self.targets.iter().all(|target| {
            let core = self.chains[target.piece].core();
            core.offset() == target.destination && core.shape() == &target.shape
        })
    }

    /// Redo primitive: restore the stored slide direction, then re-apply
    /// the node. No collision check; the record was legal when committed.
    pub fn apply_record(&mut self, record: &MoveRecord) {
        let chain = &mut self.chains[record.piece()];
        if let Some(direction) = record.direction() {
            chain.set_slide_direction(record.node(), direction);
        }
        chain.apply(record.node());
    }

    /// Undo primitive: restore the stored slide direction, then reverse
    /// the node.
    pub fn revert_record(&mut self, record: &MoveRecord) {
        let chain = &mut self.chains[record.piece()];
        if let Some(direction) = record.direction() {
            chain.set_slide_direction(record.node(), direction);
        }
        chain.reverse(record.node());
    }
}
