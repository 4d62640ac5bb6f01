//! Level construction: plain-struct specs in, validated game state out.
//!
//! The specs mirror what an external level loader would deserialize.
//! Everything the runtime assumes is checked here, once; after a level
//! builds successfully nothing errors during play.

use thiserror::Error;

use crate::arena::{Arena, ArenaError};
use crate::board::{DispatchOutcome, PieceSet, Target};
use crate::catalog;
use crate::geometry::{Axis, Coord, DirectionSet, Pointer};
use crate::piece::{ColorTag, PieceCore};
use crate::shape::{Shape, ShapeError};
use crate::transform::{TransformChain, TransformNode};

/// A loader-time fault. Fatal to the level being built; the level is not
/// entered.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Arena(#[from] ArenaError),
    #[error("unknown shape template `{0}`")]
    UnknownTemplate(String),
    #[error("piece {piece}: fixture point {point} outside the {width}x{height} shape")]
    FixtureOutOfBounds {
        piece: usize,
        point: Coord,
        width: usize,
        height: usize,
    },
    #[error("piece {piece}: action point {point} outside the {width}x{height} shape")]
    ActionPointOutOfBounds {
        piece: usize,
        point: Coord,
        width: usize,
        height: usize,
    },
    #[error("target {target} references piece {piece}, but the level has {pieces} pieces")]
    DanglingTarget {
        target: usize,
        piece: usize,
        pieces: usize,
    },
}

/// Arena construction input: a row-major occupancy string plus explicit
/// dimensions.
#[derive(Clone, Debug)]
pub struct ArenaSpec {
    pub occupancy: String,
    pub width: usize,
    pub height: usize,
}

/// One behavior node in a piece's authored chain, innermost first.
#[derive(Clone, Debug)]
pub enum NodeSpec {
    Slide {
        action_point: Coord,
        directions: DirectionSet,
    },
    /// `repeat` replays the rotation at load time so the piece starts in
    /// its authored orientation.
    Spin {
        action_point: Coord,
        clockwise: bool,
        repeat: u8,
    },
    Mirror {
        action_point: Coord,
        axis: Axis,
    },
}

impl NodeSpec {
    fn action_point(&self) -> Coord {
        match *self {
            NodeSpec::Slide { action_point, .. }
            | NodeSpec::Spin { action_point, .. }
            | NodeSpec::Mirror { action_point, .. } => action_point,
        }
    }
}

/// Piece construction input: a named shape template plus placement and
/// the ordered decorator chain.
#[derive(Clone, Debug)]
pub struct PieceSpec {
    pub template: String,
    pub color: ColorTag,
    pub position: Coord,
    pub fixture_point: Coord,
    pub nodes: Vec<NodeSpec>,
}

/// Target construction input; the expected shape is derived from the
/// piece at build time.
#[derive(Clone, Debug)]
pub struct TargetSpec {
    pub piece: usize,
    pub destination: Coord,
    pub rotations: u8,
    pub flip_x: bool,
    pub flip_y: bool,
}

/// A complete level definition.
#[derive(Clone, Debug)]
pub struct LevelSpec {
    pub name: String,
    pub arena: ArenaSpec,
    pub pieces: Vec<PieceSpec>,
    pub targets: Vec<TargetSpec>,
    /// Authored minimum number of moves, shown by the UI.
    pub par_moves: u32,
}

/// A validated, playable level. Two `Level` values are fully independent;
/// a two-player mode runs one per player with no shared state.
#[derive(Clone, Debug)]
pub struct Level {
    name: String,
    arena: Arena,
    pieces: PieceSet,
    par_moves: u32,
}

impl Level {
    /// Validates a spec and builds the arena, chains, and targets.
    pub fn build(spec: &LevelSpec) -> Result<Self, LevelError> {
        let arena = Arena::from_occupancy(&spec.arena.occupancy, spec.arena.width, spec.arena.height)?;

        let mut pieces = PieceSet::new();
        for (index, piece) in spec.pieces.iter().enumerate() {
            pieces.push_chain(build_chain(index, piece)?);
        }

        for (target_index, target) in spec.targets.iter().enumerate() {
            if target.piece >= pieces.chains().len() {
                return Err(LevelError::DanglingTarget {
                    target: target_index,
                    piece: target.piece,
                    pieces: pieces.chains().len(),
                });
            }
            let built = Target::for_piece(
                pieces.chain(target.piece),
                target.piece,
                target.destination,
                target.rotations,
                target.flip_x,
                target.flip_y,
            );
            pieces.push_target(built);
        }

        Ok(Self {
            name: spec.name.clone(),
            arena,
            pieces,
            par_moves: spec.par_moves,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn pieces(&self) -> &PieceSet {
        &self.pieces
    }

    /// Mutable piece set access for the caller-owned undo history.
    pub fn pieces_mut(&mut self) -> &mut PieceSet {
        &mut self.pieces
    }

    pub fn par_moves(&self) -> u32 {
        self.par_moves
    }

    pub fn dispatch(&mut self, piece: usize, point: Coord, pointer: Pointer) -> DispatchOutcome {
        self.pieces.dispatch(&self.arena, piece, point, pointer)
    }

    pub fn check_win(&self) -> bool {
        self.pieces.check_win()
    }
}

fn build_chain(index: usize, spec: &PieceSpec) -> Result<TransformChain, LevelError> {
    let rows = catalog::template(&spec.template)
        .ok_or_else(|| LevelError::UnknownTemplate(spec.template.clone()))?;
    let shape = Shape::from_pattern(rows)?;

    if !shape.in_bounds(spec.fixture_point) {
        return Err(LevelError::FixtureOutOfBounds {
            piece: index,
            point: spec.fixture_point,
            width: shape.width(),
            height: shape.height(),
        });
    }

    let core = PieceCore::new(
        shape,
        spec.position,
        spec.fixture_point,
        spec.color,
        &spec.template,
    );
    let mut chain = TransformChain::new(core);

    for node in &spec.nodes {
        // load-time spins change the shape's dimensions, so each action
        // point is checked against the shape as it currently stands
        let point = node.action_point();
        if !chain.core().shape().in_bounds(point) {
            return Err(LevelError::ActionPointOutOfBounds {
                piece: index,
                point,
                width: chain.core().shape().width(),
                height: chain.core().shape().height(),
            });
        }
        match *node {
            NodeSpec::Slide {
                action_point,
                directions,
            } => chain.push(TransformNode::slide(action_point, directions)),
            NodeSpec::Spin {
                action_point,
                clockwise,
                repeat,
            } => {
                chain.push(TransformNode::spin(action_point, clockwise));
                let spin_index = chain.nodes().len() - 1;
                for _ in 0..repeat {
                    chain.apply(spin_index);
                }
            }
            NodeSpec::Mirror { action_point, axis } => {
                chain.push(TransformNode::mirror(action_point, axis));
            }
        }
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;
    use crate::history::History;

    fn minimal_spec() -> LevelSpec {
        LevelSpec {
            name: "test".into(),
            arena: ArenaSpec {
                occupancy: "1".repeat(25),
                width: 5,
                height: 5,
            },
            pieces: vec![PieceSpec {
                template: "duo".into(),
                color: ColorTag::Blue,
                position: Coord::new(2, 2),
                fixture_point: Coord::new(0, 0),
                nodes: vec![NodeSpec::Slide {
                    action_point: Coord::new(0, 0),
                    directions: DirectionSet::ALL,
                }],
            }],
            targets: vec![TargetSpec {
                piece: 0,
                destination: Coord::new(3, 2),
                rotations: 0,
                flip_x: false,
                flip_y: false,
            }],
            par_moves: 1,
        }
    }

    #[test]
    fn test_minimal_level_plays_to_a_win() {
        let mut level = Level::build(&minimal_spec()).unwrap();
        assert!(!level.check_win());
        let outcome = level.dispatch(0, Coord::new(0, 0), Pointer::toward(Direction::East));
        assert!(outcome.committed());
        assert!(level.check_win());
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        let mut spec = minimal_spec();
        spec.pieces[0].template = "no-such-shape".into();
        assert!(matches!(
            Level::build(&spec),
            Err(LevelError::UnknownTemplate(name)) if name == "no-such-shape"
        ));
    }

    #[test]
    fn test_dangling_target_is_rejected() {
        let mut spec = minimal_spec();
        spec.targets[0].piece = 7;
        assert!(matches!(
            Level::build(&spec),
            Err(LevelError::DanglingTarget {
                target: 0,
                piece: 7,
                pieces: 1
            })
        ));
    }

    #[test]
    fn test_action_point_outside_shape_is_rejected() {
        let mut spec = minimal_spec();
        spec.pieces[0].nodes = vec![NodeSpec::Slide {
            action_point: Coord::new(2, 0),
            directions: DirectionSet::ALL,
        }];
        assert!(matches!(
            Level::build(&spec),
            Err(LevelError::ActionPointOutOfBounds { piece: 0, .. })
        ));
    }

    #[test]
    fn test_fixture_point_outside_shape_is_rejected() {
        let mut spec = minimal_spec();
        spec.pieces[0].fixture_point = Coord::new(0, 3);
        assert!(matches!(
            Level::build(&spec),
            Err(LevelError::FixtureOutOfBounds { piece: 0, .. })
        ));
    }

    #[test]
    fn test_spin_repeat_reaches_the_authored_orientation() {
        let mut spec = minimal_spec();
        spec.pieces[0].template = "corner".into();
        spec.pieces[0].nodes = vec![NodeSpec::Spin {
            action_point: Coord::new(1, 1),
            clockwise: true,
            repeat: 1,
        }];
        spec.targets.clear();

        let level = Level::build(&spec).unwrap();
        let core = level.pieces().chain(0).core();
        assert_eq!(core.rotations(), 1);
        assert_eq!(core.shape(), &Shape::from_pattern(&["01", "11"]).unwrap());
    }

    #[test]
    fn test_undo_redo_roundtrip_through_history() {
        let mut level = Level::build(&minimal_spec()).unwrap();
        let mut history = History::new();
        let before = level.pieces().clone();

        let record = level
            .dispatch(0, Coord::new(0, 0), Pointer::toward(Direction::East))
            .into_record()
            .unwrap();
        history.push(record);
        let after = level.pieces().clone();

        assert!(history.can_undo() && !history.can_redo());
        assert!(history.undo(level.pieces_mut()));
        assert_eq!(level.pieces().chains(), before.chains());

        assert!(history.can_redo());
        assert!(history.redo(level.pieces_mut()));
        assert_eq!(level.pieces().chains(), after.chains());
        assert!(level.check_win());
    }

    #[test]
    fn test_new_move_drops_the_redo_branch() {
        let mut level = Level::build(&minimal_spec()).unwrap();
        let mut history = History::new();
        let east = Pointer::toward(Direction::East);
        let west = Pointer::toward(Direction::West);

        let record = level
            .dispatch(0, Coord::new(0, 0), east)
            .into_record()
            .unwrap();
        history.push(record);
        assert!(history.undo(level.pieces_mut()));
        assert!(history.can_redo());

        // committing a fresh move abandons the undone branch
        let record = level
            .dispatch(0, Coord::new(0, 0), west)
            .into_record()
            .unwrap();
        history.push(record);
        assert!(!history.can_redo(), "a new move invalidates pending redos");
        assert!(history.can_undo());
    }

    #[test]
    fn test_clear_empties_both_stacks() {
        let mut level = Level::build(&minimal_spec()).unwrap();
        let mut history = History::new();

        let record = level
            .dispatch(0, Coord::new(0, 0), Pointer::toward(Direction::East))
            .into_record()
            .unwrap();
        history.push(record);
        assert!(history.undo(level.pieces_mut()));
        assert!(history.can_redo());

        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.undo(level.pieces_mut()));
        assert!(!history.redo(level.pieces_mut()));
    }

    #[test]
    fn test_two_levels_are_independent() {
        let mut first = Level::build(&minimal_spec()).unwrap();
        let second = Level::build(&minimal_spec()).unwrap();

        assert!(first
            .dispatch(0, Coord::new(0, 0), Pointer::toward(Direction::East))
            .committed());
        assert!(first.check_win());
        assert!(!second.check_win());
    }
}
