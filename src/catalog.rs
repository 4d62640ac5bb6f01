//! Built-in shape templates and demo levels.
//!
//! Shape patterns use one string per row: `'1'` is a filled cell, `'0'`
//! or `'.'` empty. Every template is normalized so its grid is the tight
//! bounding box of the filled cells.

use crate::geometry::{Axis, Coord, DirectionSet};
use crate::level::{ArenaSpec, LevelSpec, NodeSpec, PieceSpec, TargetSpec};
use crate::piece::ColorTag;

/// A named shape pattern.
pub struct Template {
    pub name: &'static str,
    pub rows: &'static [&'static str],
}

/// The shape templates levels can reference by name.
pub const TEMPLATES: &[Template] = &[
    Template {
        name: "duo",
        rows: &["11"],
    },
    Template {
        name: "corner",
        rows: &["11", "01"],
    },
    Template {
        name: "o",
        rows: &["11", "11"],
    },
    Template {
        name: "i",
        rows: &["1111"],
    },
    Template {
        name: "l",
        rows: &["10", "10", "11"],
    },
    Template {
        name: "t",
        rows: &["111", "010"],
    },
    Template {
        name: "s",
        rows: &["011", "110"],
    },
    Template {
        name: "z",
        rows: &["110", "011"],
    },
];

/// Looks up a template's rows by name.
pub fn template(name: &str) -> Option<&'static [&'static str]> {
    TEMPLATES
        .iter()
        .find(|t| t.name == name)
        .map(|t| t.rows)
}

/// All built-in demo levels, in play order.
pub fn builtin_levels() -> Vec<LevelSpec> {
    vec![first_steps(), corner_dance()]
}

/// One domino, one slide east, done. The tutorial level.
fn first_steps() -> LevelSpec {
    LevelSpec {
        name: "first steps".into(),
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

/// A corner piece that must turn once and a domino that must cross the
/// board, around a single wall.
fn corner_dance() -> LevelSpec {
    LevelSpec {
        name: "corner dance".into(),
        arena: ArenaSpec {
            occupancy: concat!(
                "111111", //
                "111111", //
                "110111", //
                "111111", //
                "111111", //
                "111111",
            )
            .into(),
            width: 6,
            height: 6,
        },
        pieces: vec![
            PieceSpec {
                template: "corner".into(),
                color: ColorTag::Green,
                position: Coord::new(1, 0),
                fixture_point: Coord::new(0, 0),
                nodes: vec![
                    NodeSpec::Slide {
                        action_point: Coord::new(0, 0),
                        directions: DirectionSet::ALL,
                    },
                    NodeSpec::Spin {
                        action_point: Coord::new(1, 1),
                        clockwise: true,
                        repeat: 0,
                    },
                ],
            },
            PieceSpec {
                template: "duo".into(),
                color: ColorTag::Red,
                position: Coord::new(0, 3),
                fixture_point: Coord::new(0, 0),
                nodes: vec![
                    NodeSpec::Slide {
                        action_point: Coord::new(0, 0),
                        directions: DirectionSet::ALL,
                    },
                    NodeSpec::Mirror {
                        action_point: Coord::new(1, 0),
                        axis: Axis::Y,
                    },
                ],
            },
        ],
        targets: vec![
            TargetSpec {
                piece: 0,
                destination: Coord::new(3, 3),
                rotations: 1,
                flip_x: false,
                flip_y: false,
            },
            TargetSpec {
                piece: 1,
                destination: Coord::new(4, 5),
                rotations: 0,
                flip_x: false,
                flip_y: false,
            },
        ],
        par_moves: 12,
    }
}

/// The spec for one built-in level, by index.
pub fn level_spec(index: usize) -> Option<LevelSpec> {
    builtin_levels().into_iter().nth(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::shape::Shape;

    #[test]
    fn test_every_template_parses() {
        for template in TEMPLATES {
            let shape = Shape::from_pattern(template.rows)
                .unwrap_or_else(|e| panic!("template `{}`: {e}", template.name));
            assert!(!shape.occupied().is_empty(), "template `{}` is blank", template.name);
        }
    }

    #[test]
    fn test_template_lookup() {
        assert_eq!(template("duo"), Some(&["11"][..]));
        assert_eq!(template("missing"), None);
    }

    #[test]
    fn test_every_builtin_level_builds_without_collisions() {
        for spec in builtin_levels() {
            let level =
                Level::build(&spec).unwrap_or_else(|e| panic!("level `{}`: {e}", spec.name));
            // starting placements must be legal for every piece
            for piece in 0..level.pieces().chains().len() {
                assert!(
                    !level.pieces().collides(level.arena(), piece),
                    "level `{}` piece {piece} starts in collision",
                    spec.name
                );
            }
        }
    }
}
