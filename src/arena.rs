//! The fixed playability grid for one level.

use thiserror::Error;

/// Construction failure for an arena grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena occupancy has {found} cells, expected {expected} ({width}x{height})")]
    SizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        found: usize,
    },
}

/// A width x height grid of playable cells, immutable after load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arena {
    width: usize,
    height: usize,
    playable: Vec<bool>,
}

impl Arena {
    /// Builds an arena from a row-major occupancy string: `'0'` marks a
    /// wall, any other character a playable cell.
    pub fn from_occupancy(pattern: &str, width: usize, height: usize) -> Result<Self, ArenaError> {
        let cells: Vec<char> = pattern.chars().collect();
        if cells.len() != width * height {
            return Err(ArenaError::SizeMismatch {
                width,
                height,
                expected: width * height,
                found: cells.len(),
            });
        }
        let playable = cells.into_iter().map(|c| c != '0').collect();
        Ok(Self {
            width,
            height,
            playable,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the world cell (x, y) can hold a piece cell. Out-of-bounds
    /// coordinates are never playable.
    pub fn playable(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.playable[y as usize * self.width + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupancy_parsing() {
        let arena = Arena::from_occupancy("110111", 3, 2).unwrap();
        assert!(arena.playable(0, 0));
        assert!(!arena.playable(2, 0), "'0' is a wall");
        assert!(arena.playable(2, 1));
    }

    #[test]
    fn test_out_of_bounds_is_unplayable() {
        let arena = Arena::from_occupancy("1111", 2, 2).unwrap();
        assert!(!arena.playable(-1, 0));
        assert!(!arena.playable(0, -1));
        assert!(!arena.playable(2, 0));
        assert!(!arena.playable(0, 2));
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let result = Arena::from_occupancy("111", 2, 2);
        assert_eq!(
            result,
            Err(ArenaError::SizeMismatch {
                width: 2,
                height: 2,
                expected: 4,
                found: 3
            })
        );
    }
}
