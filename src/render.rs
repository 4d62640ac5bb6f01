//! Text rendering of a level for the CLI and for snapshot tests.
//!
//! Walls show as `#`, playable cells as `.`, target footprints as `x`,
//! and pieces as 1-based digits (hex letters past 9). A piece drawn on
//! its own target covers the `x`.

use crate::level::Level;

/// Formats the arena with every piece and target footprint.
pub fn format_board(level: &Level) -> String {
    let arena = level.arena();
    let width = arena.width();
    let height = arena.height();

    // cell -> 1-based piece number, targets as a separate overlay
    let mut piece_layer = vec![0u8; width * height];
    for (index, chain) in level.pieces().chains().iter().enumerate() {
        let offset = chain.core().offset();
        for cell in chain.core().shape().occupied() {
            let x = offset.x + cell.x;
            let y = offset.y + cell.y;
            if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                piece_layer[y as usize * width + x as usize] = (index + 1) as u8;
            }
        }
    }

    let mut target_layer = vec![false; width * height];
    for target in level.pieces().targets() {
        let destination = target.destination();
        for cell in target.shape().occupied() {
            let x = destination.x + cell.x;
            let y = destination.y + cell.y;
            if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                target_layer[y as usize * width + x as usize] = true;
            }
        }
    }

    let mut output = String::with_capacity((width + 1) * height);
    for y in 0..height {
        for x in 0..width {
            let index = y * width + x;
            let piece_number = piece_layer[index];
            let display_char = if piece_number > 0 {
                if piece_number < 10 {
                    char::from(b'0' + piece_number)
                } else {
                    char::from(b'A' + piece_number - 10)
                }
            } else if target_layer[index] {
                'x'
            } else if arena.playable(x as i32, y as i32) {
                '.'
            } else {
                '#'
            };
            output.push(display_char);
        }
        output.push('\n');
    }
    output
}
