use crate::{Board, Point, EMPTY};

/// Renders the grid as a box-drawn text block: one digit per owned cell,
/// `·` for empty cells and `✦` for uncovered bonus squares. Meant for logs
/// and debugging; carries no correctness contract.
pub fn render_grid(board: &Board) -> String {
    let n = board.dimension();
    let mut result = String::from("╭");
    for _ in 0..n {
        result += "──";
    }
    result += "─╮\n";

    for y in 0..n {
        result += "│ ";
        for x in 0..n {
            let owner = board.cell(x, y);
            if owner != EMPTY {
                result += &format!("{} ", owner);
            } else if board.is_bonus(Point::new(x, y)) {
                result += "✦ ";
            } else {
                result += "· ";
            }
        }
        result += "│\n";
    }

    result += "╰";
    for _ in 0..n {
        result += "──";
    }
    result += "─╯";
    result
}
