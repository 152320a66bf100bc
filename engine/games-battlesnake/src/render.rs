//! Text rendering for debugging

use std::fmt::Write;

use crate::board::Board;
use crate::state::State;

/// Render the board with the highest row first, followed by one status line
/// per snake.
///
/// `.` empty, `F` food, `x` hazard, digits are heads and letters bodies.
pub fn render(state: &State, board: &Board) -> String {
    let mut grid = vec!['.'; board.area()];
    for c in state.hazard_cells() {
        grid[c as usize] = 'x';
    }
    for c in state.food_cells() {
        grid[c as usize] = 'F';
    }
    for (p, snake) in state.snakes().iter().enumerate() {
        if !snake.is_alive() {
            continue;
        }
        let digit = (p % 10) as u8;
        for &c in snake.body().iter().skip(1) {
            grid[c as usize] = (b'a' + digit) as char;
        }
        grid[snake.head() as usize] = (b'0' + digit) as char;
    }

    let mut out = String::with_capacity(board.area() + board.height + 64);
    let _ = writeln!(out, "turn {}", state.turn());
    for y in (0..board.height).rev() {
        for x in 0..board.width {
            out.push(grid[board.cell(x, y) as usize]);
        }
        out.push('\n');
    }
    for (p, snake) in state.snakes().iter().enumerate() {
        let status = if snake.is_alive() { "alive" } else { "dead" };
        let _ = writeln!(
            out,
            "snake {p}: {status}, health {}/{}, length {}",
            snake.health(),
            snake.max_health(),
            snake.len()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Snake;

    #[test]
    fn test_render_grid() {
        let board = Board::new(3, 2, false);
        let mut state = State::empty(&board, 4);
        state.snakes.push(Snake::new(
            [board.cell(0, 1), board.cell(0, 0)].into_iter().collect(),
            7,
            10,
            true,
        ));
        state.add_food(board.cell(2, 1));
        state.hazards[board.cell(2, 0) as usize] = true;

        let text = render(&state, &board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "turn 4");
        assert_eq!(lines[1], "0.F");
        assert_eq!(lines[2], "a.x");
        assert_eq!(lines[3], "snake 0: alive, health 7/10, length 2");
    }
}
