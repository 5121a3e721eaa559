use std::collections::VecDeque;

use crate::grid::{Cell, Grid};
use Direction::*;
use MoveResult::*;

pub const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// What the snake ran into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBody,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Continued { new_head: Cell, old_tail: Option<Cell> },
    Collided(Collision),
}

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    grow_next_move: bool,
}

impl Snake {
    /// Builds a straight snake with its head at `head`, trailing behind it opposite to `direction`.
    pub fn new(head: Cell, size: usize, direction: Direction) -> Self {
        let back = direction.opposite();
        let body = std::iter::successors(Some(head), |cell| Some(cell.step(back)))
            .take(size.max(1))
            .collect();
        Snake { body, direction, grow_next_move: false }
    }

    /// The starting snake: centered on the grid, heading right.
    pub fn centered(grid: &Grid) -> Self {
        Snake::new(grid.center(), INITIAL_SNAKE_LENGTH, Right)
    }

    /// Head first, tail last.
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Where the head would land on the next move.
    pub fn next_head(&self) -> Cell {
        self.head().step(self.direction)
    }

    pub fn step(&mut self, grid: &Grid) -> MoveResult {
        let new_head = self.next_head();

        if !grid.in_bounds(new_head) {
            return Collided(Collision::Wall);
        }

        // Checked against the body as it stands before this move, tail included
        if self.occupies(new_head) {
            return Collided(Collision::SelfBody);
        }

        self.body.push_front(new_head);

        if self.grow_next_move {
            self.grow_next_move = false;
            Continued { new_head, old_tail: None }
        } else {
            let old_tail = self.body.pop_back();
            Continued { new_head, old_tail }
        }
    }

    /// Turns the snake, unless `new_direction` would reverse it onto itself.
    pub fn change_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.direction = new_direction;
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn grow(&mut self) {
        self.grow_next_move = true;
    }

    pub fn is_growing(&self) -> bool {
        self.grow_next_move
    }

    #[cfg(test)]
    pub(crate) fn from_cells(body: Vec<Cell>, direction: Direction) -> Self {
        Snake { body: body.into(), direction, grow_next_move: false }
    }
}
