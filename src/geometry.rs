use crate::{
    action::Direction,
    grid::{Grid, Position},
    zobrist::Zobrist,
};

/// The static part of a puzzle: dimensions, walls and goals. Shared by every
/// configuration of one puzzle instance.
#[derive(Debug, Clone)]
pub struct Geometry {
    walls: Grid<bool>,
    goals: Grid<Option<char>>,
    // Interior goal cells, the only ones the goal test looks at
    interior_goals: Vec<(Position, char)>,
    zobrist: Zobrist,
}

impl Geometry {
    /// Build a geometry from wall and goal layers of equal dimensions.
    /// Goal letters are stored lowercase.
    pub fn new(walls: Grid<bool>, goals: Grid<Option<char>>) -> Self {
        assert!(
            walls.rows() == goals.rows() && walls.cols() == goals.cols(),
            "wall layer is {}x{} but goal layer is {}x{}",
            walls.rows(),
            walls.cols(),
            goals.rows(),
            goals.cols()
        );

        let mut goals = goals;
        let positions: Vec<Position> = goals.positions().collect();
        let mut interior_goals = Vec::new();
        for pos in positions {
            if let Some(letter) = goals[pos] {
                let letter = letter.to_ascii_lowercase();
                goals[pos] = Some(letter);
                if !goals.is_border(pos) {
                    interior_goals.push((pos, letter));
                }
            }
        }

        let zobrist = Zobrist::new(walls.rows(), walls.cols());
        Geometry {
            walls,
            goals,
            interior_goals,
            zobrist,
        }
    }

    pub fn rows(&self) -> usize {
        self.walls.rows()
    }

    pub fn cols(&self) -> usize {
        self.walls.cols()
    }

    /// Out-of-bounds cells count as walls.
    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.get(pos).copied().unwrap_or(true)
    }

    pub fn goal_at(&self, pos: Position) -> Option<char> {
        self.goals.get(pos).copied().flatten()
    }

    /// Goal cells inside the outer ring, in row-major order.
    pub fn interior_goals(&self) -> &[(Position, char)] {
        &self.interior_goals
    }

    pub fn step(&self, pos: Position, dir: Direction) -> Option<Position> {
        self.walls.step(pos, dir)
    }

    pub fn zobrist(&self) -> &Zobrist {
        &self.zobrist
    }
}
