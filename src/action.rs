use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

impl Direction {
    /// Offset as (row, col). Rows grow southwards.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "N"),
            Direction::South => write!(f, "S"),
            Direction::East => write!(f, "E"),
            Direction::West => write!(f, "W"),
        }
    }
}

/// A primitive agent action.
///
/// For `Push` and `Pull` the first direction is the agent's step and the
/// second is the direction the box travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Move(Direction),
    Push(Direction, Direction),
    Pull(Direction, Direction),
}

impl Action {
    pub fn agent_direction(&self) -> Direction {
        match *self {
            Action::Move(dir) | Action::Push(dir, _) | Action::Pull(dir, _) => dir,
        }
    }

    pub fn box_direction(&self) -> Option<Direction> {
        match *self {
            Action::Move(_) => None,
            Action::Push(_, dir) | Action::Pull(_, dir) => Some(dir),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(dir) => write!(f, "Move({})", dir),
            Action::Push(agent, boxdir) => write!(f, "Push({},{})", agent, boxdir),
            Action::Pull(agent, boxdir) => write!(f, "Pull({},{})", agent, boxdir),
        }
    }
}

/// The ordered set of actions the expander tries on every configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCatalog {
    actions: Vec<Action>,
}

impl ActionCatalog {
    pub fn new(actions: Vec<Action>) -> Self {
        ActionCatalog { actions }
    }

    /// Moves plus same-direction pushes and pulls.
    pub fn canonical() -> Self {
        let mut actions = Vec::with_capacity(12);
        actions.extend(ALL_DIRECTIONS.iter().map(|&dir| Action::Move(dir)));
        actions.extend(ALL_DIRECTIONS.iter().map(|&dir| Action::Push(dir, dir)));
        actions.extend(ALL_DIRECTIONS.iter().map(|&dir| Action::Pull(dir, dir)));
        ActionCatalog { actions }
    }

    /// Moves plus every push and pull whose box does not travel straight
    /// back through the agent.
    pub fn all_pairs() -> Self {
        let mut actions = Vec::with_capacity(28);
        actions.extend(ALL_DIRECTIONS.iter().map(|&dir| Action::Move(dir)));
        for &agent in &ALL_DIRECTIONS {
            for &boxdir in &ALL_DIRECTIONS {
                if boxdir != agent.opposite() {
                    actions.push(Action::Push(agent, boxdir));
                }
            }
        }
        for &agent in &ALL_DIRECTIONS {
            for &boxdir in &ALL_DIRECTIONS {
                if boxdir != agent.opposite() {
                    actions.push(Action::Pull(agent, boxdir));
                }
            }
        }
        ActionCatalog { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::canonical()
    }
}

impl<'a> IntoIterator for &'a ActionCatalog {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
