use crate::{
    boxes::Boxes,
    configuration::Configuration,
    geometry::Geometry,
    grid::{Grid, Position},
};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

/// Error type for level parsing operations.
#[derive(Debug)]
pub enum LevelError {
    /// IO error when reading from file
    Io(io::Error),
    /// Level content that cannot form a well-formed initial state
    Malformed(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(err) => write!(f, "IO error: {}", err),
            LevelError::Malformed(msg) => write!(f, "Malformed level: {}", msg),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(err) => Some(err),
            LevelError::Malformed(_) => None,
        }
    }
}

impl From<io::Error> for LevelError {
    fn from(err: io::Error) -> Self {
        LevelError::Io(err)
    }
}

impl From<String> for LevelError {
    fn from(err: String) -> Self {
        LevelError::Malformed(err)
    }
}

/// A parsed puzzle: its shared geometry and the search root.
#[derive(Debug, Clone)]
pub struct Level {
    pub geometry: Rc<Geometry>,
    pub root: Rc<Configuration>,
}

impl Level {
    /// Parse a level from text.
    ///
    /// Characters:
    /// - `+` = Wall
    /// - ` ` = Floor
    /// - `0` = Agent
    /// - `A`..`Z` = Box
    /// - `a`..`z` = Goal for the box of the same letter
    ///
    /// Lines starting with `;` are comments. Short lines are padded with floor.
    pub fn from_text(text: &str) -> Result<Self, LevelError> {
        let lines: Vec<&str> = text
            .lines()
            .filter(|line| !line.trim_start().starts_with(';'))
            .collect();

        // Drop blank lines around the map but keep the ones inside it
        let first = lines.iter().position(|line| !line.trim().is_empty());
        let last = lines.iter().rposition(|line| !line.trim().is_empty());
        let lines = match (first, last) {
            (Some(first), Some(last)) => &lines[first..=last],
            _ => return Err(LevelError::Malformed("Empty level".to_string())),
        };

        let rows = lines.len();
        let cols = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let mut walls = Grid::new(rows, cols, false);
        let mut goals = Grid::new(rows, cols, None);
        let mut boxes = Boxes::new();
        let mut agent = None;

        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let pos = Position::new(row, col);
                match ch {
                    '+' => walls[pos] = true,
                    ' ' => {}
                    '0' => {
                        if agent.is_some() {
                            return Err(LevelError::Malformed("Multiple agents found".to_string()));
                        }
                        agent = Some(pos);
                    }
                    '1'..='9' => {
                        return Err(LevelError::Malformed(format!(
                            "Agent '{}' at {}: only a single agent '0' is supported",
                            ch, pos
                        )));
                    }
                    'A'..='Z' => {
                        boxes.insert(pos, ch);
                    }
                    'a'..='z' => goals[pos] = Some(ch),
                    _ => {
                        return Err(LevelError::Malformed(format!(
                            "Invalid character '{}' at position {}",
                            ch, pos
                        )));
                    }
                }
            }
        }

        let agent = agent.ok_or_else(|| "No agent found in level".to_string())?;
        Self::check_enclosed(&walls, agent)?;

        let geometry = Rc::new(Geometry::new(walls, goals));
        let root = Rc::new(Configuration::root(&geometry, agent, boxes));
        Ok(Level { geometry, root })
    }

    /// Parse a level from a text file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    /// Flood fill from the agent through every non-wall cell; reaching the
    /// outer ring means the agent could walk off the map.
    fn check_enclosed(walls: &Grid<bool>, agent: Position) -> Result<(), LevelError> {
        let mut visited = Grid::new(walls.rows(), walls.cols(), false);
        let mut stack = vec![agent];
        visited[agent] = true;

        while let Some(pos) = stack.pop() {
            if walls.is_border(pos) {
                return Err(LevelError::Malformed(format!(
                    "Level is not enclosed by walls: {} is reachable",
                    pos
                )));
            }
            for next in walls.neighbors(pos) {
                if !walls[next] && !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_basic() {
        let input = "+++++++\n\
                     +0 A  +\n\
                     + +B+ +\n\
                     +  a b+\n\
                     +++++++";
        let level = Level::from_text(input).unwrap();

        assert_eq!(level.geometry.rows(), 5);
        assert_eq!(level.geometry.cols(), 7);
        assert_eq!(level.root.agent(), Position::new(1, 1));
        assert_eq!(level.root.box_at(Position::new(1, 3)), Some('A'));
        assert_eq!(level.root.box_at(Position::new(2, 3)), Some('B'));
        assert!(level.geometry.is_wall(Position::new(2, 2)));
        assert_eq!(level.geometry.goal_at(Position::new(3, 3)), Some('a'));
        assert_eq!(level.geometry.goal_at(Position::new(3, 5)), Some('b'));
        assert!(level.root.is_root());

        // Verify the level matches the original string when rendered back
        assert_eq!(
            level.root.render(&level.geometry).to_string().trim_end(),
            input
        );
    }

    #[test]
    fn test_comments_and_padding() {
        let input = "; a comment\n\
                     \n\
                     +++++\n\
                     +0A a+\n\
                     ++++\n\
                     ; trailing";
        let result = Level::from_text(input);
        // Row 2 is one cell short, leaving (2, 4) as open floor on the border
        assert!(matches!(result, Err(LevelError::Malformed(_))));

        let input = "; a comment\n\
                     +++++\n\
                     +0Aa+\n\
                     +++++";
        let level = Level::from_text(input).unwrap();
        assert_eq!(level.geometry.rows(), 3);
        assert_eq!(level.geometry.cols(), 5);
    }

    #[test]
    fn test_no_agent() {
        let input = "++++\n\
                     +A +\n\
                     ++++";
        assert!(matches!(Level::from_text(input), Err(LevelError::Malformed(_))));
    }

    #[test]
    fn test_multiple_agents() {
        let input = "++++\n\
                     +00+\n\
                     ++++";
        assert!(matches!(Level::from_text(input), Err(LevelError::Malformed(_))));

        let input = "++++\n\
                     +01+\n\
                     ++++";
        assert!(matches!(Level::from_text(input), Err(LevelError::Malformed(_))));
    }

    #[test]
    fn test_invalid_character() {
        let input = "++++\n\
                     +0#+\n\
                     ++++";
        let err = Level::from_text(input).unwrap_err();
        assert!(err.to_string().contains("Invalid character '#'"));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(Level::from_text(""), Err(LevelError::Malformed(_))));
        assert!(matches!(
            Level::from_text("; only a comment\n\n"),
            Err(LevelError::Malformed(_))
        ));
    }

    #[test]
    fn test_open_border() {
        let input = "+++ +\n\
                     +0  +\n\
                     +++++";
        let err = Level::from_text(input).unwrap_err();
        assert!(err.to_string().contains("not enclosed"));
    }

    #[test]
    fn test_unreachable_gap_is_fine() {
        // The gap in the top wall is sealed off from the agent
        let input = "++ ++\n\
                     ++ ++\n\
                     +++++\n\
                     +0 A+\n\
                     +++++";
        assert!(Level::from_text(input).is_ok());
    }

    #[test]
    fn test_from_file_no_file() {
        let result = Level::from_file("nonexistent_file.lvl");
        assert!(matches!(result, Err(LevelError::Io(_))));
    }
}
