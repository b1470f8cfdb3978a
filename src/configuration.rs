use crate::{action::Action, boxes::Boxes, geometry::Geometry, grid::Position};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// One node of the search space: box layout and agent position, plus the
/// lineage that produced it. Never mutated after construction.
pub struct Configuration {
    agent: Position,
    boxes: Boxes,
    boxes_hash: u64,
    parent: Option<Rc<Configuration>>,
    action: Option<Action>,
    depth: usize,
}

impl Configuration {
    /// Build the search root. The caller guarantees the agent is on a free
    /// cell of `geometry` and every box letter is `A`..`Z`.
    pub fn root(geometry: &Geometry, agent: Position, boxes: Boxes) -> Self {
        let boxes_hash = geometry.zobrist().compute_boxes_hash(&boxes);
        Configuration {
            agent,
            boxes,
            boxes_hash,
            parent: None,
            action: None,
            depth: 0,
        }
    }

    pub(crate) fn child(
        parent: &Rc<Configuration>,
        action: Action,
        agent: Position,
        boxes: Boxes,
        boxes_hash: u64,
    ) -> Self {
        Configuration {
            agent,
            boxes,
            boxes_hash,
            parent: Some(Rc::clone(parent)),
            action: Some(action),
            depth: parent.depth + 1,
        }
    }

    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn boxes(&self) -> &Boxes {
        &self.boxes
    }

    pub fn box_at(&self, pos: Position) -> Option<char> {
        self.boxes.at(pos)
    }

    pub fn parent(&self) -> Option<&Rc<Configuration>> {
        self.parent.as_ref()
    }

    /// The action that produced this configuration; None for the root.
    pub fn action(&self) -> Option<Action> {
        self.action
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn boxes_hash(&self) -> u64 {
        self.boxes_hash
    }

    /// True if a box sits on `pos` or `pos` is a wall.
    pub fn is_blocked(&self, geometry: &Geometry, pos: Position) -> bool {
        geometry.is_wall(pos) || self.boxes.has_box_at(pos)
    }

    /// Check if every interior goal holds a box of the matching letter,
    /// compared case-insensitively. Vacuously true without goals.
    pub fn is_goal(&self, geometry: &Geometry) -> bool {
        geometry.interior_goals().iter().all(|&(pos, goal)| {
            self.boxes
                .at(pos)
                .is_some_and(|letter| letter.to_ascii_lowercase() == goal)
        })
    }

    /// Configurations from the root's first child down to `node`, earliest
    /// first. Empty for the root itself.
    pub fn extract_plan(node: &Rc<Configuration>) -> Vec<Rc<Configuration>> {
        let mut plan = Vec::with_capacity(node.depth);
        let mut current = node;
        while let Some(parent) = current.parent.as_ref() {
            plan.push(Rc::clone(current));
            current = parent;
        }
        plan.reverse();
        plan
    }

    /// Actions leading from the root to this configuration, earliest first.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(self.depth);
        let mut current = self;
        while let (Some(action), Some(parent)) = (current.action, current.parent.as_deref()) {
            actions.push(action);
            current = parent;
        }
        actions.reverse();
        actions
    }

    /// Human-readable view: box letters, `0` for the agent, goal letters,
    /// `+` for walls, space otherwise.
    pub fn render<'a>(&'a self, geometry: &'a Geometry) -> Render<'a> {
        Render {
            config: self,
            geometry,
        }
    }
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.agent == other.agent
            && self.boxes_hash == other.boxes_hash
            && self.boxes == other.boxes
    }
}

impl Eq for Configuration {}

impl Hash for Configuration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.agent.hash(state);
        self.boxes_hash.hash(state);
    }
}

impl fmt::Debug for Configuration {
    // The parent is shown by depth only; formatting the whole chain would
    // recurse once per ancestor.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("agent", &self.agent)
            .field("boxes", &self.boxes)
            .field("boxes_hash", &format_args!("{:016x}", self.boxes_hash))
            .field("action", &self.action)
            .field("depth", &self.depth)
            .field("parent", &self.parent.as_ref().map(|parent| parent.depth))
            .finish()
    }
}

impl Drop for Configuration {
    // Unlink exclusively-owned ancestors one at a time; the default drop
    // would recurse once per ancestor and overflow on deep searches.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            match Rc::try_unwrap(node) {
                Ok(mut node) => parent = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

pub struct Render<'a> {
    config: &'a Configuration,
    geometry: &'a Geometry,
}

impl fmt::Display for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.geometry.rows() {
            let mut line = String::with_capacity(self.geometry.cols());
            for col in 0..self.geometry.cols() {
                let pos = Position::new(row, col);
                let ch = if let Some(letter) = self.config.box_at(pos) {
                    letter
                } else if pos == self.config.agent {
                    '0'
                } else if let Some(goal) = self.geometry.goal_at(pos) {
                    goal
                } else if self.geometry.is_wall(pos) {
                    '+'
                } else {
                    ' '
                };
                line.push(ch);
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Direction;
    use crate::grid::Grid;
    use std::collections::HashSet;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn room(rows: usize, cols: usize, goals: &[(Position, char)]) -> Geometry {
        let mut walls = Grid::new(rows, cols, false);
        for pos in walls.positions().collect::<Vec<_>>() {
            walls[pos] = walls.is_border(pos);
        }
        let mut goal_grid = Grid::new(rows, cols, None);
        for &(pos, letter) in goals {
            goal_grid[pos] = Some(letter);
        }
        Geometry::new(walls, goal_grid)
    }

    fn boxes(entries: &[(Position, char)]) -> Boxes {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_root() {
        let geometry = room(4, 4, &[]);
        let root = Configuration::root(&geometry, p(1, 1), boxes(&[(p(2, 2), 'A')]));
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.action(), None);
        assert_eq!(root.box_at(p(2, 2)), Some('A'));
        assert!(root.is_blocked(&geometry, p(2, 2)));
        assert!(root.is_blocked(&geometry, p(0, 1)));
        assert!(!root.is_blocked(&geometry, p(1, 2)));
    }

    #[test]
    fn test_goal_vacuous() {
        let geometry = room(4, 4, &[]);
        let empty = Configuration::root(&geometry, p(1, 1), Boxes::new());
        let with_box = Configuration::root(&geometry, p(1, 1), boxes(&[(p(2, 2), 'A')]));
        assert!(empty.is_goal(&geometry));
        assert!(with_box.is_goal(&geometry));
    }

    #[test]
    fn test_goal_case_insensitive() {
        let geometry = room(4, 5, &[(p(1, 1), 'a'), (p(2, 3), 'b')]);

        let solved = Configuration::root(
            &geometry,
            p(1, 2),
            boxes(&[(p(1, 1), 'A'), (p(2, 3), 'B')]),
        );
        assert!(solved.is_goal(&geometry));

        let wrong_letter = Configuration::root(
            &geometry,
            p(1, 2),
            boxes(&[(p(1, 1), 'B'), (p(2, 3), 'A')]),
        );
        assert!(!wrong_letter.is_goal(&geometry));

        let partial = Configuration::root(
            &geometry,
            p(1, 2),
            boxes(&[(p(1, 1), 'A'), (p(2, 2), 'B')]),
        );
        assert!(!partial.is_goal(&geometry));
    }

    #[test]
    fn test_goal_ignores_border_and_extra_boxes() {
        // A goal on the outer ring is never checked
        let geometry = room(4, 4, &[(p(0, 1), 'a'), (p(1, 1), 'b')]);
        let config = Configuration::root(
            &geometry,
            p(2, 1),
            boxes(&[(p(1, 1), 'B'), (p(2, 2), 'C')]),
        );
        assert!(config.is_goal(&geometry));
    }

    #[test]
    fn test_equivalence() {
        let geometry = room(5, 5, &[]);
        let a = Configuration::root(&geometry, p(1, 1), boxes(&[(p(2, 2), 'A'), (p(3, 3), 'B')]));
        let b = Configuration::root(&geometry, p(1, 1), boxes(&[(p(3, 3), 'B'), (p(2, 2), 'A')]));
        let moved_agent = Configuration::root(
            &geometry,
            p(1, 2),
            boxes(&[(p(2, 2), 'A'), (p(3, 3), 'B')]),
        );
        let swapped = Configuration::root(
            &geometry,
            p(1, 1),
            boxes(&[(p(2, 2), 'B'), (p(3, 3), 'A')]),
        );

        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, moved_agent);
        assert_ne!(a, swapped);

        let mut set = HashSet::new();
        assert!(set.insert(Rc::new(a)));
        assert!(!set.insert(Rc::new(b)));
        assert!(set.insert(Rc::new(moved_agent)));
        assert!(set.insert(Rc::new(swapped)));
    }

    #[test]
    fn test_equivalence_ignores_lineage() {
        let geometry = room(4, 5, &[]);
        let root = Rc::new(Configuration::root(&geometry, p(1, 1), Boxes::new()));
        let hash = geometry.zobrist().compute_boxes_hash(&Boxes::new());
        let child = Configuration::child(
            &root,
            Action::Move(Direction::East),
            p(1, 2),
            Boxes::new(),
            hash,
        );
        let independent = Configuration::root(&geometry, p(1, 2), Boxes::new());
        assert_eq!(child, independent);
        assert_ne!(child.depth(), independent.depth());
    }

    #[test]
    fn test_extract_plan() {
        let geometry = room(3, 6, &[]);
        let root = Rc::new(Configuration::root(&geometry, p(1, 1), Boxes::new()));
        assert!(Configuration::extract_plan(&root).is_empty());
        assert!(root.actions().is_empty());

        let mut node = Rc::clone(&root);
        for col in 2..5 {
            node = Rc::new(Configuration::child(
                &node,
                Action::Move(Direction::East),
                p(1, col),
                Boxes::new(),
                0,
            ));
        }

        let plan = Configuration::extract_plan(&node);
        assert_eq!(plan.len(), 3);
        assert_eq!(node.depth(), 3);
        assert_eq!(plan[0].agent(), p(1, 2));
        assert_eq!(plan[2].agent(), p(1, 4));
        assert!(Rc::ptr_eq(&plan[2], &node));
        assert_eq!(node.actions(), vec![Action::Move(Direction::East); 3]);
    }

    #[test]
    fn test_deep_chain_drop() {
        let geometry = room(3, 3, &[]);
        let mut node = Rc::new(Configuration::root(&geometry, p(1, 1), Boxes::new()));
        for _ in 0..200_000 {
            node = Rc::new(Configuration::child(
                &node,
                Action::Move(Direction::North),
                p(1, 1),
                Boxes::new(),
                0,
            ));
        }
        assert_eq!(node.depth(), 200_000);
        drop(node);
    }

    #[test]
    fn test_debug_shows_parent_depth_only() {
        let geometry = room(3, 3, &[]);
        let mut node = Rc::new(Configuration::root(&geometry, p(1, 1), Boxes::new()));
        assert!(format!("{:?}", node).contains("parent: None"));

        for _ in 0..200_000 {
            node = Rc::new(Configuration::child(
                &node,
                Action::Move(Direction::North),
                p(1, 1),
                Boxes::new(),
                0,
            ));
        }
        let output = format!("{:?}", node);
        assert!(output.contains("depth: 200000"));
        assert!(output.contains("parent: Some(199999)"));
        assert!(output.len() < 300);
    }

    #[test]
    fn test_render() {
        let geometry = room(4, 5, &[(p(1, 1), 'a'), (p(2, 3), 'b')]);
        let config = Configuration::root(
            &geometry,
            p(2, 1),
            boxes(&[(p(1, 2), 'A'), (p(2, 3), 'B')]),
        );
        let expected = "+++++\n\
                        +aA +\n\
                        +0 B+\n\
                        +++++\n";
        assert_eq!(config.render(&geometry).to_string(), expected);
    }

    #[test]
    fn test_render_agent_on_goal() {
        let geometry = room(3, 5, &[(p(1, 1), 'a')]);
        let config = Configuration::root(&geometry, p(1, 1), boxes(&[(p(1, 3), 'A')]));
        assert_eq!(config.render(&geometry).to_string(), "+++++\n+0 A+\n+++++\n");

        // Once the agent steps off, the goal letter shows again
        let moved = Configuration::root(&geometry, p(1, 2), boxes(&[(p(1, 3), 'A')]));
        assert_eq!(moved.render(&geometry).to_string(), "+++++\n+a0A+\n+++++\n");
    }
}
