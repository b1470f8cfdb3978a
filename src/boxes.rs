use crate::grid::Position;

/// Box layout of one configuration: the letter of the box occupying each
/// cell, if any. Stored sparsely, sorted by position, so that copying a
/// layout costs one entry per box instead of one per cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boxes {
    entries: Vec<(Position, char)>,
}

impl Boxes {
    pub fn new() -> Self {
        Boxes {
            entries: Vec::new(),
        }
    }

    fn search(&self, pos: Position) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&pos, |&(p, _)| p)
    }

    /// Letter of the box at `pos`, if any.
    pub fn at(&self, pos: Position) -> Option<char> {
        self.search(pos).ok().map(|i| self.entries[i].1)
    }

    pub fn has_box_at(&self, pos: Position) -> bool {
        self.search(pos).is_ok()
    }

    /// Place a box, returning the letter it replaced.
    pub fn insert(&mut self, pos: Position, letter: char) -> Option<char> {
        match self.search(pos) {
            Ok(i) => Some(std::mem::replace(&mut self.entries[i].1, letter)),
            Err(i) => {
                self.entries.insert(i, (pos, letter));
                None
            }
        }
    }

    pub fn remove(&mut self, pos: Position) -> Option<char> {
        self.search(pos).ok().map(|i| self.entries.remove(i).1)
    }

    /// Move the box at `from` to the empty cell `to`.
    /// Panics if there is no box at `from` or `to` is occupied.
    pub fn move_box(&mut self, from: Position, to: Position) -> char {
        let letter = self
            .remove(from)
            .unwrap_or_else(|| panic!("no box at {}", from));
        assert!(
            self.insert(to, letter).is_none(),
            "cannot move box to {}: cell occupied",
            to
        );
        letter
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Boxes in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<(Position, char)> for Boxes {
    fn from_iter<I: IntoIterator<Item = (Position, char)>>(iter: I) -> Self {
        let mut boxes = Boxes::new();
        for (pos, letter) in iter {
            boxes.insert(pos, letter);
        }
        boxes
    }
}
