use crate::{boxes::Boxes, grid::Position};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of distinct box letters (`A`..`Z`).
pub const LETTERS: usize = 26;

/// Zobrist hash keys for box layouts: one key per (cell, letter).
#[derive(Debug, Clone)]
pub struct Zobrist {
    cols: usize,
    box_hashes: Vec<u64>,
}

impl Zobrist {
    pub fn new(rows: usize, cols: usize) -> Self {
        // Use a seeded PRNG for reproducible Zobrist hashes
        let mut rng = ChaCha8Rng::seed_from_u64(0x123456789abcdef0);

        let mut box_hashes = vec![0u64; rows * cols * LETTERS];
        for key in box_hashes.iter_mut() {
            *key = rng.next_u64();
        }

        Zobrist { cols, box_hashes }
    }

    /// Get hash value for a box with the given letter at a specific position
    pub fn box_hash(&self, pos: Position, letter: char) -> u64 {
        debug_assert!(letter.is_ascii_uppercase(), "invalid box letter {:?}", letter);
        let letter_idx = (letter as usize).wrapping_sub('A' as usize) % LETTERS;
        self.box_hashes[(pos.row * self.cols + pos.col) * LETTERS + letter_idx]
    }

    /// Compute hash for all boxes in a layout
    pub fn compute_boxes_hash(&self, boxes: &Boxes) -> u64 {
        let mut boxes_hash = 0u64;
        for (pos, letter) in boxes.iter() {
            boxes_hash ^= self.box_hash(pos, letter);
        }
        boxes_hash
    }

    /// Hash of `boxes_hash` after moving the box `letter` from `from` to `to`.
    pub fn move_box_hash(
        &self,
        boxes_hash: u64,
        letter: char,
        from: Position,
        to: Position,
    ) -> u64 {
        boxes_hash ^ self.box_hash(from, letter) ^ self.box_hash(to, letter)
    }
}
