use crate::{configuration::Configuration, expand::Expander};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

const PROGRESS_INTERVAL: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
}

#[derive(Debug, Clone)]
pub enum SolveResult {
    /// Configurations from the root's first child to the goal
    Solved(Vec<Rc<Configuration>>),
    /// Node budget exhausted
    Cutoff,
    /// Every reachable configuration was explored without reaching a goal
    Impossible,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub strategy: Strategy,
    pub max_nodes_explored: usize,
    pub seed: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            strategy: Strategy::BreadthFirst,
            max_nodes_explored: 5_000_000,
            seed: 2,
        }
    }
}

/// Graph search over configurations, driving an `Expander`.
pub struct Solver {
    expander: Expander,
    opts: SearchOptions,
    rng: ChaCha8Rng,
    nodes_explored: usize,
    nodes_generated: usize,
}

impl Solver {
    pub fn new(expander: Expander, opts: SearchOptions) -> Self {
        Solver {
            expander,
            opts,
            rng: ChaCha8Rng::seed_from_u64(opts.seed),
            nodes_explored: 0,
            nodes_generated: 0,
        }
    }

    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    pub fn nodes_generated(&self) -> usize {
        self.nodes_generated
    }

    pub fn solve(&mut self, root: Rc<Configuration>) -> SolveResult {
        let mut frontier = VecDeque::new();
        // Everything ever generated, so each configuration enters the frontier once
        let mut seen: HashSet<Rc<Configuration>> = HashSet::new();

        seen.insert(Rc::clone(&root));
        frontier.push_back(root);
        self.nodes_generated += 1;

        debug!("search started with {:?}", self.opts);

        while let Some(node) = self.pop(&mut frontier) {
            if self.expander.is_goal(&node) {
                info!(
                    "goal found at depth {} after {} nodes explored",
                    node.depth(),
                    self.nodes_explored
                );
                return SolveResult::Solved(Configuration::extract_plan(&node));
            }

            if self.nodes_explored >= self.opts.max_nodes_explored {
                info!("node budget of {} exhausted", self.opts.max_nodes_explored);
                return SolveResult::Cutoff;
            }
            self.nodes_explored += 1;

            if self.nodes_explored % PROGRESS_INTERVAL == 0 {
                debug!(
                    "explored: {}, generated: {}, frontier: {}, depth: {}",
                    self.nodes_explored,
                    self.nodes_generated,
                    frontier.len(),
                    node.depth()
                );
            }

            for child in self.expander.expand(&node, &mut self.rng) {
                if seen.contains(&child) {
                    continue;
                }
                seen.insert(Rc::clone(&child));
                frontier.push_back(child);
                self.nodes_generated += 1;
            }
        }

        info!("search space exhausted after {} nodes", self.nodes_explored);
        SolveResult::Impossible
    }

    fn pop(&self, frontier: &mut VecDeque<Rc<Configuration>>) -> Option<Rc<Configuration>> {
        match self.opts.strategy {
            Strategy::BreadthFirst => frontier.pop_front(),
            Strategy::DepthFirst => frontier.pop_back(),
        }
    }
}
