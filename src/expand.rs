use crate::{
    action::{Action, ActionCatalog},
    configuration::Configuration,
    geometry::Geometry,
};
use log::trace;
use rand::Rng;
use rand::seq::SliceRandom;
use std::rc::Rc;

/// Generates the legal successors of a configuration.
pub struct Expander {
    geometry: Rc<Geometry>,
    catalog: ActionCatalog,
}

impl Expander {
    pub fn new(geometry: Rc<Geometry>, catalog: ActionCatalog) -> Self {
        Expander { geometry, catalog }
    }

    /// Apply a single action to `node`.
    /// Returns None if the action is not legal in `node`.
    pub fn apply(&self, node: &Rc<Configuration>, action: Action) -> Option<Configuration> {
        let geometry = &*self.geometry;
        let agent = node.agent();

        match action {
            Action::Move(dir) => {
                let dest = geometry.step(agent, dir)?;
                if node.is_blocked(geometry, dest) {
                    return None;
                }
                Some(Configuration::child(
                    node,
                    action,
                    dest,
                    node.boxes().clone(),
                    node.boxes_hash(),
                ))
            }
            Action::Push(agent_dir, box_dir) => {
                // The agent steps into the box's cell
                let box_pos = geometry.step(agent, agent_dir)?;
                let letter = node.box_at(box_pos)?;
                let box_dest = geometry.step(box_pos, box_dir)?;
                if node.is_blocked(geometry, box_dest) {
                    return None;
                }
                let mut boxes = node.boxes().clone();
                boxes.move_box(box_pos, box_dest);
                let boxes_hash = geometry.zobrist().move_box_hash(
                    node.boxes_hash(),
                    letter,
                    box_pos,
                    box_dest,
                );
                Some(Configuration::child(node, action, box_pos, boxes, boxes_hash))
            }
            Action::Pull(agent_dir, box_dir) => {
                let dest = geometry.step(agent, agent_dir)?;
                if node.is_blocked(geometry, dest) {
                    return None;
                }
                // The box trails the agent into its old cell
                let box_pos = geometry.step(agent, box_dir.opposite())?;
                let letter = node.box_at(box_pos)?;
                let mut boxes = node.boxes().clone();
                boxes.move_box(box_pos, agent);
                let boxes_hash =
                    geometry.zobrist().move_box_hash(node.boxes_hash(), letter, box_pos, agent);
                Some(Configuration::child(node, action, dest, boxes, boxes_hash))
            }
        }
    }

    /// All legal successors of `node`, shuffled with `rng`.
    pub fn expand<R: Rng + ?Sized>(
        &self,
        node: &Rc<Configuration>,
        rng: &mut R,
    ) -> Vec<Rc<Configuration>> {
        let mut children: Vec<Rc<Configuration>> = self
            .catalog
            .iter()
            .filter_map(|&action| self.apply(node, action))
            .map(Rc::new)
            .collect();

        children.shuffle(rng);

        trace!(
            "expanded depth {} at {}: {} successors",
            node.depth(),
            node.agent(),
            children.len()
        );
        children
    }

    pub fn is_goal(&self, node: &Configuration) -> bool {
        node.is_goal(&self.geometry)
    }
}
