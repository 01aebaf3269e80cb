use std::fmt::Write as _;

use tracing::info;

use crate::entity::{Entity, EntityId};
use crate::error::{WtError, WtResult};
use crate::tree::WorldTree;

/// Configuration for a play session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Name of the creature the player controls.
    pub player_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: "player".into(),
        }
    }
}

impl GameConfig {
    /// Set the player creature's name.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }
}

/// A world tree plus the creature the player controls.
#[derive(Debug, Clone)]
pub struct Game {
    tree: WorldTree,
    player: EntityId,
}

impl Game {
    /// Start a session, locating the player creature by name.
    pub fn new(tree: WorldTree, config: &GameConfig) -> WtResult<Self> {
        let player = tree
            .entities()
            .find(|e| e.is_creature() && e.name() == config.player_name)
            .map(|e| e.id.clone())
            .ok_or_else(|| WtError::NameNotFound(config.player_name.clone()))?;
        Ok(Self { tree, player })
    }

    /// The underlying tree.
    pub fn tree(&self) -> &WorldTree {
        &self.tree
    }

    /// The player creature.
    pub fn player(&self) -> WtResult<&Entity> {
        self.tree.get(&self.player)
    }

    /// Where the player currently is.
    pub fn location(&self) -> WtResult<&Entity> {
        self.tree
            .parent(&self.player)?
            .ok_or_else(|| WtError::NotFound(self.player.clone()))
    }

    /// "You are here" text, followed by the other creatures present.
    pub fn where_am_i(&self) -> WtResult<String> {
        let location = self.location()?;
        let mut out = format!(
            "You are here: {} - {}",
            location.name(),
            location.description().trim()
        );
        let others = self.describe_location(&location.id)?;
        if !others.is_empty() {
            out.push('\n');
            out.push_str(&others);
        }
        Ok(out)
    }

    /// One `- name: description` line per creature in `location`, the player
    /// excluded.
    pub fn describe_location(&self, location: &EntityId) -> WtResult<String> {
        let mut out = String::new();
        for creature in self
            .tree
            .children(location)?
            .into_iter()
            .filter(|c| c.is_creature() && c.id != self.player)
        {
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = write!(out, "- {}: {}", creature.name(), creature.description());
        }
        Ok(out)
    }

    /// Locations the player can move to: the enclosing location, the
    /// locations inside this one, then neighbouring locations.
    pub fn move_list(&self) -> WtResult<Vec<&Entity>> {
        let here = self.location()?;
        let mut out = Vec::new();
        let outer = self.tree.parent(&here.id)?;
        if let Some(outer) = outer {
            out.push(outer);
        }
        out.extend(self.tree.children(&here.id)?);
        if let Some(outer) = outer {
            out.extend(
                self.tree
                    .children(&outer.id)?
                    .into_iter()
                    .filter(|n| n.id != here.id),
            );
        }
        out.retain(|e| e.is_location());
        Ok(out)
    }

    /// Move the player to the named entry of the move list.
    pub fn move_to(&mut self, target: &str) -> WtResult<&Entity> {
        let destination = self
            .move_list()?
            .into_iter()
            .find(|e| e.name() == target)
            .map(|e| e.id.clone())
            .ok_or_else(|| WtError::NameNotFound(target.to_string()))?;
        self.tree.move_entity(&self.player, &destination)?;
        info!(player = %self.player, to = target, "player moved");
        self.tree.get(&destination)
    }
}
