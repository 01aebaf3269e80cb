pub mod check;
pub mod init;
pub mod list;
pub mod play;
pub mod show;
pub mod tree;

use std::path::PathBuf;
use std::sync::Arc;

use wt_core::{FactoryTable, GameConfig, ItemCatalog, Snapshot, TreeConfig, WorldTree};

/// Settings shared by every command.
pub struct Context {
    pub path: PathBuf,
    pub tree: TreeConfig,
    pub game: GameConfig,
}

impl Context {
    /// Read and rebuild the world from the save file.
    pub fn load(&self) -> Result<WorldTree, String> {
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("cannot read {}: {e}", self.path.display()))?;
        let snapshot = Snapshot::from_json(&json).map_err(|e| e.to_string())?;
        let factories = FactoryTable::standard(Arc::new(ItemCatalog::standard()));
        WorldTree::deserialize_with(snapshot, &factories, self.tree).map_err(|e| e.to_string())
    }

    /// Write the world back to the save file.
    pub fn save(&self, tree: &WorldTree) -> Result<(), String> {
        let json = tree.serialize().to_json().map_err(|e| e.to_string())?;
        std::fs::write(&self.path, json)
            .map_err(|e| format!("cannot write to {}: {e}", self.path.display()))
    }
}

/// Find an entity by display name.
fn find<'t>(tree: &'t WorldTree, name: &str) -> Result<&'t wt_core::Entity, String> {
    tree.find_by_name(name)
        .ok_or_else(|| format!("entity not found: \"{name}\""))
}
