//! Core types for Weltenbaum: entities, the containment tree, and snapshots.
//!
//! A [`WorldTree`] owns every entity in the world and records which entity
//! contains which. Trees are flattened into a [`Snapshot`] for persistence and
//! rebuilt through a [`FactoryTable`] that knows how to reconstruct each
//! entity variant from its tag.

/// Tree configuration.
pub mod config;
/// Entity identifiers, node variants, and the shared node capability trait.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Variant factories used when rebuilding a tree from a snapshot.
pub mod factory;
/// Player-facing helpers: where am I, where can I go, go there.
pub mod game;
/// Item templates and material bookkeeping.
pub mod item;
/// Flat transport form of a world tree.
pub mod snapshot;
/// The demo world a new save file starts from.
pub mod starter;
/// The containment tree that owns all entities.
pub mod tree;

/// Re-export configuration types.
pub use config::TreeConfig;
/// Re-export core entity types.
pub use entity::{Creature, Entity, EntityId, Location, Node, WorldNode};
/// Re-export error types.
pub use error::{WtError, WtResult};
/// Re-export the factory table.
pub use factory::FactoryTable;
/// Re-export game helpers.
pub use game::{Game, GameConfig};
/// Re-export item types.
pub use item::{Item, ItemCatalog, ItemTemplate, Material, MaterialComposition};
/// Re-export snapshot types.
pub use snapshot::{SerializedNode, Snapshot};
/// Re-export the tree.
pub use tree::WorldTree;
