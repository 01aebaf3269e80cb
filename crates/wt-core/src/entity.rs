use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::item::Item;
use crate::snapshot::SerializedNode;

/// Unique identifier for every entity in the world.
///
/// Fresh entities get a random UUID; restored entities keep whatever string
/// was persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Generate a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first eight characters, for compact display.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Capabilities shared by every entity variant.
pub trait WorldNode {
    /// The discriminant tag written to snapshots ("LOCATION", "ITEM", ...).
    fn tag(&self) -> &'static str;
    /// Display name.
    fn name(&self) -> &str;
    /// Free-text description.
    fn description(&self) -> &str;
    /// Variant-specific snapshot fields, excluding `type` and `id`.
    fn fields(&self) -> Map<String, Value>;
}

/// A place that can contain creatures, items, and other places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Display name of the location.
    pub name: String,
    /// Free-text description of the location.
    pub description: String,
}

impl Location {
    /// Snapshot tag for locations.
    pub const TAG: &'static str = "LOCATION";

    /// Create a location.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl WorldNode for Location {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn fields(&self) -> Map<String, Value> {
        named_fields(&self.name, &self.description)
    }
}

/// A person or animal in the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    /// Display name of the creature.
    pub name: String,
    /// Free-text description of the creature.
    pub description: String,
}

impl Creature {
    /// Snapshot tag for creatures.
    pub const TAG: &'static str = "CREATURE";

    /// Create a creature.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl WorldNode for Creature {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn fields(&self) -> Map<String, Value> {
        named_fields(&self.name, &self.description)
    }
}

fn named_fields(name: &str, description: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("name".into(), Value::from(name));
    fields.insert("description".into(), Value::from(description));
    fields
}

/// The closed set of entity variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A place.
    Location(Location),
    /// A person or animal.
    Creature(Creature),
    /// A physical object backed by an item template.
    Item(Item),
}

impl Node {
    fn inner(&self) -> &dyn WorldNode {
        match self {
            Self::Location(l) => l,
            Self::Creature(c) => c,
            Self::Item(i) => i,
        }
    }
}

impl WorldNode for Node {
    fn tag(&self) -> &'static str {
        self.inner().tag()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn description(&self) -> &str {
        self.inner().description()
    }

    fn fields(&self) -> Map<String, Value> {
        self.inner().fields()
    }
}

impl From<Location> for Node {
    fn from(l: Location) -> Self {
        Self::Location(l)
    }
}

impl From<Creature> for Node {
    fn from(c: Creature) -> Self {
        Self::Creature(c)
    }
}

impl From<Item> for Node {
    fn from(i: Item) -> Self {
        Self::Item(i)
    }
}

/// A uniquely identified node in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Unique identifier for this entity.
    pub id: EntityId,
    /// The variant data.
    pub node: Node,
}

impl Entity {
    /// Create an entity with a random ID.
    pub fn new(node: impl Into<Node>) -> Self {
        Self::with_id(EntityId::new(), node)
    }

    /// Create an entity with a pre-assigned ID.
    ///
    /// Used when restoring a snapshot so that parent and child references
    /// keep pointing at the same entities.
    pub fn with_id(id: EntityId, node: impl Into<Node>) -> Self {
        Self {
            id,
            node: node.into(),
        }
    }

    /// Shorthand for a new location entity.
    pub fn location(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Location::new(name, description))
    }

    /// Shorthand for a new creature entity.
    pub fn creature(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Creature::new(name, description))
    }

    /// The variant tag.
    pub fn tag(&self) -> &'static str {
        self.node.tag()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.node.name()
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        self.node.description()
    }

    /// Returns true for location entities.
    pub fn is_location(&self) -> bool {
        matches!(self.node, Node::Location(_))
    }

    /// Returns true for creature entities.
    pub fn is_creature(&self) -> bool {
        matches!(self.node, Node::Creature(_))
    }

    /// The item data, if this entity is an item.
    pub fn as_item(&self) -> Option<&Item> {
        match &self.node {
            Node::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Flatten into `{type, id, ...fields}`.
    pub fn serialize(&self) -> SerializedNode {
        let mut out = Map::new();
        out.insert("type".into(), Value::from(self.tag()));
        out.insert("id".into(), Value::from(self.id.as_str()));
        out.extend(self.node.fields());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_unique_uuids() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn short_id_handles_short_strings() {
        assert_eq!(EntityId::from("a3f2b1c8-1234").short(), "a3f2b1c8");
        assert_eq!(EntityId::from("r").short(), "r");
    }

    #[test]
    fn with_id_preserves_given_id() {
        let entity = Entity::with_id("loc-1".into(), Location::new("barn", "An old barn."));
        assert_eq!(entity.id, EntityId::from("loc-1"));
        assert_eq!(entity.name(), "barn");
        assert_eq!(entity.tag(), "LOCATION");
        assert!(entity.is_location());
    }

    #[test]
    fn serialize_includes_type_id_and_fields() {
        let entity = Entity::with_id("c-1".into(), Creature::new("guard", "Burly."));
        let json = entity.serialize();
        assert_eq!(json["type"], "CREATURE");
        assert_eq!(json["id"], "c-1");
        assert_eq!(json["name"], "guard");
        assert_eq!(json["description"], "Burly.");
        assert_eq!(json.len(), 4);
    }
}
