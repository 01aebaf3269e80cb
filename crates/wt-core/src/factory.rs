use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::entity::{Creature, Entity, EntityId, Location, Node};
use crate::error::{WtError, WtResult};
use crate::item::{Item, ItemCatalog};
use crate::snapshot::SerializedNode;

/// Rebuilds one entity variant from its snapshot fields.
pub type FactoryFn = Box<dyn Fn(&SerializedNode) -> WtResult<Node>>;

/// Variant factories keyed by snapshot tag.
///
/// Built once at startup and handed to
/// [`WorldTree::deserialize`](crate::WorldTree::deserialize). Registration
/// order is irrelevant; registering a tag twice replaces the earlier factory.
#[derive(Default)]
pub struct FactoryTable {
    factories: HashMap<String, FactoryFn>,
}

impl fmt::Debug for FactoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryTable")
            .field("tags", &self.tags())
            .finish()
    }
}

impl FactoryTable {
    /// A table with no factories.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table for the built-in variants: locations, creatures, and items
    /// resolved against `catalog`.
    pub fn standard(catalog: Arc<ItemCatalog>) -> Self {
        let mut table = Self::new();
        table.register(Location::TAG, |fields| {
            decode::<Location>(Location::TAG, fields).map(Node::Location)
        });
        table.register(Creature::TAG, |fields| {
            decode::<Creature>(Creature::TAG, fields).map(Node::Creature)
        });
        table.register(Item::TAG, move |fields| {
            let item_type = fields
                .get("itemType")
                .and_then(Value::as_str)
                .ok_or_else(|| WtError::InvalidSnapshot("ITEM node without itemType".into()))?;
            catalog.instantiate(item_type).map(Node::Item)
        });
        table
    }

    /// Register the factory for `tag`.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        factory: impl Fn(&SerializedNode) -> WtResult<Node> + 'static,
    ) {
        self.factories.insert(tag.into(), Box::new(factory));
    }

    /// Returns true if a factory is registered for `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Rebuild an entity, keeping the persisted ID.
    pub fn build(&self, node: &SerializedNode) -> WtResult<Entity> {
        let tag = node
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| WtError::InvalidSnapshot("node without a type tag".into()))?;
        let id = node
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| WtError::InvalidSnapshot(format!("{tag} node without an id")))?;
        let factory = self
            .factories
            .get(tag)
            .ok_or_else(|| WtError::UnknownType(tag.to_string()))?;
        let variant = factory(node)?;
        Ok(Entity::with_id(EntityId::from(id), variant))
    }
}

fn decode<T: DeserializeOwned>(tag: &str, fields: &SerializedNode) -> WtResult<T> {
    serde_json::from_value(Value::Object(fields.clone()))
        .map_err(|e| WtError::InvalidSnapshot(format!("{tag} node: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::WorldNode;
    use serde_json::json;

    fn node(value: Value) -> SerializedNode {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn standard() -> FactoryTable {
        FactoryTable::standard(Arc::new(ItemCatalog::standard()))
    }

    #[test]
    fn standard_registers_builtin_tags() {
        assert_eq!(standard().tags(), vec!["CREATURE", "ITEM", "LOCATION"]);
    }

    #[test]
    fn builds_location_with_persisted_id() {
        let entity = standard()
            .build(&node(json!({
                "type": "LOCATION", "id": "loc-7", "name": "barn", "description": "Dusty."
            })))
            .unwrap();
        assert_eq!(entity.id.as_str(), "loc-7");
        assert_eq!(entity.node, Node::Location(Location::new("barn", "Dusty.")));
    }

    #[test]
    fn builds_item_from_catalog() {
        let entity = standard()
            .build(&node(json!({"type": "ITEM", "id": "i", "itemType": "WATER_BOTTLE"})))
            .unwrap();
        assert_eq!(entity.name(), "water bottle");
        assert_eq!(entity.node.fields()["itemType"], "WATER_BOTTLE");
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let err = standard()
            .build(&node(json!({"type": "DRAGON", "id": "d"})))
            .unwrap_err();
        assert!(matches!(err, WtError::UnknownType(t) if t == "DRAGON"));
    }

    #[test]
    fn missing_fields_are_invalid() {
        let table = standard();
        for value in [
            json!({"id": "x"}),
            json!({"type": "LOCATION"}),
            json!({"type": "LOCATION", "id": "x", "name": "no description"}),
            json!({"type": "ITEM", "id": "x"}),
        ] {
            let err = table.build(&node(value)).unwrap_err();
            assert!(matches!(err, WtError::InvalidSnapshot(_)), "{err}");
        }
    }

    #[test]
    fn custom_factory_can_be_registered() {
        let mut table = FactoryTable::new();
        assert!(!table.contains("LOCATION"));
        table.register("LOCATION", |_| Ok(Node::Location(Location::new("void", ""))));
        let entity = table
            .build(&node(json!({"type": "LOCATION", "id": "v"})))
            .unwrap();
        assert_eq!(entity.name(), "void");
    }
}
