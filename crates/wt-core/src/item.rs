use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::WorldNode;
use crate::error::{WtError, WtResult};

/// Raw materials an item can be broken down into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Material {
    /// Anything edible.
    Food,
    /// Drinkable water.
    Water,
    /// Steel and other metals.
    Steel,
    /// Plastic.
    Plastic,
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Food => write!(f, "food"),
            Self::Water => write!(f, "water"),
            Self::Steel => write!(f, "steel"),
            Self::Plastic => write!(f, "plastic"),
        }
    }
}

/// Quantity per material.
pub type MaterialComposition = BTreeMap<Material, u32>;

/// Sum several compositions into one.
pub fn add_materials<'a>(
    compositions: impl IntoIterator<Item = &'a MaterialComposition>,
) -> MaterialComposition {
    let mut total = MaterialComposition::new();
    for composition in compositions {
        for (material, amount) in composition {
            let slot = total.entry(*material).or_default();
            *slot = slot.saturating_add(*amount);
        }
    }
    total
}

/// Sum the materials of the given items.
pub fn combined_materials<'a>(items: impl IntoIterator<Item = &'a Item>) -> MaterialComposition {
    add_materials(items.into_iter().map(Item::materials))
}

/// Shared data for every item of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Display name shared by all items of this type.
    pub name: String,
    /// Description shared by all items of this type.
    pub description: String,
    /// What one item of this type is made of.
    pub materials: MaterialComposition,
}

impl ItemTemplate {
    /// Create a template with no materials.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            materials: MaterialComposition::new(),
        }
    }

    /// Add a material to the template.
    pub fn with_material(mut self, material: Material, amount: u32) -> Self {
        let slot = self.materials.entry(material).or_default();
        *slot = slot.saturating_add(amount);
        self
    }
}

/// Item templates keyed by item type.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    templates: HashMap<String, Arc<ItemTemplate>>,
}

impl ItemCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The templates used by the starter world.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            "CANNED_FOOD",
            ItemTemplate::new("canned food", "A dented tin of beans, still sealed.")
                .with_material(Material::Food, 1)
                .with_material(Material::Steel, 1),
        );
        catalog.insert(
            "WATER_BOTTLE",
            ItemTemplate::new("water bottle", "A plastic bottle of clean water.")
                .with_material(Material::Water, 1)
                .with_material(Material::Plastic, 1),
        );
        catalog.insert(
            "SCRAP_METAL",
            ItemTemplate::new("scrap metal", "Twisted sheets of salvaged steel.")
                .with_material(Material::Steel, 3),
        );
        catalog
    }

    /// Register or replace a template.
    pub fn insert(&mut self, item_type: impl Into<String>, template: ItemTemplate) {
        self.templates.insert(item_type.into(), Arc::new(template));
    }

    /// Look up a template.
    pub fn get(&self, item_type: &str) -> Option<&ItemTemplate> {
        self.templates.get(item_type).map(Arc::as_ref)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Build an item bound to its template.
    pub fn instantiate(&self, item_type: &str) -> WtResult<Item> {
        let template = self
            .templates
            .get(item_type)
            .ok_or_else(|| WtError::UnknownItemType(item_type.to_string()))?;
        Ok(Item {
            item_type: item_type.to_string(),
            template: Arc::clone(template),
        })
    }
}

/// A physical object. Name, description, and materials come from its template.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    item_type: String,
    template: Arc<ItemTemplate>,
}

impl Item {
    /// Snapshot tag for items.
    pub const TAG: &'static str = "ITEM";

    /// The template key.
    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    /// The shared template.
    pub fn template(&self) -> &ItemTemplate {
        &self.template
    }

    /// What this item is made of.
    pub fn materials(&self) -> &MaterialComposition {
        &self.template.materials
    }
}

impl WorldNode for Item {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn name(&self) -> &str {
        &self.template.name
    }

    fn description(&self) -> &str {
        &self.template.description
    }

    fn fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("itemType".into(), Value::from(self.item_type.as_str()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantiate_binds_template() {
        let catalog = ItemCatalog::standard();
        let item = catalog.instantiate("CANNED_FOOD").unwrap();
        assert_eq!(item.name(), "canned food");
        assert_eq!(item.description(), "A dented tin of beans, still sealed.");
        assert_eq!(item.materials()[&Material::Food], 1);
        assert_eq!(item.fields()["itemType"], "CANNED_FOOD");
    }

    #[test]
    fn unknown_item_type_rejected() {
        let catalog = ItemCatalog::standard();
        let err = catalog.instantiate("LASER").unwrap_err();
        assert!(matches!(err, WtError::UnknownItemType(t) if t == "LASER"));
    }

    #[test]
    fn add_materials_sums_per_material() {
        let a = MaterialComposition::from([(Material::Steel, 2), (Material::Food, 1)]);
        let b = MaterialComposition::from([(Material::Steel, 3), (Material::Water, 4)]);
        let total = add_materials([&a, &b]);
        assert_eq!(total[&Material::Steel], 5);
        assert_eq!(total[&Material::Food], 1);
        assert_eq!(total[&Material::Water], 4);
        assert!(!total.contains_key(&Material::Plastic));
    }

    #[test]
    fn material_totals_saturate() {
        let a = MaterialComposition::from([(Material::Steel, u32::MAX)]);
        let b = MaterialComposition::from([(Material::Steel, 1)]);
        assert_eq!(add_materials([&a, &b])[&Material::Steel], u32::MAX);

        let template = ItemTemplate::new("girder", "")
            .with_material(Material::Steel, u32::MAX)
            .with_material(Material::Steel, 5);
        assert_eq!(template.materials[&Material::Steel], u32::MAX);
    }

    #[test]
    fn combined_materials_of_no_items_is_empty() {
        assert!(combined_materials(std::iter::empty()).is_empty());
    }

    #[test]
    fn combined_materials_counts_each_item() {
        let catalog = ItemCatalog::standard();
        let items = [
            catalog.instantiate("SCRAP_METAL").unwrap(),
            catalog.instantiate("SCRAP_METAL").unwrap(),
            catalog.instantiate("CANNED_FOOD").unwrap(),
        ];
        let total = combined_materials(&items);
        assert_eq!(total[&Material::Steel], 7);
        assert_eq!(total[&Material::Food], 1);
    }

    #[test]
    fn material_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Material::Plastic).unwrap(), "\"PLASTIC\"");
    }
}
