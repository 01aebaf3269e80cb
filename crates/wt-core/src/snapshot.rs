use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::EntityId;
use crate::error::WtResult;

/// One node in a snapshot: `{type, id, ...fields}`.
pub type SerializedNode = Map<String, Value>;

/// The flat transport form of a [`WorldTree`](crate::WorldTree).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Every registered entity, in registration order.
    pub nodes: Vec<SerializedNode>,
    /// Ordered child ids per parent id.
    pub children: BTreeMap<EntityId, Vec<EntityId>>,
    /// Parent id per child id.
    pub parents: BTreeMap<EntityId, EntityId>,
    /// ID of the root entity.
    pub root: EntityId,
}

impl Snapshot {
    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> WtResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON text.
    pub fn from_json(json: &str) -> WtResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
