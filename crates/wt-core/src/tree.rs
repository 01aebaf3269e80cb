use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use tracing::{debug, warn};

use crate::config::TreeConfig;
use crate::entity::{Entity, EntityId};
use crate::error::{WtError, WtResult};
use crate::factory::FactoryTable;
use crate::item::{Item, MaterialComposition, combined_materials};
use crate::snapshot::Snapshot;

/// The containment tree. Owns every entity and the parent/child indexes.
///
/// The registry, the parent map, and the children map are one unit: every
/// mutation updates all three before returning.
#[derive(Debug, Clone)]
pub struct WorldTree {
    config: TreeConfig,
    nodes: HashMap<EntityId, Entity>,
    order: Vec<EntityId>,
    parents: HashMap<EntityId, EntityId>,
    children: HashMap<EntityId, Vec<EntityId>>,
    root: EntityId,
}

impl WorldTree {
    /// Create a tree whose root is `root`.
    pub fn new(root: Entity) -> Self {
        Self::with_config(root, TreeConfig::default())
    }

    /// Create a tree with explicit limits.
    pub fn with_config(root: Entity, config: TreeConfig) -> Self {
        let root_id = root.id.clone();
        let mut nodes = HashMap::new();
        nodes.insert(root_id.clone(), root);
        Self {
            config,
            nodes,
            order: vec![root_id.clone()],
            parents: HashMap::new(),
            children: HashMap::new(),
            root: root_id,
        }
    }

    /// The active limits.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Registry
    // -----------------------------------------------------------------------

    /// Register a detached entity. Returns its ID.
    pub fn add(&mut self, entity: Entity) -> WtResult<EntityId> {
        if self.nodes.contains_key(&entity.id) {
            return Err(WtError::DuplicateId(entity.id));
        }
        let id = entity.id.clone();
        debug!(id = %id, tag = entity.tag(), name = entity.name(), "entity added");
        self.order.push(id.clone());
        self.nodes.insert(id.clone(), entity);
        Ok(id)
    }

    /// Register an entity and move it under `parent` in one step.
    pub fn add_child(&mut self, entity: Entity, parent: &EntityId) -> WtResult<EntityId> {
        if !self.nodes.contains_key(parent) {
            return Err(WtError::NotFound(parent.clone()));
        }
        let id = self.add(entity)?;
        if let Err(e) = self.move_entity(&id, parent) {
            self.nodes.remove(&id);
            self.order.pop();
            return Err(e);
        }
        Ok(id)
    }

    /// Look up an entity.
    pub fn get(&self, id: &EntityId) -> WtResult<&Entity> {
        self.nodes.get(id).ok_or_else(|| WtError::NotFound(id.clone()))
    }

    /// Look up an entity for modification.
    pub fn get_mut(&mut self, id: &EntityId) -> WtResult<&mut Entity> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| WtError::NotFound(id.clone()))
    }

    /// Returns true if `id` is registered.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of registered entities, root included.
    pub fn entity_count(&self) -> usize {
        self.nodes.len()
    }

    /// All entities in registration order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// The root entity.
    pub fn root(&self) -> &Entity {
        &self.nodes[&self.root]
    }

    /// ID of the root entity.
    pub fn root_id(&self) -> &EntityId {
        &self.root
    }

    /// First entity (in registration order) with the given display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities().find(|e| e.name() == name)
    }

    /// Remove an entity together with its whole subtree.
    ///
    /// Returns the removed entities in pre-order.
    pub fn remove(&mut self, id: &EntityId) -> WtResult<Vec<Entity>> {
        if *id == self.root {
            return Err(WtError::RootImmutable(id.clone()));
        }
        let doomed: Vec<EntityId> = self
            .walk(id)?
            .into_iter()
            .map(|(_, e)| e.id.clone())
            .collect();

        if let Some(parent) = self.parents.remove(id) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|c| c != id);
            }
        }

        let gone: HashSet<&EntityId> = doomed.iter().collect();
        self.order.retain(|o| !gone.contains(o));

        let mut removed = Vec::with_capacity(doomed.len());
        for victim in &doomed {
            self.parents.remove(victim);
            self.children.remove(victim);
            if let Some(entity) = self.nodes.remove(victim) {
                removed.push(entity);
            }
        }
        debug!(id = %id, count = removed.len(), "subtree removed");
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Containment
    // -----------------------------------------------------------------------

    /// Re-parent `id` under `new_parent`.
    ///
    /// The entity leaves its old parent's child list (if any) and is appended
    /// to the end of the new parent's list.
    pub fn move_entity(&mut self, id: &EntityId, new_parent: &EntityId) -> WtResult<()> {
        self.get(id)?;
        self.get(new_parent)?;
        if *id == self.root {
            return Err(WtError::RootImmutable(id.clone()));
        }
        if id == new_parent || self.is_ancestor(id, new_parent) {
            return Err(WtError::Cycle(id.clone()));
        }
        let height = self
            .walk(id)?
            .iter()
            .map(|(depth, _)| *depth)
            .max()
            .unwrap_or(0);
        if self.depth(new_parent) + 1 + height > self.config.max_depth {
            return Err(WtError::DepthExceeded(self.config.max_depth));
        }

        if let Some(old) = self.parents.get(id) {
            if let Some(siblings) = self.children.get_mut(old) {
                siblings.retain(|c| c != id);
            }
        }
        self.parents.insert(id.clone(), new_parent.clone());
        self.children
            .entry(new_parent.clone())
            .or_default()
            .push(id.clone());

        debug!(id = %id, parent = %new_parent, "entity moved");
        Ok(())
    }

    /// The parent of `id`; `None` for the root.
    ///
    /// Fails with `NotFound` for unregistered or detached entities.
    pub fn parent(&self, id: &EntityId) -> WtResult<Option<&Entity>> {
        self.get(id)?;
        if *id == self.root {
            return Ok(None);
        }
        let parent = self
            .parents
            .get(id)
            .ok_or_else(|| WtError::NotFound(id.clone()))?;
        self.get(parent).map(Some)
    }

    /// The recorded parent ID, if any.
    pub fn parent_id(&self, id: &EntityId) -> Option<&EntityId> {
        self.parents.get(id)
    }

    /// Immediate child IDs in stored order.
    pub fn child_ids(&self, id: &EntityId) -> &[EntityId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Immediate children in stored order. Empty if there are none.
    pub fn children(&self, id: &EntityId) -> WtResult<Vec<&Entity>> {
        self.get(id)?;
        self.child_ids(id).iter().map(|c| self.get(c)).collect()
    }

    /// The first immediate child with the given display name.
    pub fn child(&self, id: &EntityId, name: &str) -> WtResult<&Entity> {
        self.children(id)?
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| WtError::ChildNotFound {
                parent: id.clone(),
                name: name.to_string(),
            })
    }

    /// `id` followed by all its descendants, pre-order.
    pub fn top_down(&self, id: &EntityId) -> WtResult<Vec<&Entity>> {
        Ok(self.walk(id)?.into_iter().map(|(_, e)| e).collect())
    }

    /// Pre-order walk with depths, refusing cycles and over-deep nesting.
    fn walk(&self, id: &EntityId) -> WtResult<Vec<(usize, &Entity)>> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![(0usize, id)];

        while let Some((depth, current)) = stack.pop() {
            if depth > self.config.max_depth {
                return Err(WtError::DepthExceeded(self.config.max_depth));
            }
            if !seen.insert(current) {
                return Err(WtError::Cycle(current.clone()));
            }
            out.push((depth, self.get(current)?));
            for child in self.child_ids(current).iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        Ok(out)
    }

    /// Parent chain of `id`, nearest first, ending at the root or at a
    /// detached entity.
    pub fn ancestors(&self, id: &EntityId) -> WtResult<Vec<&Entity>> {
        self.get(id)?;
        let mut out = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut current = id;
        while let Some(parent) = self.parents.get(current) {
            if !seen.insert(parent) {
                return Err(WtError::Cycle(parent.clone()));
            }
            if out.len() >= self.config.max_depth {
                return Err(WtError::DepthExceeded(self.config.max_depth));
            }
            out.push(self.get(parent)?);
            current = parent;
        }
        Ok(out)
    }

    /// Number of parent links above `id`.
    fn depth(&self, id: &EntityId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parents.get(current) {
            depth += 1;
            if depth > self.nodes.len() {
                break;
            }
            current = parent;
        }
        depth
    }

    /// Returns true if `ancestor` appears in the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: &EntityId, id: &EntityId) -> bool {
        let mut current = id;
        for _ in 0..=self.nodes.len() {
            match self.parents.get(current) {
                Some(parent) if parent == ancestor => return true,
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    /// Indented outline of the subtree under `id`, one entity per line.
    pub fn outline(&self, id: &EntityId) -> WtResult<String> {
        let mut out = String::new();
        for (depth, entity) in self.walk(id)? {
            let _ = writeln!(
                out,
                "{}{} [{}]",
                "  ".repeat(depth),
                entity.name(),
                entity.tag().to_lowercase()
            );
        }
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Immediate children of `container` that are items.
    pub fn items_in(&self, container: &EntityId) -> WtResult<Vec<&Item>> {
        Ok(self
            .children(container)?
            .into_iter()
            .filter_map(Entity::as_item)
            .collect())
    }

    /// Combined materials of the items directly inside `container`.
    pub fn materials_in(&self, container: &EntityId) -> WtResult<MaterialComposition> {
        Ok(combined_materials(self.items_in(container)?))
    }

    // -----------------------------------------------------------------------
    // Consistency
    // -----------------------------------------------------------------------

    /// Check that the parent and children maps agree and form a tree.
    pub fn validate(&self) -> WtResult<()> {
        self.check_structure().inspect_err(|e| warn!(error = %e, "tree failed validation"))
    }

    fn check_structure(&self) -> WtResult<()> {
        let invalid = |msg: String| -> WtResult<()> { Err(WtError::InvalidSnapshot(msg)) };

        if let Some(parent) = self.parents.get(&self.root) {
            return invalid(format!("root {} has parent {parent}", self.root));
        }
        for (child, parent) in &self.parents {
            if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
                return invalid(format!("parent link {child} -> {parent} names unknown ids"));
            }
            if !self.child_ids(parent).contains(child) {
                return invalid(format!("{child} is missing from the children of {parent}"));
            }
        }
        for (parent, kids) in &self.children {
            if !self.nodes.contains_key(parent) {
                return invalid(format!("children listed for unknown id {parent}"));
            }
            let mut seen = HashSet::new();
            for kid in kids {
                if !seen.insert(kid) {
                    return invalid(format!("{kid} listed twice under {parent}"));
                }
                if self.parents.get(kid) != Some(parent) {
                    return invalid(format!("{kid} listed under {parent} but parented elsewhere"));
                }
            }
        }
        for id in self.parents.keys() {
            if let Err(e) = self.ancestors(id) {
                return invalid(format!("parent chain of {id} is broken: {e}"));
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Flatten into a snapshot.
    pub fn serialize(&self) -> Snapshot {
        Snapshot {
            nodes: self.entities().map(Entity::serialize).collect(),
            children: self
                .children
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            parents: self
                .parents
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            root: self.root.clone(),
        }
    }

    /// Rebuild a tree from a snapshot with default limits.
    pub fn deserialize(snapshot: Snapshot, factories: &FactoryTable) -> WtResult<Self> {
        Self::deserialize_with(snapshot, factories, TreeConfig::default())
    }

    /// Rebuild a tree from a snapshot.
    ///
    /// Each node is rebuilt by the factory registered for its tag and keeps
    /// its persisted ID. The parent and children maps are taken as they are;
    /// only references to ids absent from `nodes` are rejected. Call
    /// [`validate`](Self::validate) for a full structural check.
    pub fn deserialize_with(
        snapshot: Snapshot,
        factories: &FactoryTable,
        config: TreeConfig,
    ) -> WtResult<Self> {
        let mut nodes = HashMap::with_capacity(snapshot.nodes.len());
        let mut order = Vec::with_capacity(snapshot.nodes.len());
        for serialized in &snapshot.nodes {
            let entity = factories.build(serialized)?;
            if nodes.contains_key(&entity.id) {
                return Err(WtError::DuplicateId(entity.id));
            }
            order.push(entity.id.clone());
            nodes.insert(entity.id.clone(), entity);
        }

        if !nodes.contains_key(&snapshot.root) {
            return Err(WtError::InvalidSnapshot(format!(
                "root {} is not among the nodes",
                snapshot.root
            )));
        }
        let unknown = |id: &EntityId, what: &str| {
            WtError::InvalidSnapshot(format!("{what} references unknown id {id}"))
        };
        for (child, parent) in &snapshot.parents {
            for id in [child, parent] {
                if !nodes.contains_key(id) {
                    return Err(unknown(id, "parents"));
                }
            }
        }
        for (parent, kids) in &snapshot.children {
            for id in std::iter::once(parent).chain(kids) {
                if !nodes.contains_key(id) {
                    return Err(unknown(id, "children"));
                }
            }
        }

        debug!(
            nodes = nodes.len(),
            root = %snapshot.root,
            "world tree restored"
        );
        Ok(Self {
            config,
            nodes,
            order,
            parents: snapshot.parents.into_iter().collect(),
            children: snapshot.children.into_iter().collect(),
            root: snapshot.root,
        })
    }
}
