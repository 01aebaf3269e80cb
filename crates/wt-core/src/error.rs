use crate::entity::EntityId;

/// Alias for `Result<T, WtError>`.
pub type WtResult<T> = Result<T, WtError>;

/// Errors that can occur when manipulating or restoring a world tree.
#[derive(Debug, thiserror::Error)]
pub enum WtError {
    /// The requested entity is not registered, or has no parent mapping.
    #[error("entity not found: {0}")]
    NotFound(EntityId),

    /// No immediate child with the given name exists.
    #[error("no child named \"{name}\" in {parent}")]
    ChildNotFound {
        /// The entity whose children were searched.
        parent: EntityId,
        /// The display name that was looked for.
        name: String,
    },

    /// A named entity could not be found anywhere in the tree.
    #[error("no entity named \"{0}\"")]
    NameNotFound(String),

    /// An entity with the same ID is already registered.
    #[error("duplicate entity id: {0}")]
    DuplicateId(EntityId),

    /// A snapshot node carries a tag with no registered factory.
    #[error("unknown entity type: \"{0}\"")]
    UnknownType(String),

    /// An item refers to a template the catalog does not know.
    #[error("unknown item type: \"{0}\"")]
    UnknownItemType(String),

    /// Transport data is malformed or internally inconsistent.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// The root cannot be moved or removed.
    #[error("the root entity {0} cannot be moved or removed")]
    RootImmutable(EntityId),

    /// The operation would make, or has found, an entity that is its own ancestor.
    #[error("containment cycle at {0}")]
    Cycle(EntityId),

    /// A traversal went deeper than the configured limit.
    #[error("tree depth exceeded the limit of {0}")]
    DepthExceeded(usize),

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
