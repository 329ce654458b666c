use crate::ecs::EntityId;
use thiserror::Error;

/// Errors from entity and component operations on the world.
///
/// Registration-time failures (`DuplicateName`, `DuplicateComponent`) are
/// programming errors the caller controls; lookup misses (`NotFound`,
/// `NameNotFound`, `ComponentNotFound`) can occur legitimately at runtime,
/// e.g. an entity deleted earlier in the same tick, and callers are
/// expected to handle them or gate access with `has_component`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("entity name '{name}' is already in use")]
    DuplicateName { name: String },

    #[error("entity {id} already owns a {component} component")]
    DuplicateComponent {
        id: EntityId,
        component: &'static str,
    },

    #[error("entity {id} does not own a {component} component")]
    ComponentNotFound {
        id: EntityId,
        component: &'static str,
    },

    #[error("entity {id} does not exist")]
    NotFound { id: EntityId },

    #[error("no entity is named '{name}'")]
    NameNotFound { name: String },
}
