use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("No versions found for name '{name}'")]
    NoVersions { name: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Concurrent saves for `name` kept colliding on the same version number.
    #[error("Could not allocate a version number for '{name}' after {attempts} attempts")]
    ConflictRetryExhausted { name: String, attempts: u32 },

    #[error("Persistence error: {0}")]
    Persistence(String),
}
