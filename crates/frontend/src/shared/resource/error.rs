use thiserror::Error;

/// Ошибки привязки ресурса (resource binding)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("Not authenticated: {operation} requires an access token")]
    NotAuthenticated { operation: String },

    #[error("{operation} requires a non-empty id")]
    MissingId { operation: String },

    #[error("Operation `{name}` is not provided by the {entity} adapter")]
    MissingOperation { entity: String, name: String },

    /// Ошибка транспорта, сообщение адаптера без изменений
    #[error("{0}")]
    Transport(String),
}

/// Ошибки регистрации адаптеров
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Entity type `{0}` is already registered")]
    Duplicate(String),

    #[error("Adapter for `{entity}` is incomplete, missing: {}", missing.join(", "))]
    Incomplete { entity: String, missing: Vec<String> },
}
