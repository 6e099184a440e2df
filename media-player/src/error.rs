use thiserror::Error;

/// Boxed error raised by a device integration
pub type DeviceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by media player entities and the registry
#[derive(Error, Debug)]
pub enum EntityError {
    /// The entity does not implement the requested command
    #[error("Entity does not support {0}")]
    NotSupported(&'static str),

    /// A command argument is outside its valid range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No entity is registered under this unique id
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// An entity with this unique id is already registered
    #[error("Entity already registered: {0}")]
    AlreadyRegistered(String),

    /// The entity has no unique id and cannot be registered
    #[error("Entity has no unique id")]
    MissingUniqueId,

    /// Error raised by the device integration, passed through untouched
    #[error(transparent)]
    Device(DeviceError),
}

impl EntityError {
    /// Wrap an integration error
    pub fn device<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        EntityError::Device(Box::new(error))
    }

    /// Downcast a passed-through device error
    pub fn device_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            EntityError::Device(error) => error.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Result type for entity operations
pub type Result<T> = std::result::Result<T, EntityError>;
