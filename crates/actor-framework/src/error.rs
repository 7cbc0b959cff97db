//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, plus a carrier for the
//! record's own error type.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Duplicate key: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the record's own error type from an `EntityError`.
    ///
    /// Returns `Err(self)` unchanged when this is a plumbing error or the
    /// boxed error is of another type.
    pub fn into_entity_error<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(e) => Ok(*e),
                Err(inner) => Err(FrameworkError::EntityError(inner)),
            },
            other => Err(other),
        }
    }

    /// `true` when the actor is gone, i.e. the store is unavailable.
    pub fn is_disconnected(&self) -> bool {
        matches!(self, FrameworkError::ActorClosed | FrameworkError::ActorDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("rejected: {0}")]
    struct Rejected(u32);

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn entity_error_downcasts_to_its_type() {
        let err = FrameworkError::EntityError(Box::new(Rejected(7)));
        assert_eq!(err.into_entity_error::<Rejected>().unwrap(), Rejected(7));
    }

    #[test]
    fn foreign_entity_error_is_returned_untouched() {
        let err = FrameworkError::EntityError(Box::new(Other));
        let back = err.into_entity_error::<Rejected>().unwrap_err();
        assert_eq!(back.to_string(), "Entity error: other");
    }

    #[test]
    fn plumbing_errors_are_not_entity_errors() {
        let back = FrameworkError::ActorClosed
            .into_entity_error::<Rejected>()
            .unwrap_err();
        assert!(back.is_disconnected());
        assert!(!FrameworkError::Conflict("a".into()).is_disconnected());
    }
}
