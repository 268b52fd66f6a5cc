//! Error types for filtering.
//!
//! Two disjoint categories:
//!
//! - [`InvalidCallback`]: the callback's shape is wrong. Reported before any
//!   element is inspected.
//! - [`FilterError::Callback`]: the callback itself returned an error. It is
//!   relayed as-is, boxed once through `Into<BoxError>`.

use alloc::boxed::Box;
use alloc::string::String;

/// Boxed error returned by a callback.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Result type for filter operations
pub type Result<T> = core::result::Result<T, FilterError>;

/// Structural requirement a callback failed to meet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCallback {
    #[error("must not be an untyped nil")]
    UntypedNil,

    #[error("must be a function, got {value} (type {type_name})")]
    NotCallable {
        value: String,
        type_name: &'static str,
    },

    #[error("must have exactly 1 argument, got {0}")]
    Arity(usize),

    #[error("argument must be slice")]
    NotASlice,

    #[error("argument must be a slice of interface")]
    NotASliceOfCapability,

    #[error("argument must be an interface")]
    NotACapability,
}

/// Errors returned by [`filter`](crate::dispatch::filter) and friends.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("callback {0}")]
    InvalidCallback(#[from] InvalidCallback),

    #[error("{0}")]
    Callback(BoxError),
}

impl FilterError {
    /// The shape violation, if this is a validation failure.
    pub fn invalid_callback(&self) -> Option<&InvalidCallback> {
        match self {
            FilterError::InvalidCallback(invalid) => Some(invalid),
            FilterError::Callback(_) => None,
        }
    }

    /// The error the callback returned, if any.
    ///
    /// Downcast it to recover the callback's own error type.
    pub fn callback_error(&self) -> Option<&(dyn core::error::Error + Send + Sync + 'static)> {
        match self {
            FilterError::Callback(err) => Some(err.as_ref()),
            FilterError::InvalidCallback(_) => None,
        }
    }

    /// Take the error the callback returned, if any.
    pub fn into_callback_error(self) -> Option<BoxError> {
        match self {
            FilterError::Callback(err) => Some(err),
            FilterError::InvalidCallback(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[derive(Debug, PartialEq)]
    struct Boom;

    impl core::fmt::Display for Boom {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("boom")
        }
    }

    impl core::error::Error for Boom {}

    #[test]
    fn test_invalid_callback_messages() {
        let err = FilterError::from(InvalidCallback::UntypedNil);
        assert_eq!(err.to_string(), "callback must not be an untyped nil");

        let err = FilterError::from(InvalidCallback::NotCallable {
            value: "1".into(),
            type_name: "i32",
        });
        assert_eq!(err.to_string(), "callback must be a function, got 1 (type i32)");

        let err = FilterError::from(InvalidCallback::Arity(0));
        assert_eq!(err.to_string(), "callback must have exactly 1 argument, got 0");
        assert_eq!(err.invalid_callback(), Some(&InvalidCallback::Arity(0)));
        assert!(err.callback_error().is_none());
    }

    #[test]
    fn test_parameter_messages_share_prefix() {
        assert_eq!(InvalidCallback::NotASlice.to_string(), "argument must be slice");
        assert_eq!(
            FilterError::from(InvalidCallback::NotASlice).to_string(),
            "callback argument must be slice"
        );
        assert_eq!(
            FilterError::from(InvalidCallback::NotASliceOfCapability).to_string(),
            "callback argument must be a slice of interface"
        );
    }

    #[test]
    fn test_callback_error_is_not_wrapped() {
        let err = FilterError::Callback(Box::new(Boom));
        assert_eq!(err.to_string(), "boom");
        assert!(err.invalid_callback().is_none());
        assert_eq!(err.callback_error().and_then(|e| e.downcast_ref::<Boom>()), Some(&Boom));

        let boxed = err.into_callback_error();
        assert!(boxed.is_some_and(|e| e.is::<Boom>()));
    }
}
