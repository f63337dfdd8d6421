//! Utility macros shared by the value types.

/// Returns early with an error if a condition is not met.
///
/// This is similar to the `assert!` macro, but returns an error instead of panicking.
/// Every validating constructor and `with_*` method goes through it, so a rejected
/// input never leaves a half-built value behind.
///
/// # Example
///
/// ```ignore
/// ensure!(!method.is_empty(), ArgumentError::EmptyMethod);
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
