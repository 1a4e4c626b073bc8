//! Error types for nspath-core
//!
//! Traversal over a well-formed [`GenericValue`](crate::GenericValue) cannot
//! fail. Errors only arise before traversal starts (malformed serialized
//! input) or when a caller opts into a depth limit.

use alloc::string::String;

/// Errors that can occur while building a namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    /// Serialized input was not well-formed in the expected format
    Deserialization(String),
    /// Nesting went deeper than the configured limit
    DepthExceeded {
        /// Configured maximum depth
        limit: usize,
        /// Path of the container that crossed the limit
        path: String,
    },
    /// The requested interchange format is not compiled in
    UnsupportedFormat(String),
}

impl core::fmt::Display for NamespaceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NamespaceError::Deserialization(msg) => write!(f, "Deserialization failed: {}", msg),
            NamespaceError::DepthExceeded { limit, path } => {
                write!(f, "Maximum depth {} exceeded at '{}'", limit, path)
            }
            NamespaceError::UnsupportedFormat(format) => {
                write!(f, "Unsupported format: {} (enable the matching feature)", format)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NamespaceError {}

impl From<serde_json::Error> for NamespaceError {
    fn from(err: serde_json::Error) -> Self {
        NamespaceError::Deserialization(alloc::format!("{}", err))
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for NamespaceError {
    fn from(err: toml::de::Error) -> Self {
        NamespaceError::Deserialization(alloc::format!("{}", err))
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for NamespaceError {
    fn from(err: serde_yaml::Error) -> Self {
        NamespaceError::Deserialization(alloc::format!("{}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_messages() {
        let err = NamespaceError::DepthExceeded {
            limit: 2,
            path: "root/a/b".to_string(),
        };
        assert_eq!(err.to_string(), "Maximum depth 2 exceeded at 'root/a/b'");

        let err = NamespaceError::Deserialization("expected value".to_string());
        assert!(err.to_string().starts_with("Deserialization failed"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_slice::<serde_json::Value>(b"{not json").unwrap_err();
        let err: NamespaceError = json_err.into();
        assert!(matches!(err, NamespaceError::Deserialization(_)));
    }
}
