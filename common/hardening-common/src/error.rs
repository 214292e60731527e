//! Error types for policy tables and policy stores

use std::io;

use thiserror::Error;

/// Result alias used by every store operation
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Failures raised while loading a policy table or touching a policy store
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to create registry key {path}: {source}")]
    CreateKey {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to open registry key {path}: {source}")]
    OpenKey {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to set registry value {name}: {source}")]
    SetValue {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to check registry value {name}: {source}")]
    QueryValue {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to delete registry value {name}: {source}")]
    DeleteValue {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid policy table: {0}")]
    Table(#[from] toml::de::Error),

    #[error("registry access is not supported on this platform (use --dry-run)")]
    UnsupportedPlatform,
}

impl PolicyError {
    /// Registry key or value name the failure is about, if any
    pub fn subject(&self) -> Option<&str> {
        match self {
            PolicyError::CreateKey { path, .. } | PolicyError::OpenKey { path, .. } => Some(path),
            PolicyError::SetValue { name, .. }
            | PolicyError::QueryValue { name, .. }
            | PolicyError::DeleteValue { name, .. } => Some(name),
            PolicyError::Table(_) | PolicyError::UnsupportedPlatform => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_message_names_value() {
        let err = PolicyError::SetValue {
            name: "SitePerProcess".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };
        assert!(err.to_string().contains("SitePerProcess"));
        assert_eq!(err.subject(), Some("SitePerProcess"));
    }

    #[test]
    fn test_unsupported_platform_has_no_subject() {
        assert!(PolicyError::UnsupportedPlatform.subject().is_none());
    }
}
