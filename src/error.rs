//! Error types for the form appearance engine.
//!
//! Only contract violations surface here. Data-quality problems in
//! externally authored documents (malformed default appearance strings,
//! comb flags without a length, unknown field types) are logged and
//! degraded instead of raised.

/// Result type alias for form appearance operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or regenerating form fields.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Rotation that is not a multiple of 90 degrees
    #[error("Invalid rotation: {0} degrees is not a multiple of 90")]
    InvalidRotation(i32),

    /// Field or widget without a resolvable bounding box
    #[error("Missing geometry: {0} has no /Rect and no kid with one")]
    MissingGeometry(String),

    /// Referenced object not present in the document arena
    #[error("Object not found: {0} {1} R")]
    ObjectNotFound(u32, u16),

    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// Operation not meaningful for this field kind
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Push button icon could not be decoded
    #[error("Image error: {0}")]
    Image(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rotation_error() {
        let err = Error::InvalidRotation(45);
        let msg = format!("{}", err);
        assert!(msg.contains("45"));
        assert!(msg.contains("multiple of 90"));
    }

    #[test]
    fn test_missing_geometry_error() {
        let err = Error::MissingGeometry("field 'name'".to_string());
        assert!(format!("{}", err).contains("field 'name'"));
    }

    #[test]
    fn test_object_not_found_error() {
        let err = Error::ObjectNotFound(10, 0);
        assert!(format!("{}", err).contains("10 0 R"));
    }

    #[test]
    fn test_invalid_object_type_error() {
        let err = Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: "Integer".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Dictionary"));
        assert!(msg.contains("Integer"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(format!("{}", err).contains("disk full"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
