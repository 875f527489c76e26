use thiserror::Error;

/// Error raised while applying string configuration to [`ScannerOptions`].
///
/// Out-of-range or non-numeric values are never errors: they are coerced into
/// range. Only names that cannot be mapped to a setting are rejected.
///
/// [`ScannerOptions`]: crate::ScannerOptions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// The option key is not one of `byteOffset`, `outputMode`, `poolSize`.
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    /// The output mode is not one of `singleBuffer`, `segmentList`,
    /// `pooledBuffer`.
    #[error("unknown output mode '{0}'")]
    UnknownOutputMode(String),
}
