/// Everything that can stop a curve from being generated.
///
/// Inputs are deterministic, so none of these are worth retrying.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A parameter is outside its allowed range. Raised before any geometry is computed.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The parameters are individually fine, but describe an impossible shape
    #[error("domain error: {0}")]
    Domain(String),

    /// A construction step has no unique solution (e.g. parallel tangents)
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

impl GeometryError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        GeometryError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;
