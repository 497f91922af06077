//! Crate-level hazard errors

/// Reasons zone construction can fail
///
/// [`ZoneBuilder::build_or_default`](crate::zones::ZoneBuilder::build_or_default)
/// converts every variant into the default circular zone set, so these
/// only reach callers that use [`ZoneBuilder::build`](crate::zones::ZoneBuilder::build)
/// directly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HazardError {
    /// A hazard radius or the release energy is negative or not finite
    #[error("invalid explosion parameter {field}: {value}")]
    InvalidExplosionParameters {
        /// Table key or field name
        field: String,
        /// Rejected value
        value: f64,
    },

    /// Plume length or width is not a positive finite length
    #[error("invalid plume {field}: {value}")]
    InvalidPlume {
        /// `plume_length` or `plume_width`
        field: &'static str,
        /// Rejected value
        value: f64,
    },
}

/// Result alias for zone construction
pub type HazardResult<T> = Result<T, HazardError>;
