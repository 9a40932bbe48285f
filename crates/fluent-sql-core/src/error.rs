//! Error types for rendering.

/// Errors raised while turning a token sequence into SQL text.
///
/// Structural mistakes (a SELECT without FROM, WHERE before FROM) cannot be
/// expressed with the builders, so the only failures left are names the
/// dialect refuses to quote.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The dialect cannot quote or escape the given name.
    #[error("the {dialect} dialect cannot quote identifier '{name}': {reason}")]
    InvalidIdentifier {
        /// Name of the dialect that rejected the identifier.
        dialect: &'static str,
        /// The raw, unquoted identifier.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
