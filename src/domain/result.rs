//! Result type alias for Maskwise

use super::errors::MaskwiseError;

/// Result type alias for Maskwise operations
///
/// # Examples
///
/// ```
/// use maskwise::domain::result::Result;
/// use maskwise::domain::errors::MaskwiseError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MaskwiseError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MaskwiseError>;
