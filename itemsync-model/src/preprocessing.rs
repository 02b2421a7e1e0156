//! Preprocessing pipeline steps.

use serde::{Deserialize, Serialize};

/// Separator the remote server uses to join step parameters into one string.
pub const PARAM_SEPARATOR: &str = "\n";

/// One stage of an item's value-transformation pipeline.
///
/// Steps are kept in a `Vec`: the order is the execution order and is
/// significant. An absent `params` and an empty list encode identically; on
/// decode a step without parameters always comes back as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessingStep {
    /// Numeric preprocessing type identifier.
    #[serde(rename = "type")]
    pub step_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<String>>,
    /// Empty means the server default ("fail the value").
    #[serde(default)]
    pub error_handler: String,
    #[serde(default)]
    pub error_handler_params: String,
}

impl PreprocessingStep {
    /// Creates a step with no parameters and the default error handler.
    pub fn new(step_type: impl Into<String>) -> Self {
        Self {
            step_type: step_type.into(),
            params: None,
            error_handler: String::new(),
            error_handler_params: String::new(),
        }
    }

    /// Sets the ordered parameter list.
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = Some(params.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the error handler mode and its parameters.
    pub fn with_error_handler(
        mut self,
        handler: impl Into<String>,
        params: impl Into<String>,
    ) -> Self {
        self.error_handler = handler.into();
        self.error_handler_params = params.into();
        self
    }

    /// Returns the parameters as a slice, empty when absent.
    pub fn params(&self) -> &[String] {
        self.params.as_deref().unwrap_or(&[])
    }
}
