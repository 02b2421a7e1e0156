use itemsync_client::WirePreprocessor;
use itemsync_model::{PARAM_SEPARATOR, PreprocessingStep};

/// Encodes the full pipeline in order.
pub fn encode_preprocessing(steps: &[PreprocessingStep]) -> Vec<WirePreprocessor> {
    steps.iter().map(encode_step).collect()
}

/// Joins the step parameters with the wire separator.
pub fn encode_step(step: &PreprocessingStep) -> WirePreprocessor {
    WirePreprocessor {
        step_type: step.step_type.clone(),
        params: step.params().join(PARAM_SEPARATOR),
        error_handler: step.error_handler.clone(),
        error_handler_params: step.error_handler_params.clone(),
    }
}

pub fn decode_preprocessing(steps: &[WirePreprocessor]) -> Vec<PreprocessingStep> {
    steps.iter().map(decode_step).collect()
}

/// Splits the parameter string back into a list. An empty string decodes to
/// absent parameters.
pub fn decode_step(wire: &WirePreprocessor) -> PreprocessingStep {
    let params = if wire.params.is_empty() {
        None
    } else {
        Some(wire.params.split(PARAM_SEPARATOR).map(String::from).collect())
    };

    PreprocessingStep {
        step_type: wire.step_type.clone(),
        params,
        error_handler: wire.error_handler.clone(),
        error_handler_params: wire.error_handler_params.clone(),
    }
}
