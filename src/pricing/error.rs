use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Cost for model {model} not found")]
    UnknownModel { model: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_model_display() {
        let e = PricingError::UnknownModel {
            model: "llama-7b".to_string(),
        };
        assert_eq!(e.to_string(), "Cost for model llama-7b not found");
    }
}
