//! Review form submissions

use super::{ValidationConfig, filters, validators};
use crate::core::error::ValidationError;
use crate::core::restaurant::{MAX_REVIEW_RATING, MIN_REVIEW_RATING, Review};
use serde::Deserialize;
use serde_json::{Value, json};

/// A validated review submission
///
/// Construct it with [`ReviewForm::from_value`] for raw form payloads or
/// [`ReviewForm::new`] for typed input; both run the same rules. Author and
/// text are trimmed, and the rating is a whole number from 1 to 5. Fields
/// are private, so a value of this type has always passed validation.
///
/// ```compile_fail
/// use tablefinder::prelude::ReviewForm;
///
/// let form = ReviewForm {
///     author: String::new(),
///     rating: 0,
///     text: String::new(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewForm {
    author: String,
    rating: u8,
    text: String,
}

/// Shape of a payload after the filters and validators have run
#[derive(Deserialize)]
struct CheckedFields {
    author: String,
    rating: u8,
    text: String,
}

impl ReviewForm {
    /// Rules applied to every review submission
    pub fn validation_config() -> ValidationConfig {
        let mut config = ValidationConfig::new("review");
        config
            .add_filter("author", filters::trim())
            .add_validator("author", validators::required_text())
            .add_filter("rating", filters::parse_integer())
            .add_validator(
                "rating",
                validators::integer_in_range(
                    i64::from(MIN_REVIEW_RATING),
                    i64::from(MAX_REVIEW_RATING),
                ),
            )
            .add_filter("text", filters::trim())
            .add_validator("text", validators::required_text());
        config
    }

    /// Validate a submitted form payload
    ///
    /// ```text
    /// {"author": "Pat", "rating": "4", "text": "Great value"}
    /// ```
    pub fn from_value(payload: Value) -> Result<Self, ValidationError> {
        let config = Self::validation_config();
        let validated = config.validate_and_filter(payload).map_err(|errors| {
            tracing::debug!(form = config.name(), rejected = errors.len(), "Form rejected");
            ValidationError::FieldErrors(errors)
        })?;

        let fields: CheckedFields =
            serde_json::from_value(validated).map_err(|e| ValidationError::InvalidPayload {
                message: e.to_string(),
            })?;

        Ok(Self {
            author: fields.author,
            rating: fields.rating,
            text: fields.text,
        })
    }

    /// Validate typed input
    pub fn new(author: &str, rating: i64, text: &str) -> Result<Self, ValidationError> {
        Self::from_value(json!({
            "author": author,
            "rating": rating,
            "text": text,
        }))
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_review(self) -> Review {
        Review::new(self.author, self.rating, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form_with_string_rating() {
        let form = ReviewForm::from_value(json!({
            "author": "  Pat ",
            "rating": "4",
            "text": "Great value\n",
        }))
        .unwrap();

        assert_eq!(
            form,
            ReviewForm {
                author: "Pat".to_string(),
                rating: 4,
                text: "Great value".to_string(),
            }
        );
    }

    #[test]
    fn test_blank_fields_reported_together() {
        let err = ReviewForm::new("   ", 3, "").unwrap_err();
        assert_eq!(err.fields(), vec!["author", "text"]);
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        for rating in [0, 6, -1, 100] {
            let err = ReviewForm::new("Pat", rating, "ok").unwrap_err();
            assert_eq!(err.fields(), vec!["rating"]);
        }
    }

    #[test]
    fn test_fractional_rating_rejected() {
        let err = ReviewForm::from_value(json!({
            "author": "Pat",
            "rating": 4.5,
            "text": "ok",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["rating"]);

        let err = ReviewForm::from_value(json!({
            "author": "Pat",
            "rating": "five",
            "text": "ok",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["rating"]);
    }

    #[test]
    fn test_missing_rating_rejected() {
        let err = ReviewForm::from_value(json!({"author": "Pat", "text": "ok"})).unwrap_err();
        assert_eq!(err.fields(), vec!["rating"]);
    }

    #[test]
    fn test_payload_cannot_bypass_rules() {
        let err = ReviewForm::from_value(json!({
            "author": "",
            "rating": 0,
            "text": "",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["author", "rating", "text"]);

        let err = ReviewForm::from_value(json!({
            "author": " ",
            "rating": 200,
            "text": "fine",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["author", "rating"]);
    }

    #[test]
    fn test_accessors() {
        let form = ReviewForm::new(" Pat ", 3, "Fine").unwrap();
        assert_eq!(form.author(), "Pat");
        assert_eq!(form.rating(), 3);
        assert_eq!(form.text(), "Fine");
    }

    #[test]
    fn test_into_review() {
        let review = ReviewForm::new("Pat", 5, "Superb").unwrap().into_review();
        assert_eq!(review, Review::new("Pat", 5, "Superb"));
    }
}
