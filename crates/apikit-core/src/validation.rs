//! Turns `validator` failures into user-facing messages.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::traits::notifier::{NotificationType, Notifier};

/// A failed rule, classified by the message it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRule {
    /// Value must have exactly this many characters.
    ExactLen(u64),
    /// Value must have at least this many characters.
    MinLen(u64),
    /// Value must have at most this many characters.
    MaxLen(u64),
    /// Value must be a URL.
    ValidUrl,
    /// Value must be an email address.
    ValidEmail,
    /// Value must be present.
    Required,
    /// Anything else.
    Other {
        /// Rule code reported by the validator.
        rule: String,
        /// Rule parameters, rendered for display.
        param: String,
    },
}

impl ValidationRule {
    /// Classify a single `validator` error.
    pub fn from_error(error: &ValidationError) -> Self {
        match error.code.as_ref() {
            "length" => classify_length(error),
            "email" => Self::ValidEmail,
            "url" => Self::ValidUrl,
            "required" => Self::Required,
            other => {
                let mut params: Vec<String> = error
                    .params
                    .iter()
                    .filter(|(k, _)| k.as_ref() != "value")
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect();
                params.sort();
                Self::Other {
                    rule: other.to_string(),
                    param: params.join(","),
                }
            }
        }
    }

    /// The message shown for `field` failing this rule.
    pub fn message(&self, field: &str) -> String {
        let name = humanize_field(field);
        match self {
            Self::ExactLen(n) => format!("{name} must be exactly {n} characters in length."),
            Self::MinLen(n) => format!("{name} must be at least {n} characters."),
            Self::MaxLen(n) => format!("{name} must be at most {n} characters."),
            Self::ValidUrl => "URLs must be valid if set.".to_string(),
            Self::ValidEmail => format!("{name} must be a valid email address."),
            Self::Required => format!("{name} must be entered."),
            Self::Other { rule, param } => format!("Exception: {name} {rule} {param}"),
        }
    }
}

fn classify_length(error: &ValidationError) -> ValidationRule {
    let param = |key: &'static str| {
        error
            .params
            .get(&Cow::Borrowed(key))
            .and_then(serde_json::Value::as_u64)
    };

    if let Some(equal) = param("equal") {
        return ValidationRule::ExactLen(equal);
    }

    let actual = error
        .params
        .get(&Cow::Borrowed("value"))
        .and_then(serde_json::Value::as_str)
        .map(|v| v.chars().count() as u64);

    match (param("min"), param("max"), actual) {
        (Some(min), _, Some(len)) if len < min => ValidationRule::MinLen(min),
        (_, Some(max), Some(len)) if len > max => ValidationRule::MaxLen(max),
        (Some(min), None, _) => ValidationRule::MinLen(min),
        (None, Some(max), _) => ValidationRule::MaxLen(max),
        (Some(min), Some(_), _) => ValidationRule::MinLen(min),
        (None, None, _) => ValidationRule::Other {
            rule: "length".to_string(),
            param: String::new(),
        },
    }
}

/// `first_name` → `First Name`.
pub fn humanize_field(field: &str) -> String {
    field
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One message per failed rule, ordered by field name.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, list)| {
            list.iter()
                .map(move |e| ValidationRule::from_error(e).message(&field))
        })
        .collect()
}

/// Push every validation message to `notifier` as an error notification.
pub fn notify_validation_errors(errors: &ValidationErrors, notifier: &dyn Notifier) -> usize {
    let messages = validation_messages(errors);
    for message in &messages {
        notifier.add(message, NotificationType::Error);
    }
    messages.len()
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;
    use crate::notifications::Notifications;

    #[derive(Debug, Validate)]
    struct SignUp {
        #[validate(email)]
        email_address: String,
        #[validate(length(min = 8))]
        password: String,
        #[validate(length(max = 4))]
        nick_name: String,
        #[validate(length(equal = 2))]
        country_code: String,
        #[validate(url)]
        home_page: String,
    }

    fn invalid() -> SignUp {
        SignUp {
            email_address: "not-an-email".into(),
            password: "short".into(),
            nick_name: "far too long".into(),
            country_code: "GBR".into(),
            home_page: "nope".into(),
        }
    }

    #[test]
    fn test_humanize_field() {
        assert_eq!(humanize_field("first_name"), "First Name");
        assert_eq!(humanize_field("email"), "Email");
    }

    #[test]
    fn test_messages_per_rule() {
        let errors = invalid().validate().unwrap_err();
        let messages = validation_messages(&errors);

        assert_eq!(
            messages,
            vec![
                "Country Code must be exactly 2 characters in length.",
                "Email Address must be a valid email address.",
                "URLs must be valid if set.",
                "Nick Name must be at most 4 characters.",
                "Password must be at least 8 characters.",
            ]
        );
    }

    #[test]
    fn test_required_and_fallback_messages() {
        assert_eq!(ValidationRule::Required.message("api_key"), "Api Key must be entered.");

        let mut err = ValidationError::new("range");
        err.add_param(Cow::Borrowed("max"), &10);
        assert_eq!(
            ValidationRule::from_error(&err).message("age"),
            "Exception: Age range max=10"
        );
    }

    #[test]
    fn test_notify_validation_errors() {
        let errors = invalid().validate().unwrap_err();
        let notes = Notifications::new();
        assert_eq!(notify_validation_errors(&errors, &notes), 5);
        assert_eq!(notes.take(NotificationType::Error).map(|m| m.len()), Some(5));
    }
}
