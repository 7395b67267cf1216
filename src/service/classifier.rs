//! Separates business rule rejections raised inside stored logic from
//! infrastructure failures.

use crate::repository::StoreError;

pub const BUSINESS_RULE_ERROR: &str = "BUSINESS_RULE_ERROR";

/// Store error codes reserved for business rules, with the client-facing code
/// each one maps to.
const BUSINESS_RULE_SIGNALS: &[(&str, &str)] = &[("51000", BUSINESS_RULE_ERROR)];

/// A store rejection whose message is safe to show to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BusinessRuleViolation {
    pub code: &'static str,
    pub message: String,
}

/// Returns the violation for recognized signals and hands any other error
/// back untouched.
pub fn classify(error: StoreError) -> Result<BusinessRuleViolation, StoreError> {
    let code = error.code().and_then(|code| {
        BUSINESS_RULE_SIGNALS
            .iter()
            .find(|(signal, _)| *signal == code)
            .map(|(_, code)| *code)
    });

    match (code, error) {
        (Some(code), StoreError::Rejected { message, .. }) => {
            Ok(BusinessRuleViolation { code, message })
        }
        (_, error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(code: &str, message: &str) -> StoreError {
        StoreError::Rejected {
            code: code.to_string(),
            message: message.to_string(),
            detail: None,
        }
    }

    #[test]
    fn reserved_signal_is_business_rule() {
        let violation = classify(rejected("51000", "userDoesNotExist")).unwrap();

        assert_eq!(violation.code, BUSINESS_RULE_ERROR);
        assert_eq!(violation.message, "userDoesNotExist");
    }

    #[test]
    fn other_codes_are_propagated_unchanged() {
        let error = classify(rejected("23505", "duplicate key value")).unwrap_err();

        assert!(matches!(
            error,
            StoreError::Rejected { ref code, ref message, .. }
                if code == "23505" && message == "duplicate key value"
        ));
    }

    #[test]
    fn errors_without_code_are_propagated() {
        assert!(matches!(
            classify(StoreError::MissingIdentifier),
            Err(StoreError::MissingIdentifier)
        ));
    }
}
