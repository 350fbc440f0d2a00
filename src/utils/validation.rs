//! Validation utilities

use crate::types::*;

/// Validate an account code
pub fn validate_account_code(code: &str) -> FinanceResult<()> {
    if code.trim().is_empty() {
        return Err(FinanceError::Validation(
            "Account code cannot be empty".to_string(),
        ));
    }

    if code.len() > 20 {
        return Err(FinanceError::Validation(
            "Account code cannot exceed 20 characters".to_string(),
        ));
    }

    // Codes are sortable short strings like "10-00-001"
    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(FinanceError::Validation(
            "Account code can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate an account name
pub fn validate_account_name(name: &str) -> FinanceResult<()> {
    if name.trim().is_empty() {
        return Err(FinanceError::Validation(
            "Account name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(FinanceError::Validation(
            "Account name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}
