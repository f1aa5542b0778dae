//! Credential validation shared by the account flows: signup-grade password
//! policy and EIN format checks.

use regex::Regex;
use std::sync::OnceLock;

/// Validation errors naming the failed rule.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("password must be at least 8 characters")]
    PasswordTooShort,
    #[error("password must include a lowercase letter")]
    PasswordMissingLowercase,
    #[error("password must include an uppercase letter")]
    PasswordMissingUppercase,
    #[error("password must include a digit")]
    PasswordMissingDigit,
    #[error("password must include one of @$!%*?&")]
    PasswordMissingSymbol,
    #[error("EIN must match the XX-XXXXXXX format")]
    MalformedEin,
}

const PASSWORD_SYMBOLS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// Password policy: at least 8 characters with a lowercase letter, an
/// uppercase letter, a digit, and one of `@$!%*?&`.
pub fn validate_password(password: &str) -> Result<(), CredentialError> {
    if password.chars().count() < 8 {
        return Err(CredentialError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(CredentialError::PasswordMissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(CredentialError::PasswordMissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(CredentialError::PasswordMissingDigit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(&c)) {
        return Err(CredentialError::PasswordMissingSymbol);
    }
    Ok(())
}

pub fn password_is_valid(password: &str) -> bool {
    validate_password(password).is_ok()
}

fn ein_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{2}-\d{7}$").expect("EIN pattern compiles"))
}

/// EIN format: two digits, a hyphen, seven digits.
pub fn validate_ein(ein: &str) -> Result<(), CredentialError> {
    if ein_pattern().is_match(ein) {
        Ok(())
    } else {
        Err(CredentialError::MalformedEin)
    }
}

pub fn ein_is_valid(ein: &str) -> bool {
    validate_ein(ein).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_reference_password() {
        assert!(password_is_valid("Abcdef1!"));
    }

    #[test]
    fn rejects_passwords_missing_a_character_class() {
        assert_eq!(
            validate_password("abcdefgh"),
            Err(CredentialError::PasswordMissingUppercase)
        );
        assert_eq!(
            validate_password("ABCDEFG1!"),
            Err(CredentialError::PasswordMissingLowercase)
        );
        assert_eq!(
            validate_password("Abcdefg!"),
            Err(CredentialError::PasswordMissingDigit)
        );
        assert_eq!(
            validate_password("Abcdefg1"),
            Err(CredentialError::PasswordMissingSymbol)
        );
        assert_eq!(
            validate_password("Ab1!"),
            Err(CredentialError::PasswordTooShort)
        );
    }

    #[test]
    fn every_listed_symbol_satisfies_the_policy() {
        for symbol in ['@', '$', '!', '%', '*', '?', '&'] {
            let password = format!("Abcdef1{symbol}");
            assert!(password_is_valid(&password), "symbol {symbol} rejected");
        }
    }

    #[test]
    fn validates_ein_format() {
        assert!(ein_is_valid("12-3456789"));
        assert!(!ein_is_valid("123456789"));
        assert!(!ein_is_valid("1-23456789"));
        assert!(!ein_is_valid("12-345678"));
        assert!(!ein_is_valid("ab-cdefghi"));
    }
}
