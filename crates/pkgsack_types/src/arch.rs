//! Architecture strings. RPM arches have no compatibility lattice in this
//! core (that policy lives with the host tool); here an arch is just a
//! validated, interned-ready string (spec.md §4.6 "Unknown/invalid arch ->
//! INVALID_ARCHITECTURE").

use crate::error::TypesError;

/// Validates an arch string: non-empty, ASCII alphanumeric plus `_`.
pub fn validate_arch(s: &str) -> Result<(), TypesError> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(TypesError::InvalidArchitecture(s.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_arches() {
        for a in ["x86_64", "i686", "noarch", "aarch64"] {
            assert!(validate_arch(a).is_ok());
        }
    }

    #[test]
    fn test_invalid_arches() {
        for a in ["", "x86/64", "x 64"] {
            assert!(validate_arch(a).is_err());
        }
    }
}
