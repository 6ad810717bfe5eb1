//! Address validation
//!
//! Normalizes raw user input into a 20-byte account address before any
//! resolver call is attempted. Comparison happens on the parsed bytes,
//! so two inputs differing only in letter case are the same address.
//! Pure, no I/O.

use crate::errors::FailureKind;
use alloy_primitives::Address;

/// Validate a raw address string.
///
/// Trims surrounding whitespace, requires the `0x` prefix (either case)
/// followed by 40 hex digits. Checksum casing is not enforced.
pub fn validate(raw: &str) -> Result<Address, FailureKind> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FailureKind::InvalidAddress {
            input: raw.to_string(),
            reason: "empty address".to_string(),
        });
    }

    let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    else {
        return Err(FailureKind::InvalidAddress {
            input: trimmed.to_string(),
            reason: "missing 0x prefix".to_string(),
        });
    };

    hex.parse::<Address>()
        .map_err(|e| FailureKind::InvalidAddress {
            input: trimmed.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    #[test]
    fn accepts_valid_address() {
        let addr = validate(ADDR).unwrap();
        assert_eq!(addr.to_string(), ADDR);
    }

    #[test]
    fn case_variants_parse_to_same_address() {
        let lower = validate(&ADDR.to_lowercase()).unwrap();
        let upper = validate(&format!("0x{}", ADDR[2..].to_uppercase())).unwrap();
        let mixed = validate(ADDR).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn trims_whitespace() {
        let addr = validate(&format!("  {}\n", ADDR)).unwrap();
        assert_eq!(addr, validate(ADDR).unwrap());
    }

    #[test]
    fn rejects_empty_input() {
        let err = validate("   ").unwrap_err();
        assert!(matches!(err, FailureKind::InvalidAddress { .. }));
    }

    #[test]
    fn rejects_missing_prefix() {
        let err = validate("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045").unwrap_err();
        assert!(matches!(err, FailureKind::InvalidAddress { .. }));
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert!(validate("0x1234").is_err());
        assert!(validate("0xZZdA6BF26964aF9D7eEd9e03E53415D37aA96045").is_err());
        assert!(validate("not-an-address").is_err());
    }
}
