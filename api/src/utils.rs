use crate::consts::*;
use crate::error::TransferError;

/// 10^`decimals`, or `None` when it does not fit in a u64.
pub fn pow10(decimals: u8) -> Option<u64> {
    if decimals > MAX_DECIMALS {
        return None;
    }
    10u64.checked_pow(decimals as u32)
}

/// Convert a whole-token amount to base units (e.g., 2 with 6 decimals -> 2_000_000).
pub fn scale_amount(amount: u64, decimals: u8) -> Result<u64, TransferError> {
    pow10(decimals)
        .and_then(|multiplier| amount.checked_mul(multiplier))
        .ok_or(TransferError::AmountOverflow { amount, decimals })
}

/// Render base units as an exact decimal string (e.g., 2_500_000 with 6 decimals -> "2.5").
pub fn format_amount(base_amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return base_amount.to_string();
    }

    let digits = format!("{:0>width$}", base_amount, width = decimals as usize + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals as usize);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_power_of_ten() {
        assert_eq!(scale_amount(2, 6).unwrap(), 2_000_000);
        assert_eq!(scale_amount(7, 0).unwrap(), 7);
        assert_eq!(scale_amount(1, 19).unwrap(), 10_000_000_000_000_000_000);
    }

    #[test]
    fn scaling_is_exact_where_floats_diverge() {
        let amount = 123_456_789u64;
        assert_eq!(scale_amount(amount, 9).unwrap(), 123_456_789_000_000_000);
        assert_eq!(scale_amount(999_999_999, 9).unwrap(), 999_999_999_000_000_000);
        assert_eq!(scale_amount(18_446_744_073, 9).unwrap(), 18_446_744_073_000_000_000);
        assert_eq!(scale_amount(9_007_199_254_740_993, 0).unwrap(), 9_007_199_254_740_993);
    }

    #[test]
    fn scaling_is_exact_over_supported_range() {
        for decimals in 0..=12u8 {
            let multiplier = 10u64.pow(decimals as u32);
            for amount in [1u64, 7, 999, 123_456, 1_000_000, 123_456_789, 1_000_000_000] {
                let expected = amount as u128 * multiplier as u128;
                if expected <= u64::MAX as u128 {
                    assert_eq!(scale_amount(amount, decimals).unwrap() as u128, expected);
                } else {
                    assert!(scale_amount(amount, decimals).is_err());
                }
            }
        }
    }

    #[test]
    fn overflow_is_reported() {
        let err = scale_amount(u64::MAX, 1).unwrap_err();
        assert!(matches!(err, TransferError::AmountOverflow { amount: u64::MAX, decimals: 1 }));

        assert!(scale_amount(2, 19).is_err());
        assert!(scale_amount(1, 20).is_err());
        assert!(scale_amount(1, u8::MAX).is_err());
    }

    #[test]
    fn pow10_bounds() {
        assert_eq!(pow10(0), Some(1));
        assert_eq!(pow10(19), Some(10_000_000_000_000_000_000));
        assert_eq!(pow10(20), None);
    }

    #[test]
    fn formats_base_units() {
        assert_eq!(format_amount(2_000_000, 6), "2");
        assert_eq!(format_amount(2_500_000, 6), "2.5");
        assert_eq!(format_amount(1, 6), "0.000001");
        assert_eq!(format_amount(0, 9), "0");
        assert_eq!(format_amount(42, 0), "42");
        assert_eq!(format_amount(123_456_789_000_000_000, 9), "123456789");
    }
}
