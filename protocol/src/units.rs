//! # Amounts and Gas
//!
//! Deposits and stakes are `u128` counts of yoctoNEAR (10^-24 NEAR). Humans
//! write "1.5"; the chain wants `1_500_000_000_000_000_000_000_000`. This
//! module converts between the two without ever touching floating point.
//!
//! It also carries [`dec_format`], the serde adapter that renders `u128`
//! values as decimal strings in JSON. JSON numbers lose precision past 2^53
//! in most consumers, and every NEAR RPC speaks strings for balances.

use thiserror::Error;

/// Decimal places between NEAR and yoctoNEAR.
pub const NEAR_NOMINATION_EXP: usize = 24;

/// One NEAR in yoctoNEAR.
pub const ONE_NEAR: u128 = 10u128.pow(NEAR_NOMINATION_EXP as u32);

/// One teragas.
pub const TGAS: u64 = 1_000_000_000_000;

/// Gas attached to a function call when the caller does not care.
pub const DEFAULT_FUNCTION_CALL_GAS: u64 = 30 * TGAS;

/// Errors from parsing human-readable amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("malformed amount: {0:?}")]
    Malformed(String),

    #[error("amount {0:?} has more than 24 fractional digits")]
    TooPrecise(String),

    #[error("amount {0:?} does not fit in u128 yoctoNEAR")]
    OutOfRange(String),
}

/// Parses a decimal NEAR amount (`"1"`, `"0.25"`, `"1,000.5"`) into yoctoNEAR.
///
/// Commas are accepted as thousands separators and ignored.
pub fn parse_near_amount(amount: &str) -> Result<u128, UnitsError> {
    let cleaned: String = amount.trim().chars().filter(|c| *c != ',').collect();
    let (whole, frac) = match cleaned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (cleaned.as_str(), ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(UnitsError::Malformed(amount.to_string()));
    }
    if frac.len() > NEAR_NOMINATION_EXP {
        return Err(UnitsError::TooPrecise(amount.to_string()));
    }

    let out_of_range = || UnitsError::OutOfRange(amount.to_string());
    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| out_of_range())?
    };
    let frac: u128 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = NEAR_NOMINATION_EXP);
        padded.parse().map_err(|_| out_of_range())?
    };

    whole
        .checked_mul(ONE_NEAR)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(out_of_range)
}

/// Formats yoctoNEAR as a decimal NEAR string with trailing zeros trimmed.
///
/// `1_500_000_000_000_000_000_000_000` becomes `"1.5"`; whole amounts have no
/// decimal point.
pub fn format_near_amount(yocto: u128) -> String {
    let whole = yocto / ONE_NEAR;
    let frac = yocto % ONE_NEAR;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac, width = NEAR_NOMINATION_EXP);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Serde adapter for `u128` (and `Option<u128>`) as decimal strings.
///
/// ```ignore
/// #[serde(with = "crate::units::dec_format")]
/// pub deposit: u128,
/// ```
pub mod dec_format {
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Types the adapter can carry.
    pub trait DecType: Sized {
        fn serialize_dec<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>;
        fn from_dec_str(s: Option<String>) -> Result<Self, String>;
    }

    impl DecType for u128 {
        fn serialize_dec<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }

        fn from_dec_str(s: Option<String>) -> Result<Self, String> {
            let s = s.ok_or_else(|| "expected a decimal string, got null".to_string())?;
            s.parse().map_err(|_| format!("invalid u128 decimal string {:?}", s))
        }
    }

    impl DecType for Option<u128> {
        fn serialize_dec<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Some(value) => serializer.collect_str(value),
                None => serializer.serialize_none(),
            }
        }

        fn from_dec_str(s: Option<String>) -> Result<Self, String> {
            s.map(|s| u128::from_dec_str(Some(s))).transpose()
        }
    }

    pub fn serialize<T: DecType, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize_dec(serializer)
    }

    pub fn deserialize<'de, T: DecType, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        T::from_dec_str(raw).map_err(de::Error::custom)
    }
}
