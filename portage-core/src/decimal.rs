//! Conversions between chain-local decimal representations.
//!
//! Converting an amount to a higher precision is exact. Converting down
//! truncates toward zero, dropping dust the lower precision cannot
//! express.

use ethers::prelude::U256;
use std::cmp::Ordering;

/// Errors encountered converting amounts between decimal representations
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Result does not fit in a U256
    #[error("Amount {amount} at {from} decimals overflows at {to} decimals")]
    Overflow {
        /// Amount under conversion
        amount: U256,
        /// Precision converted from
        from: u32,
        /// Precision converted to
        to: u32,
    },
    /// Negative input. Balances and fees are unsigned
    #[error("Cannot represent negative amount: {0}")]
    Negative(String),
    /// Literal that does not parse as an unsigned decimal number
    #[error("Invalid decimal literal: {0}")]
    InvalidLiteral(String),
    /// Literal with more fractional digits than the target precision
    #[error("Literal {literal} does not fit in {decimals} decimals")]
    PrecisionLoss {
        /// Offending literal
        literal: String,
        /// Target precision
        decimals: u32,
    },
    /// Literal too large for 256 bits at the target precision
    #[error("Literal {0} overflows 256 bits")]
    LiteralOverflow(String),
}

/// Re-express `amount` from `from` decimals at `to` decimals.
///
/// Converting up multiplies exactly and fails on overflow. Converting
/// down divides, truncating toward zero.
pub fn convert_decimals(amount: U256, from: u32, to: u32) -> Result<U256, AmountError> {
    match from.cmp(&to) {
        Ordering::Equal => Ok(amount),
        Ordering::Less => {
            let overflow = || AmountError::Overflow { amount, from, to };
            let factor = U256::from(10u8)
                .checked_pow(U256::from(to - from))
                .ok_or_else(overflow)?;
            amount.checked_mul(factor).ok_or_else(overflow)
        }
        Ordering::Greater => {
            // a factor beyond 2^256 divides any amount to zero
            match U256::from(10u8).checked_pow(U256::from(from - to)) {
                Some(factor) => Ok(amount / factor),
                None => Ok(U256::zero()),
            }
        }
    }
}

/// Parse a display-unit decimal literal (e.g. `"5.0"`) into minor units at
/// the given precision. Negative input is rejected, as are literals with
/// more significant fractional digits than the precision can hold.
pub fn parse_units(literal: &str, decimals: u32) -> Result<U256, AmountError> {
    let trimmed = literal.trim();

    if trimmed.starts_with('-') {
        return Err(AmountError::Negative(trimmed.to_owned()));
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };

    let well_formed = !(int_part.is_empty() && frac_part.is_empty())
        && int_part.chars().all(|c| c.is_ascii_digit())
        && frac_part.chars().all(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(AmountError::InvalidLiteral(literal.to_owned()));
    }

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.len() > decimals as usize {
        return Err(AmountError::PrecisionLoss {
            literal: literal.to_owned(),
            decimals,
        });
    }

    let ten = U256::from(10u8);
    let mut minor = U256::zero();
    let digits = int_part
        .chars()
        .chain(frac_part.chars())
        .chain(std::iter::repeat('0').take(decimals as usize - frac_part.len()));
    for c in digits {
        let d = U256::from(c as u8 - b'0');
        minor = minor
            .checked_mul(ten)
            .and_then(|m| m.checked_add(d))
            .ok_or_else(|| AmountError::LiteralOverflow(literal.to_owned()))?;
    }

    Ok(minor)
}
