//! Debit/credit bucket selection for signed balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::forest::NormalBalance;

/// A balance expressed as non-negative debit and credit buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitBalance {
    /// Debit bucket.
    pub debit: Decimal,
    /// Credit bucket.
    pub credit: Decimal,
}

impl std::ops::Add for SplitBalance {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            debit: self.debit + other.debit,
            credit: self.credit + other.credit,
        }
    }
}

/// Places a signed normal-side balance into the debit or the credit bucket.
///
/// A positive amount sits on the account's normal side. A negative amount is
/// a contra balance and lands, as a positive figure, on the opposite side:
///
/// | normal side | amount > 0 | amount < 0 |
/// |-------------|------------|------------|
/// | debit       | debit      | credit     |
/// | credit      | credit     | debit      |
#[must_use]
pub fn split_balance(normal_balance: NormalBalance, amount: Decimal) -> SplitBalance {
    let on_debit_side = match normal_balance {
        NormalBalance::DebitNormal => amount.is_sign_positive(),
        NormalBalance::CreditNormal => amount.is_sign_negative(),
    };
    if amount.is_zero() {
        SplitBalance::default()
    } else if on_debit_side {
        SplitBalance {
            debit: amount.abs(),
            credit: Decimal::ZERO,
        }
    } else {
        SplitBalance {
            debit: Decimal::ZERO,
            credit: amount.abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(NormalBalance::DebitNormal, dec!(100), dec!(100), dec!(0))]
    #[case(NormalBalance::DebitNormal, dec!(-40), dec!(0), dec!(40))]
    #[case(NormalBalance::CreditNormal, dec!(250), dec!(0), dec!(250))]
    #[case(NormalBalance::CreditNormal, dec!(-15.5), dec!(15.5), dec!(0))]
    #[case(NormalBalance::DebitNormal, dec!(0), dec!(0), dec!(0))]
    #[case(NormalBalance::CreditNormal, dec!(-0), dec!(0), dec!(0))]
    fn test_split_balance(
        #[case] side: NormalBalance,
        #[case] amount: Decimal,
        #[case] debit: Decimal,
        #[case] credit: Decimal,
    ) {
        assert_eq!(split_balance(side, amount), SplitBalance { debit, credit });
    }

    #[test]
    fn test_split_buckets_never_negative() {
        for side in [NormalBalance::DebitNormal, NormalBalance::CreditNormal] {
            for amount in [dec!(-3), dec!(0), dec!(3)] {
                let split = split_balance(side, amount);
                assert!(!split.debit.is_sign_negative() || split.debit.is_zero());
                assert!(!split.credit.is_sign_negative() || split.credit.is_zero());
            }
        }
    }

    #[test]
    fn test_add_is_bucket_wise() {
        let a = SplitBalance { debit: dec!(10), credit: dec!(0) };
        let b = SplitBalance { debit: dec!(0), credit: dec!(4) };
        assert_eq!(a + b, SplitBalance { debit: dec!(10), credit: dec!(4) });
    }
}
