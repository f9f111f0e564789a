use crate::{Decimal, Stats, Transaction};
use rust_decimal::prelude::Zero;

impl Stats {
    /// Aggregates one account's transaction list. An empty list yields a
    /// count of zero and no date range.
    pub fn from_txns(txns: &[Transaction]) -> Self {
        let mut total_credits = Decimal::zero();
        let mut total_debits = Decimal::zero();
        let mut date_range = None;
        for txn in txns {
            if txn.amount.is_sign_negative() {
                total_debits += txn.amount.abs();
            } else {
                total_credits += txn.amount;
            }
            date_range = match date_range {
                None => Some((txn.date, txn.date)),
                Some((min, max)) => Some((txn.date.min(min), txn.date.max(max))),
            };
        }
        Stats {
            count: txns.len(),
            total_credits,
            total_debits,
            // Equals the plain sum of every amount; Decimal keeps this exact.
            net_change: total_credits - total_debits,
            date_range,
        }
    }
}

/// Aggregates one account's transaction list. See [`Stats::from_txns`].
pub fn stats(txns: &[Transaction]) -> Stats {
    Stats::from_txns(txns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, TxnType};

    fn txn(date: (i32, u32, u32), amount: &str) -> Transaction {
        let amount: Decimal = amount.parse().unwrap();
        Transaction {
            id: format!("{:?}:{}", date, amount),
            date: Date::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time: None,
            amount,
            name: String::new(),
            memo: None,
            r#type: TxnType::from_sign(amount),
            check_number: None,
        }
    }

    #[test]
    fn empty_list_yields_zero_count_and_no_range() {
        let stats = Stats::from_txns(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.total_credits, Decimal::zero());
        assert_eq!(stats.total_debits, Decimal::zero());
        assert_eq!(stats.net_change, Decimal::zero());
        assert_eq!(stats.date_range, None);
    }

    #[test]
    fn single_debit() {
        let stats = Stats::from_txns(&[txn((2024, 1, 15), "-42.50")]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.total_debits, "42.50".parse().unwrap());
        assert_eq!(stats.total_credits, Decimal::zero());
        assert_eq!(stats.net_change, "-42.50".parse().unwrap());
    }

    #[test]
    fn credits_debits_and_range() {
        let txns = [txn((2024, 2, 1), "100.00"), txn((2024, 2, 3), "-30.00")];
        let stats = Stats::from_txns(&txns);
        assert_eq!(stats.total_credits, "100.00".parse().unwrap());
        assert_eq!(stats.total_debits, "30.00".parse().unwrap());
        assert_eq!(stats.net_change, "70.00".parse().unwrap());
        assert_eq!(
            stats.date_range,
            Some((
                Date::from_ymd_opt(2024, 2, 1).unwrap(),
                Date::from_ymd_opt(2024, 2, 3).unwrap()
            ))
        );
    }

    #[test]
    fn net_change_equals_plain_sum() {
        let txns = [
            txn((2024, 3, 1), "0.10"),
            txn((2024, 3, 2), "0.20"),
            txn((2024, 3, 3), "-0.30"),
            txn((2024, 3, 4), "1234.56"),
            txn((2024, 3, 5), "-0.01"),
        ];
        let stats = Stats::from_txns(&txns);
        let plain_sum: Decimal = txns.iter().map(|t| t.amount).sum();
        assert_eq!(stats.net_change, plain_sum);
        assert_eq!(stats.net_change, stats.total_credits - stats.total_debits);
    }

    #[test]
    fn zero_amount_counts_as_credit() {
        let stats = Stats::from_txns(&[txn((2024, 1, 1), "0")]);
        assert_eq!(stats.total_credits, Decimal::zero());
        assert_eq!(stats.total_debits, Decimal::zero());
        assert_eq!(stats.count, 1);
    }
}
