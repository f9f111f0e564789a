use crate::{Date, Decimal, Transaction};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One typed cell of the logical spreadsheet grid. Writing an actual
/// spreadsheet file out of these is the hosting application's concern.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Date(Date),
    Text(String),
    Number(Decimal),
}

/// Produces a header row plus one typed row per transaction: a date cell,
/// two text cells (description and memo), and a numeric amount cell.
pub fn to_rows(txns: &[Transaction]) -> Vec<Vec<Cell>> {
    let mut rows = Vec::with_capacity(txns.len() + 1);
    rows.push(vec![
        Cell::Text("Date".to_string()),
        Cell::Text("Description".to_string()),
        Cell::Text("Memo".to_string()),
        Cell::Text("Amount".to_string()),
    ]);
    for txn in txns {
        rows.push(vec![
            Cell::Date(txn.date),
            Cell::Text(txn.name.clone()),
            Cell::Text(txn.memo.clone().unwrap_or_default()),
            Cell::Number(txn.amount),
        ]);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TxnType;

    #[test]
    fn header_plus_one_typed_row_per_transaction() {
        let amount: Decimal = "-42.50".parse().unwrap();
        let txns = [Transaction {
            id: "1".to_string(),
            date: Date::from_ymd_opt(2024, 1, 15).unwrap(),
            time: None,
            amount,
            name: "COFFEE SHOP".to_string(),
            memo: None,
            r#type: TxnType::Debit,
            check_number: None,
        }];
        let rows = to_rows(&txns);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Cell::Text("Date".to_string()));
        assert_eq!(
            rows[1],
            vec![
                Cell::Date(Date::from_ymd_opt(2024, 1, 15).unwrap()),
                Cell::Text("COFFEE SHOP".to_string()),
                Cell::Text(String::new()),
                Cell::Number(amount),
            ]
        );
    }

    #[test]
    fn empty_list_still_has_the_header_row() {
        assert_eq!(to_rows(&[]).len(), 1);
    }
}
