use crate::utils::encode_entities;
use crate::{Account, AccountType, Date, Transaction};

/// Rebuilds a minimal OFX 1.02 SGML document for one account, importable by
/// software expecting that exact format (and by [`parse`](crate::parse)
/// itself). Transactions that were parsed with a synthesized id get that id
/// written back as their `FITID`.
pub fn to_ofx(account: &Account) -> String {
    let mut out = String::new();
    out.push_str(
        "OFXHEADER:100\n\
         DATA:OFXSGML\n\
         VERSION:102\n\
         SECURITY:NONE\n\
         ENCODING:USASCII\n\
         CHARSET:1252\n\
         COMPRESSION:NONE\n\
         OLDFILEUID:NONE\n\
         NEWFILEUID:NONE\n\
         \n",
    );

    // The output must be reproducible for identical input, so the server
    // timestamp is taken from the data instead of the clock.
    let as_of = account
        .txns
        .iter()
        .map(|txn| txn.date)
        .max()
        .or_else(|| account.balance.and_then(|b| b.as_of))
        .unwrap_or_else(|| Date::from_ymd_opt(1970, 1, 1).unwrap());

    out.push_str("<OFX>\n<SIGNONMSGSRSV1>\n<SONRS>\n<STATUS>\n<CODE>0\n<SEVERITY>INFO\n</STATUS>\n");
    out.push_str(&format!("<DTSERVER>{}\n", as_of.format("%Y%m%d")));
    out.push_str("<LANGUAGE>ENG\n</SONRS>\n</SIGNONMSGSRSV1>\n");

    let credit_card = account.account_type == AccountType::CreditCard;
    let (msg_set, trn_rs, stmt_rs) = if credit_card {
        ("CREDITCARDMSGSRSV1", "CCSTMTTRNRS", "CCSTMTRS")
    } else {
        ("BANKMSGSRSV1", "STMTTRNRS", "STMTRS")
    };

    out.push_str(&format!("<{}>\n<{}>\n", msg_set, trn_rs));
    out.push_str("<TRNUID>1\n<STATUS>\n<CODE>0\n<SEVERITY>INFO\n</STATUS>\n");
    out.push_str(&format!("<{}>\n", stmt_rs));
    out.push_str(&format!("<CURDEF>{}\n", encode_entities(&account.currency)));

    if credit_card {
        out.push_str("<CCACCTFROM>\n");
        out.push_str(&format!("<ACCTID>{}\n", encode_entities(&account.account_id)));
        out.push_str("</CCACCTFROM>\n");
    } else {
        out.push_str("<BANKACCTFROM>\n");
        if let Some(bank_id) = &account.bank_id {
            out.push_str(&format!("<BANKID>{}\n", encode_entities(bank_id)));
        }
        out.push_str(&format!("<ACCTID>{}\n", encode_entities(&account.account_id)));
        out.push_str(&format!("<ACCTTYPE>{}\n", account.account_type));
        out.push_str("</BANKACCTFROM>\n");
    }

    out.push_str("<BANKTRANLIST>\n");
    if let (Some(start), Some(end)) = (
        account.txns.iter().map(|t| t.date).min(),
        account.txns.iter().map(|t| t.date).max(),
    ) {
        out.push_str(&format!("<DTSTART>{}\n", start.format("%Y%m%d")));
        out.push_str(&format!("<DTEND>{}\n", end.format("%Y%m%d")));
    }
    for txn in &account.txns {
        write_txn(&mut out, txn);
    }
    out.push_str("</BANKTRANLIST>\n");

    if let Some(balance) = account.balance {
        out.push_str("<LEDGERBAL>\n");
        out.push_str(&format!("<BALAMT>{}\n", balance.amount));
        if let Some(as_of) = balance.as_of {
            out.push_str(&format!("<DTASOF>{}\n", as_of.format("%Y%m%d")));
        }
        out.push_str("</LEDGERBAL>\n");
    }

    out.push_str(&format!("</{}>\n</{}>\n</{}>\n</OFX>\n", stmt_rs, trn_rs, msg_set));
    out
}

fn write_txn(out: &mut String, txn: &Transaction) {
    out.push_str("<STMTTRN>\n");
    out.push_str(&format!("<TRNTYPE>{}\n", txn.r#type));
    match txn.time {
        Some(time) => out.push_str(&format!(
            "<DTPOSTED>{}{}\n",
            txn.date.format("%Y%m%d"),
            time.format("%H%M%S")
        )),
        None => out.push_str(&format!("<DTPOSTED>{}\n", txn.date.format("%Y%m%d"))),
    }
    out.push_str(&format!("<TRNAMT>{}\n", txn.amount));
    out.push_str(&format!("<FITID>{}\n", encode_entities(&txn.id)));
    out.push_str(&format!("<NAME>{}\n", encode_entities(&txn.name)));
    if let Some(memo) = &txn.memo {
        out.push_str(&format!("<MEMO>{}\n", encode_entities(memo)));
    }
    if let Some(check_number) = &txn.check_number {
        out.push_str(&format!("<CHECKNUM>{}\n", encode_entities(check_number)));
    }
    out.push_str("</STMTTRN>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const DOC: &str = "OFXHEADER:100\nVERSION:102\n\
        <OFX><BANKMSGSRSV1><STMTTRNRS><STMTRS><CURDEF>USD\
        <BANKACCTFROM><BANKID>121000248<ACCTID>77<ACCTTYPE>CHECKING</BANKACCTFROM>\
        <BANKTRANLIST>\
        <STMTTRN><TRNTYPE>CREDIT<DTPOSTED>20240201093000<TRNAMT>100.00<FITID>a1<NAME>PAYROLL</STMTTRN>\
        <STMTTRN><TRNTYPE>DEBIT<DTPOSTED>20240203<TRNAMT>-30.00<NAME>M&amp;M MARKET<MEMO>snacks</STMTTRN>\
        </BANKTRANLIST>\
        <LEDGERBAL><BALAMT>170.00<DTASOF>20240203</LEDGERBAL>\
        </STMTRS></STMTTRNRS></BANKMSGSRSV1></OFX>";

    #[test]
    fn reexport_reimports_with_equal_transactions() {
        let original = parse(DOC).unwrap();
        let account = &original.accounts()[0];
        let reimported = parse(&to_ofx(account)).unwrap();
        assert_eq!(reimported.accounts().len(), 1);
        let round_tripped = &reimported.accounts()[0];

        assert_eq!(round_tripped.account_id(), account.account_id());
        assert_eq!(round_tripped.account_type(), account.account_type());
        assert_eq!(round_tripped.bank_id(), account.bank_id());
        assert_eq!(round_tripped.currency(), account.currency());
        assert_eq!(round_tripped.txns().len(), account.txns().len());
        for (a, b) in account.txns().iter().zip(round_tripped.txns()) {
            assert_eq!(a.date(), b.date());
            assert_eq!(a.amount(), b.amount());
            assert_eq!(a.name(), b.name());
            assert_eq!(a.memo(), b.memo());
            assert_eq!(a.r#type(), b.r#type());
            assert_eq!(a.id(), b.id());
        }
        let balance = round_tripped.balance().unwrap();
        assert_eq!(balance.amount(), "170.00".parse().unwrap());
    }

    #[test]
    fn credit_card_accounts_use_the_card_message_set() {
        let doc = "<OFX><CREDITCARDMSGSRSV1><CCSTMTTRNRS><CCSTMTRS><CURDEF>USD\
            <CCACCTFROM><ACCTID>4111</CCACCTFROM>\
            <BANKTRANLIST>\
            <STMTTRN><TRNTYPE>DEBIT<DTPOSTED>20240105<TRNAMT>-12.00<NAME>DINER</STMTTRN>\
            </BANKTRANLIST></CCSTMTRS></CCSTMTTRNRS></CREDITCARDMSGSRSV1></OFX>";
        let parsed = parse(doc).unwrap();
        let ofx = to_ofx(&parsed.accounts()[0]);
        assert!(ofx.contains("<CCSTMTRS>"));
        assert!(ofx.contains("<CCACCTFROM>"));
        assert!(!ofx.contains("<BANKACCTFROM>"));
        let reimported = parse(&ofx).unwrap();
        assert_eq!(
            reimported.accounts()[0].account_type(),
            crate::AccountType::CreditCard
        );
    }

    #[test]
    fn header_block_is_well_formed() {
        let parsed = parse(DOC).unwrap();
        let ofx = to_ofx(&parsed.accounts()[0]);
        assert!(ofx.starts_with("OFXHEADER:100\n"));
        let reimported = parse(&ofx).unwrap();
        assert_eq!(reimported.header().version(), Some("102"));
        assert!(reimported.warnings().is_empty());
    }
}
