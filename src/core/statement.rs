//! camt.053 statement extraction.
//!
//! Only `Document/BkToCstmrStmt/Stmt/Ntry` is read. Every field below that
//! path is optional at the serde layer so that a malformed entry surfaces as
//! an [`EntryField`] failure with its ordinal instead of failing the whole
//! document.

use crate::domain::model::{
    ClassificationKey, EntryFailure, EntryField, ExtractedStatement, InvalidEntryPolicy,
    StatementFile, TransactionRecord,
};
use crate::utils::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Remittance texts the bank uses for deposit interest and interest tax.
pub const INTEREST_PHRASES: [&str; 2] = ["Vypořádání úroku vkladu", "Daň z úroků"];

const VARIABLE_SYMBOL_PREFIX: &str = "VS";

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "BkToCstmrStmt")]
    statement_message: Option<StatementMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StatementMessage {
    stmt: Option<Statement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Statement {
    #[serde(default)]
    ntry: Vec<RawEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawEntry {
    amt: Option<Amount>,
    cdt_dbt_ind: Option<String>,
    val_dt: Option<DateChoice>,
    #[serde(default)]
    ntry_dtls: Vec<EntryDetails>,
}

#[derive(Debug, Deserialize)]
struct Amount {
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DateChoice {
    dt: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EntryDetails {
    #[serde(default)]
    tx_dtls: Vec<TransactionDetails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TransactionDetails {
    refs: Option<References>,
    addtl_tx_inf: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct References {
    end_to_end_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CreditDebit {
    Credit,
    Debit,
}

/// Keeps the files named `<prefix>*.xml` (extension case-insensitive),
/// ordered by name.
pub fn discover_statements(names: &[String], prefix: &str) -> Vec<String> {
    let mut matches: Vec<String> = names
        .iter()
        .filter(|name| name.starts_with(prefix) && name.to_ascii_lowercase().ends_with(".xml"))
        .cloned()
        .collect();
    matches.sort();
    matches
}

/// Extracts the transaction records of one statement document.
pub fn parse_statement(
    source: &str,
    xml: &str,
    policy: InvalidEntryPolicy,
) -> Result<ExtractedStatement> {
    let document: Document = quick_xml::de::from_str(xml).map_err(|e| {
        tracing::debug!("XML error in {}: {}", source, e);
        LedgerError::StatementParse(source.to_string())
    })?;

    let entries = document
        .statement_message
        .and_then(|message| message.stmt)
        .map(|stmt| stmt.ntry)
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| LedgerError::StatementFormat(source.to_string()))?;

    tracing::trace!("{} contains {} entries", source, entries.len());

    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let ordinal = index + 1;
        match extract_entry(entry, ordinal) {
            Ok(record) => records.push(record),
            Err(field) => match policy {
                InvalidEntryPolicy::Abort => {
                    return Err(LedgerError::InvalidEntry {
                        field,
                        ordinal,
                        file: source.to_string(),
                    })
                }
                InvalidEntryPolicy::Skip => skipped.push(EntryFailure { field, ordinal }),
            },
        }
    }

    Ok(ExtractedStatement {
        file: StatementFile {
            source: source.to_string(),
            records,
        },
        skipped,
    })
}

fn extract_entry(entry: &RawEntry, ordinal: usize) -> std::result::Result<TransactionRecord, EntryField> {
    Ok(TransactionRecord {
        ordinal,
        amount: entry_amount(entry)?,
        date: entry_date(entry)?,
        key: entry_key(entry)?,
    })
}

fn entry_amount(entry: &RawEntry) -> std::result::Result<Decimal, EntryField> {
    let magnitude = entry
        .amt
        .as_ref()
        .and_then(|amt| amt.value.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .and_then(|text| Decimal::from_str(text).ok())
        .ok_or(EntryField::Amount)?;

    let indicator = match entry.cdt_dbt_ind.as_deref().map(str::trim) {
        Some("CRDT") => CreditDebit::Credit,
        Some("DBIT") => CreditDebit::Debit,
        _ => return Err(EntryField::Amount),
    };

    Ok(match indicator {
        CreditDebit::Debit if !magnitude.is_zero() => -magnitude,
        _ => magnitude,
    })
}

fn entry_date(entry: &RawEntry) -> std::result::Result<String, EntryField> {
    entry
        .val_dt
        .as_ref()
        .and_then(|val_dt| val_dt.dt.as_deref())
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .map(str::to_string)
        .ok_or(EntryField::Date)
}

fn entry_key(entry: &RawEntry) -> std::result::Result<ClassificationKey, EntryField> {
    let [details] = entry.ntry_dtls.as_slice() else {
        return Err(EntryField::EndToEndCode);
    };

    match details.tx_dtls.as_slice() {
        [] => Err(EntryField::EndToEndCode),
        [transaction] => Ok(classify(transaction)),
        // batched entries carry no single reference
        _ => Ok(ClassificationKey::Empty),
    }
}

fn classify(details: &TransactionDetails) -> ClassificationKey {
    if let Some(info) = details.addtl_tx_inf.as_deref().map(str::trim) {
        if INTEREST_PHRASES.contains(&info) {
            return ClassificationKey::Interest;
        }
    }

    details
        .refs
        .as_ref()
        .and_then(|refs| refs.end_to_end_id.as_deref())
        .map(str::trim)
        .and_then(|reference| reference.strip_prefix(VARIABLE_SYMBOL_PREFIX))
        .map(|symbol| ClassificationKey::VariableSymbol(symbol.to_string()))
        .unwrap_or(ClassificationKey::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(amount: &str, indicator: &str, date: &str, details: &str) -> String {
        format!(
            r#"<Ntry>
      <Amt Ccy="CZK">{amount}</Amt>
      <CdtDbtInd>{indicator}</CdtDbtInd>
      <Sts>BOOK</Sts>
      <ValDt><Dt>{date}</Dt></ValDt>
      {details}
    </Ntry>"#
        )
    }

    fn details(reference: Option<&str>, info: Option<&str>) -> String {
        let refs = reference
            .map(|r| format!("<Refs><EndToEndId>{r}</EndToEndId></Refs>"))
            .unwrap_or_default();
        let info = info
            .map(|i| format!("<AddtlTxInf>{i}</AddtlTxInf>"))
            .unwrap_or_default();
        format!("<NtryDtls><TxDtls>{refs}{info}</TxDtls></NtryDtls>")
    }

    fn document(entries: &[String]) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.053.001.02">
  <BkToCstmrStmt>
    <GrpHdr><MsgId>1</MsgId></GrpHdr>
    <Stmt>
      <Id>42</Id>
      {}
    </Stmt>
  </BkToCstmrStmt>
</Document>"#,
            entries.join("\n")
        )
    }

    fn parse(xml: &str) -> Result<ExtractedStatement> {
        parse_statement("jt_01.xml", xml, InvalidEntryPolicy::Abort)
    }

    #[test]
    fn test_credit_positive_debit_negative() {
        let xml = document(&[
            entry("45.50", "CRDT", "2024-01-01", &details(Some("VS123"), None)),
            entry("12.30", "DBIT", "2024-01-02", &details(Some("VS456"), None)),
        ]);

        let records = parse(&xml).unwrap().file.records;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, Decimal::from_str("45.50").unwrap());
        assert_eq!(records[1].amount, Decimal::from_str("-12.30").unwrap());
        assert_eq!(records[0].date, "2024-01-01");
        assert_eq!(records[1].ordinal, 2);
    }

    #[test]
    fn test_single_entry_is_a_sequence() {
        let xml = document(&[entry("1", "CRDT", "2024-02-01", &details(Some("VS1"), None))]);

        let extracted = parse(&xml).unwrap();

        assert_eq!(extracted.file.source, "jt_01.xml");
        assert_eq!(extracted.file.records.len(), 1);
        assert!(extracted.skipped.is_empty());
    }

    #[test]
    fn test_variable_symbol_kept_verbatim() {
        let xml = document(&[entry("5", "DBIT", "2024-01-01", &details(Some("VS000123"), None))]);

        let records = parse(&xml).unwrap().file.records;

        assert_eq!(
            records[0].key,
            ClassificationKey::VariableSymbol("000123".to_string())
        );
    }

    #[test]
    fn test_interest_phrase_wins_over_reference() {
        let xml = document(&[
            entry(
                "0.42",
                "CRDT",
                "2024-01-31",
                &details(Some("VS777"), Some("Vypořádání úroku vkladu")),
            ),
            entry("0.06", "DBIT", "2024-01-31", &details(None, Some("Daň z úroků"))),
        ]);

        let records = parse(&xml).unwrap().file.records;

        assert_eq!(records[0].key, ClassificationKey::Interest);
        assert_eq!(records[1].key, ClassificationKey::Interest);
    }

    #[test]
    fn test_interest_match_is_exact() {
        let xml = document(&[entry(
            "0.42",
            "CRDT",
            "2024-01-31",
            &details(None, Some("Vypořádání úroku vkladu 2024")),
        )]);

        let records = parse(&xml).unwrap().file.records;

        assert_eq!(records[0].key, ClassificationKey::Empty);
    }

    #[test]
    fn test_classification_text_is_trimmed() {
        let xml = document(&[
            entry(
                "0.06",
                "DBIT",
                "2024-01-31",
                &details(None, Some("\n   Daň z úroků\n  ")),
            ),
            entry("10", "DBIT", "2024-01-01", &details(Some(" VS123 "), None)),
        ]);

        let records = parse(&xml).unwrap().file.records;

        assert_eq!(records[0].key, ClassificationKey::Interest);
        assert_eq!(
            records[1].key,
            ClassificationKey::VariableSymbol("123".to_string())
        );
    }

    #[test]
    fn test_batched_transaction_details_are_empty() {
        let batched = "<NtryDtls>\
            <TxDtls><Refs><EndToEndId>VS1</EndToEndId></Refs></TxDtls>\
            <TxDtls><Refs><EndToEndId>VS2</EndToEndId></Refs></TxDtls>\
            </NtryDtls>";
        let xml = document(&[entry("10", "DBIT", "2024-01-01", batched)]);

        let records = parse(&xml).unwrap().file.records;

        assert_eq!(records[0].key, ClassificationKey::Empty);
    }

    #[test]
    fn test_repeated_entry_details_fail() {
        let repeated = format!(
            "{}{}",
            details(Some("VS1"), None),
            details(Some("VS2"), None)
        );
        let xml = document(&[entry("10", "DBIT", "2024-01-01", &repeated)]);

        let err = parse(&xml).unwrap_err();

        assert!(matches!(
            err,
            LedgerError::InvalidEntry {
                field: EntryField::EndToEndCode,
                ordinal: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        let xml = document(&[
            entry("0", "CRDT", "2024-01-01", &details(Some("VS1"), None)),
            entry("0.00", "DBIT", "2024-01-01", &details(Some("VS2"), None)),
        ]);

        let records = parse(&xml).unwrap().file.records;

        assert!(records[0].amount.is_zero());
        assert!(records[1].amount.is_zero());
        assert!(!records[1].amount.is_sign_negative());
    }

    #[test]
    fn test_unclassified_entries_are_empty() {
        let xml = document(&[
            entry("10", "DBIT", "2024-01-01", &details(Some("NOTPROVIDED"), Some("Card payment"))),
            entry("10", "DBIT", "2024-01-01", &details(None, None)),
        ]);

        let records = parse(&xml).unwrap().file.records;

        assert_eq!(records[0].key, ClassificationKey::Empty);
        assert_eq!(records[1].key, ClassificationKey::Empty);
    }

    #[test]
    fn test_missing_amount_is_entry_failure() {
        let xml = document(&[
            entry("10", "DBIT", "2024-01-01", &details(Some("VS1"), None)),
            entry("abc", "DBIT", "2024-01-01", &details(Some("VS2"), None)),
        ]);

        let err = parse(&xml).unwrap_err();

        assert_eq!(
            err.to_string(),
            "cannot process \"amount\" field of entry number 2 in XML file \"jt_01.xml\""
        );
    }

    #[test]
    fn test_unknown_indicator_is_entry_failure() {
        let xml = document(&[entry("10", "BOTH", "2024-01-01", &details(Some("VS1"), None))]);

        let err = parse(&xml).unwrap_err();

        assert!(matches!(
            err,
            LedgerError::InvalidEntry {
                field: EntryField::Amount,
                ordinal: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_date_and_details() {
        let xml = document(&[entry("10", "CRDT", "", &details(Some("VS1"), None))]);
        let err = parse(&xml).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidEntry {
                field: EntryField::Date,
                ..
            }
        ));

        let xml = document(&[entry("10", "CRDT", "2024-01-01", "")]);
        let err = parse(&xml).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidEntry {
                field: EntryField::EndToEndCode,
                ..
            }
        ));
    }

    #[test]
    fn test_skip_policy_keeps_ordinals() {
        let xml = document(&[
            entry("10", "CRDT", "2024-01-01", ""),
            entry("20", "CRDT", "2024-01-02", &details(Some("VS2"), None)),
        ]);

        let extracted = parse_statement("jt_01.xml", &xml, InvalidEntryPolicy::Skip).unwrap();

        assert_eq!(extracted.file.records.len(), 1);
        assert_eq!(extracted.file.records[0].ordinal, 2);
        assert_eq!(
            extracted.skipped,
            vec![EntryFailure {
                field: EntryField::EndToEndCode,
                ordinal: 1
            }]
        );
    }

    #[test]
    fn test_document_without_entries() {
        let err = parse(&document(&[])).unwrap_err();
        assert!(matches!(err, LedgerError::StatementFormat(ref f) if f == "jt_01.xml"));

        let err = parse("<Document><Other/></Document>").unwrap_err();
        assert!(matches!(err, LedgerError::StatementFormat(_)));
    }

    #[test]
    fn test_unparseable_document() {
        let err = parse("<Document><BkToCstmrStmt></Document>").unwrap_err();
        assert!(matches!(err, LedgerError::StatementParse(ref f) if f == "jt_01.xml"));
    }

    #[test]
    fn test_discover_statements_filters_and_orders() {
        let names: Vec<String> = [
            "jt_02.XML",
            "jt_01.xml",
            "other.xml",
            "jt_notes.txt",
            "jt_03.Xml",
            "mapping.json",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        assert_eq!(
            discover_statements(&names, "jt_"),
            vec!["jt_01.xml", "jt_02.XML", "jt_03.Xml"]
        );
        assert!(discover_statements(&names, "kb_").is_empty());
    }
}
