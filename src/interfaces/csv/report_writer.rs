use crate::domain::account::{AccountStatus, Balance};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One row of the final state report.
///
/// Account rows carry a status and leave `name` empty; pocket rows carry a
/// name and leave `status` empty. `source` is the script label the record
/// was created under, empty when the record predates the script. An absent
/// balance stays an empty cell rather than `0`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReportRow {
    pub kind: RecordKind,
    pub source: String,
    pub name: Option<String>,
    pub balance: Option<Balance>,
    pub status: Option<AccountStatus>,
    pub id: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Account,
    Pocket,
}

/// Writes the final state report as CSV.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    /// Creates a new `ReportWriter` over any `Write` target (e.g., Stdout).
    pub fn new(target: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(target),
        }
    }

    /// Serializes every row and flushes the target.
    pub fn write_report(mut self, rows: Vec<ReportRow>) -> Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountId;
    use crate::domain::pocket::PocketId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_writer_formats_rows() {
        let account_id = AccountId::random();
        let pocket_id = PocketId::random();
        let rows = vec![
            ReportRow {
                kind: RecordKind::Account,
                source: "acc1".to_string(),
                name: None,
                balance: Some(Balance::new(dec!(800.0))),
                status: Some(AccountStatus::Active),
                id: account_id.to_string(),
            },
            ReportRow {
                kind: RecordKind::Pocket,
                source: "vac".to_string(),
                name: Some("vacation".to_string()),
                balance: Some(Balance::new(dec!(300.0))),
                status: None,
                id: pocket_id.to_string(),
            },
        ];

        let mut out = Vec::new();
        ReportWriter::new(&mut out).write_report(rows).unwrap();

        let expected = format!(
            "kind,source,name,balance,status,id\n\
             account,acc1,,800.0,active,{account_id}\n\
             pocket,vac,vacation,300.0,,{pocket_id}\n"
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_writer_leaves_absent_balance_empty() {
        let account_id = AccountId::random();
        let rows = vec![ReportRow {
            kind: RecordKind::Account,
            source: "acc2".to_string(),
            name: None,
            balance: None,
            status: Some(AccountStatus::Blocked),
            id: account_id.to_string(),
        }];

        let mut out = Vec::new();
        ReportWriter::new(&mut out).write_report(rows).unwrap();

        let expected = format!("kind,source,name,balance,status,id\naccount,acc2,,,blocked,{account_id}\n");
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_writer_empty_report_has_no_output() {
        let mut out = Vec::new();
        ReportWriter::new(&mut out).write_report(Vec::new()).unwrap();

        // Headers come from the first serialized row, so none are written.
        assert!(out.is_empty());
    }
}
