//! Parser for the pipe-delimited user table printed by `list_users`.

use crate::error::{Error, Result};
use crate::types::{Attributes, ExtensionRecord};

/// Terminator line printed by the registry tool after the table.
const OK_MARKER: &str = "+OK";

/// Parse the user table into records, one per data row.
///
/// The first line holds the column headers. Blank lines and `+OK` lines are
/// skipped. A row shorter than the header omits its missing trailing columns;
/// fields past the last header are dropped.
pub fn parse_user_table(text: &str) -> Result<Vec<ExtensionRecord>> {
    let mut lines = text.lines().map(str::trim);

    let header = lines.next().unwrap_or_default();
    if header.is_empty() {
        return Err(Error::LocalSource(
            "could not obtain column names from the user table".to_string(),
        ));
    }
    let columns: Vec<&str> = header.split('|').collect();

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.is_empty() || line == OK_MARKER {
            continue;
        }

        let mut attributes = Attributes::new();
        for (column, value) in columns.iter().zip(line.split('|')) {
            attributes.insert(*column, value);
        }

        let record = ExtensionRecord::from_attributes(attributes).map_err(|e| {
            // +2: one for the header, one for 1-based numbering
            Error::LocalSource(format!("line {}: {}", index + 2, inner_message(e)))
        })?;
        records.push(record);
    }

    Ok(records)
}

fn inner_message(error: Error) -> String {
    match error {
        Error::LocalSource(message) => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttrValue;

    const TABLE: &str = "\
userid|context|domain|group|contact|callgroup|effective_caller_id_name|effective_caller_id_number
1000|default|10.0.0.5|default|error/user_not_registered|techsupport|Extension 1000|1000
1001|default|10.0.0.5|default|sofia/internal/sip:1001@10.0.0.9:5060|techsupport|Extension 1001|1001

+OK
";

    #[test]
    fn test_parse_full_table() {
        let records = parse_user_table(TABLE).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.identifier, "1000");
        assert_eq!(first.domain, AttrValue::from("10.0.0.5"));
        assert_eq!(first.attributes.len(), 8);
        assert_eq!(
            first.attributes.get("effective_caller_id_name"),
            Some(&AttrValue::from("Extension 1000"))
        );

        let keys: Vec<&str> = first.attributes.keys().collect();
        assert_eq!(keys[0], "userid");
        assert_eq!(keys[7], "effective_caller_id_number");
    }

    #[test]
    fn test_short_row_omits_trailing_columns() {
        let records = parse_user_table("userid|domain|group\n100|a\n").unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].attributes.contains_key("group"));
        assert_eq!(records[0].attributes.len(), 2);
    }

    #[test]
    fn test_extra_fields_are_dropped() {
        let records = parse_user_table("userid|domain\n100|a|surplus\n").unwrap();
        assert_eq!(records[0].attributes.len(), 2);
    }

    #[test]
    fn test_empty_header_is_error() {
        assert!(matches!(
            parse_user_table(""),
            Err(Error::LocalSource(_))
        ));
        assert!(matches!(
            parse_user_table("\n100|a\n"),
            Err(Error::LocalSource(_))
        ));
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let records = parse_user_table("userid|domain\n+OK\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_row_without_userid_reports_line() {
        let err = parse_user_table("domain|userid\na\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_repeated_identifiers_are_kept() {
        let records = parse_user_table("userid|domain\n100|a\n100|b\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].domain, AttrValue::from("b"));
    }
}
