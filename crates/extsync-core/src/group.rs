//! Merge local records that share an extension identifier.
//!
//! The registry lists a user once per profile or domain it is registered in.
//! Grouping folds those rows into a single canonical record.

use std::collections::HashMap;

use crate::types::{AttrValue, Attributes, ExtensionRecord};

/// Group records by identifier, keeping the order of first appearance.
///
/// A singleton group passes through unchanged. A larger group merges each
/// attribute into its ordered distinct values, and collapses an attribute back
/// to a scalar when every row agreed on it.
pub fn group_records(records: Vec<ExtensionRecord>) -> Vec<ExtensionRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut partitions: HashMap<String, Vec<ExtensionRecord>> = HashMap::new();

    for record in records {
        match partitions.get_mut(&record.identifier) {
            Some(partition) => partition.push(record),
            None => {
                order.push(record.identifier.clone());
                partitions.insert(record.identifier.clone(), vec![record]);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|identifier| partitions.remove(&identifier))
        .filter_map(merge_partition)
        .collect()
}

fn merge_partition(mut partition: Vec<ExtensionRecord>) -> Option<ExtensionRecord> {
    if partition.len() <= 1 {
        return partition.pop();
    }

    tracing::debug!(
        user = %partition[0].identifier,
        rows = partition.len(),
        "Merging duplicate registry rows"
    );

    let mut columns: Vec<(String, Vec<String>)> = Vec::new();
    for record in &partition {
        for (key, value) in record.attributes.iter() {
            let slot = match columns.iter().position(|(k, _)| k == key) {
                Some(pos) => &mut columns[pos].1,
                None => {
                    columns.push((key.to_string(), Vec::new()));
                    &mut columns.last_mut()?.1
                }
            };
            push_distinct(slot, value);
        }
    }

    let mut attributes = Attributes::new();
    for (key, values) in columns {
        attributes.insert(key, AttrValue::from_distinct(values));
    }

    let domain = merge_values(partition.iter().map(|r| Some(&r.domain)))?;
    let secret = merge_values(partition.iter().map(|r| r.secret.as_ref()));
    let identifier = partition.swap_remove(0).identifier;

    Some(ExtensionRecord {
        identifier,
        domain,
        secret,
        attributes,
    })
}

fn merge_values<'a>(values: impl Iterator<Item = Option<&'a AttrValue>>) -> Option<AttrValue> {
    let mut distinct = Vec::new();
    for value in values.flatten() {
        push_distinct(&mut distinct, value);
    }
    if distinct.is_empty() {
        None
    } else {
        Some(AttrValue::from_distinct(distinct))
    }
}

fn push_distinct(slot: &mut Vec<String>, value: &AttrValue) {
    for v in value.values() {
        if !slot.iter().any(|existing| existing == v) {
            slot.push(v.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(userid: &str, domain: &str, extra: &[(&str, &str)]) -> ExtensionRecord {
        let mut attrs = Attributes::new();
        attrs.insert("userid", userid);
        attrs.insert("domain", domain);
        for (k, v) in extra {
            attrs.insert(*k, *v);
        }
        ExtensionRecord::from_attributes(attrs).unwrap()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_three_rows_collapse_domain_to_distinct_list() {
        let grouped = group_records(vec![
            record("100", "a", &[]),
            record("100", "a", &[]),
            record("100", "b", &[]),
        ]);

        assert_eq!(grouped.len(), 1);
        let merged = &grouped[0];
        assert_eq!(merged.identifier, "100");
        assert_eq!(merged.domain, AttrValue::List(strings(&["a", "b"])));
        assert_eq!(
            merged.attributes.get("domain"),
            Some(&AttrValue::List(strings(&["a", "b"])))
        );
        assert_eq!(merged.attributes.get("userid"), Some(&AttrValue::from("100")));
    }

    #[test]
    fn test_agreeing_attributes_stay_scalar() {
        let grouped = group_records(vec![
            record("100", "a", &[("group", "default")]),
            record("100", "b", &[("group", "default")]),
        ]);

        assert_eq!(
            grouped[0].attributes.get("group"),
            Some(&AttrValue::from("default"))
        );
    }

    #[test]
    fn test_groups_follow_first_appearance_not_sorting() {
        let grouped = group_records(vec![
            record("300", "a", &[]),
            record("100", "a", &[]),
            record("300", "b", &[]),
            record("200", "a", &[]),
        ]);

        let ids: Vec<&str> = grouped.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["300", "100", "200"]);
    }

    #[test]
    fn test_singleton_passes_through_unchanged() {
        let original = record("100", "a", &[("group", "default")]);
        let grouped = group_records(vec![original.clone()]);
        assert_eq!(grouped, vec![original]);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let once = group_records(vec![
            record("100", "a", &[("group", "x")]),
            record("101", "a", &[]),
            record("100", "b", &[("group", "y")]),
        ]);
        let twice = group_records(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_attribute_order_is_first_seen_across_partition() {
        let grouped = group_records(vec![
            record("100", "a", &[]),
            record("100", "b", &[("contact", "sip:100@h")]),
        ]);
        let keys: Vec<&str> = grouped[0].attributes.keys().collect();
        assert_eq!(keys, vec!["userid", "domain", "contact"]);
    }

    #[test]
    fn test_secrets_merge_like_attributes() {
        let mut first = record("100", "a", &[]);
        first.secret = Some(AttrValue::from("s1"));
        let second = record("100", "b", &[]);
        let mut third = record("100", "c", &[]);
        third.secret = Some(AttrValue::from("s1"));

        let grouped = group_records(vec![first, second, third]);
        assert_eq!(grouped[0].secret, Some(AttrValue::from("s1")));
        assert_eq!(grouped[0].primary_secret(), Some("s1"));
    }

    #[test]
    fn test_empty_input() {
        assert!(group_records(Vec::new()).is_empty());
    }
}
