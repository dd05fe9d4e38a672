// Aggregator - per-item-name totals over a filtered view
// Groups keep first-appearance order; the grand total must equal the
// plain sum over the filtered rows regardless of grouping.

use crate::filter::FilteredView;
use serde::Serialize;
use std::collections::HashMap;

/// One summary row: all rows sharing an item name, collapsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemGroup {
    pub item_name: String,
    pub total_amount_bill: f64,
    /// Row count for the group. Counts every row, whether or not it
    /// carries a claim number.
    pub total_rows: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupSummary {
    pub groups: Vec<ItemGroup>,
}

impl GroupSummary {
    /// Grand total over all groups.
    pub fn total_billed(&self) -> f64 {
        self.groups.iter().map(|g| g.total_amount_bill).sum()
    }
}

/// Group a filtered view by item name, in order of first appearance.
pub fn aggregate(view: &FilteredView) -> GroupSummary {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<ItemGroup> = Vec::new();

    for record in &view.records {
        let i = match index.get(&record.item_name) {
            Some(&i) => i,
            None => {
                let i = groups.len();
                index.insert(record.item_name.clone(), i);
                groups.push(ItemGroup {
                    item_name: record.item_name.clone(),
                    total_amount_bill: 0.0,
                    total_rows: 0,
                });
                i
            }
        };

        groups[i].total_amount_bill += record.amount_bill;
        groups[i].total_rows += 1;
    }

    GroupSummary { groups }
}

/// Format a monetary total for display: Rupiah prefix, zero decimal
/// places, dot as the thousands separator. Pure presentation - the
/// numeric total is untouched.
pub fn format_rupiah(amount: f64) -> String {
    let value = amount.round() as i64;
    let (sign, magnitude) = if value < 0 {
        ("-", value.unsigned_abs())
    } else {
        ("", value.unsigned_abs())
    };

    let digits = magnitude.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("Rp {}{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter_by_place, Selection};
    use crate::record::BillingRecord;

    fn record(place: &str, item: &str, amount: f64, claim_no: Option<&str>) -> BillingRecord {
        BillingRecord {
            treatment_place: place.to_string(),
            item_name: item.to_string(),
            unit: "Tablet".to_string(),
            qty: 1.0,
            amount_bill: amount,
            claim_no: claim_no.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_scenario_b_shared_item_name_collapses() {
        let table = vec![
            record("H1", "Paracetamol", 100.0, Some("C001")),
            record("H1", "Paracetamol", 200.0, Some("C002")),
        ];

        let summary = aggregate(&filter_by_place(&table, &Selection::Place("H1".to_string())));

        assert_eq!(summary.groups.len(), 1);
        assert_eq!(summary.groups[0].item_name, "Paracetamol");
        assert_eq!(summary.groups[0].total_amount_bill, 300.0);
        assert_eq!(summary.groups[0].total_rows, 2);
    }

    #[test]
    fn test_grand_total_equals_row_sum() {
        let table = vec![
            record("H1", "Paracetamol", 100.0, Some("C001")),
            record("H1", "Ibuprofen", 50.0, Some("C002")),
            record("H2", "Paracetamol", 75.0, Some("C003")),
            record("H1", "Paracetamol", 25.0, Some("C004")),
        ];

        for selection in [Selection::All, Selection::Place("H1".to_string())] {
            let view = filter_by_place(&table, &selection);
            let row_sum: f64 = view.records.iter().map(|r| r.amount_bill).sum();
            let summary = aggregate(&view);
            assert_eq!(summary.total_billed(), row_sum);
            assert!(summary.groups.len() <= view.len());
        }
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let table = vec![
            record("H1", "Zinc", 1.0, None),
            record("H1", "Amoxicillin", 2.0, None),
            record("H1", "Zinc", 3.0, None),
            record("H1", "Betadine", 4.0, None),
        ];

        let summary = aggregate(&filter_by_place(&table, &Selection::All));
        let names: Vec<&str> = summary.groups.iter().map(|g| g.item_name.as_str()).collect();
        assert_eq!(names, vec!["Zinc", "Amoxicillin", "Betadine"]);
    }

    #[test]
    fn test_row_without_claim_no_still_counts() {
        let table = vec![
            record("H1", "Paracetamol", 100.0, Some("C001")),
            record("H1", "Paracetamol", 200.0, None),
        ];

        let summary = aggregate(&filter_by_place(&table, &Selection::All));
        assert_eq!(summary.groups[0].total_rows, 2);
        assert_eq!(summary.groups[0].total_amount_bill, 300.0);
    }

    #[test]
    fn test_empty_view_aggregates_to_empty_summary() {
        let table: Vec<BillingRecord> = Vec::new();
        let summary = aggregate(&filter_by_place(&table, &Selection::All));
        assert!(summary.groups.is_empty());
        assert_eq!(summary.total_billed(), 0.0);
    }

    #[test]
    fn test_scenario_c_rupiah_formatting() {
        assert_eq!(format_rupiah(1_234_567.0), "Rp 1.234.567");
    }

    #[test]
    fn test_rupiah_formatting_edges() {
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(999.0), "Rp 999");
        assert_eq!(format_rupiah(1000.0), "Rp 1.000");
        assert_eq!(format_rupiah(1_000_000.0), "Rp 1.000.000");
        // Zero decimal places: rounds, never truncates
        assert_eq!(format_rupiah(1499.5), "Rp 1.500");
        assert_eq!(format_rupiah(-1234.0), "Rp -1.234");
    }
}
