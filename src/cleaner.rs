// Cleaner - pure, total normalization of raw rows
// Never fails: rows without an item name are dropped, and a billed
// amount that cannot be parsed degrades to 0.0 so garbage billing data
// cannot block the rest of the pipeline from rendering.

use crate::loader::RawRecord;
use crate::record::BillingRecord;

/// Produce the canonical table from raw rows.
pub fn clean(raw: Vec<RawRecord>) -> Vec<BillingRecord> {
    raw.into_iter()
        .filter_map(|row| {
            let item_name = row
                .item_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())?;

            let claim_no = row
                .claim_no
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());

            Some(BillingRecord {
                treatment_place: row.treatment_place.trim().to_string(),
                item_name,
                unit: row.unit.trim().to_string(),
                qty: coerce_numeric(&row.qty),
                amount_bill: coerce_numeric(&row.amount_bill),
                claim_no,
            })
        })
        .collect()
}

/// Coerce a raw cell to f64, retrying with thousands separators stripped.
/// Unparsable input maps to the zero sentinel.
fn coerce_numeric(raw: &str) -> f64 {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .unwrap_or_else(|_| trimmed.replace(',', "").parse::<f64>().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(place: &str, item: Option<&str>, amount: &str) -> RawRecord {
        RawRecord {
            treatment_place: place.to_string(),
            item_name: item.map(|s| s.to_string()),
            unit: "Tablet".to_string(),
            qty: "1".to_string(),
            amount_bill: amount.to_string(),
            claim_no: Some("C001".to_string()),
        }
    }

    #[test]
    fn test_scenario_a_malformed_amount_degrades_to_zero() {
        let table = clean(vec![
            raw("H1", Some("Paracetamol"), "10.5"),
            raw("H2", Some("Ibuprofen"), "bad"),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].amount_bill, 10.5);
        assert_eq!(table[1].amount_bill, 0.0);
    }

    #[test]
    fn test_rows_without_item_name_are_dropped() {
        let table = clean(vec![
            raw("H1", None, "100"),
            raw("H1", Some(""), "100"),
            raw("H1", Some("   "), "100"),
            raw("H1", Some("Amoxicillin"), "100"),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table[0].item_name, "Amoxicillin");
    }

    #[test]
    fn test_all_output_amounts_are_numeric() {
        let inputs = ["", "abc", "12.34", "-5", "1,250,000", "  7  ", "1e3"];
        let table = clean(
            inputs
                .iter()
                .map(|a| raw("H1", Some("Item"), a))
                .collect(),
        );

        assert_eq!(table.len(), inputs.len());
        for record in &table {
            assert!(record.amount_bill.is_finite());
        }
        assert_eq!(table[0].amount_bill, 0.0);
        assert_eq!(table[1].amount_bill, 0.0);
        assert_eq!(table[2].amount_bill, 12.34);
        assert_eq!(table[3].amount_bill, -5.0);
        assert_eq!(table[4].amount_bill, 1_250_000.0);
        assert_eq!(table[5].amount_bill, 7.0);
        assert_eq!(table[6].amount_bill, 1000.0);
    }

    #[test]
    fn test_blank_claim_no_becomes_none() {
        let mut row = raw("H1", Some("Item"), "10");
        row.claim_no = Some("  ".to_string());
        let table = clean(vec![row]);
        assert_eq!(table[0].claim_no, None);
    }
}
