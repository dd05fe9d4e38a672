// Filter - narrows the canonical table to one treatment place
// A FilteredView keeps the selection that produced it, so an empty
// result stays distinguishable from "no filter requested".

use crate::record::BillingRecord;

/// Sentinel value the UI sends when no place is selected.
pub const ALL_PLACES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Place(String),
}

impl Selection {
    /// Map a selection string from the UI to a Selection.
    pub fn parse(value: &str) -> Self {
        if value == ALL_PLACES {
            Selection::All
        } else {
            Selection::Place(value.to_string())
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &str {
        match self {
            Selection::All => ALL_PLACES,
            Selection::Place(place) => place.as_str(),
        }
    }
}

/// A non-owning subsequence of the canonical table.
/// Recomputed on every interaction, never mutated in place.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    pub selection: Selection,
    pub records: Vec<&'a BillingRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Select records matching the treatment place; `Selection::All` passes
/// the whole table through in order. Total - an empty view is valid.
pub fn filter_by_place<'a>(table: &'a [BillingRecord], selection: &Selection) -> FilteredView<'a> {
    let records = match selection {
        Selection::All => table.iter().collect(),
        Selection::Place(place) => table
            .iter()
            .filter(|r| &r.treatment_place == place)
            .collect(),
    };

    FilteredView {
        selection: selection.clone(),
        records,
    }
}

/// Distinct treatment places in first-appearance order; the UI builds
/// its selector options from this, the same way the source data drives
/// the original selector.
pub fn treatment_places(table: &[BillingRecord]) -> Vec<String> {
    let mut places = Vec::new();
    for record in table {
        if !places.contains(&record.treatment_place) {
            places.push(record.treatment_place.clone());
        }
    }
    places
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(place: &str, item: &str, amount: f64) -> BillingRecord {
        BillingRecord {
            treatment_place: place.to_string(),
            item_name: item.to_string(),
            unit: "Tablet".to_string(),
            qty: 1.0,
            amount_bill: amount,
            claim_no: Some("C001".to_string()),
        }
    }

    fn sample_table() -> Vec<BillingRecord> {
        vec![
            record("H1", "Paracetamol", 10.5),
            record("H2", "Ibuprofen", 20.0),
            record("H1", "Amoxicillin", 15.0),
        ]
    }

    #[test]
    fn test_all_selection_preserves_table() {
        let table = sample_table();
        let view = filter_by_place(&table, &Selection::All);

        assert_eq!(view.len(), table.len());
        for (original, filtered) in table.iter().zip(view.records.iter()) {
            assert_eq!(original, *filtered);
        }
    }

    #[test]
    fn test_place_filter_matches_only_that_place() {
        let table = sample_table();
        let view = filter_by_place(&table, &Selection::Place("H1".to_string()));

        assert_eq!(view.len(), 2);
        for record in &view.records {
            assert_eq!(record.treatment_place, "H1");
        }
        // Scenario A: filtering by H1 excludes the H2 row
        assert_eq!(view.records[0].item_name, "Paracetamol");
    }

    #[test]
    fn test_empty_result_keeps_selection() {
        let table = sample_table();
        let view = filter_by_place(&table, &Selection::Place("H9".to_string()));

        assert!(view.is_empty());
        assert_eq!(view.selection, Selection::Place("H9".to_string()));
        assert_ne!(view.selection, Selection::All);
    }

    #[test]
    fn test_parse_sentinel() {
        assert_eq!(Selection::parse("All"), Selection::All);
        assert_eq!(
            Selection::parse("RS Harapan"),
            Selection::Place("RS Harapan".to_string())
        );
        assert_eq!(Selection::parse("All").label(), "All");
    }

    #[test]
    fn test_treatment_places_distinct_first_appearance() {
        let table = sample_table();
        assert_eq!(treatment_places(&table), vec!["H1", "H2"]);
    }
}
