// View handler - one request/response call per user interaction
// Replaces the original page scripts' top-to-bottom re-execution with
// an explicit handler: the shell supplies a view and a selection, the
// core hands back a renderable payload.

use crate::aggregate::{aggregate, format_rupiah, ItemGroup};
use crate::filter::{filter_by_place, Selection};
use crate::record::{
    BillingRecord, COL_AMOUNT_BILL, COL_ITEM_NAME, COL_QTY, COL_TREATMENT_PLACE, COL_UNIT,
};
use crate::wordcloud::extract_text;
use serde::Serialize;

/// Empty-state message shown when a filter matches no rows.
pub const NO_DATA_MESSAGE: &str = "No data available for the selected filter.";

/// Columns shown on the filtered-table view (ClaimNo is carried on the
/// record but not displayed, matching the original's column selection).
pub const DISPLAY_COLUMNS: [&str; 5] = [
    COL_TREATMENT_PLACE,
    COL_ITEM_NAME,
    COL_UNIT,
    COL_QTY,
    COL_AMOUNT_BILL,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    FilteredTable,
    GroupedSummary,
    WordCloud,
}

/// What the UI shell renders for one interaction.
#[derive(Debug, Clone, Serialize)]
pub enum RenderPayload {
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        total_records: usize,
    },
    Summary {
        groups: Vec<ItemGroup>,
        total_billed: f64,
        formatted_total: String,
    },
    /// Text blob for the word-cloud collaborator; the shell feeds it to
    /// a CloudRenderer.
    Cloud {
        text: String,
        total_records: usize,
    },
    /// Explicit no-data state; rendering is suppressed.
    Empty {
        message: String,
    },
}

/// Handle one user interaction: filter, then display, aggregate, or
/// extract. Stateless and idempotent given the same table and selection.
pub fn handle_view_request(
    table: &[BillingRecord],
    view: ViewKind,
    selection: &Selection,
) -> RenderPayload {
    let filtered = filter_by_place(table, selection);

    if filtered.is_empty() {
        return RenderPayload::Empty {
            message: NO_DATA_MESSAGE.to_string(),
        };
    }

    match view {
        ViewKind::FilteredTable => RenderPayload::Table {
            columns: DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: filtered
                .records
                .iter()
                .map(|r| {
                    vec![
                        r.treatment_place.clone(),
                        r.item_name.clone(),
                        r.unit.clone(),
                        format!("{}", r.qty),
                        format!("{:.2}", r.amount_bill),
                    ]
                })
                .collect(),
            total_records: filtered.len(),
        },
        ViewKind::GroupedSummary => {
            let summary = aggregate(&filtered);
            let total = summary.total_billed();
            RenderPayload::Summary {
                groups: summary.groups,
                total_billed: total,
                formatted_total: format_rupiah(total),
            }
        }
        ViewKind::WordCloud => RenderPayload::Cloud {
            text: extract_text(&filtered),
            total_records: filtered.len(),
        },
    }
}
