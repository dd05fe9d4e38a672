// Canonical record schema for Garda Medika billing line items
// Column names are exact string keys from the source spreadsheet

use serde::{Deserialize, Serialize};

pub const COL_TREATMENT_PLACE: &str = "TreatmentPlace";
pub const COL_ITEM_NAME: &str = "Nama Item Garda Medika";
pub const COL_UNIT: &str = "Satuan";
pub const COL_QTY: &str = "Qty";
pub const COL_AMOUNT_BILL: &str = "Amount Bill";
pub const COL_CLAIM_NO: &str = "ClaimNo";

/// Every required column; absence of any one is a fatal startup error.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_TREATMENT_PLACE,
    COL_ITEM_NAME,
    COL_UNIT,
    COL_QTY,
    COL_AMOUNT_BILL,
    COL_CLAIM_NO,
];

/// Default worksheet holding the billing data.
pub const DEFAULT_SHEET: &str = "ALL";

/// One cleaned billing line item.
/// Invariant: `item_name` is non-empty and `amount_bill` is always a
/// well-defined number once a record is in the canonical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    #[serde(rename = "TreatmentPlace")]
    pub treatment_place: String,

    #[serde(rename = "Nama Item Garda Medika")]
    pub item_name: String,

    #[serde(rename = "Satuan")]
    pub unit: String,

    #[serde(rename = "Qty")]
    pub qty: f64,

    #[serde(rename = "Amount Bill")]
    pub amount_bill: f64,

    /// Claim identifier from the insurer; not every row carries one.
    #[serde(rename = "ClaimNo")]
    pub claim_no: Option<String>,
}
