// Loader - reads the source spreadsheet into raw records
// XLSX via calamine, CSV via the csv crate; both resolve the required
// column headers up front and fail fast when one is missing.

use crate::error::SourceError;
use crate::record::{
    COL_AMOUNT_BILL, COL_CLAIM_NO, COL_ITEM_NAME, COL_QTY, COL_TREATMENT_PLACE, COL_UNIT,
    REQUIRED_COLUMNS,
};
use calamine::{open_workbook, DataType, Reader, Xlsx};
use serde::Deserialize;
use std::path::Path;

/// One spreadsheet row before cleaning. Quantity and amount stay raw
/// strings here; coercion is the cleaner's job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "TreatmentPlace")]
    pub treatment_place: String,

    #[serde(rename = "Nama Item Garda Medika")]
    pub item_name: Option<String>,

    #[serde(rename = "Satuan")]
    pub unit: String,

    #[serde(rename = "Qty")]
    pub qty: String,

    #[serde(rename = "Amount Bill")]
    pub amount_bill: String,

    #[serde(rename = "ClaimNo")]
    pub claim_no: Option<String>,
}

/// Load raw records from `path`, dispatching on the file extension:
/// `.csv` goes through the CSV reader, everything else is treated as a
/// workbook and read from `sheet`.
pub fn load_table(path: &Path, sheet: &str) -> Result<Vec<RawRecord>, SourceError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_csv(path),
        _ => load_xlsx(path, sheet),
    }
}

/// Read one worksheet of an XLSX workbook into raw records.
pub fn load_xlsx(path: &Path, sheet: &str) -> Result<Vec<RawRecord>, SourceError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| SourceError::SourceUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| SourceError::SourceUnavailable {
            path: format!("{} (sheet '{}')", path.display(), sheet),
            reason: e.to_string(),
        })?;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| SourceError::SourceUnavailable {
        path: format!("{} (sheet '{}')", path.display(), sheet),
        reason: "sheet has no header row".to_string(),
    })?;

    let header_names: Vec<String> = header.iter().map(|c| c.to_string().trim().to_string()).collect();
    let col = resolve_columns(&header_names)?;

    let mut records = Vec::new();
    for row in rows {
        let cell = |i: usize| -> String {
            row.get(i)
                .filter(|c| !c.is_empty())
                .map(|c| c.to_string().trim().to_string())
                .unwrap_or_default()
        };

        let item_name = {
            let s = cell(col.item_name);
            if s.is_empty() { None } else { Some(s) }
        };
        let claim_no = {
            let s = cell(col.claim_no);
            if s.is_empty() { None } else { Some(s) }
        };

        records.push(RawRecord {
            treatment_place: cell(col.treatment_place),
            item_name,
            unit: cell(col.unit),
            qty: cell(col.qty),
            amount_bill: cell(col.amount_bill),
            claim_no,
        });
    }

    Ok(records)
}

/// Read a CSV export of the same schema.
pub fn load_csv(path: &Path) -> Result<Vec<RawRecord>, SourceError> {
    let mut rdr = csv::Reader::from_path(path).map_err(|e| SourceError::SourceUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| SourceError::SourceUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    resolve_columns(&headers)?;

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: RawRecord = result.map_err(|e| SourceError::SourceUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}

#[derive(Debug)]
struct ColumnIndex {
    treatment_place: usize,
    item_name: usize,
    unit: usize,
    qty: usize,
    amount_bill: usize,
    claim_no: usize,
}

/// Map required column names to positions, failing on the first absent one.
fn resolve_columns(headers: &[String]) -> Result<ColumnIndex, SourceError> {
    let find = |name: &str| -> Result<usize, SourceError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SourceError::MissingColumn {
                column: name.to_string(),
            })
    };

    for column in REQUIRED_COLUMNS {
        find(column)?;
    }

    Ok(ColumnIndex {
        treatment_place: find(COL_TREATMENT_PLACE)?,
        item_name: find(COL_ITEM_NAME)?,
        unit: find(COL_UNIT)?,
        qty: find(COL_QTY)?,
        amount_bill: find(COL_AMOUNT_BILL)?,
        claim_no: find(COL_CLAIM_NO)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV_HEADER: &str = "ClaimNo,TreatmentPlace,Nama Item Garda Medika,Satuan,Qty,Amount Bill";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv_happy_path() {
        let file = write_csv(&[
            CSV_HEADER,
            "C001,RS Harapan,Paracetamol 500mg,Tablet,2,10.5",
            ",RS Medika,Ibuprofen,Tablet,1,bad",
        ]);

        let records = load_csv(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].treatment_place, "RS Harapan");
        assert_eq!(records[0].item_name.as_deref(), Some("Paracetamol 500mg"));
        assert_eq!(records[0].claim_no.as_deref(), Some("C001"));
        assert_eq!(records[1].amount_bill, "bad");
        assert!(records[1].claim_no.is_none() || records[1].claim_no.as_deref() == Some(""));
    }

    #[test]
    fn test_load_csv_missing_column_fails_fast() {
        let file = write_csv(&[
            "ClaimNo,TreatmentPlace,Nama Item Garda Medika,Satuan,Qty",
            "C001,RS Harapan,Paracetamol,Tablet,2",
        ]);

        let err = load_csv(file.path()).unwrap_err();
        match err {
            SourceError::MissingColumn { column } => assert_eq!(column, "Amount Bill"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv(Path::new("/nonexistent/billing.csv")).unwrap_err();
        assert!(matches!(err, SourceError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_load_xlsx_missing_file() {
        let err = load_xlsx(Path::new("/nonexistent/billing.xlsx"), "ALL").unwrap_err();
        assert!(matches!(err, SourceError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_load_table_dispatches_csv_by_extension() {
        let file = write_csv(&[CSV_HEADER, "C001,RS Harapan,Paracetamol,Tablet,2,100"]);
        let records = load_table(file.path(), "ALL").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_resolve_columns_reports_first_missing() {
        let headers: Vec<String> = vec!["Satuan".to_string(), "Qty".to_string()];
        let err = resolve_columns(&headers).unwrap_err();
        match err {
            SourceError::MissingColumn { column } => assert_eq!(column, COL_TREATMENT_PLACE),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }
}
