use anyhow::{Context, Result};
use std::env;
use std::path::Path;

use medika_dashboard::{
    aggregate, clean, filter_by_place, format_rupiah, load_table, BillingRecord, Selection,
    DEFAULT_SHEET,
};

const DEFAULT_SOURCE: &str = "data_untuk_visualisasi.xlsx";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "summary" {
        // Plain-text summary mode, no TUI
        run_summary(&args[2..])?;
    } else {
        // Dashboard mode (default)
        run_ui_mode(&args[1..])?;
    }

    Ok(())
}

/// Load and clean the canonical table from (path, sheet) arguments.
fn load_canonical_table(args: &[String]) -> Result<Vec<BillingRecord>> {
    let path = args.first().map(String::as_str).unwrap_or(DEFAULT_SOURCE);
    let sheet = args.get(1).map(String::as_str).unwrap_or(DEFAULT_SHEET);

    let raw = load_table(Path::new(path), sheet)
        .with_context(|| format!("failed to load billing data from {}", path))?;
    let loaded = raw.len();

    let table = clean(raw);
    println!(
        "✓ Loaded {} rows from {} ({} dropped during cleaning)",
        table.len(),
        path,
        loaded - table.len()
    );

    Ok(table)
}

fn run_summary(args: &[String]) -> Result<()> {
    let table = load_canonical_table(args)?;
    let summary = aggregate(&filter_by_place(&table, &Selection::All));

    println!("\n{:<40} {:>18} {:>12}", "Nama Item Garda Medika", "Total Amount Bill", "Total Rows");
    for group in &summary.groups {
        println!(
            "{:<40} {:>18.2} {:>12}",
            group.item_name, group.total_amount_bill, group.total_rows
        );
    }

    println!(
        "\nTotal Amount Bill for all grouped data: {}",
        format_rupiah(summary.total_billed())
    );

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(args: &[String]) -> Result<()> {
    use medika_dashboard::ui;

    let table = load_canonical_table(args)?;
    println!("Starting dashboard... (Press 'q' to quit)\n");

    let mut app = ui::App::new(table);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_args: &[String]) -> Result<()> {
    eprintln!("Dashboard mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print the grouped summary: medika-dashboard summary <file>");
    std::process::exit(1);
}
