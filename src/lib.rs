// Medika Dashboard - Core Library
// Data preparation and aggregation pipeline for Garda Medika billing
// line items, plus the TUI dashboard shell behind the `tui` feature.

pub mod aggregate;
pub mod cleaner;
pub mod error;
pub mod filter;
pub mod loader;
pub mod record;
pub mod views;
pub mod wordcloud;

#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use aggregate::{aggregate, format_rupiah, GroupSummary, ItemGroup};
pub use cleaner::clean;
pub use error::SourceError;
pub use filter::{filter_by_place, treatment_places, FilteredView, Selection, ALL_PLACES};
pub use loader::{load_csv, load_table, load_xlsx, RawRecord};
pub use record::{BillingRecord, DEFAULT_SHEET, REQUIRED_COLUMNS};
pub use views::{handle_view_request, RenderPayload, ViewKind, NO_DATA_MESSAGE};
pub use wordcloud::{
    extract_text, word_frequencies, CloudImage, CloudRenderer, CloudWord, FrequencyCloud,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
