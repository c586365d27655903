pub mod listing;
pub mod model;

// Re-export commonly used types/functions for the binaries
pub use listing::{build_report, render_text, Report, SlotOut};
pub use model::{load_raw_bin, parse_word};
