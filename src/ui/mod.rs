pub mod charts;
pub mod dashboard;
pub mod status;
pub mod table;

pub use dashboard::{render_dashboard, render_focus};
pub use status::{render_help_bar, render_status_bar};
pub use table::render_raw_tables;
