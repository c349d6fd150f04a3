mod report;
mod spinner;

pub use report::{monitor_reporter, print_monitor_banner};
pub use spinner::CheckSpinner;
