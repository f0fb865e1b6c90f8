mod audit;
mod blast;
mod list;

pub use audit::run_audit;
pub use blast::run_blast_radius;
pub use list::list_operations;

use chrono::{Local, Timelike};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}
