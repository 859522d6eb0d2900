//! Dependency closure engine.
//!
//! ```text
//! seed (find_by_name / unit) → worklist → extract → resolve → normalize → table
//!                                  ↑                                       │
//!                                  └──── unseen in-source declaring units ─┘
//! ```

mod computer;
mod extract;
mod report;
mod table;

pub use computer::ClosureComputer;
pub use extract::extract;
pub use report::{Report, ReportFormat, Reporter};
pub use table::Closure;
