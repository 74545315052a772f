//! Moderation handlers.

mod report_misconduct;

pub use report_misconduct::{ReportMisconductCommand, ReportMisconductHandler};
