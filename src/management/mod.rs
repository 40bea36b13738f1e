mod report;
pub mod summary;

pub use report::ReportManager;
pub use report::render_record;
