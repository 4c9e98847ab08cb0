//! Pre-deployment validation.

mod checks;
mod report;
mod validator;

pub use checks::{analyze_record, check_attachments, check_static_analysis, check_uniqueness, Check};
pub use report::{ValidationReport, ValidationWarning};
pub use validator::{Validator, ValidatorConfig};
