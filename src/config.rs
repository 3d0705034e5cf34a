//! Analysis configuration.
//!
//! A single struct resolved once by the caller and read by every pass.

use std::rc::Rc;

/// File name used when the caller does not provide one.
pub const DEFAULT_FILE_NAME: &str = "<input>";

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Name reported in log output for this compilation unit.
    pub file_name: Rc<String>,

    /// Run the call graph cycle check before type inference.
    pub check_dependencies: bool,

    /// Drop a diagnostic identical to one already reported. Call-site
    /// re-analysis walks a body once per call and would otherwise repeat it.
    pub deduplicate_diagnostics: bool,

    /// Let the type checker enter functions that sit on a reported cycle. The
    /// re-entrancy guard still stops a function from re-entering itself.
    pub infer_cyclic_functions: bool,
}

impl AnalyzerConfig {
    pub fn for_file(file_name: impl Into<String>) -> Self {
        AnalyzerConfig {
            file_name: Rc::new(file_name.into()),
            ..Default::default()
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            file_name: Rc::new(String::from(DEFAULT_FILE_NAME)),
            check_dependencies: true,
            deduplicate_diagnostics: true,
            infer_cyclic_functions: false,
        }
    }
}
