use log::debug;

use crate::Position;

use super::errors::{Error, ErrorImpl};

/// Accumulates the diagnostics of every pass in reporting order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
    deduplicate: bool,
    muted: bool,
}

impl Diagnostics {
    pub fn new(deduplicate: bool) -> Self {
        Diagnostics {
            errors: vec![],
            deduplicate,
            muted: false,
        }
    }

    /// A sink that records nothing, for queries replaying analysed code.
    pub fn muted() -> Self {
        Diagnostics {
            errors: vec![],
            deduplicate: true,
            muted: true,
        }
    }

    pub fn report(&mut self, error_impl: ErrorImpl, position: Position) {
        if self.muted {
            return;
        }
        let error = Error::new(error_impl, position);
        if self.deduplicate && self.errors.contains(&error) {
            return;
        }
        debug!("diagnostic: {}", error);
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}
