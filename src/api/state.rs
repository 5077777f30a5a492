//! Application state for the payroll export API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::export::PayrollExporter;

/// Shared application state.
///
/// Holds the exporter, which owns the loaded configuration and the tip data
/// source.
pub struct AppState<S> {
    exporter: Arc<PayrollExporter<S>>,
}

impl<S> AppState<S> {
    /// Creates a new application state around an exporter.
    pub fn new(exporter: PayrollExporter<S>) -> Self {
        Self {
            exporter: Arc::new(exporter),
        }
    }

    /// Returns the shared exporter.
    pub fn exporter(&self) -> &PayrollExporter<S> {
        &self.exporter
    }
}

// Derive would add an `S: Clone` bound.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            exporter: Arc::clone(&self.exporter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollConfig;
    use crate::tips::InMemoryTipSource;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState<InMemoryTipSource>>();
    }

    #[test]
    fn test_clones_share_exporter() {
        let state = AppState::new(PayrollExporter::new(
            PayrollConfig::default(),
            InMemoryTipSource::new(),
        ));
        let clone = state.clone();
        assert!(std::ptr::eq(state.exporter(), clone.exporter()));
    }
}
