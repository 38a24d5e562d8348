//! Application state for the virtual TA server

use std::sync::Arc;

use crate::config::VirtualTaConfig;
use crate::error::Result;
use crate::pipeline::VirtualTa;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: VirtualTaConfig,
    /// Question-answering pipeline
    virtual_ta: Arc<VirtualTa>,
}

impl AppState {
    /// Create state with the Gemini-backed pipeline
    pub fn new(config: VirtualTaConfig) -> Result<Self> {
        let virtual_ta = VirtualTa::from_config(&config)?;
        Ok(Self::with_virtual_ta(config, virtual_ta))
    }

    /// Create state around an existing pipeline
    pub fn with_virtual_ta(config: VirtualTaConfig, virtual_ta: VirtualTa) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                virtual_ta: Arc::new(virtual_ta),
            }),
        }
    }

    pub fn config(&self) -> &VirtualTaConfig {
        &self.inner.config
    }

    pub fn virtual_ta(&self) -> Arc<VirtualTa> {
        Arc::clone(&self.inner.virtual_ta)
    }
}
