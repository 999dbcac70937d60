use std::sync::Arc;

use crate::ai::TextGenerator;
use crate::model::ModelManager;

#[derive(Clone)]
pub struct AppState {
    mm: ModelManager,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    pub fn new(mm: ModelManager, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { mm, generator }
    }

    pub fn pool(&self) -> &ModelManager {
        &self.mm
    }

    /// `None` when no API key is configured; the AI pipelines treat that as
    /// "run on defaults".
    pub fn generator(&self) -> Option<&dyn TextGenerator> {
        self.generator.as_deref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("mm", &self.mm)
            .field("generator", &self.generator.is_some())
            .finish()
    }
}
