use std::sync::Arc;

use crate::{
    application::ports::time::Clock,
    domain::layout::{ComponentRegistry, LayoutRepository},
};

pub struct LayoutCommandService {
    pub(super) registry: Arc<ComponentRegistry>,
    pub(super) repo: Arc<dyn LayoutRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl LayoutCommandService {
    pub fn new(
        registry: Arc<ComponentRegistry>,
        repo: Arc<dyn LayoutRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            repo,
            clock,
        }
    }
}
