use std::sync::Arc;

use crate::domain::layout::{ComponentRegistry, LayoutRepository};

pub struct LayoutQueryService {
    pub(super) registry: Arc<ComponentRegistry>,
    pub(super) repo: Arc<dyn LayoutRepository>,
}

impl LayoutQueryService {
    pub fn new(registry: Arc<ComponentRegistry>, repo: Arc<dyn LayoutRepository>) -> Self {
        Self { registry, repo }
    }
}
