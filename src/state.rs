use crate::source::SalesSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub title: Arc<str>,
    pub source: Arc<dyn SalesSource>,
}

impl AppState {
    pub fn new(title: impl Into<Arc<str>>, source: Arc<dyn SalesSource>) -> Self {
        Self {
            title: title.into(),
            source,
        }
    }
}
