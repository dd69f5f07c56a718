use std::sync::Arc;

use crate::config::Config;
use crate::document::store::DocumentStore;
use crate::export::clipboard::ClipboardSink;
use crate::fetch::images::ImageSearch;
use crate::fetch::ContentFetcher;
use crate::llm_client::TextModel;
use crate::persistence::SnapshotStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one live document; every write goes through it.
    pub store: Arc<DocumentStore>,
    pub snapshots: SnapshotStore,
    /// Gemini in production; a scripted model in tests.
    pub assistant: Arc<dyn TextModel>,
    pub fetcher: Arc<dyn ContentFetcher>,
    pub images: Arc<dyn ImageSearch>,
    pub clipboard: Arc<dyn ClipboardSink>,
    pub config: Config,
}
