use crate::{format, App, Result};
use std::path::Path;

impl App {
    /// Import a single file
    pub async fn import_file(&self, path: &Path, json: bool) -> Result<String> {
        let outcome = self.importer.import_file(path).await?;
        format::emit(json, &outcome, |o| format::import_outcome(path, o))
    }

    /// Import everything under `dir`, or the configured incoming folder
    pub async fn import_incoming(&self, dir: Option<&Path>, json: bool) -> Result<String> {
        let dir = dir.unwrap_or(self.config.import.incoming_path.as_path());
        let summary = self.importer.import_directory(dir).await?;
        format::emit(json, &summary, format::import_summary)
    }
}
