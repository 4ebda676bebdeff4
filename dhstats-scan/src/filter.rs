//! Document selection for the corpus scan

use std::path::Path;

/// Which files under the base directory count as feature documents
#[derive(Debug, Clone)]
pub struct DocumentFilter {
    document_name: String,
    excluded_dirs: Vec<String>,
}

impl DocumentFilter {
    pub fn new(document_name: impl Into<String>, excluded_dirs: Vec<String>) -> Self {
        Self {
            document_name: document_name.into(),
            excluded_dirs,
        }
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    /// A feature document: named exactly like the configured document and not
    /// sitting directly in the base directory (that one is the aggregate index).
    pub fn is_feature_document<P: AsRef<Path>>(&self, file_path: P, base_dir: &Path) -> bool {
        let path = file_path.as_ref();

        let name_matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name == self.document_name)
            .unwrap_or(false);

        name_matches && path.parent() != Some(base_dir)
    }

    /// Check if a directory should be traversed. Hidden directories are walked
    /// like any other; only the configured names are pruned.
    pub fn should_traverse_directory<P: AsRef<Path>>(&self, dir_path: P) -> bool {
        let Some(name) = dir_path.as_ref().file_name().and_then(|name| name.to_str()) else {
            return true;
        };

        !self.excluded_dirs.iter().any(|excluded| excluded == name)
    }
}

impl Default for DocumentFilter {
    fn default() -> Self {
        let scan = dhstats_core::ScanConfig::default();
        Self::new(scan.document_name, scan.excluded_dirs)
    }
}
