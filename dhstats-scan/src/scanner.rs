//! Corpus scanner
//!
//! Walks the design-history tree, analyzes every feature document and isolates
//! per-document failures so one bad file never aborts the batch.

use crate::analyzer::FeatureAnalyzer;
use crate::filter::DocumentFilter;
use dhstats_core::{ErrorContext, Feature, ScanConfig, StatsError, StatsResult};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// A document that could not be turned into a feature
#[derive(Debug)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub error: StatsError,
}

/// Everything a scan produced, in discovery order
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub features: Vec<Feature>,
    pub failures: Vec<ScanFailure>,
}

/// Scanner over one design-history base directory
#[derive(Debug, Clone)]
pub struct CorpusScanner {
    base_dir: PathBuf,
    filter: DocumentFilter,
    analyzer: FeatureAnalyzer,
}

impl CorpusScanner {
    /// Create a scanner with the default document filter
    pub fn new<P: AsRef<Path>>(base_dir: P) -> StatsResult<Self> {
        Self::with_filter(base_dir, DocumentFilter::default())
    }

    pub fn with_filter<P: AsRef<Path>>(base_dir: P, filter: DocumentFilter) -> StatsResult<Self> {
        Ok(Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            filter,
            analyzer: FeatureAnalyzer::new()?,
        })
    }

    /// Scanner for `root/<scan.base_dir>` honouring the configured filter
    pub fn from_config<P: AsRef<Path>>(root: P, config: &ScanConfig) -> StatsResult<Self> {
        let filter = DocumentFilter::new(config.document_name.clone(), config.excluded_dirs.clone());
        Self::with_filter(root.as_ref().join(&config.base_dir), filter)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Feature records for every readable document, failures already logged
    pub fn scan(&self) -> Vec<Feature> {
        self.scan_with_failures().features
    }

    pub fn scan_with_failures(&self) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        if !self.base_dir.is_dir() {
            warn!(
                base_dir = %self.base_dir.display(),
                "Design history directory not found, nothing to scan"
            );
            return outcome;
        }

        info!(
            base_dir = %self.base_dir.display(),
            document_name = self.filter.document_name(),
            "Scanning design history documents"
        );

        let walker = WalkDir::new(&self.base_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || self.filter.should_traverse_directory(entry.path())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.base_dir.clone());
                    let failure = StatsError::Scan {
                        message: format!("Failed to read directory entry: {}", e),
                        source: Some(Box::new(e)),
                        context: ErrorContext::new("corpus_scanner")
                            .with_operation("walk")
                            .with_metadata("path", &path.display().to_string()),
                    };
                    self.record_failure(&mut outcome, path, failure);
                    continue;
                }
            };

            // Links are not followed for directories, but a linked document
            // still counts when its target is a regular file.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file || !self.filter.is_feature_document(entry.path(), &self.base_dir) {
                continue;
            }

            match self.analyze_document(entry.path()) {
                Ok(feature) => {
                    debug!(
                        document = %entry.path().display(),
                        name = %feature.name,
                        iterations = feature.iterations,
                        "Analyzed feature"
                    );
                    outcome.features.push(feature);
                }
                Err(e) => self.record_failure(&mut outcome, entry.path().to_path_buf(), e),
            }
        }

        info!(
            features = outcome.features.len(),
            failures = outcome.failures.len(),
            "Scan finished"
        );

        outcome
    }

    /// Read one document fully and analyze it
    pub fn analyze_document(&self, path: &Path) -> StatsResult<Feature> {
        let content = std::fs::read_to_string(path).map_err(|e| StatsError::Scan {
            message: format!("Failed to read document: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("corpus_scanner")
                .with_operation("read_document")
                .with_metadata("path", &path.display().to_string())
                .with_suggestion("Check the file is readable UTF-8 text"),
        })?;

        let directory_name = path
            .parent()
            .and_then(|parent| parent.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(self
            .analyzer
            .analyze(&content, &directory_name, &self.relative_path(path)))
    }

    /// `path` relative to the parent of the base directory, `/`-separated
    fn relative_path(&self, path: &Path) -> String {
        let anchor = self.base_dir.parent().unwrap_or(&self.base_dir);
        let relative = path.strip_prefix(anchor).unwrap_or(path);

        relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    fn record_failure(&self, outcome: &mut ScanOutcome, path: PathBuf, failure: StatsError) {
        failure.log();
        outcome.failures.push(ScanFailure {
            path,
            error: failure,
        });
    }
}
