//! # Assessment Session
//!
//! One [`AssessmentSession`] holds all mutable state of a run: the analyzed
//! document list, the per-control evidence store, and the latest results.
//! A run has two strictly ordered phases:
//!
//! 1. **Analysis.** Each document is extracted, recorded, and scanned
//!    against every control. Evidence accumulates in the store.
//! 2. **Assessment.** [`AssessmentSession::generate_assessment`] classifies
//!    every catalog control from its accumulated evidence, replacing any
//!    earlier results. Aggregation, recommendations and reports read those
//!    results.
//!
//! Sessions are not shared across runs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};

use otcc_catalog::ControlCatalog;
use otcc_core::{AnalyzedDocument, DocumentFormat, DocumentType, ExtractError, TextExtractor};

use crate::aggregate::{self, DomainScore};
use crate::error::{AssessError, AssessResult};
use crate::evaluation::{self, ControlAssessment};
use crate::evidence::ControlMatcher;
use crate::recommendation::{self, Recommendation};
use crate::report::{AssessmentReport, DetailedExport, ReportInputs};
use crate::store::EvidenceStore;

/// Date format of `assessment_date` in reports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome of offering one document to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// Text was extracted and scanned.
    Analyzed,
    /// Extraction failed; the document was recorded with empty text.
    ExtractionFailed,
    /// The format is not supported; the document was not recorded.
    Skipped,
}

impl DocumentOutcome {
    /// Whether the document counts toward documents analyzed.
    pub fn is_recorded(&self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

/// State of a single assessment run.
#[derive(Debug)]
pub struct AssessmentSession {
    catalog: ControlCatalog,
    matchers: Vec<ControlMatcher>,
    store: EvidenceStore,
    documents: Vec<AnalyzedDocument>,
    results: Vec<ControlAssessment>,
    /// Set when evidence arrived after the last assessment.
    stale: bool,
    assessment_date: NaiveDate,
}

impl AssessmentSession {
    /// Start a session over `catalog`, dated today (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`AssessError::Pattern`] if a keyword cannot be compiled.
    pub fn new(catalog: ControlCatalog) -> AssessResult<Self> {
        let matchers = catalog
            .iter()
            .map(ControlMatcher::new)
            .collect::<AssessResult<Vec<_>>>()?;
        let store = EvidenceStore::for_catalog(&catalog);
        tracing::debug!(catalog = catalog.name(), controls = catalog.len(), "session created");
        Ok(Self {
            catalog,
            matchers,
            store,
            documents: Vec::new(),
            results: Vec::new(),
            stale: true,
            assessment_date: Utc::now().date_naive(),
        })
    }

    /// Override the assessment date stamped on reports.
    pub fn with_assessment_date(mut self, date: NaiveDate) -> Self {
        self.assessment_date = date;
        self
    }

    pub fn catalog(&self) -> &ControlCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &EvidenceStore {
        &self.store
    }

    /// Documents recorded so far, in analysis order.
    pub fn documents(&self) -> &[AnalyzedDocument] {
        &self.documents
    }

    /// Results of the latest [`generate_assessment`](Self::generate_assessment).
    pub fn results(&self) -> &[ControlAssessment] {
        &self.results
    }

    /// `YYYY-MM-DD` date stamped on reports.
    pub fn assessment_date(&self) -> String {
        self.assessment_date.format(DATE_FORMAT).to_string()
    }

    // -----------------------------------------------------------------------
    // Analysis
    // -----------------------------------------------------------------------

    /// Record a document and scan its text against every control.
    ///
    /// Returns the number of evidence items found.
    pub fn analyze_text(
        &mut self,
        file_path: impl Into<String>,
        text: &str,
        document_type: DocumentType,
    ) -> usize {
        let document = AnalyzedDocument::new(file_path, document_type, text);
        let mut matches = 0;
        for (control, matcher) in self.catalog.iter().zip(&self.matchers) {
            let items = matcher.find_evidence(control, text, &document);
            matches += items.len();
            self.store.extend(matcher.control_id(), items);
        }
        tracing::debug!(
            file = %document.file_name,
            document_type = %document.document_type,
            text_length = document.text_length,
            matches,
            "document scanned"
        );
        self.documents.push(document);
        self.stale = true;
        matches
    }

    /// Extract and analyze one document file.
    ///
    /// `document_type` defaults to a guess from the file name. Unsupported
    /// extensions are skipped. Extraction failures are logged and the
    /// document is analyzed as empty text.
    pub fn analyze_document<E: TextExtractor + ?Sized>(
        &mut self,
        path: &Path,
        document_type: Option<DocumentType>,
        extractor: &E,
    ) -> DocumentOutcome {
        if DocumentFormat::from_path(path).is_none() {
            tracing::warn!(file = %path.display(), "unsupported file type, skipping");
            return DocumentOutcome::Skipped;
        }

        let (text, outcome) = match extractor.extract_text(path) {
            Ok(text) => (text, DocumentOutcome::Analyzed),
            Err(ExtractError::UnsupportedFormat { extension, .. }) => {
                tracing::warn!(file = %path.display(), extension = %extension, "unsupported file type, skipping");
                return DocumentOutcome::Skipped;
            }
            Err(err) => {
                tracing::warn!(file = %path.display(), error = %err, "text extraction failed, analyzing as empty");
                (String::new(), DocumentOutcome::ExtractionFailed)
            }
        };

        let document_type = document_type.unwrap_or_else(|| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            DocumentType::guess_from_file_name(&name)
        });
        self.analyze_text(path.to_string_lossy().into_owned(), &text, document_type);
        outcome
    }

    /// Analyze every supported regular file directly inside `dir`.
    ///
    /// Files are processed in file-name order; types are guessed from file
    /// names. Returns the number of documents recorded.
    ///
    /// # Errors
    ///
    /// Returns [`AssessError::Directory`] if the directory cannot be listed.
    pub fn analyze_directory<E: TextExtractor + ?Sized>(
        &mut self,
        dir: &Path,
        extractor: &E,
    ) -> AssessResult<usize> {
        let files = supported_files(dir)?;
        tracing::info!(directory = %dir.display(), files = files.len(), "analyzing directory");
        let recorded = files
            .iter()
            .map(|path| self.analyze_document(path, None, extractor))
            .filter(DocumentOutcome::is_recorded)
            .count();
        Ok(recorded)
    }

    // -----------------------------------------------------------------------
    // Assessment
    // -----------------------------------------------------------------------

    /// Classify every catalog control, replacing earlier results.
    pub fn generate_assessment(&mut self) -> &[ControlAssessment] {
        self.results = self
            .catalog
            .iter()
            .map(|control| evaluation::assess(control, self.store.items(&control.control_id)))
            .collect();
        self.stale = false;
        tracing::info!(
            controls = self.results.len(),
            documents = self.documents.len(),
            evidence = self.store.total_items(),
            "assessment generated"
        );
        &self.results
    }

    fn ensure_assessed(&mut self) {
        if self.stale {
            self.generate_assessment();
        }
    }

    pub fn overall_compliance(&self) -> f64 {
        aggregate::overall_compliance(&self.results)
    }

    pub fn domain_scores(&self) -> Vec<DomainScore> {
        aggregate::domain_scores(&self.results)
    }

    pub fn generate_recommendations(&self) -> Vec<Recommendation> {
        recommendation::generate_recommendations(&self.catalog, &self.results)
    }

    /// Build the summary report, reassessing if documents were analyzed
    /// since the last assessment.
    pub fn report(&mut self, assessment_id: &str) -> AssessmentReport {
        self.ensure_assessed();
        let recommendations = self.generate_recommendations();
        let assessment_date = self.assessment_date();
        AssessmentReport::build(ReportInputs {
            assessment_id,
            assessment_date: &assessment_date,
            overall_score: self.overall_compliance(),
            domain_scores: self.domain_scores(),
            results: &self.results,
            recommendations: &recommendations,
            controls_assessed: self.catalog.len(),
            documents_analyzed: self.documents.len(),
        })
    }

    /// Build the detailed export, reassessing if documents were analyzed
    /// since the last assessment.
    ///
    /// # Errors
    ///
    /// Returns [`AssessError::Json`] if the results cannot be serialized for
    /// digesting.
    pub fn detailed_export(&mut self) -> AssessResult<DetailedExport> {
        self.ensure_assessed();
        DetailedExport::new(
            self.overall_compliance(),
            self.assessment_date(),
            self.results.clone(),
            self.generate_recommendations(),
            self.documents.clone(),
        )
    }
}

/// Regular files in `dir` with a supported extension, sorted by file name.
fn supported_files(dir: &Path) -> AssessResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| AssessError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AssessError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && DocumentFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::ComplianceStatus;

    struct MapExtractor;

    impl TextExtractor for MapExtractor {
        fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
            match name.as_deref() {
                Some("corrupt.pdf") => Err(ExtractError::Decode {
                    path: path.to_path_buf(),
                    reason: "bad xref".to_string(),
                }),
                _ => Ok("The firewall rules shall be reviewed.".to_string()),
            }
        }
    }

    fn session() -> AssessmentSession {
        AssessmentSession::new(ControlCatalog::embedded().unwrap())
            .unwrap()
            .with_assessment_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn empty_session_assesses_every_control_non_compliant() {
        let mut s = session();
        let results = s.generate_assessment().to_vec();
        assert_eq!(results.len(), 6);
        assert!(results
            .iter()
            .all(|r| r.status == ComplianceStatus::NonCompliant && r.confidence == 0.9));
        assert_eq!(s.overall_compliance(), 0.0);
    }

    #[test]
    fn results_follow_catalog_order() {
        let mut s = session();
        let ids: Vec<String> = s
            .generate_assessment()
            .iter()
            .map(|r| r.control_id.to_string())
            .collect();
        assert_eq!(ids, vec!["1-1-1", "1-1-3", "2-4-1", "2-11-1", "3-1-1", "4-1-1"]);
    }

    #[test]
    fn analyze_text_records_document_and_evidence() {
        let mut s = session();
        let found = s.analyze_text("/docs/net_policy.txt", "A DMZ and a firewall.", DocumentType::Policy);
        assert_eq!(found, 2);
        assert_eq!(s.documents().len(), 1);
        assert_eq!(s.documents()[0].file_name, "net_policy.txt");
        assert_eq!(s.store().count(&"2-4-1".parse().unwrap()), 2);
    }

    #[test]
    fn unsupported_extension_is_skipped_and_not_counted() {
        let mut s = session();
        let outcome = s.analyze_document(Path::new("/docs/sheet.xlsx"), None, &MapExtractor);
        assert_eq!(outcome, DocumentOutcome::Skipped);
        assert!(s.documents().is_empty());
    }

    #[test]
    fn extraction_failure_counts_as_empty_document() {
        let mut s = session();
        let outcome = s.analyze_document(Path::new("/docs/corrupt.pdf"), None, &MapExtractor);
        assert_eq!(outcome, DocumentOutcome::ExtractionFailed);
        assert_eq!(s.documents().len(), 1);
        assert_eq!(s.documents()[0].text_length, 0);
        assert_eq!(s.store().total_items(), 0);
    }

    #[test]
    fn document_type_is_guessed_when_absent() {
        let mut s = session();
        s.analyze_document(Path::new("/docs/network_diagram.txt"), None, &MapExtractor);
        s.analyze_document(Path::new("/docs/notes.txt"), Some(DocumentType::Standard), &MapExtractor);
        assert_eq!(s.documents()[0].document_type, DocumentType::Diagram);
        assert_eq!(s.documents()[1].document_type, DocumentType::Standard);
    }

    #[test]
    fn report_after_more_analysis_reflects_new_evidence() {
        let mut s = session();
        s.analyze_text("a.txt", "nothing relevant here", DocumentType::Unknown);
        let first = s.report("r1");
        assert_eq!(first.documents_analyzed, 1);
        assert_eq!(first.overall_score, 0.0);

        s.analyze_text(
            "b_policy.txt",
            "Our cybersecurity policy shall be reviewed annually. See review schedule.",
            DocumentType::Policy,
        );
        let second = s.report("r2");
        assert_eq!(second.documents_analyzed, 2);
        assert!(second.overall_score > 0.0);
        let export = s.detailed_export().unwrap();
        assert_eq!(export.documents_analyzed, 2);
        assert!(export.control_results.iter().any(|r| r.evidence_count > 0));
    }

    #[test]
    fn reassessment_replaces_results() {
        let mut s = session();
        s.generate_assessment();
        let before = s.results()[2].evidence_count;
        s.analyze_text("fw.txt", "firewall firewall", DocumentType::Unknown);
        s.generate_assessment();
        assert_eq!(s.results().len(), 6);
        assert_eq!(before, 0);
        assert_eq!(s.results()[2].evidence_count, 2);
    }

    #[test]
    fn report_is_dated_and_counts_catalog_controls() {
        let mut s = session();
        s.analyze_text("a.txt", "nothing here", DocumentType::Unknown);
        let report = s.report("run-7");
        assert_eq!(report.assessment_date, "2024-03-01");
        assert_eq!(report.assessment_id, "run-7");
        assert_eq!(report.controls_assessed, 6);
        assert_eq!(report.documents_analyzed, 1);
        assert_eq!(report.findings.len(), 6);
        assert_eq!(report.findings[0].control_id.as_str(), "2-11-1");
    }

    #[test]
    fn directory_listing_errors_carry_path() {
        let mut s = session();
        let err = s
            .analyze_directory(Path::new("/definitely/not/here"), &MapExtractor)
            .unwrap_err();
        assert!(matches!(err, AssessError::Directory { .. }));
    }

    #[test]
    fn directory_analysis_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b_policy.txt", "a_report.md", "c.xlsx", "corrupt.pdf"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let mut s = session();
        let recorded = s.analyze_directory(dir.path(), &MapExtractor).unwrap();
        assert_eq!(recorded, 3);
        let names: Vec<&str> = s.documents().iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(names, vec!["a_report.md", "b_policy.txt", "corrupt.pdf"]);
        assert_eq!(s.documents()[0].document_type, DocumentType::Report);
    }

    #[test]
    fn detailed_export_is_stable_across_identical_runs() {
        let run = || {
            let mut s = session();
            s.analyze_text("p.txt", "firewall rules and network diagram", DocumentType::Policy);
            s.detailed_export().unwrap()
        };
        let (a, b) = (run(), run());
        assert_eq!(a.results_digest, b.results_digest);
        assert_eq!(a, b);
    }
}
