use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

use crate::error::CsbError;

/// A failure while processing one project of a batch.
#[derive(Debug, Clone)]
pub struct ProcessingError {
    pub file_path: Option<PathBuf>,
    pub error_type: ErrorType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorType {
    FileNotFound,
    UnsupportedFormat,
    InvalidProject,
    GenerationFailed,
    WriteFailed,
}

/// Collects batch failures and decides whether processing goes on.
pub struct ErrorHandler {
    continue_on_error: bool,
    errors: Vec<ProcessingError>,
    warnings: Vec<String>,
}

impl ErrorHandler {
    pub fn new(continue_on_error: bool) -> Self {
        Self {
            continue_on_error,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record `error`; returns whether the batch should continue.
    pub fn handle_error(&mut self, error: ProcessingError) -> bool {
        let path = error
            .file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        warn!(path = %path, kind = ?error.error_type, "{}", error.message);

        let should_continue = self.continue_on_error;
        if should_continue {
            eprintln!("❌ Error processing {}: {}", path, error.message);
        }
        self.errors.push(error);
        should_continue
    }

    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn get_summary(&self) -> ErrorSummary {
        let mut error_counts = BTreeMap::new();
        for error in &self.errors {
            *error_counts.entry(error.error_type).or_insert(0) += 1;
        }

        ErrorSummary {
            total_errors: self.errors.len(),
            total_warnings: self.warnings.len(),
            error_counts,
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
        }
    }

    pub fn print_summary(&self) {
        if !self.has_errors() && !self.has_warnings() {
            return;
        }

        println!("\n📊 Processing Summary");
        println!("===================");

        if self.has_warnings() {
            println!("⚠️  Warnings: {}", self.warnings.len());
            for warning in &self.warnings {
                println!("   {}", warning);
            }
        }

        if self.has_errors() {
            println!("❌ Errors: {}", self.errors.len());
            for (error_type, count) in self.get_summary().error_counts {
                println!("   {:?}: {}", error_type, count);
            }
        }
    }
}

#[derive(Debug)]
pub struct ErrorSummary {
    pub total_errors: usize,
    pub total_warnings: usize,
    pub error_counts: BTreeMap<ErrorType, usize>,
    pub errors: Vec<ProcessingError>,
    pub warnings: Vec<String>,
}

impl ProcessingError {
    pub fn file_not_found(path: PathBuf) -> Self {
        Self {
            file_path: Some(path),
            error_type: ErrorType::FileNotFound,
            message: "File not found".to_string(),
        }
    }

    pub fn generation_failed(path: PathBuf, details: String) -> Self {
        Self {
            file_path: Some(path),
            error_type: ErrorType::GenerationFailed,
            message: details,
        }
    }

    pub fn write_failed(path: PathBuf, details: String) -> Self {
        Self {
            file_path: Some(path),
            error_type: ErrorType::WriteFailed,
            message: format!("Could not write output: {}", details),
        }
    }

    /// Classify a library error raised while processing `path`.
    pub fn from_csb(path: PathBuf, error: &CsbError) -> Self {
        let error_type = match error {
            CsbError::UnsupportedFormat { .. } => ErrorType::UnsupportedFormat,
            CsbError::InvalidProject { .. } => ErrorType::InvalidProject,
            CsbError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorType::FileNotFound
            }
            CsbError::Io { .. } => ErrorType::WriteFailed,
            CsbError::TemplateRegister { .. }
            | CsbError::TemplateRender { .. }
            | CsbError::UnknownElement(_)
            | CsbError::UnknownStep(_) => ErrorType::GenerationFailed,
        };
        Self {
            file_path: Some(path),
            error_type,
            message: error.to_string(),
        }
    }
}
