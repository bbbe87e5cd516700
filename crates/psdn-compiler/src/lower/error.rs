use psdn_core::Span;

use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Fatal lowering errors. Each aborts the current unit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LowerError {
    #[error("invalid parser parameter: {0}")]
    InvalidParameterKind(String),

    #[error("invalid extract argument: {0}")]
    InvalidExtractArgument(String),

    #[error("extract takes 1 argument, found {0}")]
    UnsupportedExtractArity(usize),

    #[error("unsupported aggregate: {0}")]
    UnsupportedAggregateKind(String),

    #[error("duplicate local storage: {0}")]
    DuplicateLocalStorage(String),
}

impl LowerError {
    pub fn diagnostic_kind(&self) -> DiagnosticKind {
        match self {
            LowerError::InvalidParameterKind(_) => DiagnosticKind::InvalidParameterKind,
            LowerError::InvalidExtractArgument(_) => DiagnosticKind::InvalidExtractArgument,
            LowerError::UnsupportedExtractArity(_) => DiagnosticKind::UnsupportedExtractArity,
            LowerError::UnsupportedAggregateKind(_) => DiagnosticKind::UnsupportedAggregateKind,
            LowerError::DuplicateLocalStorage(_) => DiagnosticKind::DuplicateLocalStorage,
        }
    }

    fn detail(&self) -> String {
        match self {
            LowerError::InvalidParameterKind(d)
            | LowerError::InvalidExtractArgument(d)
            | LowerError::UnsupportedAggregateKind(d)
            | LowerError::DuplicateLocalStorage(d) => d.clone(),
            LowerError::UnsupportedExtractArity(n) => n.to_string(),
        }
    }

    /// Record this error at `span` and hand it back for returning.
    pub(crate) fn report(self, diagnostics: &mut Diagnostics, span: Option<Span>) -> Self {
        diagnostics
            .report(self.diagnostic_kind(), span)
            .message(self.detail())
            .emit();
        self
    }

    /// Like [`report`](Self::report), with an extra hint after the kind's default one.
    pub(crate) fn report_with_hint(
        self,
        diagnostics: &mut Diagnostics,
        span: Option<Span>,
        hint: impl Into<String>,
    ) -> Self {
        diagnostics
            .report(self.diagnostic_kind(), span)
            .message(self.detail())
            .hint(hint)
            .emit();
        self
    }
}
