use rowan::TextRange;

/// Diagnostic kinds raised by the lowering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Parameter & locals lowering
    InvalidParameterKind,
    DuplicateLocalStorage,

    // State lowering: extract validation
    UnsupportedExtractArity,
    InvalidExtractArgument,
    UnsupportedAggregateKind,

    // Passed over, lowering continues
    ExtractTargetIgnored,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::ExtractTargetIgnored => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameterKind => {
                Some("parser parameters must be `packet_in` or a struct/header type")
            }
            Self::UnsupportedAggregateKind => {
                Some("tuples are flat; header stacks and unions cannot be indexed")
            }
            Self::ExtractTargetIgnored => Some("extract into a `base.field` member instead"),
            Self::DuplicateLocalStorage => Some("value sets need distinct control-plane names"),
            _ => None,
        }
    }

    /// Base message for this kind, used when no detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::InvalidParameterKind => "invalid parser parameter",
            Self::DuplicateLocalStorage => "value sets share a storage field",
            Self::UnsupportedExtractArity => "unsupported number of arguments to `extract`",
            Self::InvalidExtractArgument => "invalid `extract` argument",
            Self::UnsupportedAggregateKind => "header stack / header union is unsupported",
            Self::ExtractTargetIgnored => "`extract` target is not a member access",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnsupportedExtractArity => "`extract` takes 1 argument, found {}".to_string(),
            Self::InvalidExtractArgument => "{}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Offending construct in the parser source, when the frontend recorded one.
    pub(crate) range: Option<TextRange>,
    pub(crate) message: String,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, range: Option<TextRange>) -> Self {
        Self {
            kind,
            range,
            message: kind.fallback_message().to_string(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> Option<TextRange> {
        self.range
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.range {
            Some(range) => write!(
                f,
                "{} at {}..{}: {}",
                self.severity(),
                u32::from(range.start()),
                u32::from(range.end()),
                self.message
            )?,
            None => write!(f, "{}: {}", self.severity(), self.message)?,
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
