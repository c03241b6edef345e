/// Pattern for matching expected errors in snapshot tests.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedErrorPattern {
    /// Error variant name match (e.g., `# EXPECTED_ERROR_TYPE: MissingFragment`)
    ExactType(String),
    /// Substring match (e.g., `# EXPECTED_ERROR_CONTAINS: Missing fragment`)
    Contains(String),
}

impl ExpectedErrorPattern {
    /// Type patterns match against the error's `Debug` output (which starts
    /// with the variant name); substring patterns against its `Display`
    /// output.
    pub fn matches(&self, error_debug: &str, error_display: &str) -> bool {
        match self {
            ExpectedErrorPattern::ExactType(type_name) =>
                error_debug.contains(type_name.as_str()),
            ExpectedErrorPattern::Contains(substring) =>
                error_display.contains(substring.as_str()),
        }
    }
}

impl std::fmt::Display for ExpectedErrorPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpectedErrorPattern::ExactType(type_name) => {
                write!(f, "ERROR_TYPE: {type_name}")
            }
            ExpectedErrorPattern::Contains(substring) => {
                write!(f, "ERROR_CONTAINS: {substring}")
            }
        }
    }
}
