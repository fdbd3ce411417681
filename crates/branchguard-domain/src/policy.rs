/// What the audit does when a request fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Record the failure against the enclosing scope and keep auditing.
    #[default]
    Continue,
    /// Stop at the first failure and return it.
    Abort,
}

impl ErrorPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorPolicy::Continue => "continue",
            ErrorPolicy::Abort => "abort",
        }
    }
}
