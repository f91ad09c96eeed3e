use serde::Serialize;

/// Non-fatal condition the caller must surface
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OperationWarning {
    pub summary: String,
    pub detail: String,
}

/// Result of a lifecycle operation together with any warnings it produced
#[derive(Clone, Debug, Serialize)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<OperationWarning>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: vec![],
        }
    }

    pub fn with_warning(mut self, warning: OperationWarning) -> Self {
        self.warnings.push(warning);
        self
    }
}
