use thiserror::Error;

/// Errors raised while turning the dashboard tables into metrics and figures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("table '{0}' has no monthly rows")]
    EmptyTable(&'static str),

    #[error("budget total is zero, variance percentage is undefined")]
    ZeroBudget,

    #[error("value for {what} cannot be plotted")]
    NonFinite { what: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            DashboardError::EmptyTable("revenue").to_string(),
            "table 'revenue' has no monthly rows"
        );
        assert_eq!(
            DashboardError::NonFinite { what: "Jan".into() }.to_string(),
            "value for Jan cannot be plotted"
        );
    }
}
