use thiserror::Error;

/// Failure kinds a collector can run into.
///
/// None of these abort a report: the assembly turns them into inline
/// diagnostic lines at the smallest granularity that produced them.
#[derive(Debug, Error)]
pub enum CollectError {
    /// An optional data source is not installed on this machine.
    #[error("{0} is not available on this system")]
    CapabilityAbsent(String),

    /// The source exists but cannot provide this metric for this device.
    #[error("{0} is not supported")]
    Unsupported(String),

    /// A query raised an error at call time.
    #[error("{source_name} query failed: {message}")]
    Query {
        source_name: &'static str,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CollectError {
    pub fn query(source_name: &'static str, message: impl ToString) -> Self {
        CollectError::Query {
            source_name,
            message: message.to_string(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, CollectError::Unsupported(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_message() {
        let err = CollectError::query("ip addr", "exit status 1");
        assert_eq!(err.to_string(), "ip addr query failed: exit status 1");
        assert!(!err.is_unsupported());
    }

    #[test]
    fn test_unsupported_is_distinct() {
        let err = CollectError::Unsupported("fan speed reading".to_string());
        assert!(err.is_unsupported());
        assert_eq!(err.to_string(), "fan speed reading is not supported");
    }
}
