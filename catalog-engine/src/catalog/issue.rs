//! Record Issues
//!
//! Data problems found while building a snapshot. Each issue names the
//! offending record; the record itself is skipped (or, for dangling
//! references, kept but unreachable) and resolution continues.

use serde::Serialize;
use shared::error::{AppError, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Missing/blank required field or invalid value; record skipped
    Malformed,
    /// Second record with an already-seen key
    Duplicate,
    /// Reference to a parent or level target that does not exist
    DanglingReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssue {
    pub kind: IssueKind,
    /// Error code an API layer reports this issue under
    pub code: ErrorCode,
    /// Collection the record came from, e.g. "series"
    pub collection: &'static str,
    pub id: String,
    pub message: String,
}

impl RecordIssue {
    fn from_error(kind: IssueKind, collection: &'static str, id: &str, err: &AppError) -> Self {
        Self {
            kind,
            code: err.code,
            collection,
            id: id.to_string(),
            message: err.message.clone(),
        }
    }

    pub fn malformed(collection: &'static str, id: &str, err: &AppError) -> Self {
        Self::from_error(IssueKind::Malformed, collection, id, err)
    }

    pub fn duplicate(collection: &'static str, id: &str, message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::Duplicate,
            code: ErrorCode::AlreadyExists,
            collection,
            id: id.to_string(),
            message: message.into(),
        }
    }

    /// A reference that does not resolve
    ///
    /// `err` is typically [`AppError::broken_reference`] for a missing parent
    /// or a [`ErrorCode::ServiceTargetMissing`] error for a service.
    pub fn dangling(collection: &'static str, id: &str, err: &AppError) -> Self {
        Self::from_error(IssueKind::DanglingReference, collection, id, err)
    }

    pub fn is_integrity_fault(&self) -> bool {
        self.kind == IssueKind::DanglingReference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_keeps_error_code() {
        let err = AppError::broken_reference("series:s1", "category:gone");
        let issue = RecordIssue::dangling("series", "s1", &err);
        assert_eq!(issue.code, ErrorCode::BrokenParentReference);
        assert_eq!(
            issue.message,
            "series:s1 references missing parent category:gone"
        );
        assert!(issue.is_integrity_fault());
    }

    #[test]
    fn test_malformed_and_duplicate_codes() {
        let err = AppError::with_message(ErrorCode::InvalidPrice, "price must not be negative");
        assert_eq!(
            RecordIssue::malformed("services", "svc1", &err).code,
            ErrorCode::InvalidPrice
        );
        let dup = RecordIssue::duplicate("brands", "b1", "Duplicate brand id b1");
        assert_eq!(dup.code, ErrorCode::AlreadyExists);
        assert!(!dup.is_integrity_fault());
    }

    #[test]
    fn test_serialize_code_as_number() {
        let err = AppError::with_message(ErrorCode::ServiceTargetMissing, "missing");
        let json = serde_json::to_value(RecordIssue::dangling("services", "svc1", &err)).unwrap();
        assert_eq!(json["code"], 6102);
        assert_eq!(json["kind"], "dangling_reference");
    }
}
