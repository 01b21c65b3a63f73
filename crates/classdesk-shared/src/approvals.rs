//! Local view of the pending join-request queue.

use serde_json::Value;

use crate::envelope::{self, PageInfo};
use crate::models::Approval;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApprovalQueue {
    pub items: Vec<Approval>,
    /// Backend count of pending requests; may exceed `items.len()` when only
    /// the count was fetched.
    pub total: u64,
}

impl ApprovalQueue {
    /// Build from a `GET /approvals/pending` response body.
    pub fn from_body(body: &Value) -> Self {
        let items: Vec<Approval> = envelope::normalize_typed_list(body);
        let page = PageInfo::from_payload(envelope::unwrap_data(body));
        let total = if page.total_elements > 0 {
            page.total_elements
        } else {
            items.len() as u64
        };
        Self { items, total }
    }

    /// Only the count is known (eager badge fetch).
    pub fn with_total(total: u64) -> Self {
        Self {
            items: Vec::new(),
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop a processed request and decrement the count.
    ///
    /// Returns whether an entry was removed. The count goes down by one even
    /// when only the count was loaded, and never below zero.
    pub fn resolve(&mut self, approval_id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != approval_id);
        self.total = self.total.saturating_sub(1);
        self.items.len() != before
    }

    /// The queue after `update`, leaving `self` untouched.
    pub fn apply(&self, update: QueueUpdate) -> Self {
        match update {
            QueueUpdate::Loaded(queue) => queue,
            QueueUpdate::Resolved(approval_id) => {
                let mut next = self.clone();
                next.resolve(approval_id);
                next
            }
        }
    }
}

/// A change to the live queue.
///
/// Updates are folded into whatever the queue holds when they arrive, so
/// resolutions that complete out of order all land.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueUpdate {
    Loaded(ApprovalQueue),
    Resolved(i64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> Value {
        json!({
            "success": true,
            "data": {
                "content": [
                    {"id": 10, "applicant": {"id": 5, "username": "ann"}, "classInfo": {"id": 1, "name": "Physics"}, "joinReason": "lab partner"},
                    {"id": 11, "applicant": {"id": 6, "username": "ben"}, "classInfo": {"id": 1, "name": "Physics"}},
                    {"id": 12, "applicant": {"id": 7, "username": "cy"}, "classInfo": {"id": 2, "name": "Art"}}
                ],
                "totalElements": 3,
                "totalPages": 1,
                "number": 0
            }
        })
    }

    #[test]
    fn test_from_body_reads_page() {
        let queue = ApprovalQueue::from_body(&body());
        assert_eq!(queue.items.len(), 3);
        assert_eq!(queue.total, 3);
        assert_eq!(queue.items[0].join_reason.as_deref(), Some("lab partner"));
        assert_eq!(queue.items[2].class_info.name, "Art");
    }

    #[test]
    fn test_resolve_removes_exactly_one() {
        let mut queue = ApprovalQueue::from_body(&body());
        assert!(queue.resolve(11));
        assert_eq!(
            queue.items.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![10, 12]
        );
        assert_eq!(queue.total, 2);
    }

    #[test]
    fn test_overlapping_resolutions_both_apply() {
        let loaded =
            ApprovalQueue::default().apply(QueueUpdate::Loaded(ApprovalQueue::from_body(&body())));
        // Both requests were sent from the same loaded queue; replies arrive 11 first
        let after_first = loaded.apply(QueueUpdate::Resolved(11));
        let after_second = after_first.apply(QueueUpdate::Resolved(10));
        assert_eq!(
            after_second.items.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![12]
        );
        assert_eq!(after_second.total, 1);
        assert_eq!(loaded.total, 3);
    }

    #[test]
    fn test_count_never_negative() {
        let mut queue = ApprovalQueue::with_total(1);
        assert!(!queue.resolve(99));
        assert_eq!(queue.total, 0);
        queue.resolve(99);
        assert_eq!(queue.total, 0);
    }

    #[test]
    fn test_bare_array_uses_length() {
        let queue = ApprovalQueue::from_body(&json!([
            {"id": 1, "applicant": {"id": 2, "username": "x"}, "classInfo": {"id": 3, "name": "y"}}
        ]));
        assert_eq!(queue.total, 1);
    }
}
