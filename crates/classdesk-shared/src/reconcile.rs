//! Task date/status reconciliation.
//!
//! Raw task JSON differs by endpoint and by task type. This module turns it into
//! a [`Task`] whose `created_date` and `due_date` are ready for the calendar,
//! and decides which endpoint an edit must go to given the viewer's role.

use serde_json::Value;

use crate::dates;
use crate::envelope::{self, value_as_id};
use crate::models::{
    BackendStatus, ClassRole, PersonalStatusUpdate, Task, TaskId, TaskStatus, TaskType,
    UpdateTaskRequest,
};

/// Source fields for the creation date, in order of preference.
const CREATED_KEYS: [&str; 4] = ["createdDate", "createdAt", "created", "createDate"];

/// Source fields for the status, in order of preference.
const STATUS_KEYS: [&str; 3] = ["personalStatus", "status", "userTaskStatus"];

fn str_field<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn first_str<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| str_field(raw, key))
}

/// Task type from `taskType`, falling back to `type`.
pub fn task_type_of(raw: &Value) -> TaskType {
    first_str(raw, &["taskType", "type"])
        .map(TaskType::parse)
        .unwrap_or_default()
}

/// Deadline the calendar displays.
///
/// Class tasks prefer the viewer's personal deadline over the official one.
/// Personal tasks only ever use the official deadline.
pub fn calendar_due_date(raw: &Value) -> Option<String> {
    let keys: &[&str] = match task_type_of(raw) {
        TaskType::Class => &["personalDeadline", "deadline", "due"],
        TaskType::Personal => &["deadline", "due"],
    };
    first_str(raw, keys).map(str::to_string)
}

/// Creation date as `YYYY-MM-DD`, whichever field supplied it.
pub fn created_day(raw: &Value) -> Option<String> {
    CREATED_KEYS
        .iter()
        .filter_map(|key| str_field(raw, key))
        .find_map(dates::to_day_string)
}

/// Local status for the viewer.
pub fn status_of(raw: &Value) -> TaskStatus {
    first_str(raw, &STATUS_KEYS)
        .map(TaskStatus::from_backend_str)
        .unwrap_or_default()
}

/// Build a [`Task`] from backend JSON. Entries without an id are dropped.
pub fn normalize_task(raw: &Value) -> Option<Task> {
    let id = raw.get("id").and_then(value_as_id)?;
    let owned = |key: &str| str_field(raw, key).map(str::to_string);

    Some(Task {
        id,
        title: owned("title").unwrap_or_default(),
        description: owned("description"),
        course_name: owned("courseName"),
        course_color: owned("courseColor"),
        task_type: task_type_of(raw),
        deadline: first_str(raw, &["deadline", "due"]).map(str::to_string),
        personal_deadline: owned("personalDeadline"),
        personal_notes: owned("personalNotes"),
        status: status_of(raw),
        created_date: created_day(raw),
        due_date: calendar_due_date(raw),
        class_id: raw.get("classId").and_then(value_as_id),
        class_name: owned("className"),
        creator_id: raw.get("creatorId").and_then(value_as_id),
        creator_name: owned("creatorName"),
        is_creator: raw
            .get("isCreator")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// Normalize a task list response of any envelope shape.
pub fn normalize_tasks(body: &Value) -> Vec<Task> {
    envelope::normalize_list(body)
        .iter()
        .filter_map(|raw| {
            let task = normalize_task(raw);
            if task.is_none() {
                tracing::warn!("Dropping task without id");
            }
            task
        })
        .collect()
}

/// Normalize a single-task response (`{task: ...}`, `{data: ...}` or bare).
pub fn normalize_single_task(body: &Value) -> Option<Task> {
    let payload = envelope::unwrap_data(body);
    let payload = payload.get("task").unwrap_or(payload);
    normalize_task(payload)
}

/// Whether the viewer edits the official fields of `task`.
///
/// Personal tasks always; class tasks only for owners, admins, and the task's
/// creator.
pub fn edits_official_fields(task: &Task, viewer_role: Option<ClassRole>) -> bool {
    !task.is_class_task() || task.is_creator || viewer_role.is_some_and(|r| r.is_manager())
}

/// Editable copy of a task held by the editor form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub course_name: String,
    /// Official deadline, any format [`dates::to_local_datetime`] accepts
    pub deadline: String,
    pub status: TaskStatus,
    pub personal_deadline: String,
    pub personal_notes: String,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            course_name: task.course_name.clone().unwrap_or_default(),
            deadline: task
                .deadline
                .clone()
                .or_else(|| task.due_date.clone())
                .unwrap_or_default(),
            status: task.status,
            personal_deadline: task.personal_deadline.clone().unwrap_or_default(),
            personal_notes: task.personal_notes.clone().unwrap_or_default(),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A save, routed to the endpoint the viewer is allowed to write.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEdit {
    /// `PUT /tasks/{id}`
    Official {
        task_id: TaskId,
        body: UpdateTaskRequest,
    },
    /// `PUT /tasks/{id}/status`
    Personal {
        task_id: TaskId,
        body: PersonalStatusUpdate,
    },
}

impl TaskEdit {
    pub fn task_id(&self) -> TaskId {
        match self {
            TaskEdit::Official { task_id, .. } | TaskEdit::Personal { task_id, .. } => *task_id,
        }
    }
}

/// Decide how a draft is saved.
pub fn plan_task_edit(task: &Task, draft: &TaskDraft, viewer_role: Option<ClassRole>) -> TaskEdit {
    if edits_official_fields(task, viewer_role) {
        TaskEdit::Official {
            task_id: task.id,
            body: UpdateTaskRequest {
                title: draft.title.trim().to_string(),
                description: non_empty(&draft.description),
                course_name: non_empty(&draft.course_name),
                deadline: dates::to_local_datetime(&draft.deadline),
            },
        }
    } else {
        TaskEdit::Personal {
            task_id: task.id,
            body: PersonalStatusUpdate {
                status: BackendStatus::from(draft.status),
                personal_deadline: non_empty(&draft.personal_deadline)
                    .and_then(|d| dates::to_local_datetime(&d)),
                personal_notes: non_empty(&draft.personal_notes),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_class_task_prefers_personal_deadline() {
        let raw = json!({
            "id": 1,
            "taskType": "CLASS",
            "deadline": "2025-09-20T23:59:00",
            "personalDeadline": "2025-09-18T20:00:00"
        });
        assert_eq!(calendar_due_date(&raw).as_deref(), Some("2025-09-18T20:00:00"));
    }

    #[test]
    fn test_class_task_without_personal_deadline_uses_official() {
        let raw = json!({"id": 1, "type": "class", "deadline": "2025-09-20T23:59:00"});
        assert_eq!(calendar_due_date(&raw).as_deref(), Some("2025-09-20T23:59:00"));

        let raw = json!({"id": 1, "taskType": "CLASS", "personalDeadline": null, "deadline": "2025-09-20T23:59:00"});
        assert_eq!(calendar_due_date(&raw).as_deref(), Some("2025-09-20T23:59:00"));
    }

    #[test]
    fn test_personal_task_ignores_personal_deadline() {
        let raw = json!({
            "id": 1,
            "taskType": "PERSONAL",
            "deadline": "2025-09-20T23:59:00",
            "personalDeadline": "2025-09-18T20:00:00"
        });
        assert_eq!(calendar_due_date(&raw).as_deref(), Some("2025-09-20T23:59:00"));

        let raw = json!({"id": 1, "due": "2025-09-21", "personalDeadline": "2025-09-18"});
        assert_eq!(calendar_due_date(&raw).as_deref(), Some("2025-09-21"));
    }

    #[test]
    fn test_created_day_is_field_name_independent() {
        let stamp = "2025-09-15T10:30:00";
        let expected = Some("2025-09-15".to_string());
        for key in ["createdAt", "created", "createDate", "createdDate"] {
            let raw = json!({"id": 1, key: stamp});
            assert_eq!(created_day(&raw), expected, "{key}");
        }
    }

    #[test]
    fn test_status_source_precedence() {
        let raw = json!({"personalStatus": "DONE", "status": "TODO"});
        assert_eq!(status_of(&raw), TaskStatus::Completed);
        let raw = json!({"userTaskStatus": "IN_PROGRESS"});
        assert_eq!(status_of(&raw), TaskStatus::InProgress);
        assert_eq!(status_of(&json!({})), TaskStatus::Pending);
    }

    #[test]
    fn test_normalize_tasks_drops_entries_without_id() {
        let body = json!({"data": {"content": [
            {"id": 1, "title": "Essay", "createdAt": "2025-09-01T08:00:00"},
            {"title": "orphan"},
            {"id": "2", "title": "Lab"}
        ]}});
        let tasks = normalize_tasks(&body);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].created_date.as_deref(), Some("2025-09-01"));
        assert_eq!(tasks[1].id, 2);
    }

    #[test]
    fn test_normalize_single_task_envelopes() {
        assert_eq!(normalize_single_task(&json!({"task": {"id": 5}})).map(|t| t.id), Some(5));
        assert_eq!(normalize_single_task(&json!({"data": {"id": 6}})).map(|t| t.id), Some(6));
        assert_eq!(normalize_single_task(&json!({"id": 7})).map(|t| t.id), Some(7));
        assert_eq!(normalize_single_task(&json!({"message": "ok"})), None);
    }

    fn class_task() -> Task {
        Task {
            id: 9,
            title: "Lab report".into(),
            task_type: TaskType::Class,
            class_id: Some(3),
            deadline: Some("2025-09-20T23:59:00".into()),
            ..Task::default()
        }
    }

    #[test]
    fn test_member_edit_targets_personal_status() {
        let task = class_task();
        let mut draft = TaskDraft::from_task(&task);
        draft.status = TaskStatus::InProgress;
        draft.personal_deadline = "2025-09-18T20:00".into();
        draft.personal_notes = "start early".into();
        draft.title = "ignored".into();

        let edit = plan_task_edit(&task, &draft, Some(ClassRole::Member));
        assert_eq!(
            edit,
            TaskEdit::Personal {
                task_id: 9,
                body: PersonalStatusUpdate {
                    status: BackendStatus::InProgress,
                    personal_deadline: Some("2025-09-18T20:00:00".into()),
                    personal_notes: Some("start early".into()),
                },
            }
        );
    }

    #[test]
    fn test_admin_and_creator_edit_official_fields() {
        let task = class_task();
        let mut draft = TaskDraft::from_task(&task);
        draft.title = "Lab report v2".into();

        for role in [Some(ClassRole::Admin), Some(ClassRole::Owner)] {
            match plan_task_edit(&task, &draft, role) {
                TaskEdit::Official { body, .. } => {
                    assert_eq!(body.title, "Lab report v2");
                    assert_eq!(body.deadline.as_deref(), Some("2025-09-20T23:59:00"));
                }
                other => panic!("expected official edit, got {other:?}"),
            }
        }

        let creator_task = Task { is_creator: true, ..class_task() };
        assert!(matches!(
            plan_task_edit(&creator_task, &draft, Some(ClassRole::Member)),
            TaskEdit::Official { .. }
        ));
    }

    #[test]
    fn test_personal_task_always_edits_official_fields() {
        let task = Task {
            id: 4,
            title: "Groceries".into(),
            ..Task::default()
        };
        let draft = TaskDraft::from_task(&task);
        for role in [None, Some(ClassRole::Member)] {
            assert!(matches!(
                plan_task_edit(&task, &draft, role),
                TaskEdit::Official { task_id: 4, .. }
            ));
        }
    }

    #[test]
    fn test_task_with_class_id_counts_as_class_task() {
        let task = Task {
            id: 2,
            class_id: Some(8),
            ..Task::default()
        };
        assert!(!edits_official_fields(&task, None));
    }
}
