use serde::{Deserialize, Deserializer, Serialize};

pub type TaskId = i64;
pub type ClassId = i64;
pub type UserId = i64;

// ============================================================================
// Tasks
// ============================================================================

/// Whether a task belongs to the user alone or was published to a class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskType {
    #[default]
    Personal,
    Class,
}

impl TaskType {
    pub fn as_str(&self) -> &str {
        match self {
            TaskType::Personal => "PERSONAL",
            TaskType::Class => "CLASS",
        }
    }

    /// Case-insensitive; anything that is not "class" is a personal task.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("class") {
            TaskType::Class
        } else {
            TaskType::Personal
        }
    }
}

impl<'de> Deserialize<'de> for TaskType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TaskType::parse(&raw))
    }
}

/// Task status as the UI presents it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TaskStatus::Pending => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Completed => "Done",
        }
    }

    /// Read whatever status string the backend sent.
    ///
    /// Anything mentioning IN_PROGRESS is in progress, DONE or COMPLETED is
    /// completed, everything else (including an empty string) is pending.
    pub fn from_backend_str(s: &str) -> Self {
        let upper = s.trim().to_ascii_uppercase();
        if upper.contains("IN_PROGRESS") {
            TaskStatus::InProgress
        } else if upper == "DONE" || upper == "COMPLETED" {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        }
    }
}

/// Task status vocabulary of the backend's `UserTaskRelation.TaskStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackendStatus {
    Todo,
    InProgress,
    Done,
}

impl BackendStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BackendStatus::Todo => "TODO",
            BackendStatus::InProgress => "IN_PROGRESS",
            BackendStatus::Done => "DONE",
        }
    }
}

impl From<TaskStatus> for BackendStatus {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Pending => BackendStatus::Todo,
            TaskStatus::InProgress => BackendStatus::InProgress,
            TaskStatus::Completed => BackendStatus::Done,
        }
    }
}

impl From<BackendStatus> for TaskStatus {
    fn from(status: BackendStatus) -> Self {
        match status {
            BackendStatus::Todo => TaskStatus::Pending,
            BackendStatus::InProgress => TaskStatus::InProgress,
            BackendStatus::Done => TaskStatus::Completed,
        }
    }
}

/// A task as the calendar and editors consume it.
///
/// Built from raw backend JSON by [`crate::reconcile::normalize_task`]; the
/// `created_date` and `due_date` fields are derived there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub course_name: Option<String>,
    pub course_color: Option<String>,
    pub task_type: TaskType,
    /// Official deadline as sent by the backend
    pub deadline: Option<String>,
    pub personal_deadline: Option<String>,
    pub personal_notes: Option<String>,
    pub status: TaskStatus,
    /// `YYYY-MM-DD`
    pub created_date: Option<String>,
    /// Deadline the calendar shows for this viewer
    pub due_date: Option<String>,
    pub class_id: Option<ClassId>,
    pub class_name: Option<String>,
    pub creator_id: Option<UserId>,
    pub creator_name: Option<String>,
    pub is_creator: bool,
}

impl Task {
    /// A class task either says so or carries a class id.
    pub fn is_class_task(&self) -> bool {
        self.task_type == TaskType::Class || self.class_id.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub course_name: String,
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<ClassId>,
}

/// Body of `PUT /tasks/{id}` (official fields)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub course_name: Option<String>,
    pub deadline: Option<String>,
}

/// Body of `PUT /tasks/{id}/status` (a member's personal plan for a class task)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalStatusUpdate {
    pub status: BackendStatus,
    pub personal_deadline: Option<String>,
    pub personal_notes: Option<String>,
}

// ============================================================================
// Classes
// ============================================================================

/// Lightweight user reference embedded in class and approval payloads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSummary {
    #[serde(alias = "userId")]
    pub id: UserId,
    pub username: String,
    pub display_name: Option<String>,
}

impl UserSummary {
    pub fn label(&self) -> &str {
        display_label(self.display_name.as_deref(), &self.username)
    }
}

fn display_label<'a>(display_name: Option<&'a str>, username: &'a str) -> &'a str {
    display_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(username)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    #[serde(alias = "classId")]
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub invite_code: Option<String>,
    #[serde(default)]
    pub owner: Option<UserSummary>,
    #[serde(default, alias = "membersCount", alias = "member_count")]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub join_approval_required: bool,
    // Jackson strips the `is` prefix from boolean getters
    #[serde(default = "default_true", alias = "public")]
    pub is_public: bool,
    #[serde(default)]
    pub color: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "public")]
    pub is_public: bool,
    pub join_approval_required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinClassRequest {
    pub join_reason: String,
}

/// Role of a user inside one class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClassRole {
    Owner,
    Admin,
    #[default]
    Member,
}

impl ClassRole {
    pub const ALL: [ClassRole; 3] = [ClassRole::Owner, ClassRole::Admin, ClassRole::Member];

    pub fn as_str(&self) -> &str {
        match self {
            ClassRole::Owner => "OWNER",
            ClassRole::Admin => "ADMIN",
            ClassRole::Member => "MEMBER",
        }
    }

    /// Unknown roles read as MEMBER; TEACHER carries admin rights.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "OWNER" => ClassRole::Owner,
            "ADMIN" | "TEACHER" => ClassRole::Admin,
            _ => ClassRole::Member,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ClassRole::Owner => "Owner",
            ClassRole::Admin => "Admin",
            ClassRole::Member => "Member",
        }
    }

    /// Owners and admins publish tasks and edit the official fields.
    pub fn is_manager(&self) -> bool {
        matches!(self, ClassRole::Owner | ClassRole::Admin)
    }
}

impl<'de> Deserialize<'de> for ClassRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ClassRole::parse(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMember {
    pub user_id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: ClassRole,
}

impl ClassMember {
    pub fn label(&self) -> &str {
        display_label(self.display_name.as_deref(), &self.username)
    }
}

/// Viewer's standing in a class, from `GET /classes/{id}/my-role`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RolePermissions {
    pub is_member: bool,
    pub role: Option<ClassRole>,
    pub is_owner: bool,
    pub is_admin: bool,
    pub can_manage_members: bool,
    pub can_publish_tasks: bool,
    pub can_view_approvals: bool,
    pub can_manage_class: bool,
    pub joined_at: Option<String>,
}

impl RolePermissions {
    pub fn can_create_tasks(&self) -> bool {
        self.can_publish_tasks || self.role.is_some_and(|role| role.is_manager())
    }
}

/// Range accepted by `POST /sync/class/{id}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncRange {
    Day,
    Week,
    #[default]
    Month,
    Semester,
    Year,
}

impl SyncRange {
    pub const ALL: [SyncRange; 5] = [
        SyncRange::Day,
        SyncRange::Week,
        SyncRange::Month,
        SyncRange::Semester,
        SyncRange::Year,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SyncRange::Day => "day",
            SyncRange::Week => "week",
            SyncRange::Month => "month",
            SyncRange::Semester => "semester",
            SyncRange::Year => "year",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        SyncRange::ALL.into_iter().find(|range| range.as_str() == s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncResult {
    pub newly_synced_tasks: u32,
    pub sync_range: String,
    pub total_tasks_in_class_in_range: u32,
}

// ============================================================================
// Approvals
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassRef {
    pub id: ClassId,
    pub name: String,
}

/// Pending class-join request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    pub id: i64,
    pub applicant: UserSummary,
    pub class_info: ClassRef,
    #[serde(default)]
    pub join_reason: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApprovalAction {
    Approve,
    Reject,
}

impl ApprovalAction {
    pub fn as_str(&self) -> &str {
        match self {
            ApprovalAction::Approve => "APPROVE",
            ApprovalAction::Reject => "REJECT",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalActionRequest {
    pub action: ApprovalAction,
}

// ============================================================================
// Users & auth
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    #[serde(alias = "userId")]
    pub id: Option<UserId>,
    pub username: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub language: Option<String>,
    pub email_verified: bool,
    pub role: Option<String>,
    pub created_at: Option<String>,
}

impl UserProfile {
    pub fn label(&self) -> &str {
        display_label(self.name.as_deref(), &self.username)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

/// Outcome of a login or registration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthResponse {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_round_trip() {
        for status in TaskStatus::ALL {
            let backend: BackendStatus = status.into();
            assert_eq!(TaskStatus::from(backend), status);
            assert_eq!(TaskStatus::from_backend_str(backend.as_str()), status);
        }
        assert_eq!(BackendStatus::from(TaskStatus::Pending).as_str(), "TODO");
        assert_eq!(BackendStatus::from(TaskStatus::InProgress).as_str(), "IN_PROGRESS");
        assert_eq!(BackendStatus::from(TaskStatus::Completed).as_str(), "DONE");
    }

    #[test]
    fn test_backend_status_is_tolerant() {
        assert_eq!(TaskStatus::from_backend_str("completed"), TaskStatus::Completed);
        assert_eq!(TaskStatus::from_backend_str("in_progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from_backend_str(""), TaskStatus::Pending);
        assert_eq!(TaskStatus::from_backend_str("ARCHIVED"), TaskStatus::Pending);
    }

    #[test]
    fn test_class_info_reads_jackson_shape() {
        let class: ClassInfo = serde_json::from_value(json!({
            "id": 12,
            "name": "Compilers",
            "inviteCode": "X7Q2",
            "public": false,
            "joinApprovalRequired": true,
            "owner": {"id": 3, "username": "ada", "displayName": "Ada"}
        }))
        .unwrap();
        assert_eq!(class.id, 12);
        assert!(!class.is_public);
        assert!(class.join_approval_required);
        assert_eq!(class.owner.unwrap().label(), "Ada");
        assert_eq!(class.member_count, None);
    }

    #[test]
    fn test_create_class_request_uses_jackson_property_names() {
        let body = serde_json::to_value(CreateClassRequest {
            name: "Algorithms".into(),
            description: String::new(),
            is_public: true,
            join_approval_required: false,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"name": "Algorithms", "description": "", "public": true, "joinApprovalRequired": false})
        );
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(ClassRole::parse("owner"), ClassRole::Owner);
        assert_eq!(ClassRole::parse("TEACHER"), ClassRole::Admin);
        assert_eq!(ClassRole::parse("whatever"), ClassRole::Member);
        let member: ClassMember =
            serde_json::from_value(json!({"userId": 4, "username": "bo", "role": "ADMIN"})).unwrap();
        assert_eq!(member.role, ClassRole::Admin);
        assert_eq!(member.label(), "bo");
    }

    #[test]
    fn test_permissions_can_create_tasks() {
        let perms: RolePermissions =
            serde_json::from_value(json!({"isMember": true, "role": "ADMIN"})).unwrap();
        assert!(perms.can_create_tasks());
        let perms: RolePermissions =
            serde_json::from_value(json!({"isMember": true, "role": "MEMBER"})).unwrap();
        assert!(!perms.can_create_tasks());
        let perms: RolePermissions =
            serde_json::from_value(json!({"canPublishTasks": true})).unwrap();
        assert!(perms.can_create_tasks());
    }

    #[test]
    fn test_personal_status_update_serializes_nulls() {
        let body = serde_json::to_value(PersonalStatusUpdate {
            status: BackendStatus::InProgress,
            personal_deadline: None,
            personal_notes: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"status": "IN_PROGRESS", "personalDeadline": null, "personalNotes": null})
        );
    }
}
