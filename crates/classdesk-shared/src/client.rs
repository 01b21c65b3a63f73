//! Typed client for the ClassDesk REST API.
//!
//! Requests go through an [`HttpTransport`], so the same client runs over
//! `gloo-net` in the browser and over a recording fake in tests. Every call
//! attaches the stored bearer token when one exists.
//!
//! Failure policy: list fetches degrade to an empty value and log the error;
//! everything that mutates state returns the [`ApiError`] to the caller.

use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::approvals::ApprovalQueue;
use crate::auth::{ResendOutcome, VerifyOutcome};
use crate::config::ClientConfig;
use crate::envelope::{self, PageInfo};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Approval, ApprovalAction, ApprovalActionRequest, AuthResponse, ClassId, ClassInfo,
    ClassMember, CreateClassRequest, CreateTaskRequest, JoinClassRequest, LoginRequest,
    PersonalStatusUpdate, RegisterRequest, ResendVerificationRequest, RolePermissions, SyncRange,
    SyncResult, Task, TaskId, UpdateTaskRequest, UserId, UserProfile,
};
use crate::reconcile::{self, TaskEdit};
use crate::roles::RoleChange;
use crate::session::{bearer_value, TokenStore};

// ============================================================================
// Transport seam
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and reads the whole response body as text.
///
/// Only failures that produce no response at all are errors here; non-2xx
/// statuses come back as ordinary responses.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

// ============================================================================
// Result shapes
// ============================================================================

/// One page of class search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassSearchPage {
    pub classes: Vec<ClassInfo>,
    pub page: PageInfo,
}

impl ClassSearchPage {
    pub fn has_more(&self) -> bool {
        self.page.has_more()
    }
}

fn query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn json_body<B: Serialize>(body: &B) -> ApiResult<String> {
    serde_json::to_string(body).map_err(ApiError::from)
}

fn degrade<T: Default>(result: ApiResult<T>, action: &str) -> T {
    result.unwrap_or_else(|e| {
        tracing::error!("Failed to {}: {}", action, e);
        T::default()
    })
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// ============================================================================
// Client
// ============================================================================

pub struct ApiClient<T: HttpTransport> {
    transport: T,
    tokens: Rc<dyn TokenStore>,
    config: ClientConfig,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, tokens: Rc<dyn TokenStore>, config: ClientConfig) -> Self {
        Self {
            transport,
            tokens,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        fallback: &str,
    ) -> ApiResult<Value> {
        let mut headers = Vec::new();
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = self.tokens.read() {
            headers.push(("Authorization".to_string(), bearer_value(&token)));
        }

        let request = HttpRequest {
            method,
            url: self.config.url(path),
            headers,
            body,
        };
        tracing::debug!("{} {}", request.method.as_str(), request.url);

        let response = self.transport.send(request).await?;
        let parsed = envelope::parse_body(&response.body);
        if !response.ok() {
            let err = ApiError::from_response(response.status, &response.status_text, parsed, fallback);
            tracing::warn!("{} {} -> {}: {}", method.as_str(), path, response.status, err);
            return Err(err);
        }
        Ok(parsed)
    }

    async fn get(&self, path: &str, fallback: &str) -> ApiResult<Value> {
        self.execute(Method::Get, path, None, fallback).await
    }

    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ApiResult<Value> {
        let body = json_body(body)?;
        self.execute(method, path, Some(body), fallback).await
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    fn auth_response(body: &Value) -> AuthResponse {
        AuthResponse {
            user: envelope::extract_user(body)
                .and_then(|user| serde_json::from_value(user.clone()).ok()),
            token: envelope::extract_token(body),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<AuthResponse> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ApiError::invalid_input("Username and password are required"));
        }
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let body = self
            .send_json(Method::Post, "/auth/login", &request, "Login failed")
            .await?;
        Ok(Self::auth_response(&body))
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        let body = self
            .send_json(Method::Post, "/auth/register", request, "Registration failed")
            .await?;
        Ok(Self::auth_response(&body))
    }

    pub async fn resend_verification(&self, email: &str) -> ResendOutcome {
        let Some(email) = non_blank(email) else {
            return ResendOutcome::Failed {
                status: None,
                message: "Email is required".to_string(),
            };
        };
        let request = ResendVerificationRequest {
            email: email.to_string(),
        };
        match self
            .send_json(
                Method::Post,
                "/auth/resend-verification",
                &request,
                "Failed to resend verification email",
            )
            .await
        {
            Ok(_) => ResendOutcome::Sent,
            Err(e) => ResendOutcome::from_error(&e),
        }
    }

    pub async fn verify_email(&self, token: Option<&str>) -> VerifyOutcome {
        let Some(token) = token.and_then(non_blank) else {
            return VerifyOutcome::MissingToken;
        };
        let path = format!("/auth/verify-email?{}", query(&[("token", token.to_string())]));
        match self.get(&path, "Email verification failed").await {
            Ok(body) => VerifyOutcome::Verified {
                message: envelope::success_message(&body)
                    .unwrap_or_else(|| "Email verified. You can sign in now.".to_string()),
            },
            Err(e) => VerifyOutcome::Failed {
                message: e.message(),
            },
        }
    }

    pub async fn current_user(&self) -> ApiResult<UserProfile> {
        let body = self.get("/users/me", "Failed to fetch current user").await?;
        Ok(serde_json::from_value(envelope::unwrap_data(&body).clone())?)
    }

    // ------------------------------------------------------------------
    // Calendar & tasks
    // ------------------------------------------------------------------

    /// Tasks for one month (`month` is 1-12), normalized for display.
    pub async fn calendar(&self, year: i32, month: u32) -> Vec<Task> {
        let path = format!(
            "/calendar?{}",
            query(&[("year", year.to_string()), ("month", month.to_string())])
        );
        degrade(
            self.get(&path, "Failed to fetch calendar")
                .await
                .map(|body| reconcile::normalize_tasks(&body)),
            "fetch calendar",
        )
    }

    pub async fn get_task(&self, task_id: TaskId) -> ApiResult<Task> {
        let body = self
            .get(&format!("/tasks/{}", task_id), "Failed to fetch task")
            .await?;
        reconcile::normalize_single_task(&body)
            .ok_or_else(|| ApiError::unexpected("Task payload has no id"))
    }

    pub async fn create_personal_task(&self, request: &CreateTaskRequest) -> ApiResult<Option<Task>> {
        let body = self
            .send_json(Method::Post, "/tasks/personal", request, "Failed to create task")
            .await?;
        Ok(reconcile::normalize_single_task(&body))
    }

    pub async fn create_class_task(
        &self,
        class_id: ClassId,
        request: &CreateTaskRequest,
    ) -> ApiResult<Option<Task>> {
        let body = self
            .send_json(
                Method::Post,
                &format!("/classes/{}/tasks", class_id),
                request,
                "Failed to create task",
            )
            .await?;
        Ok(reconcile::normalize_single_task(&body))
    }

    /// Create a task where the request says it belongs.
    pub async fn create_task(&self, request: &CreateTaskRequest) -> ApiResult<Option<Task>> {
        if request.title.trim().is_empty() {
            return Err(ApiError::invalid_input("Title is required"));
        }
        match request.class_id {
            Some(class_id) => self.create_class_task(class_id, request).await,
            None => self.create_personal_task(request).await,
        }
    }

    pub async fn update_task(&self, task_id: TaskId, request: &UpdateTaskRequest) -> ApiResult<()> {
        self.send_json(
            Method::Put,
            &format!("/tasks/{}", task_id),
            request,
            "Failed to update task",
        )
        .await
        .map(|_| ())
    }

    pub async fn update_personal_status(
        &self,
        task_id: TaskId,
        request: &PersonalStatusUpdate,
    ) -> ApiResult<()> {
        self.send_json(
            Method::Put,
            &format!("/tasks/{}/status", task_id),
            request,
            "Failed to update task status",
        )
        .await
        .map(|_| ())
    }

    /// Apply an edit planned by [`reconcile::plan_task_edit`].
    pub async fn save_task_edit(&self, edit: &TaskEdit) -> ApiResult<()> {
        match edit {
            TaskEdit::Official { task_id, body } => self.update_task(*task_id, body).await,
            TaskEdit::Personal { task_id, body } => {
                self.update_personal_status(*task_id, body).await
            }
        }
    }

    pub async fn delete_task(&self, task_id: TaskId) -> ApiResult<()> {
        self.execute(
            Method::Delete,
            &format!("/tasks/{}", task_id),
            None,
            "Failed to delete task",
        )
        .await
        .map(|_| ())
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    pub async fn my_classes(&self) -> Vec<ClassInfo> {
        degrade(
            self.get("/classes/my", "Failed to fetch classes")
                .await
                .map(|body| envelope::normalize_typed_list(&body)),
            "fetch classes",
        )
    }

    pub async fn create_class(&self, request: &CreateClassRequest) -> ApiResult<Option<ClassInfo>> {
        if request.name.trim().is_empty() {
            return Err(ApiError::invalid_input("Class name is required"));
        }
        let body = self
            .send_json(Method::Post, "/classes", request, "Failed to create class")
            .await?;
        let payload = envelope::unwrap_data(&body);
        let payload = payload.get("class").unwrap_or(payload);
        Ok(serde_json::from_value(payload.clone()).ok())
    }

    /// Resolve an invite code to a class id.
    pub async fn find_class_by_invite_code(&self, invite_code: &str) -> ApiResult<ClassId> {
        let Some(code) = non_blank(invite_code) else {
            return Err(ApiError::invalid_input("Invite code is required"));
        };
        let path = format!("/classes/search?{}", query(&[("inviteCode", code.to_string())]));
        let body = self.get(&path, "Class not found").await?;
        let payload = envelope::unwrap_data(&body);
        payload
            .get("id")
            .or_else(|| payload.get("data").and_then(|data| data.get("id")))
            .and_then(envelope::value_as_id)
            .ok_or_else(|| ApiError::unexpected("Could not resolve class id for invite code"))
    }

    /// Ask to join a class. Returns the backend's message, if any.
    pub async fn join_class(&self, class_id: ClassId, join_reason: &str) -> ApiResult<Option<String>> {
        let request = JoinClassRequest {
            join_reason: join_reason.to_string(),
        };
        let body = self
            .send_json(
                Method::Post,
                &format!("/classes/{}/join", class_id),
                &request,
                "Failed to join class",
            )
            .await?;
        Ok(envelope::success_message(&body))
    }

    pub async fn join_class_by_invite_code(
        &self,
        invite_code: &str,
        join_reason: &str,
    ) -> ApiResult<Option<String>> {
        let class_id = self.find_class_by_invite_code(invite_code).await?;
        self.join_class(class_id, join_reason).await
    }

    /// Search public classes by name. A blank query sends nothing.
    pub async fn search_classes(
        &self,
        name: &str,
        page: u32,
        size: u32,
        sort: Option<&str>,
    ) -> ApiResult<ClassSearchPage> {
        let Some(name) = non_blank(name) else {
            return Ok(ClassSearchPage::default());
        };
        let mut params = vec![
            ("name", name.to_string()),
            ("page", page.to_string()),
            ("size", size.to_string()),
        ];
        if let Some(sort) = sort {
            params.push(("sort", sort.to_string()));
        }
        let body = self
            .get(
                &format!("/classes/search-by-name?{}", query(&params)),
                "Class search failed",
            )
            .await?;
        Ok(ClassSearchPage {
            classes: envelope::normalize_typed_list(&body),
            page: PageInfo::from_payload(envelope::unwrap_data(&body)),
        })
    }

    pub async fn class_tasks(&self, class_id: ClassId, page: u32, size: u32) -> Vec<Task> {
        let path = format!(
            "/classes/{}/tasks?{}",
            class_id,
            query(&[("page", page.to_string()), ("size", size.to_string())])
        );
        degrade(
            self.get(&path, "Failed to get class tasks")
                .await
                .map(|body| reconcile::normalize_tasks(&body)),
            "fetch class tasks",
        )
    }

    async fn members_page(&self, class_id: ClassId, page: u32, size: u32) -> ApiResult<Value> {
        let path = format!(
            "/classes/{}/members?{}",
            class_id,
            query(&[("page", page.to_string()), ("size", size.to_string())])
        );
        self.get(&path, "Failed to fetch members").await
    }

    pub async fn class_members(&self, class_id: ClassId, page: u32, size: u32) -> Vec<ClassMember> {
        degrade(
            self.members_page(class_id, page, size)
                .await
                .map(|body| envelope::normalize_typed_list(&body)),
            "fetch members",
        )
    }

    /// Member count from a single-entry page.
    ///
    /// Bodies without `totalElements` are counted by their entries.
    pub async fn member_count(&self, class_id: ClassId) -> u64 {
        degrade(
            self.members_page(class_id, 0, 1).await.map(|body| {
                let payload = envelope::unwrap_data(&body);
                match payload.get("totalElements") {
                    Some(_) => PageInfo::from_payload(payload).total_elements,
                    None => envelope::normalize_list(&body).len() as u64,
                }
            }),
            "count members",
        )
    }

    pub async fn my_role(&self, class_id: ClassId) -> Option<RolePermissions> {
        let result = self
            .get(&format!("/classes/{}/my-role", class_id), "Failed to get permissions")
            .await
            .and_then(|body| {
                serde_json::from_value(envelope::unwrap_data(&body).clone()).map_err(ApiError::from)
            });
        degrade(result.map(Some), "fetch class role")
    }

    pub async fn change_member_role(
        &self,
        class_id: ClassId,
        user_id: UserId,
        change: RoleChange,
    ) -> ApiResult<()> {
        let fallback = match change {
            RoleChange::Promote => "Failed to promote member",
            RoleChange::Demote => "Failed to demote member",
        };
        self.execute(
            Method::Put,
            &format!(
                "/classes/{}/members/{}/{}",
                class_id,
                user_id,
                change.path_segment()
            ),
            None,
            fallback,
        )
        .await
        .map(|_| ())
    }

    pub async fn sync_class(&self, class_id: ClassId, range: SyncRange) -> ApiResult<SyncResult> {
        let path = format!(
            "/sync/class/{}?{}",
            class_id,
            query(&[("range", range.as_str().to_string())])
        );
        let body = self
            .execute(Method::Post, &path, None, "Failed to sync class")
            .await?;
        Ok(serde_json::from_value(envelope::unwrap_data(&body).clone()).unwrap_or_default())
    }

    // ------------------------------------------------------------------
    // Approvals
    // ------------------------------------------------------------------

    async fn approvals_page(&self, page: u32, size: u32) -> ApiResult<Value> {
        let path = format!(
            "/approvals/pending?{}",
            query(&[("page", page.to_string()), ("size", size.to_string())])
        );
        self.get(&path, "Failed to fetch pending approvals").await
    }

    pub async fn pending_approvals(&self, page: u32, size: u32) -> ApprovalQueue {
        degrade(
            self.approvals_page(page, size)
                .await
                .map(|body| ApprovalQueue::from_body(&body)),
            "fetch pending approvals",
        )
    }

    /// Pending count for the header badge.
    pub async fn pending_approval_count(&self) -> u64 {
        degrade(
            self.approvals_page(0, 1).await.map(|body| {
                PageInfo::from_payload(envelope::unwrap_data(&body)).total_elements
            }),
            "count pending approvals",
        )
    }

    pub async fn process_approval(&self, approval: &Approval, action: ApprovalAction) -> ApiResult<()> {
        let fallback = format!("Failed to {} approval", action.as_str().to_lowercase());
        self.send_json(
            Method::Put,
            &format!(
                "/classes/{}/approvals/{}",
                approval.class_info.id, approval.applicant.id
            ),
            &ApprovalActionRequest { action },
            &fallback,
        )
        .await
        .map(|_| ())
    }

    /// Process an approval and, on success only, drop it from `queue`.
    pub async fn resolve_approval(
        &self,
        queue: &mut ApprovalQueue,
        approval_id: i64,
        action: ApprovalAction,
    ) -> ApiResult<()> {
        let approval = queue
            .items
            .iter()
            .find(|item| item.id == approval_id)
            .cloned()
            .ok_or_else(|| ApiError::invalid_input("Approval is no longer pending"))?;
        self.process_approval(&approval, action).await?;
        queue.resolve(approval_id);
        Ok(())
    }
}
