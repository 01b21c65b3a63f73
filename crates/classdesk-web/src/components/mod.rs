pub mod approvals_modal;
pub mod calendar_day;
pub mod class_detail;
pub mod class_panel;
pub mod class_search;
pub mod create_class;
pub mod header;
pub mod join_class;
pub mod members_modal;
pub mod modal;
pub mod resend_verification;
pub mod task_create;
pub mod task_editor;
pub mod task_marker;
