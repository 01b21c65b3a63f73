pub mod api;
pub mod clipboard;
pub mod storage;
