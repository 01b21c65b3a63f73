pub mod calendar;
pub mod day_detail;
pub mod login;
pub mod not_found;
pub mod register;
pub mod verify_email;
