pub mod admin;
pub mod details;
pub mod featured;
pub mod list;
