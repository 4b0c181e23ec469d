pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod images;
pub mod users;
