pub mod auth;

pub use auth::AuthedUser;
