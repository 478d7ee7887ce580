pub mod password;
pub mod token;

pub use token::{build_auth_cookie, removal_cookie, AUTH_COOKIE_NAME};
