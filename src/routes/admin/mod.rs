pub mod dashboard;
pub mod login;
pub mod session;

pub use dashboard::get_dashboard;
pub use login::post_login;
pub use session::{get_profile, post_logout};
