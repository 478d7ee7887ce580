pub mod admin;
pub mod stats;

pub use admin::{bootstrap_admin, find_by_email, find_by_id, Admin};
pub use stats::{dashboard_stats, DashboardStats};
