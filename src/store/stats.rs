//! Aggregate counts over the content tables for the admin dashboard.
//!
//! Content management itself lives outside this service; these reads are the
//! only contact the auth core has with the content store.

use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_admins: i64,
    pub total_categories: i64,
    pub total_articles: i64,
    pub published_articles: i64,
}

pub async fn dashboard_stats(pool: &SqlitePool) -> Result<DashboardStats, sqlx::Error> {
    let total_admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
        .fetch_one(pool)
        .await?;
    let total_categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;
    let total_articles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
        .fetch_one(pool)
        .await?;
    let published_articles: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE status = 'published'")
            .fetch_one(pool)
            .await?;

    Ok(DashboardStats {
        total_admins,
        total_categories,
        total_articles,
        published_articles,
    })
}
