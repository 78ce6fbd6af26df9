//! SQLite 数据库工具：统一创建连接池并执行 sqlx 迁移
//!
//! 约定：本 crate 根目录下存在 `migrations/` 目录，存放所有迁移 SQL 文件。
//! 通过 `sqlx::migrate!()` 自动管理 schema 升级。

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use tracing::info;

/// 创建 SQLite 连接池并执行所有未执行的迁移
pub async fn create_sqlite_pool_with_migration(db_url: &str) -> Result<Pool<Sqlite>> {
    // 内存库每个连接都是独立的数据库，只能用单连接，且连接不能被回收
    let in_memory = is_in_memory(db_url);
    let max_connections = if in_memory { 1 } else { 5 };

    let mut options = SqlitePoolOptions::new().max_connections(max_connections);
    if in_memory {
        options = options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = options
        .connect(db_url)
        .await
        .context(format!("连接SQLite数据库失败: {}", db_url))?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("执行数据库迁移失败")?;

    info!(
        "[DB] SQLite 连接池就绪: {}（最大连接数 {}）",
        db_url, max_connections
    );
    Ok(pool)
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}
