//! 键值持久化接口及其实现
//!
//! 核心层只依赖 [`KvStorage`]：按字符串键读写字符串值。每次 `set` 要么整体成功，
//! 要么保持原值不变。

use crate::favor::db::create_sqlite_pool_with_migration;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// 异步键值存储
#[async_trait]
pub trait KvStorage: Send + Sync {
    /// 读取键对应的值，不存在时返回 None
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// 写入键值（整体覆盖）
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// 内存实现，进程退出即丢失
#[derive(Default)]
pub struct MemoryKvStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一个键值
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl KvStorage for MemoryKvStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLite 实现（基于 sqlx），一个键对应 `kv_store` 表中的一行
pub struct SqliteKvStorage {
    db: Pool<Sqlite>,
}

impl SqliteKvStorage {
    /// 使用已有连接池（表结构需已迁移）
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self { db }
    }

    /// 连接数据库并执行迁移
    pub async fn connect(db_url: &str) -> Result<Self> {
        let db = create_sqlite_pool_with_migration(db_url).await?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl KvStorage for SqliteKvStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT value FROM kv_store WHERE key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await
        .context(format!("读取存储键失败: {}", key))?;

        let value = row.map(|m| m.get::<String, _>("value"));
        debug!(
            "[KvStore] 读取键 {}，{}",
            key,
            match &value {
                Some(v) => format!("长度 {}", v.len()),
                None => "不存在".to_string(),
            }
        );
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let sql = r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
        "#;

        sqlx::query(sql)
            .bind(key)
            .bind(value)
            .bind(chrono::Utc::now().timestamp_millis())
            .execute(&self.db)
            .await
            .context(format!("写入存储键失败: {}", key))?;
        debug!("[KvStore] 写入键 {}，长度 {}", key, value.len());
        Ok(())
    }
}
