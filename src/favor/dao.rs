//! 人情记录数据访问层（DAO）
//!
//! 整个记录集合序列化为一个 JSON 数组，存放在单个存储键下。
//! 没有增量写入：每次保存都覆盖整份集合。

use crate::favor::kv::KvStorage;
use crate::favor::models::FavorRecord;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// 人情记录 DAO（基于键值存储）
#[derive(Clone)]
pub struct FavorDao {
    storage: Arc<dyn KvStorage>,
    key: String,
}

impl FavorDao {
    pub fn new(storage: Arc<dyn KvStorage>, key: String) -> Self {
        Self { storage, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 读取整份记录集合
    ///
    /// 读取失败返回错误；键不存在或内容无法解析时视为空集合。
    pub async fn load_all(&self) -> Result<Vec<FavorRecord>> {
        let raw = self
            .storage
            .get(&self.key)
            .await
            .context("读取人情记录失败")?;

        let favors = match raw {
            Some(raw) => decode_favors(&raw),
            None => Vec::new(),
        };
        debug!("[FavorDAO] 获取本地人情记录，共 {} 条", favors.len());
        Ok(favors)
    }

    /// 覆盖写入整份记录集合
    pub async fn save_all(&self, favors: &[FavorRecord]) -> Result<()> {
        let raw = encode_favors(favors)?;
        self.storage
            .set(&self.key, &raw)
            .await
            .context("保存人情记录失败")?;
        debug!("[FavorDAO] 保存本地人情记录，共 {} 条", favors.len());
        Ok(())
    }
}

/// 序列化为 JSON 数组，保持顺序
pub fn encode_favors(favors: &[FavorRecord]) -> Result<String> {
    serde_json::to_string(favors).context("序列化人情记录失败")
}

/// 宽松解析：格式不对时返回空集合而不是报错
pub fn decode_favors(raw: &str) -> Vec<FavorRecord> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<FavorRecord>>(raw) {
        Ok(favors) => favors,
        Err(e) => {
            warn!("[FavorDAO] 本地人情记录无法解析，按空集合处理: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favor::kv::MemoryKvStorage;
    use crate::favor::models::FavorStatus;

    fn record(id: &str, name: &str, status: FavorStatus) -> FavorRecord {
        FavorRecord {
            id: id.to_string(),
            contact_name: name.to_string(),
            contact_id: Some(format!("contact-{}", id)),
            description: format!("favor from {}", name),
            date: "2024-05-01".to_string(),
            proof_image: None,
            status,
        }
    }

    #[tokio::test]
    async fn save_then_load_preserves_records_and_order() -> Result<()> {
        let dao = FavorDao::new(Arc::new(MemoryKvStorage::new()), "favors".to_string());
        let favors = vec![
            record("3", "Carol", FavorStatus::Cancelled),
            record("1", "Alice", FavorStatus::Pending),
            record("2", "Bob", FavorStatus::Completed),
        ];
        dao.save_all(&favors).await?;
        assert_eq!(dao.load_all().await?, favors);
        Ok(())
    }

    #[tokio::test]
    async fn missing_key_is_empty() -> Result<()> {
        let dao = FavorDao::new(Arc::new(MemoryKvStorage::new()), "favors".to_string());
        assert!(dao.load_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_blob_is_empty() -> Result<()> {
        for raw in ["{not json", r#"{"id":"1"}"#, r#"[{"id":1}]"#, "   "] {
            let dao = FavorDao::new(
                Arc::new(MemoryKvStorage::with_entry("favors", raw)),
                "favors".to_string(),
            );
            assert!(dao.load_all().await?.is_empty(), "raw = {}", raw);
        }
        Ok(())
    }

    #[test]
    fn decodes_blob_written_by_mobile_app() {
        let raw = r#"[{"id":"1718000000000","contactName":"Budi","description":"Pinjam payung",
            "date":"2024-06-10","status":"pending"},
            {"id":"1718000000001","contactName":"Sari","contactId":"77","description":"Antar ke bandara",
            "date":"2024-06-11","proofImage":"file:///data/proof.jpg","status":"completed"}]"#;
        let favors = decode_favors(raw);
        assert_eq!(favors.len(), 2);
        assert_eq!(favors[1].contact_id.as_deref(), Some("77"));
        assert_eq!(
            favors[1].proof_image.as_deref(),
            Some("file:///data/proof.jpg")
        );
    }
}
