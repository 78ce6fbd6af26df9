//! 人情记录存储服务层
//!
//! `FavorStore` 持有内存中的记录快照和持久化句柄，生命周期为
//! `init`（加载）→ 若干次修改 → `flush`（保存）。
//! 每次修改都会重新读取整份集合、在内存中修改、再整体写回；
//! 只有写入成功后内存快照才会前进。

use crate::favor::balance::{summarize, BalanceSummary};
use crate::favor::dao::{encode_favors, FavorDao};
use crate::favor::error::{FavorError, FavorResult};
use crate::favor::kv::{KvStorage, SqliteKvStorage};
use crate::favor::listener::{EmptyFavorListener, FavorListener};
use crate::favor::models::{FavorDraft, FavorPatch, FavorRecord, FavorStoreConfig};
use crate::favor::query::find_by_id;
use crate::favor::validation::{validate_draft, validate_patch};
use std::sync::Arc;
use tracing::{debug, error, info};

/// 人情记录存储
pub struct FavorStore {
    config: FavorStoreConfig,
    dao: FavorDao,
    /// 最近一次成功读写后的集合
    favors: Vec<FavorRecord>,
    /// 本会话最后分配的 ID
    last_id: u64,
    listener: Arc<dyn FavorListener>,
}

impl FavorStore {
    /// 加载存储（使用默认空监听器）
    pub async fn init(config: FavorStoreConfig, storage: Arc<dyn KvStorage>) -> FavorResult<Self> {
        Self::with_listener(config, storage, Arc::new(EmptyFavorListener)).await
    }

    /// 加载存储（带自定义监听器）
    pub async fn with_listener(
        config: FavorStoreConfig,
        storage: Arc<dyn KvStorage>,
        listener: Arc<dyn FavorListener>,
    ) -> FavorResult<Self> {
        let dao = FavorDao::new(storage, config.storage_key.clone());
        let favors = dao
            .load_all()
            .await
            .map_err(FavorError::StorageUnavailable)?;
        let last_id = favors
            .iter()
            .filter_map(|f| f.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        info!(
            "[FavorStore] 存储已加载，键: {}，记录数: {}",
            config.storage_key,
            favors.len()
        );
        Ok(Self {
            config,
            dao,
            favors,
            last_id,
            listener,
        })
    }

    /// 打开 SQLite 存储（按配置中的 db_path 建立连接池并迁移）
    pub async fn open(config: FavorStoreConfig) -> FavorResult<Self> {
        let db_url = config.db_url();
        info!("[FavorStore] 打开 SQLite 存储: {}", db_url);
        let storage = SqliteKvStorage::connect(&db_url)
            .await
            .map_err(FavorError::StorageUnavailable)?;
        Self::init(config, Arc::new(storage)).await
    }

    pub fn set_listener(&mut self, listener: Arc<dyn FavorListener>) {
        self.listener = listener;
    }

    pub fn config(&self) -> &FavorStoreConfig {
        &self.config
    }

    /// 当前内存快照（不触发读取）
    pub fn snapshot(&self) -> &[FavorRecord] {
        &self.favors
    }

    /// 读取全部记录，按存储顺序返回
    pub async fn list(&mut self) -> FavorResult<Vec<FavorRecord>> {
        let favors = self.load().await?;
        self.favors = favors.clone();
        Ok(favors)
    }

    /// 按 ID 读取单条记录
    pub async fn get(&mut self, id: &str) -> FavorResult<FavorRecord> {
        let favors = self.list().await?;
        find_by_id(&favors, id).cloned()
    }

    /// 新建记录：分配 ID，状态缺省为 pending，追加到末尾并保存
    pub async fn create(&mut self, draft: FavorDraft) -> FavorResult<FavorRecord> {
        validate_draft(&draft)?;

        let mut favors = self.load().await?;
        let id = self.next_id(&favors);
        let favor = draft.into_record(id);
        favors.push(favor.clone());
        self.persist(favors).await?;

        info!(
            "[FavorStore] 新增记录: {}，联系人: {}，状态: {}",
            favor.id, favor.contact_name, favor.status
        );
        Ok(favor)
    }

    /// 更新记录：合并补丁字段，ID 不变
    ///
    /// ID 不存在时返回 `NotFound`，不会写入存储。
    pub async fn update(&mut self, id: &str, patch: FavorPatch) -> FavorResult<FavorRecord> {
        validate_patch(&patch)?;

        let mut favors = self.load().await?;
        let favor = favors
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| FavorError::NotFound(id.to_string()))?;

        if patch.is_empty() {
            debug!("[FavorStore] 记录 {} 补丁为空，无需写入", id);
            let favor = favor.clone();
            self.favors = favors;
            return Ok(favor);
        }

        favor.apply(&patch);
        let updated = favor.clone();
        self.persist(favors).await?;

        info!("[FavorStore] 更新记录: {}", id);
        Ok(updated)
    }

    /// 删除记录，返回是否真的删除了
    ///
    /// 记录不存在时不写入存储，也不报错。
    pub async fn delete(&mut self, id: &str) -> FavorResult<bool> {
        let mut favors = self.load().await?;
        let before = favors.len();
        favors.retain(|f| f.id != id);

        if favors.len() == before {
            debug!("[FavorStore] 记录 {} 不存在，跳过删除", id);
            self.favors = favors;
            return Ok(false);
        }

        self.persist(favors).await?;
        info!("[FavorStore] 删除记录: {}", id);
        Ok(true)
    }

    /// 把内存快照整体写回存储
    pub async fn flush(&mut self) -> FavorResult<()> {
        let favors = self.favors.clone();
        self.persist(favors).await
    }

    /// 仪表盘摘要（基于最新读取的集合）
    pub async fn summary(&mut self) -> FavorResult<BalanceSummary> {
        let favors = self.list().await?;
        Ok(summarize(&favors))
    }

    async fn load(&self) -> FavorResult<Vec<FavorRecord>> {
        self.dao.load_all().await.map_err(|e| {
            error!("[FavorStore] 读取存储失败: {:#}", e);
            FavorError::StorageUnavailable(e)
        })
    }

    async fn persist(&mut self, favors: Vec<FavorRecord>) -> FavorResult<()> {
        if let Err(e) = self.dao.save_all(&favors).await {
            error!("[FavorStore] 写入存储失败，内存快照保持不变: {:#}", e);
            return Err(FavorError::StorageUnavailable(e));
        }
        self.favors = favors;
        self.notify_changed().await;
        Ok(())
    }

    async fn notify_changed(&self) {
        match encode_favors(&self.favors) {
            Ok(favors_json) => self.listener.on_favor_list_changed(favors_json).await,
            Err(e) => error!("[FavorStore] 序列化记录失败，跳过回调: {:#}", e),
        }
    }

    /// 生成新 ID：毫秒时间戳，保证本会话内严格递增且不与现有记录冲突
    fn next_id(&mut self, existing: &[FavorRecord]) -> String {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        let mut candidate = now.max(self.last_id.saturating_add(1));
        while existing.iter().any(|f| f.id == candidate.to_string()) {
            candidate = candidate.saturating_add(1);
        }
        self.last_id = candidate;
        candidate.to_string()
    }
}
