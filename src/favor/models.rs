//! 人情记录本地模型定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 存储键默认值（整份记录集合序列化后存放在这个键下）
pub const DEFAULT_STORAGE_KEY: &str = "favors";

/// 默认数据库地址
pub const DEFAULT_DB_URL: &str = "sqlite://favors.db?mode=rwc";

/// 人情记录状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavorStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl FavorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavorStatus::Pending => "pending",
            FavorStatus::Completed => "completed",
            FavorStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FavorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FavorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(FavorStatus::Pending),
            "completed" => Ok(FavorStatus::Completed),
            "cancelled" => Ok(FavorStatus::Cancelled),
            other => Err(format!("未知状态: {}", other)),
        }
    }
}

/// 列表筛选条件："all" 或某个具体状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(FavorStatus),
}

impl From<FavorStatus> for StatusFilter {
    fn from(status: FavorStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<FavorStatus>().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

/// 人情记录（唯一持久化的实体）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavorRecord {
    /// 记录 ID，创建时分配，之后不可变
    pub id: String,
    /// 对方显示名
    #[serde(rename = "contactName")]
    pub contact_name: String,
    /// 设备通讯录中的联系人 ID（仅作记录，核心层不解析）
    #[serde(
        rename = "contactId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_id: Option<String>,
    /// 描述
    pub description: String,
    /// 日期（YYYY-MM-DD）
    pub date: String,
    /// 凭证图片 URI 或路径
    #[serde(
        rename = "proofImage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub proof_image: Option<String>,
    #[serde(default)]
    pub status: FavorStatus,
}

impl FavorRecord {
    /// 把补丁中设置的字段合并到记录上，ID 保持不变
    pub fn apply(&mut self, patch: &FavorPatch) {
        if let Some(contact_name) = &patch.contact_name {
            self.contact_name = contact_name.clone();
        }
        if let Some(contact_id) = &patch.contact_id {
            self.contact_id = contact_id.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(date) = &patch.date {
            self.date = date.clone();
        }
        if let Some(proof_image) = &patch.proof_image {
            self.proof_image = proof_image.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// 表单草稿：尚未持久化的候选字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavorDraft {
    pub contact_name: String,
    pub contact_id: Option<String>,
    pub description: String,
    /// 为空时使用当天日期
    pub date: Option<String>,
    pub proof_image: Option<String>,
    /// 为空时默认 pending
    pub status: Option<FavorStatus>,
}

impl FavorDraft {
    pub fn new(contact_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            contact_name: contact_name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_status(mut self, status: FavorStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_contact_id(mut self, contact_id: impl Into<String>) -> Self {
        self.contact_id = Some(contact_id.into());
        self
    }

    pub fn with_proof_image(mut self, proof_image: impl Into<String>) -> Self {
        self.proof_image = Some(proof_image.into());
        self
    }

    /// 用给定 ID 生成记录，缺省字段按默认规则补齐
    pub fn into_record(self, id: String) -> FavorRecord {
        FavorRecord {
            id,
            contact_name: self.contact_name,
            contact_id: self.contact_id,
            description: self.description,
            date: self.date.unwrap_or_else(today),
            proof_image: self.proof_image,
            status: self.status.unwrap_or_default(),
        }
    }
}

/// 更新补丁：只有 Some 的字段会被写入
///
/// `contact_id` / `proof_image` 是双层 Option，`Some(None)` 表示清空。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavorPatch {
    pub contact_name: Option<String>,
    pub contact_id: Option<Option<String>>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub proof_image: Option<Option<String>>,
    pub status: Option<FavorStatus>,
}

impl FavorPatch {
    pub fn status(status: FavorStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == FavorPatch::default()
    }
}

/// 编辑表单提交的字段整体覆盖；表单不编辑的 contact_id 只在给出时才写入
impl From<FavorDraft> for FavorPatch {
    fn from(draft: FavorDraft) -> Self {
        Self {
            contact_name: Some(draft.contact_name),
            contact_id: draft.contact_id.map(Some),
            description: Some(draft.description),
            date: draft.date,
            proof_image: Some(draft.proof_image),
            status: draft.status,
        }
    }
}

/// 人情记录存储配置
#[derive(Debug, Clone)]
pub struct FavorStoreConfig {
    /// 数据库路径（SQLite），可以是：
    /// - 相对路径：如 "favors.db" 会转换为 "sqlite://favors.db?mode=rwc"
    /// - 绝对路径：如 "/path/to/favors.db" 会转换为 "sqlite:///path/to/favors.db?mode=rwc"
    /// - 完整URL：如 "sqlite://favors.db" 直接使用
    pub db_path: String,
    /// 整份集合所在的存储键
    pub storage_key: String,
}

impl Default for FavorStoreConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl FavorStoreConfig {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Default::default()
        }
    }

    /// 返回可直接用于连接的 sqlx URL
    pub fn db_url(&self) -> String {
        normalize_db_url(&self.db_path)
    }
}

/// 把裸路径转换成 sqlite URL；已经是 URL 的原样返回
pub fn normalize_db_url(db_path: &str) -> String {
    if db_path.starts_with("sqlite:") {
        db_path.to_string()
    } else {
        format!("sqlite://{}?mode=rwc", db_path)
    }
}

/// 当天 UTC 日期（YYYY-MM-DD），与移动端预填的日期一致
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
