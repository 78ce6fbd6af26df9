//! 人情记录模块
//!
//! 本地记录存储、筛选、表单校验与关系平衡分

pub mod balance;
pub mod dao;
pub mod db;
pub mod error;
pub mod kv;
pub mod listener;
pub mod models;
pub mod query;
pub mod store;
pub mod validation;

// 重新导出主要类型和函数
pub use balance::{compute_score, derive_insight, summarize, BalanceLevel, BalanceSummary, Insight};
pub use dao::FavorDao;
pub use error::{DraftField, FavorError, FavorResult};
pub use kv::{KvStorage, MemoryKvStorage, SqliteKvStorage};
pub use listener::{EmptyFavorListener, FavorListener};
pub use models::{
    FavorDraft, FavorPatch, FavorRecord, FavorStatus, FavorStoreConfig, StatusFilter,
};
pub use query::{count_by_status, filter_by_status, find_by_id, StatusCounts};
pub use store::FavorStore;
pub use validation::{validate_draft, validate_patch};
