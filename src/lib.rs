pub mod favor;

// 重新导出常用类型和函数，方便外部使用
pub use favor::{
    compute_score, derive_insight, filter_by_status, find_by_id, validate_draft, FavorDraft,
    FavorError, FavorPatch, FavorRecord, FavorStatus, FavorStore, FavorStoreConfig, KvStorage,
    StatusFilter,
};
