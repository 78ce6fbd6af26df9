//! 人情记录监听器回调接口

use async_trait::async_trait;

/// 人情记录监听器，UI 层用它刷新列表和仪表盘
#[async_trait]
pub trait FavorListener: Send + Sync {
    /// 记录集合写入成功后触发，参数为整份集合的 JSON 数组字符串
    async fn on_favor_list_changed(&self, favors_json: String);
}

/// 默认空实现（无操作）
pub struct EmptyFavorListener;

#[async_trait]
impl FavorListener for EmptyFavorListener {
    async fn on_favor_list_changed(&self, _favors_json: String) {
        // 默认不做任何处理
    }
}
