//! 表单草稿校验
//!
//! 只检查必填字段是否为空白，不检查日期格式，也不检查图片是否可访问。

use crate::favor::error::{DraftField, FavorError, FavorResult};
use crate::favor::models::{FavorDraft, FavorPatch};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// 校验新建/编辑草稿，缺失字段按 contactName、description、date 的顺序列出
pub fn validate_draft(draft: &FavorDraft) -> FavorResult<()> {
    let mut missing = Vec::new();
    if is_blank(&draft.contact_name) {
        missing.push(DraftField::ContactName);
    }
    if is_blank(&draft.description) {
        missing.push(DraftField::Description);
    }
    if draft.date.as_deref().is_some_and(is_blank) {
        missing.push(DraftField::Date);
    }
    into_result(missing)
}

/// 校验补丁中显式设置的字段
pub fn validate_patch(patch: &FavorPatch) -> FavorResult<()> {
    let mut missing = Vec::new();
    if patch.contact_name.as_deref().is_some_and(is_blank) {
        missing.push(DraftField::ContactName);
    }
    if patch.description.as_deref().is_some_and(is_blank) {
        missing.push(DraftField::Description);
    }
    if patch.date.as_deref().is_some_and(is_blank) {
        missing.push(DraftField::Date);
    }
    into_result(missing)
}

fn into_result(missing: Vec<DraftField>) -> FavorResult<()> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FavorError::MissingField(missing))
    }
}
