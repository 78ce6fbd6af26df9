//! 人情记录模块错误类型

use std::fmt;
use thiserror::Error;

/// 草稿中可被校验的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    ContactName,
    Description,
    Date,
}

impl DraftField {
    /// 序列化格式中的字段名
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::ContactName => "contactName",
            DraftField::Description => "description",
            DraftField::Date => "date",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum FavorError {
    #[error("favor not found: {0}")]
    NotFound(String),

    #[error("missing required field(s): {}", join_fields(.0))]
    MissingField(Vec<DraftField>),

    #[error("storage unavailable: {0:#}")]
    StorageUnavailable(#[source] anyhow::Error),
}

impl FavorError {
    /// 校验失败时缺失的字段，其它错误返回空切片
    pub fn missing_fields(&self) -> &[DraftField] {
        match self {
            FavorError::MissingField(fields) => fields,
            _ => &[],
        }
    }
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(DraftField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type FavorResult<T> = Result<T, FavorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_lists_wire_names() {
        let err = FavorError::MissingField(vec![DraftField::ContactName, DraftField::Description]);
        assert_eq!(
            err.to_string(),
            "missing required field(s): contactName, description"
        );
        assert_eq!(err.missing_fields().len(), 2);
    }

    #[test]
    fn storage_error_keeps_context_chain() {
        let inner = anyhow::anyhow!("disk full").context("写入存储键失败");
        let err = FavorError::StorageUnavailable(inner);
        assert_eq!(err.to_string(), "storage unavailable: 写入存储键失败: disk full");
    }
}
