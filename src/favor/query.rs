//! 基于内存集合的筛选与查找（纯函数）

use crate::favor::error::{FavorError, FavorResult};
use crate::favor::models::{FavorRecord, FavorStatus, StatusFilter};

/// 按状态筛选；`StatusFilter::All` 时原样返回
pub fn filter_by_status(records: &[FavorRecord], filter: StatusFilter) -> Vec<FavorRecord> {
    match filter {
        StatusFilter::All => records.to_vec(),
        StatusFilter::Only(status) => records
            .iter()
            .filter(|f| f.status == status)
            .cloned()
            .collect(),
    }
}

/// 线性查找第一条匹配的记录
pub fn find_by_id<'a>(records: &'a [FavorRecord], id: &str) -> FavorResult<&'a FavorRecord> {
    records
        .iter()
        .find(|f| f.id == id)
        .ok_or_else(|| FavorError::NotFound(id.to_string()))
}

/// 各状态的记录数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pending + self.completed + self.cancelled
    }

    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.total(),
            StatusFilter::Only(FavorStatus::Pending) => self.pending,
            StatusFilter::Only(FavorStatus::Completed) => self.completed,
            StatusFilter::Only(FavorStatus::Cancelled) => self.cancelled,
        }
    }
}

pub fn count_by_status(records: &[FavorRecord]) -> StatusCounts {
    records
        .iter()
        .fold(StatusCounts::default(), |mut counts, f| {
            match f.status {
                FavorStatus::Pending => counts.pending += 1,
                FavorStatus::Completed => counts.completed += 1,
                FavorStatus::Cancelled => counts.cancelled += 1,
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<FavorRecord> {
        [
            ("1", FavorStatus::Pending),
            ("2", FavorStatus::Completed),
            ("3", FavorStatus::Pending),
            ("4", FavorStatus::Cancelled),
        ]
        .into_iter()
        .map(|(id, status)| FavorRecord {
            id: id.to_string(),
            contact_name: format!("contact {}", id),
            contact_id: None,
            description: "help".to_string(),
            date: "2024-02-02".to_string(),
            proof_image: None,
            status,
        })
        .collect()
    }

    #[test]
    fn all_filter_is_identity() {
        let favors = records();
        assert_eq!(filter_by_status(&favors, StatusFilter::All), favors);
    }

    #[test]
    fn status_filter_keeps_order() {
        let pending = filter_by_status(&records(), FavorStatus::Pending.into());
        let ids: Vec<_> = pending.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn filter_with_no_match_is_empty() {
        let favors: Vec<_> = records()
            .into_iter()
            .filter(|f| f.status != FavorStatus::Completed)
            .collect();
        assert!(filter_by_status(&favors, FavorStatus::Completed.into()).is_empty());
    }

    #[test]
    fn find_by_id_hits_and_misses() {
        let favors = records();
        assert_eq!(find_by_id(&favors, "4").unwrap().status, FavorStatus::Cancelled);
        assert!(matches!(
            find_by_id(&favors, "99"),
            Err(FavorError::NotFound(id)) if id == "99"
        ));
    }

    #[test]
    fn counts_per_status() {
        let counts = count_by_status(&records());
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.get(FavorStatus::Completed.into()), 1);
        assert_eq!(counts.get(StatusFilter::All), 4);
    }
}
