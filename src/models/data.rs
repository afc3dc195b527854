//! # 数据输入输出模型
//!
//! 输出/加载目录（持久化）与扫描进度计数（仅运行期，不持久化）。
//!
//! ## 依赖关系
//! - 被 `models/application.rs` 使用
//! - 使用 `models/base.rs`

use crate::models::base::{Field, FieldMut, Model};
use crate::models::observable::Observable;

use std::path::Path;

/// 默认输出子目录
pub const DEFAULT_OUTPUT_SUBDIR: &str = "output/initial_testing";

/// 数据目录与扫描进度
#[derive(Debug)]
pub struct DataModel {
    pub output_folder: Observable<String>,
    pub load_folder: Observable<String>,

    // 运行期状态
    /// 实际使用的输出目录（可能带编号后缀）
    pub actual_output_folder: Observable<String>,
    pub current_scan: Observable<u64>,
    pub total_scans: Observable<u64>,
    pub max_counts: Observable<f64>,
    pub total_counts: Observable<f64>,
    pub remaining_time: Observable<String>,
}

impl DataModel {
    pub fn new() -> Self {
        Self {
            output_folder: Observable::new("output_folder", String::new()),
            load_folder: Observable::new("load_folder", String::new()),
            actual_output_folder: Observable::new("actual_output_folder", String::new()),
            current_scan: Observable::new("current_scan", 0),
            total_scans: Observable::new("total_scans", 0),
            max_counts: Observable::new("max_counts", 0.0),
            total_counts: Observable::new("total_counts", 0.0),
            remaining_time: Observable::new("remaining_time", String::new()),
        }
    }

    /// 将输出与加载目录指向 `<base>/output/initial_testing`（不创建目录）
    pub fn use_default_folders(&mut self, base: &Path) {
        let folder = base.join(DEFAULT_OUTPUT_SUBDIR).display().to_string();
        self.output_folder.set(folder.clone());
        self.load_folder.set(folder);
    }

    /// 当前进度百分比（向下取整）
    pub fn progress_percentage(&self) -> u64 {
        let total = self.total_scans.get();
        if total == 0 {
            return 0;
        }
        let percent = u128::from(self.current_scan.get()) * 100 / u128::from(total);
        u64::try_from(percent).unwrap_or(u64::MAX)
    }

    pub fn reset_progress(&mut self) {
        self.current_scan.set(0);
        self.total_scans.set(0);
        self.max_counts.set(0.0);
        self.total_counts.set(0.0);
        self.remaining_time.set(String::new());
    }

    /// 累计一次测量的计数
    pub fn update_counts(&mut self, counts: f64) {
        if counts > self.max_counts.get() {
            self.max_counts.set(counts);
        }
        self.total_counts.set(self.total_counts.get() + counts);
    }
}

impl Default for DataModel {
    fn default() -> Self {
        Self::new()
    }
}

// 仅目录设置参与序列化
impl Model for DataModel {
    fn model_name(&self) -> &'static str {
        "data"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::Value(&self.output_folder),
            Field::Value(&self.load_folder),
        ]
    }

    fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
        vec![
            FieldMut::Value(&mut self.output_folder),
            FieldMut::Value(&mut self.load_folder),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percentage() {
        let mut data = DataModel::new();
        assert_eq!(data.progress_percentage(), 0);

        data.total_scans.set(3);
        data.current_scan.set(2);
        assert_eq!(data.progress_percentage(), 66);

        data.total_scans.set(100);
        data.current_scan.set(29);
        assert_eq!(data.progress_percentage(), 29);
    }

    #[test]
    fn test_progress_percentage_with_huge_counters() {
        let mut data = DataModel::new();
        data.total_scans.set(u64::MAX);
        data.current_scan.set(u64::MAX / 2);
        assert_eq!(data.progress_percentage(), 49);

        data.current_scan.set(u64::MAX);
        assert_eq!(data.progress_percentage(), 100);
    }

    #[test]
    fn test_update_counts_tracks_max_and_total() {
        let mut data = DataModel::new();
        data.update_counts(10.0);
        data.update_counts(4.0);
        assert_eq!(data.max_counts.get(), 10.0);
        assert_eq!(data.total_counts.get(), 14.0);

        data.reset_progress();
        assert_eq!(data.total_counts.get(), 0.0);
    }

    #[test]
    fn test_runtime_fields_are_not_persisted() {
        let mut data = DataModel::new();
        data.current_scan.set(5);
        let map = data.serialize();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("output_folder"));
        assert!(!map.contains_key("current_scan"));
    }

    #[test]
    fn test_default_folders() {
        let mut data = DataModel::new();
        data.use_default_folders(Path::new("/tmp/tavi"));
        assert!(data.output_folder.get().ends_with("initial_testing"));
        assert_eq!(data.output_folder.get(), data.load_folder.get());
    }
}
