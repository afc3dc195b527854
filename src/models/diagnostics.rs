//! # 诊断监视器设置模型
//!
//! 沿束线分布的 PSD / DSD / 能量监视器开关，每个监视器一个布尔字段，
//! 以监视器名作为序列化键。
//!
//! ## 依赖关系
//! - 被 `models/application.rs`, `models/legacy.rs` 使用
//! - 使用 `models/base.rs`

use crate::models::base::{Field, FieldMut, Model};
use crate::models::observable::Observable;

/// 全部诊断监视器（束线顺序）
pub const DIAGNOSTIC_OPTIONS: [&str; 18] = [
    "Source PSD",
    "Source DSD",
    "Postcollimation PSD",
    "Postcollimation DSD",
    "Premono Emonitor",
    "Postmono Emonitor",
    "Pre-sample collimation PSD",
    "Sample PSD @ L2-0.5",
    "Sample PSD @ L2-0.3",
    "Sample PSD @ Sample",
    "Sample DSD @ Sample",
    "Sample EMonitor @ Sample",
    "Pre-analyzer collimation PSD",
    "Pre-analyzer EMonitor",
    "Pre-analyzer PSD",
    "Post-analyzer EMonitor",
    "Post-analyzer PSD",
    "Detector PSD",
];

/// 诊断监视器开关
#[derive(Debug)]
pub struct DiagnosticsModel {
    settings: Vec<Observable<bool>>,
}

impl DiagnosticsModel {
    pub fn new() -> Self {
        Self {
            settings: DIAGNOSTIC_OPTIONS
                .iter()
                .map(|&name| Observable::new(name, false))
                .collect(),
        }
    }

    /// 按名称取开关；未知名称为 false
    pub fn get(&self, name: &str) -> bool {
        self.setting(name).map_or(false, Observable::get)
    }

    /// 按名称设置开关；未知名称忽略
    pub fn set(&mut self, name: &str, enabled: bool) {
        match self.settings.iter_mut().find(|s| s.name() == name) {
            Some(setting) => {
                setting.set(enabled);
            }
            None => tracing::debug!(diagnostic = name, "unknown diagnostic ignored"),
        }
    }

    /// 单个监视器的可观察字段
    pub fn setting(&self, name: &str) -> Option<&Observable<bool>> {
        self.settings.iter().find(|s| s.name() == name)
    }

    pub fn setting_mut(&mut self, name: &str) -> Option<&mut Observable<bool>> {
        self.settings.iter_mut().find(|s| s.name() == name)
    }

    /// 已启用的监视器名
    pub fn enabled(&self) -> Vec<&'static str> {
        self.settings
            .iter()
            .filter(|s| s.get())
            .map(|s| s.name())
            .collect()
    }

    pub fn enable_all(&mut self) {
        for setting in &mut self.settings {
            setting.set(true);
        }
    }

    pub fn disable_all(&mut self) {
        for setting in &mut self.settings {
            setting.set(false);
        }
    }
}

impl Default for DiagnosticsModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for DiagnosticsModel {
    fn model_name(&self) -> &'static str {
        "diagnostics"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        self.settings.iter().map(|s| Field::Value(s)).collect()
    }

    fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
        self.settings
            .iter_mut()
            .map(|s| FieldMut::Value(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_and_set_by_name() {
        let mut diag = DiagnosticsModel::new();
        diag.set("Detector PSD", true);
        diag.set("Nonexistent monitor", true);

        assert!(diag.get("Detector PSD"));
        assert!(!diag.get("Nonexistent monitor"));
        assert_eq!(diag.enabled(), vec!["Detector PSD"]);
    }

    #[test]
    fn test_enable_and_disable_all_preserve_order() {
        let mut diag = DiagnosticsModel::new();
        diag.enable_all();
        assert_eq!(diag.enabled(), DIAGNOSTIC_OPTIONS.to_vec());

        diag.disable_all();
        assert!(diag.enabled().is_empty());
    }

    #[test]
    fn test_serialize_uses_monitor_names() {
        let mut diag = DiagnosticsModel::new();
        diag.set("Source PSD", true);

        let map = diag.serialize();
        assert_eq!(map.len(), 18);
        assert_eq!(map["Source PSD"], json!(true));
        assert_eq!(map["Sample PSD @ L2-0.5"], json!(false));

        let mut other = DiagnosticsModel::new();
        other.deserialize(&map);
        assert!(other.get("Source PSD"));
    }
}
