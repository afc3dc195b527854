//! # 扫描设置模型
//!
//! 中子数、固定 Ki/Kf 模式、固定能量与最多两条扫描命令。
//!
//! ## 依赖关系
//! - 被 `models/application.rs` 使用
//! - 使用 `scan/command.rs` 解析与展开扫描命令

use crate::models::base::observable_fields;
use crate::models::observable::Observable;
use crate::scan::command::{expand_commands, ScanMode, ScanPoint, ZERO_POINT};

/// 扫描设置
#[derive(Debug)]
pub struct ScanModel {
    pub number_neutrons: Observable<f64>,
    /// "Ki Fixed" 或 "Kf Fixed"
    pub k_fixed: Observable<String>,
    /// 固定能量 (meV)
    pub fixed_e: Observable<f64>,
    /// 如 "qx 2 2.2 0.1"
    pub scan_command1: Observable<String>,
    /// 如 "deltaE 3 7 0.25"
    pub scan_command2: Observable<String>,
    pub diagnostic_mode: Observable<bool>,
    /// HKL 与 Q 输入模式切换
    pub sample_frame_mode: Observable<bool>,
}

impl ScanModel {
    pub fn new() -> Self {
        Self {
            number_neutrons: Observable::new("number_neutrons", 1e8),
            k_fixed: Observable::new("K_fixed", "Kf Fixed".to_string()),
            fixed_e: Observable::new("fixed_E", 14.7),
            scan_command1: Observable::new("scan_command1", String::new()),
            scan_command2: Observable::new("scan_command2", String::new()),
            diagnostic_mode: Observable::new("diagnostic_mode", true),
            sample_frame_mode: Observable::new("sample_frame_mode", false),
        }
    }

    pub fn scan_mode(&self) -> ScanMode {
        ScanMode::from_command(self.scan_command1.value())
    }

    /// 在全零模板上展开当前扫描命令
    pub fn scan_points(&self) -> Vec<ScanPoint> {
        self.scan_points_from(ZERO_POINT)
    }

    /// 在给定模板上展开当前扫描命令
    pub fn scan_points_from(&self, template: ScanPoint) -> Vec<ScanPoint> {
        expand_commands(
            self.scan_command1.value(),
            self.scan_command2.value(),
            template,
        )
    }
}

impl Default for ScanModel {
    fn default() -> Self {
        Self::new()
    }
}

observable_fields!(
    ScanModel,
    "scan",
    [
        number_neutrons,
        k_fixed,
        fixed_e,
        scan_command1,
        scan_command2,
        diagnostic_mode,
        sample_frame_mode,
    ]
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_commands_give_single_zero_point() {
        let scan = ScanModel::new();
        assert_eq!(scan.scan_points(), vec![ZERO_POINT]);
        assert_eq!(scan.scan_mode(), ScanMode::Momentum);
    }

    #[test]
    fn test_scan_points_follow_commands() {
        let mut scan = ScanModel::new();
        scan.scan_command1.set("H 1 1.2 0.1".to_string());
        scan.scan_command2.set("deltaE 3 7 0.25".to_string());

        let points = scan.scan_points();
        assert_eq!(points.len(), 51);
        assert_eq!(points[0][0], 1.0);
        assert_eq!(scan.scan_mode(), ScanMode::Rlu);
    }
}
