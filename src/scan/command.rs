//! # 扫描命令
//!
//! 扫描命令格式：`<变量名> <起点> <终点> <步长>`，例如 `qx 2 2.2 0.1`。
//!
//! ## 取值规则
//! - 点数 = ceil((终点 − 起点) / 步长) + 1（比值先减 1e-9 容差吸收浮点误差），
//!   即从起点按步长走到第一个不小于终点的值为止
//! - 第 i 个值 = 起点 + i·步长，保留 3 位小数
//! - 终点不是步长整数倍时，最后一个值超过终点
//! - 两条命令的笛卡尔积同样受 `MAX_SCAN_POINTS` 限制
//!
//! ## 扫描点
//! 每个扫描点为 8 槽坐标 `[qx, qy, qz, deltaE, rhm, rvm, rha, rva]`，
//! 变量名 → 槽位映射见 `variable_slot`。
//!
//! ## 依赖关系
//! - 被 `models/scan.rs`, `models/application.rs`, `scan/naming.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::fmt;

/// 8 槽扫描点 `[qx, qy, qz, deltaE, rhm, rvm, rha, rva]`
pub type ScanPoint = [f64; 8];

/// 全零模板
pub const ZERO_POINT: ScanPoint = [0.0; 8];

/// 单条命令（以及两条命令的笛卡尔积）允许展开的最大点数
pub const MAX_SCAN_POINTS: usize = 1_000_000;

const STEP_TOLERANCE: f64 = 1e-9;

/// 变量名对应的扫描点槽位；未知变量返回 None
pub fn variable_slot(name: &str) -> Option<usize> {
    match name {
        "qx" | "H" | "A1" => Some(0),
        "qy" | "K" | "A2" => Some(1),
        "qz" | "L" | "A3" => Some(2),
        "deltaE" | "A4" => Some(3),
        "rhm" => Some(4),
        "rvm" => Some(5),
        "rha" => Some(6),
        "rva" => Some(7),
        _ => None,
    }
}

/// 解析后的扫描命令
#[derive(Debug, Clone, PartialEq)]
pub struct ScanCommand {
    pub variable: String,
    pub values: Vec<f64>,
}

impl ScanCommand {
    /// 解析扫描命令
    ///
    /// 词数不为 4、数值无法解析、步长为 0 或点数超出上限时返回 None，
    /// 表示该轴没有扫描。
    pub fn parse(command: &str) -> Option<Self> {
        let tokens: Vec<&str> = command.split_whitespace().collect();
        let [name, start, end, step] = tokens.as_slice() else {
            return None;
        };

        let start: f64 = start.parse().ok()?;
        let end: f64 = end.parse().ok()?;
        let step: f64 = step.parse().ok()?;

        let ratio = (end - start) / step;
        if !ratio.is_finite() {
            return None;
        }

        let count = if ratio < 0.0 {
            0.0
        } else {
            (ratio - STEP_TOLERANCE).ceil() + 1.0
        };
        if count > MAX_SCAN_POINTS as f64 {
            tracing::warn!(command, count, "scan command exceeds point limit, ignored");
            return None;
        }

        let values = (0..count as usize)
            .map(|i| round3(start + i as f64 * step))
            .collect();

        Some(Self {
            variable: (*name).to_string(),
            values,
        })
    }

    /// 该命令写入的槽位
    pub fn slot(&self) -> Option<usize> {
        variable_slot(&self.variable)
    }

    fn apply(&self, point: &mut ScanPoint, value: f64) {
        if let Some(slot) = self.slot() {
            point[slot] = value;
        }
    }
}

/// 保留 3 位小数，并将 -0.0 归一为 0.0
fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0 + 0.0
}

/// 展开扫描点
///
/// - 两条命令都无效：仅模板本身一个点
/// - 一条有效：一维扫描
/// - 两条有效：笛卡尔积，命令 1 为外层、命令 2 为内层；
///   积超过 `MAX_SCAN_POINTS` 时舍弃命令 2，退化为命令 1 的一维扫描
pub fn expand(
    cmd1: Option<&ScanCommand>,
    cmd2: Option<&ScanCommand>,
    template: ScanPoint,
) -> Vec<ScanPoint> {
    match (cmd1, cmd2) {
        (None, None) => vec![template],
        (Some(cmd), None) | (None, Some(cmd)) => cmd
            .values
            .iter()
            .map(|&v| {
                let mut point = template;
                cmd.apply(&mut point, v);
                point
            })
            .collect(),
        (Some(outer), Some(inner)) => {
            let total = outer
                .values
                .len()
                .checked_mul(inner.values.len())
                .filter(|&n| n <= MAX_SCAN_POINTS);
            let Some(total) = total else {
                tracing::warn!(
                    outer = outer.values.len(),
                    inner = inner.values.len(),
                    "2D scan exceeds point limit, second command ignored"
                );
                return expand(Some(outer), None, template);
            };

            let mut points = Vec::with_capacity(total);
            for &v1 in &outer.values {
                for &v2 in &inner.values {
                    let mut point = template;
                    outer.apply(&mut point, v1);
                    inner.apply(&mut point, v2);
                    points.push(point);
                }
            }
            points
        }
    }
}

/// 直接从命令文本展开
pub fn expand_commands(command1: &str, command2: &str, template: ScanPoint) -> Vec<ScanPoint> {
    let cmd1 = ScanCommand::parse(command1);
    let cmd2 = ScanCommand::parse(command2);
    expand(cmd1.as_ref(), cmd2.as_ref(), template)
}

/// 扫描模式，决定扫描点目录名中前四个槽位的含义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// 绝对动量 (qx, qy, qz, deltaE)
    #[default]
    Momentum,
    /// 倒易晶格单位 (H, K, L, deltaE)
    Rlu,
    /// 角度 (A1..A4)
    Angle,
}

impl ScanMode {
    /// 由第一条扫描命令的变量名推断
    pub fn from_command(command: &str) -> Self {
        match command.split_whitespace().next() {
            Some("H" | "K" | "L") => ScanMode::Rlu,
            Some("A1" | "A2" | "A3" | "A4") => ScanMode::Angle,
            _ => ScanMode::Momentum,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScanMode::Momentum => "momentum",
            ScanMode::Rlu => "rlu",
            ScanMode::Angle => "angle",
        }
    }

    /// 前四个槽位的列名
    pub fn axis_labels(self) -> [&'static str; 4] {
        match self {
            ScanMode::Momentum => ["qx", "qy", "qz", "dE"],
            ScanMode::Rlu => ["H", "K", "L", "dE"],
            ScanMode::Angle => ["A1", "A2", "A3", "A4"],
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inclusive_range() {
        let cmd = ScanCommand::parse("qx 2 2.2 0.1").unwrap();
        assert_eq!(cmd.variable, "qx");
        assert_eq!(cmd.values, vec![2.0, 2.1, 2.2]);
        assert_eq!(cmd.slot(), Some(0));
    }

    #[test]
    fn test_parse_energy_range() {
        let cmd = ScanCommand::parse("deltaE 3 7 0.25").unwrap();
        assert_eq!(cmd.values.len(), 17);
        assert_eq!(cmd.values[0], 3.0);
        assert_eq!(cmd.values[16], 7.0);
    }

    #[test]
    fn test_parse_last_value_may_pass_end() {
        // 0.25 不是 0.1 的整数倍：ceil(2.5) + 1 = 4 个点
        let cmd = ScanCommand::parse("qy 0 0.25 0.1").unwrap();
        assert_eq!(cmd.values, vec![0.0, 0.1, 0.2, 0.3]);

        let cmd = ScanCommand::parse("qz 0 1 0.3").unwrap();
        assert_eq!(cmd.values, vec![0.0, 0.3, 0.6, 0.9, 1.2]);
        assert!(cmd.values.last().is_some_and(|&v| v >= 1.0));

        let cmd = ScanCommand::parse("A3 1 0.4 -0.25").unwrap();
        assert_eq!(cmd.values, vec![1.0, 0.75, 0.5, 0.25]);
    }

    #[test]
    fn test_parse_negative_step() {
        let cmd = ScanCommand::parse("A3 1 0.5 -0.25").unwrap();
        assert_eq!(cmd.values, vec![1.0, 0.75, 0.5]);
    }

    #[test]
    fn test_parse_rejects_malformed_commands() {
        assert!(ScanCommand::parse("").is_none());
        assert!(ScanCommand::parse("   ").is_none());
        assert!(ScanCommand::parse("qx 2 2.2").is_none());
        assert!(ScanCommand::parse("qx 2 2.2 0.1 extra").is_none());
        assert!(ScanCommand::parse("qx two 2.2 0.1").is_none());
        assert!(ScanCommand::parse("qx 2 2.2 0").is_none());
        assert!(ScanCommand::parse("qx 0 1 1e-9").is_none());
    }

    #[test]
    fn test_parse_wrong_direction_is_empty() {
        let cmd = ScanCommand::parse("qx 2 1 0.1").unwrap();
        assert!(cmd.values.is_empty());
    }

    #[test]
    fn test_values_have_no_negative_zero() {
        let cmd = ScanCommand::parse("qx -0.2 0.2 0.1").unwrap();
        assert_eq!(cmd.values.len(), 5);
        assert!(cmd.values[2].is_sign_positive());
    }

    #[test]
    fn test_expand_no_commands_is_single_template_point() {
        let points = expand_commands("", "bogus", ZERO_POINT);
        assert_eq!(points, vec![ZERO_POINT]);
    }

    #[test]
    fn test_expand_1d() {
        let points = expand_commands("rva 0.5 0.7 0.1", "", ZERO_POINT);
        assert_eq!(points.len(), 3);
        assert_eq!(points[2][7], 0.7);
        assert!(points.iter().all(|p| p[..7].iter().all(|&v| v == 0.0)));
    }

    #[test]
    fn test_expand_only_second_command_is_1d() {
        let points = expand_commands("", "deltaE 3 4 0.5", ZERO_POINT);
        let energies: Vec<f64> = points.iter().map(|p| p[3]).collect();
        assert_eq!(energies, vec![3.0, 3.5, 4.0]);
    }

    #[test]
    fn test_expand_2d_row_major() {
        let points = expand_commands("qx 2 2.2 0.1", "deltaE 3 7 0.25", ZERO_POINT);
        assert_eq!(points.len(), 51);

        assert_eq!(points[0], [2.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(points[1], [2.0, 0.0, 0.0, 3.25, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(points[16][3], 7.0);
        assert_eq!(points[17], [2.1, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(points[50], [2.2, 0.0, 0.0, 7.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_expand_2d_over_limit_drops_second_command() {
        let points = expand_commands("qx 0 999999 1", "qy 0 999999 1", ZERO_POINT);
        assert_eq!(points.len(), 1_000_000);
        assert_eq!(points[1], [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(points.iter().all(|p| p[1] == 0.0));
    }

    #[test]
    fn test_expand_2d_at_limit_is_full_product() {
        let points = expand_commands("qx 0 999 1", "qy 0 999 1", ZERO_POINT);
        assert_eq!(points.len(), MAX_SCAN_POINTS);
        assert_eq!(points[1001], [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_expand_keeps_template_for_unknown_variable() {
        let template = [2.0, 0.0, 0.0, 5.25, 0.0, 0.0, 0.0, 0.0];
        let points = expand_commands("temperature 1 3 1", "", template);
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| *p == template));
    }

    #[test]
    fn test_expand_overwrites_only_named_slots() {
        let template = [2.0, 0.5, 0.0, 5.25, 1.0, 1.0, 1.0, 1.0];
        let points = expand_commands("qz 0 0.1 0.1", "", template);
        assert_eq!(points[1], [2.0, 0.5, 0.1, 5.25, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_scan_mode_from_command() {
        assert_eq!(ScanMode::from_command(""), ScanMode::Momentum);
        assert_eq!(ScanMode::from_command("qy 0 1 0.1"), ScanMode::Momentum);
        assert_eq!(ScanMode::from_command("H 1 2 0.1"), ScanMode::Rlu);
        assert_eq!(ScanMode::from_command("A4 30 40 1"), ScanMode::Angle);
        assert_eq!(ScanMode::from_command("deltaE 3 7 0.25"), ScanMode::Momentum);
    }
}
