//! # 扫描点目录命名
//!
//! 每个扫描点的输出目录名由各坐标编码后拼接而成：`-` → `m`，`.` → `p`。
//!
//! ```text
//! qx_2p0_qy_0p0_qz_0p0_dE_3p25_rhm_0p0_rvm_0p0_rha_0p0_rva_0p0
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs` 使用
//! - 使用 `scan/command.rs` 的 ScanPoint, ScanMode

use crate::crystal::Vector3;
use crate::scan::command::{ScanMode, ScanPoint};

use regex::Regex;
use std::sync::OnceLock;

const FOLDER_PATTERN: &str = concat!(
    r"^qx_([\dmp]+)_qy_([\dmp]+)_qz_([\dmp]+)_dE_([\dmp]+)",
    r"(?:_rhm_([\dmp]+)_rvm_([\dmp]+)_rha_([\dmp]+)_rva_([\dmp]+))?",
    r"(?:_H_([\dmp]+)_K_([\dmp]+)_L_([\dmp]+))?",
);

/// 编码数值：`2.0` → `2p0`，`-0.25` → `m0p25`
///
/// 整数值保留 `.0` 后缀。
pub fn encode_number(value: f64) -> String {
    format!("{:?}", value).replace('-', "m").replace('.', "p")
}

/// `encode_number` 的逆变换
pub fn decode_number(encoded: &str) -> Option<f64> {
    encoded.replace('m', "-").replace('p', ".").parse().ok()
}

/// 扫描点目录名
///
/// `hkl` 仅在动量模式下追加为 `_H_.._K_.._L_..`。
pub fn point_folder_name(point: &ScanPoint, mode: ScanMode, hkl: Option<Vector3>) -> String {
    let mut parts: Vec<String> = mode
        .axis_labels()
        .iter()
        .zip(point.iter())
        .map(|(label, &v)| format!("{}_{}", label, encode_number(v)))
        .collect();

    for (label, &v) in ["rhm", "rvm", "rha", "rva"].iter().zip(point[4..].iter()) {
        parts.push(format!("{}_{}", label, encode_number(v)));
    }

    if let (ScanMode::Momentum, Some(hkl)) = (mode, hkl) {
        for (label, &v) in ["H", "K", "L"].iter().zip(hkl.iter()) {
            parts.push(format!("{}_{}", label, encode_number(v)));
        }
    }

    parts.join("_")
}

/// 从目录名恢复的坐标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointFolderValues {
    pub qx: f64,
    pub qy: f64,
    pub qz: f64,
    pub delta_e: f64,
    /// (rhm, rvm, rha, rva)
    pub focusing: Option<[f64; 4]>,
    pub hkl: Option<Vector3>,
}

fn folder_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FOLDER_PATTERN).ok()).as_ref()
}

/// 解析动量模式目录名；不匹配或数值无法解码时返回 None
pub fn parse_point_folder_name(name: &str) -> Option<PointFolderValues> {
    let caps = folder_regex()?.captures(name)?;
    let group = |i: usize| -> Option<Option<f64>> {
        match caps.get(i) {
            Some(m) => decode_number(m.as_str()).map(Some),
            None => Some(None),
        }
    };

    let qx = group(1)??;
    let qy = group(2)??;
    let qz = group(3)??;
    let delta_e = group(4)??;

    let focusing = match (group(5)?, group(6)?, group(7)?, group(8)?) {
        (Some(rhm), Some(rvm), Some(rha), Some(rva)) => Some([rhm, rvm, rha, rva]),
        _ => None,
    };
    let hkl = match (group(9)?, group(10)?, group(11)?) {
        (Some(h), Some(k), Some(l)) => Some([h, k, l]),
        _ => None,
    };

    Some(PointFolderValues {
        qx,
        qy,
        qz,
        delta_e,
        focusing,
        hkl,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_number() {
        assert_eq!(encode_number(2.0), "2p0");
        assert_eq!(encode_number(-0.25), "m0p25");
        assert_eq!(encode_number(3.125), "3p125");
    }

    #[test]
    fn test_decode_number() {
        assert_eq!(decode_number("m0p25"), Some(-0.25));
        assert_eq!(decode_number("2p0"), Some(2.0));
        assert_eq!(decode_number("pp"), None);
    }

    #[test]
    fn test_momentum_folder_name() {
        let point = [2.0, 0.0, -0.5, 3.25, 0.0, 0.0, 0.0, 0.8];
        assert_eq!(
            point_folder_name(&point, ScanMode::Momentum, None),
            "qx_2p0_qy_0p0_qz_m0p5_dE_3p25_rhm_0p0_rvm_0p0_rha_0p0_rva_0p8"
        );
    }

    #[test]
    fn test_rlu_and_angle_folder_names() {
        let point = [1.0, 1.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0];
        assert!(point_folder_name(&point, ScanMode::Rlu, Some([9.0, 9.0, 9.0]))
            .starts_with("H_1p0_K_1p0_L_0p0_dE_2p0_rhm_"));
        assert!(!point_folder_name(&point, ScanMode::Rlu, Some([9.0, 9.0, 9.0])).contains("9p0"));
        assert!(point_folder_name(&point, ScanMode::Angle, None).starts_with("A1_1p0_A2_1p0_A3_0p0_A4_2p0"));
    }

    #[test]
    fn test_parse_folder_name_round_trip() {
        let point = [2.1, 0.0, 0.0, 3.25, 1.5, 0.0, 2.0, 0.8];
        let name = point_folder_name(&point, ScanMode::Momentum, Some([1.0, 0.0, -0.5]));
        let parsed = parse_point_folder_name(&name).unwrap();

        assert_eq!(parsed.qx, 2.1);
        assert_eq!(parsed.delta_e, 3.25);
        assert_eq!(parsed.focusing, Some([1.5, 0.0, 2.0, 0.8]));
        assert_eq!(parsed.hkl, Some([1.0, 0.0, -0.5]));
    }

    #[test]
    fn test_parse_folder_name_without_optional_groups() {
        let parsed = parse_point_folder_name("qx_2p0_qy_0p0_qz_0p0_dE_m1p0").unwrap();
        assert_eq!(parsed.delta_e, -1.0);
        assert_eq!(parsed.focusing, None);
        assert_eq!(parsed.hkl, None);
    }

    #[test]
    fn test_parse_folder_name_rejects_other_layouts() {
        assert!(parse_point_folder_name("H_1p0_K_0p0_L_0p0_dE_2p0").is_none());
        assert!(parse_point_folder_name("scan_qx_2p0_qy_0p0_qz_0p0_dE_1p0").is_none());
    }
}
