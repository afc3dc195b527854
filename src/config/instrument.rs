//! # 仪器描述文件
//!
//! 从 JSON 读取谱仪的硬件参数与可选项。所有键都有默认值，缺失即取默认；
//! 不做跨字段一致性检查。
//!
//! ## 文件结构
//! ```json
//! {
//!   "name": "PUMA",
//!   "arm_lengths": {"L1": 2.15, "L2": 2.29, "L3": 0.88, "L4": 0.75},
//!   "monochromator_crystals": {"PG[002]": {"d_spacing": 3.355, ...}},
//!   "analyzer_crystals": {...},
//!   "focusing": {...}, "experimental_modules": {...},
//!   "collimators": {...}, "slits": {...}
//! }
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/instrument.rs` 使用
//! - 使用 `serde` / `serde_json` 反序列化，`walkdir` + `glob` 查找描述文件

use crate::error::{Result, TaviError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// 描述文件名后缀
pub const CONFIG_SUFFIX: &str = "_config.json";

/// 单晶（单色器/分析器）参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrystalInfo {
    /// 晶面间距 (Å)
    pub d_spacing: f64,
    pub slab_width: f64,
    pub slab_height: f64,
    pub n_columns: u32,
    pub n_rows: u32,
    pub gap: f64,
    /// 镶嵌度 (arcmin)
    pub mosaic: f64,
    /// 反射率
    pub r0: f64,
}

impl Default for CrystalInfo {
    fn default() -> Self {
        Self {
            d_spacing: 3.355,
            slab_width: 0.02,
            slab_height: 0.02,
            n_columns: 1,
            n_rows: 1,
            gap: 0.0005,
            mosaic: 35.0,
            r0: 1.0,
        }
    }
}

/// 臂长 (m)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmLengths {
    /// 源 - 单色器
    #[serde(rename = "L1")]
    pub l1: f64,
    /// 单色器 - 样品
    #[serde(rename = "L2")]
    pub l2: f64,
    /// 样品 - 分析器
    #[serde(rename = "L3")]
    pub l3: f64,
    /// 分析器 - 探测器
    #[serde(rename = "L4")]
    pub l4: f64,
}

impl Default for ArmLengths {
    fn default() -> Self {
        Self {
            l1: 1.0,
            l2: 1.0,
            l3: 1.0,
            l4: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Focusing {
    pub rhm_range: [f64; 2],
    pub rvm_range: [f64; 2],
    pub rha_range: [f64; 2],
    pub rva_value: f64,
    pub rhm_min: f64,
    pub rvm_min: f64,
    pub rha_min: f64,
}

impl Default for Focusing {
    fn default() -> Self {
        Self {
            rhm_range: [0.0, 10.0],
            rvm_range: [0.0, 10.0],
            rha_range: [0.0, 10.0],
            rva_value: 0.8,
            rhm_min: 2.0,
            rvm_min: 0.5,
            rha_min: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentalModules {
    pub nmo_options: Vec<String>,
    pub v_selector_available: bool,
}

impl Default for ExperimentalModules {
    fn default() -> Self {
        Self {
            nmo_options: vec!["None".to_string()],
            v_selector_available: false,
        }
    }
}

/// 各段可选准直 (arcmin)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collimators {
    pub alpha_1_options: Vec<i64>,
    pub alpha_2_options: Vec<i64>,
    pub alpha_3_options: Vec<i64>,
    pub alpha_4_options: Vec<i64>,
}

impl Default for Collimators {
    fn default() -> Self {
        Self {
            alpha_1_options: vec![0],
            alpha_2_options: vec![0],
            alpha_3_options: vec![0],
            alpha_4_options: vec![0],
        }
    }
}

/// 狭缝开口 (m) 与可调范围
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slits {
    pub hbl_hgap: f64,
    pub hbl_vgap: f64,
    pub vbl_hgap: f64,
    pub pbl_hgap: f64,
    pub pbl_vgap: f64,
    pub pbl_hoffset: f64,
    pub pbl_voffset: f64,
    pub dbl_hgap: f64,

    pub hbl_hgap_range: [f64; 2],
    pub hbl_vgap_range: [f64; 2],
    pub vbl_hgap_range: [f64; 2],
    pub pbl_hgap_range: [f64; 2],
    pub pbl_vgap_range: [f64; 2],
    pub dbl_hgap_range: [f64; 2],
}

impl Default for Slits {
    fn default() -> Self {
        Self {
            hbl_hgap: 0.078,
            hbl_vgap: 0.150,
            vbl_hgap: 0.088,
            pbl_hgap: 0.100,
            pbl_vgap: 0.100,
            pbl_hoffset: 0.0,
            pbl_voffset: 0.0,
            dbl_hgap: 0.050,
            hbl_hgap_range: [0.01, 0.20],
            hbl_vgap_range: [0.01, 0.30],
            vbl_hgap_range: [0.01, 0.20],
            pbl_hgap_range: [0.01, 0.20],
            pbl_vgap_range: [0.01, 0.20],
            dbl_hgap_range: [0.01, 0.10],
        }
    }
}

/// 仪器描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentConfig {
    pub name: String,
    pub description: String,
    pub arm_lengths: ArmLengths,
    pub monochromator_crystals: BTreeMap<String, CrystalInfo>,
    pub analyzer_crystals: BTreeMap<String, CrystalInfo>,
    pub focusing: Focusing,
    pub experimental_modules: ExperimentalModules,
    pub collimators: Collimators,
    pub slits: Slits,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            name: "Unknown Instrument".to_string(),
            description: String::new(),
            arm_lengths: ArmLengths::default(),
            monochromator_crystals: BTreeMap::new(),
            analyzer_crystals: BTreeMap::new(),
            focusing: Focusing::default(),
            experimental_modules: ExperimentalModules::default(),
            collimators: Collimators::default(),
            slits: Slits::default(),
        }
    }
}

impl InstrumentConfig {
    /// 从文件加载；文件不存在时报错
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TaviError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| TaviError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_json_str(&content).map_err(|e| TaviError::ParseError {
            format: "instrument JSON".to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), name = %config.name, "instrument config loaded");
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// 单色器晶体名（按名称排序）
    pub fn monochromator_names(&self) -> Vec<&str> {
        self.monochromator_crystals.keys().map(String::as_str).collect()
    }

    /// 分析器晶体名（按名称排序）
    pub fn analyzer_names(&self) -> Vec<&str> {
        self.analyzer_crystals.keys().map(String::as_str).collect()
    }

    pub fn monochromator(&self, name: &str) -> Option<&CrystalInfo> {
        self.monochromator_crystals.get(name)
    }

    pub fn analyzer(&self, name: &str) -> Option<&CrystalInfo> {
        self.analyzer_crystals.get(name)
    }

    /// 列出目录下的仪器描述（`<name>_config.json` 中的 name），按名称排序
    ///
    /// 目录不存在时返回空列表。
    pub fn discover(dir: &Path) -> Result<Vec<String>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let pattern = glob::Pattern::new(&format!("*{}", CONFIG_SUFFIX))
            .map_err(|e| TaviError::Other(format!("Invalid pattern: {}", e)))?;

        let mut names: Vec<String> = WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| pattern.matches(name))
            .filter_map(|name| name.strip_suffix(CONFIG_SUFFIX).map(str::to_string))
            .collect();

        names.sort();
        Ok(names)
    }
}
