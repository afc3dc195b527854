//! # 样品状态模型
//!
//! 晶格参数、空间群与样品类型。样品类型预设来自静态表，
//! 切换类型时仅覆盖预设中给出的字段。
//!
//! ## 依赖关系
//! - 被 `models/application.rs` 使用
//! - 使用 `crystal/lattice.rs` 的 LatticeParameters

use crate::crystal::lattice::LatticeParameters;
use crate::models::base::observable_fields;
use crate::models::observable::Observable;

/// 样品类型预设
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePreset {
    pub name: &'static str,
    pub radius: Option<f64>,
    pub height: Option<f64>,
    pub mosaic: Option<f64>,
    pub temperature: Option<f64>,
}

/// 可选样品类型
pub const SAMPLE_PRESETS: [SamplePreset; 3] = [
    SamplePreset {
        name: "Aluminum rod Bragg",
        radius: Some(0.5),
        height: Some(1.0),
        mosaic: Some(0.1),
        temperature: None,
    },
    SamplePreset {
        name: "Aluminum rod acoustic phonon",
        radius: Some(0.5),
        height: Some(1.0),
        mosaic: None,
        temperature: Some(300.0),
    },
    SamplePreset {
        name: "None",
        radius: None,
        height: None,
        mosaic: None,
        temperature: None,
    },
];

/// 样品状态
#[derive(Debug)]
pub struct SampleModel {
    /// 晶格长度 (Å)
    pub lattice_a: Observable<f64>,
    pub lattice_b: Observable<f64>,
    pub lattice_c: Observable<f64>,
    /// 晶格角度 (deg)
    pub lattice_alpha: Observable<f64>,
    pub lattice_beta: Observable<f64>,
    pub lattice_gamma: Observable<f64>,

    pub space_group: Observable<String>,

    pub sample_type: Observable<String>,
    /// 半径 (cm)
    pub sample_radius: Observable<f64>,
    /// 高度 (cm)
    pub sample_height: Observable<f64>,
    pub sample_mosaic: Observable<f64>,
    /// 温度 (K)
    pub sample_temperature: Observable<f64>,
}

impl SampleModel {
    pub fn new() -> Self {
        Self {
            lattice_a: Observable::new("lattice_a", 4.05),
            lattice_b: Observable::new("lattice_b", 4.05),
            lattice_c: Observable::new("lattice_c", 4.05),
            lattice_alpha: Observable::new("lattice_alpha", 90.0),
            lattice_beta: Observable::new("lattice_beta", 90.0),
            lattice_gamma: Observable::new("lattice_gamma", 90.0),
            space_group: Observable::new("space_group", String::new()),
            sample_type: Observable::new("sample_type", "None".to_string()),
            sample_radius: Observable::new("sample_radius", 0.5),
            sample_height: Observable::new("sample_height", 1.0),
            sample_mosaic: Observable::new("sample_mosaic", 0.1),
            sample_temperature: Observable::new("sample_temperature", 300.0),
        }
    }

    /// 当前晶格参数
    pub fn lattice(&self) -> LatticeParameters {
        LatticeParameters::new(
            self.lattice_a.get(),
            self.lattice_b.get(),
            self.lattice_c.get(),
            self.lattice_alpha.get(),
            self.lattice_beta.get(),
            self.lattice_gamma.get(),
        )
    }

    /// 一次写入全部六个晶格参数
    pub fn set_lattice(&mut self, lattice: &LatticeParameters) {
        self.lattice_a.set(lattice.a);
        self.lattice_b.set(lattice.b);
        self.lattice_c.set(lattice.c);
        self.lattice_alpha.set(lattice.alpha);
        self.lattice_beta.set(lattice.beta);
        self.lattice_gamma.set(lattice.gamma);
    }

    /// 切换样品类型并应用预设；未知类型忽略，返回 false
    pub fn set_sample_type(&mut self, name: &str) -> bool {
        let Some(preset) = SAMPLE_PRESETS.iter().find(|p| p.name == name) else {
            tracing::debug!(sample_type = name, "unknown sample type ignored");
            return false;
        };

        self.sample_type.set(preset.name.to_string());
        if let Some(radius) = preset.radius {
            self.sample_radius.set(radius);
        }
        if let Some(height) = preset.height {
            self.sample_height.set(height);
        }
        if let Some(mosaic) = preset.mosaic {
            self.sample_mosaic.set(mosaic);
        }
        if let Some(temperature) = preset.temperature {
            self.sample_temperature.set(temperature);
        }
        true
    }
}

impl Default for SampleModel {
    fn default() -> Self {
        Self::new()
    }
}

observable_fields!(
    SampleModel,
    "sample",
    [
        lattice_a,
        lattice_b,
        lattice_c,
        lattice_alpha,
        lattice_beta,
        lattice_gamma,
        space_group,
        sample_type,
        sample_radius,
        sample_height,
        sample_mosaic,
        sample_temperature,
    ]
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_reflects_fields() {
        let mut sample = SampleModel::new();
        sample.lattice_c.set(5.49);
        sample.lattice_gamma.set(120.0);

        let lattice = sample.lattice();
        assert_eq!(lattice.a, 4.05);
        assert_eq!(lattice.c, 5.49);
        assert_eq!(lattice.gamma, 120.0);
    }

    #[test]
    fn test_set_sample_type_applies_only_given_defaults() {
        let mut sample = SampleModel::new();
        sample.sample_mosaic.set(0.7);
        sample.sample_temperature.set(10.0);

        assert!(sample.set_sample_type("Aluminum rod acoustic phonon"));
        assert_eq!(sample.sample_type.get(), "Aluminum rod acoustic phonon");
        assert_eq!(sample.sample_temperature.get(), 300.0);
        assert_eq!(sample.sample_mosaic.get(), 0.7);
    }

    #[test]
    fn test_unknown_sample_type_is_ignored() {
        let mut sample = SampleModel::new();
        assert!(!sample.set_sample_type("Vanadium"));
        assert_eq!(sample.sample_type.get(), "None");
    }
}
