//! # 应用状态聚合器
//!
//! 组合全部领域模型，负责跨模型的派生更新（由 Q 重算 HKL 等）与状态持久化。
//!
//! ## 持久化格式
//! ```json
//! {
//!   "instrument": {...}, "sample": {...}, "reciprocal_space": {...},
//!   "scan": {...}, "diagnostics": {...}, "data": {...}
//! }
//! ```
//! 加载时缺失的顶层键对应模型保持不变；文件不存在时回退到 `set_defaults`。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/` 下全部领域模型与 `models/legacy.rs`

use crate::error::{GeometryError, Result, TaviError};
use crate::models::base::{Field, FieldMap, FieldMut, Model};
use crate::models::data::DataModel;
use crate::models::diagnostics::DiagnosticsModel;
use crate::models::instrument::InstrumentModel;
use crate::models::legacy;
use crate::models::reciprocal_space::ReciprocalSpaceModel;
use crate::models::sample::SampleModel;
use crate::models::scan::ScanModel;
use crate::scan::command::ScanPoint;

use std::fs;
use std::path::Path;

/// 默认参数文件名
pub const PARAMETERS_FILE: &str = "parameters.json";

/// 完整的应用状态
#[derive(Debug, Default)]
pub struct ApplicationModel {
    pub instrument: InstrumentModel,
    pub sample: SampleModel,
    pub reciprocal_space: ReciprocalSpaceModel,
    pub scan: ScanModel,
    pub diagnostics: DiagnosticsModel,
    pub data: DataModel,
}

impl ApplicationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// 应用默认配置，随后由 Q 重算 HKL
    pub fn set_defaults(&mut self) -> std::result::Result<(), GeometryError> {
        let inst = &mut self.instrument;
        inst.mtt.set(30.0);
        inst.stt.set(30.0);
        inst.psi.set(30.0);
        inst.att.set(30.0);
        inst.ki.set(2.662);
        inst.kf.set(2.662);
        inst.ei.set(14.7);
        inst.ef.set(14.7);
        inst.monocris.set("PG[002]".to_string());
        inst.anacris.set("PG[002]".to_string());
        inst.alpha_1.set(40);
        inst.alpha_2_30.set(false);
        inst.alpha_2_40.set(true);
        inst.alpha_2_60.set(false);
        inst.alpha_3.set(30);
        inst.alpha_4.set(30);
        inst.rhmfac.set(1.0);
        inst.rvmfac.set(1.0);
        inst.rhafac.set(1.0);
        inst.nmo_installed.set("None".to_string());
        inst.v_selector_installed.set(false);

        let sample = &mut self.sample;
        sample.lattice_a.set(3.78);
        sample.lattice_b.set(3.78);
        sample.lattice_c.set(5.49);
        sample.lattice_alpha.set(90.0);
        sample.lattice_beta.set(90.0);
        sample.lattice_gamma.set(90.0);

        let rs = &mut self.reciprocal_space;
        rs.qx.set(2.0);
        rs.qy.set(0.0);
        rs.qz.set(0.0);
        rs.delta_e.set(5.25);

        let scan = &mut self.scan;
        scan.number_neutrons.set(1e6);
        scan.k_fixed.set("Kf Fixed".to_string());
        scan.fixed_e.set(14.7);
        scan.scan_command1.set("qx 2 2.2 0.1".to_string());
        scan.scan_command2.set("deltaE 3 7 0.25".to_string());
        scan.diagnostic_mode.set(true);

        self.diagnostics.disable_all();

        self.update_hkl_from_q()
    }

    /// 按样品晶格由 Q 重算 HKL
    pub fn update_hkl_from_q(&mut self) -> std::result::Result<(), GeometryError> {
        let lattice = self.sample.lattice();
        self.reciprocal_space.update_hkl_from_q(&lattice)
    }

    /// 按样品晶格由 HKL 重算 Q
    pub fn update_q_from_hkl(&mut self) -> std::result::Result<(), GeometryError> {
        let lattice = self.sample.lattice();
        self.reciprocal_space.update_q_from_hkl(&lattice)
    }

    /// 当前坐标模板 `[qx, qy, qz, deltaE, 0, 0, 0, 0]`
    pub fn point_template(&self) -> ScanPoint {
        let rs = &self.reciprocal_space;
        [
            rs.qx.get(),
            rs.qy.get(),
            rs.qz.get(),
            rs.delta_e.get(),
            0.0,
            0.0,
            0.0,
            0.0,
        ]
    }

    /// 在当前坐标模板上展开扫描命令
    pub fn scan_points(&self) -> Vec<ScanPoint> {
        self.scan.scan_points_from(self.point_template())
    }

    /// 保存为 JSON（缩进格式）
    pub fn save_parameters(&self, path: &Path) -> Result<()> {
        write_json(path, &self.serialize())?;
        tracing::debug!(path = %path.display(), "parameters saved");
        Ok(())
    }

    /// 从 JSON 加载；文件不存在时应用默认配置
    pub fn load_parameters(&mut self, path: &Path) -> Result<()> {
        let Some(data) = read_json(path)? else {
            tracing::debug!(path = %path.display(), "parameter file missing, using defaults");
            return Ok(self.set_defaults()?);
        };
        self.deserialize(&data);
        tracing::debug!(path = %path.display(), "parameters loaded");
        Ok(())
    }

    /// 以旧版扁平格式保存
    pub fn save_legacy_parameters(&self, path: &Path) -> Result<()> {
        write_json(path, &legacy::to_legacy(&self.serialize()))?;
        tracing::debug!(path = %path.display(), "legacy parameters saved");
        Ok(())
    }

    /// 从旧版扁平格式加载，随后由 Q 重算 HKL
    pub fn load_legacy_parameters(&mut self, path: &Path) -> Result<()> {
        let Some(data) = read_json(path)? else {
            tracing::debug!(path = %path.display(), "legacy file missing, using defaults");
            return Ok(self.set_defaults()?);
        };
        self.deserialize(&legacy::from_legacy(&data));
        self.update_hkl_from_q()?;
        tracing::debug!(path = %path.display(), "legacy parameters loaded");
        Ok(())
    }
}

impl Model for ApplicationModel {
    fn model_name(&self) -> &'static str {
        "application"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::Model(&self.instrument),
            Field::Model(&self.sample),
            Field::Model(&self.reciprocal_space),
            Field::Model(&self.scan),
            Field::Model(&self.diagnostics),
            Field::Model(&self.data),
        ]
    }

    fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
        vec![
            FieldMut::Model(&mut self.instrument),
            FieldMut::Model(&mut self.sample),
            FieldMut::Model(&mut self.reciprocal_space),
            FieldMut::Model(&mut self.scan),
            FieldMut::Model(&mut self.diagnostics),
            FieldMut::Model(&mut self.data),
        ]
    }
}

/// 读取 JSON 对象；文件不存在时返回 None
fn read_json(path: &Path) -> Result<Option<FieldMap>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| TaviError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let map: FieldMap = serde_json::from_str(&content).map_err(|e| TaviError::ParseError {
        format: "JSON".to_string(),
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(Some(map))
}

fn write_json(path: &Path, map: &FieldMap) -> Result<()> {
    let content = serde_json::to_string_pretty(map)?;
    fs::write(path, content).map_err(|e| TaviError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_set_defaults_recomputes_hkl() {
        let mut app = ApplicationModel::new();
        app.set_defaults().unwrap();

        // qx = 2.0, a = 3.78 → H = 2.0 · 3.78 / 2π
        let expected_h = 2.0 * 3.78 / (2.0 * std::f64::consts::PI);
        assert!((app.reciprocal_space.h.get() - expected_h).abs() < 1e-9);
        assert_eq!(app.scan.number_neutrons.get(), 1e6);
        assert!(app.diagnostics.enabled().is_empty());
    }

    #[test]
    fn test_scan_points_use_current_template() {
        let mut app = ApplicationModel::new();
        app.set_defaults().unwrap();
        app.reciprocal_space.qy.set(0.5);

        let points = app.scan_points();
        assert_eq!(points.len(), 51);
        assert_eq!(points[0], [2.0, 0.5, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0]);

        // Scan 模型自身使用全零模板
        assert_eq!(app.scan.scan_points()[0][1], 0.0);
    }

    #[test]
    fn test_serialize_has_all_sections() {
        let app = ApplicationModel::new();
        let map = app.serialize();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        for section in [
            "instrument",
            "sample",
            "reciprocal_space",
            "scan",
            "diagnostics",
            "data",
        ] {
            assert!(keys.contains(&section));
        }
    }

    #[test]
    fn test_deserialize_missing_sections_untouched() {
        let mut app = ApplicationModel::new();
        app.sample.lattice_a.set(5.0);
        let data = json!({"scan": {"number_neutrons": 2e6}});
        app.deserialize(data.as_object().unwrap());

        assert_eq!(app.sample.lattice_a.get(), 5.0);
        assert_eq!(app.scan.number_neutrons.get(), 2e6);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PARAMETERS_FILE);

        let mut app = ApplicationModel::new();
        app.set_defaults().unwrap();
        app.instrument.monocris.set("Cu[111]".to_string());
        app.diagnostics.set("Detector PSD", true);
        app.save_parameters(&path).unwrap();

        let mut loaded = ApplicationModel::new();
        loaded.load_parameters(&path).unwrap();
        assert_eq!(loaded.serialize(), app.serialize());
    }

    #[test]
    fn test_load_missing_file_applies_defaults() {
        let dir = tempdir().unwrap();
        let mut app = ApplicationModel::new();
        app.load_parameters(&dir.path().join("missing.json")).unwrap();
        assert_eq!(app.sample.lattice_c.get(), 5.49);
        assert_eq!(app.scan.scan_command1.get(), "qx 2 2.2 0.1");
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let mut app = ApplicationModel::new();
        assert!(matches!(
            app.load_parameters(&path),
            Err(TaviError::ParseError { .. })
        ));
    }

    #[test]
    fn test_legacy_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.json");

        let mut app = ApplicationModel::new();
        app.set_defaults().unwrap();
        app.instrument.att.set(42.5);
        app.sample.sample_type.set("Aluminum rod Bragg".to_string());
        app.diagnostics.set("Source PSD", true);
        app.save_legacy_parameters(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["att_var"], json!("42.5"));

        let mut loaded = ApplicationModel::new();
        loaded.load_legacy_parameters(&path).unwrap();
        assert_eq!(loaded.instrument.att.get(), 42.5);
        assert_eq!(loaded.sample.sample_type.get(), "Aluminum rod Bragg");
        assert!(loaded.diagnostics.get("Source PSD"));
        assert_eq!(loaded.sample.lattice_a.get(), 3.78);
        assert!((loaded.reciprocal_space.h.get() - app.reciprocal_space.h.get()).abs() < 1e-12);
    }

    #[test]
    fn test_legacy_load_surfaces_geometry_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.json");
        fs::write(
            &path,
            r#"{"lattice_alpha_var": 0, "lattice_beta_var": 0, "lattice_gamma_var": 0}"#,
        )
        .unwrap();

        let mut app = ApplicationModel::new();
        assert!(matches!(
            app.load_legacy_parameters(&path),
            Err(TaviError::Geometry(GeometryError::InvalidAngle { .. }))
        ));
        assert_eq!(app.sample.lattice_alpha.get(), 0.0);
    }
}
