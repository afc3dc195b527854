//! # 仪器状态模型
//!
//! 三轴谱仪的角度、能量、晶体选择、准直、聚焦与实验模块。
//!
//! ## 依赖关系
//! - 被 `models/application.rs` 使用
//! - 使用 `models/base.rs`, `models/observable.rs`

use crate::models::base::observable_fields;
use crate::models::observable::Observable;

/// 仪器状态
#[derive(Debug)]
pub struct InstrumentModel {
    /// 单色器 2θ (deg)
    pub mtt: Observable<f64>,
    /// 样品 2θ (deg)
    pub stt: Observable<f64>,
    /// 样品 θ (deg)
    pub psi: Observable<f64>,
    /// 分析器 2θ (deg)
    pub att: Observable<f64>,

    /// 入射/出射波矢 (Å⁻¹)
    pub ki: Observable<f64>,
    pub kf: Observable<f64>,
    /// 入射/出射能量 (meV)
    pub ei: Observable<f64>,
    pub ef: Observable<f64>,

    pub monocris: Observable<String>,
    pub anacris: Observable<String>,

    /// 准直 (arcmin)
    pub alpha_1: Observable<i64>,
    pub alpha_2_30: Observable<bool>,
    pub alpha_2_40: Observable<bool>,
    pub alpha_2_60: Observable<bool>,
    pub alpha_3: Observable<i64>,
    pub alpha_4: Observable<i64>,

    /// 聚焦因子
    pub rhmfac: Observable<f64>,
    pub rvmfac: Observable<f64>,
    pub rhafac: Observable<f64>,

    /// "None", "Vertical", "Horizontal" 或 "Both"
    pub nmo_installed: Observable<String>,
    pub v_selector_installed: Observable<bool>,
}

impl InstrumentModel {
    pub fn new() -> Self {
        Self {
            mtt: Observable::new("mtt", 30.0),
            stt: Observable::new("stt", 30.0),
            psi: Observable::new("psi", 30.0),
            att: Observable::new("att", 30.0),
            ki: Observable::new("Ki", 2.662),
            kf: Observable::new("Kf", 2.662),
            ei: Observable::new("Ei", 14.7),
            ef: Observable::new("Ef", 14.7),
            monocris: Observable::new("monocris", "PG[002]".to_string()),
            anacris: Observable::new("anacris", "PG[002]".to_string()),
            alpha_1: Observable::new("alpha_1", 40),
            alpha_2_30: Observable::new("alpha_2_30", false),
            alpha_2_40: Observable::new("alpha_2_40", true),
            alpha_2_60: Observable::new("alpha_2_60", false),
            alpha_3: Observable::new("alpha_3", 30),
            alpha_4: Observable::new("alpha_4", 30),
            rhmfac: Observable::new("rhmfac", 1.0),
            rvmfac: Observable::new("rvmfac", 1.0),
            rhafac: Observable::new("rhafac", 1.0),
            nmo_installed: Observable::new("NMO_installed", "None".to_string()),
            v_selector_installed: Observable::new("V_selector_installed", false),
        }
    }

    /// 已启用的单色器-样品准直器 (30, 40, 60 的顺序)
    pub fn alpha_2_list(&self) -> Vec<i64> {
        [
            (30, &self.alpha_2_30),
            (40, &self.alpha_2_40),
            (60, &self.alpha_2_60),
        ]
        .into_iter()
        .filter(|(_, enabled)| enabled.get())
        .map(|(minutes, _)| minutes)
        .collect()
    }
}

impl Default for InstrumentModel {
    fn default() -> Self {
        Self::new()
    }
}

observable_fields!(
    InstrumentModel,
    "instrument",
    [
        mtt,
        stt,
        psi,
        att,
        ki,
        kf,
        ei,
        ef,
        monocris,
        anacris,
        alpha_1,
        alpha_2_30,
        alpha_2_40,
        alpha_2_60,
        alpha_3,
        alpha_4,
        rhmfac,
        rvmfac,
        rhafac,
        nmo_installed,
        v_selector_installed,
    ]
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::base::Model;

    #[test]
    fn test_alpha_2_list_defaults_to_40() {
        let mut inst = InstrumentModel::new();
        assert_eq!(inst.alpha_2_list(), vec![40]);

        inst.alpha_2_30.set(true);
        inst.alpha_2_60.set(true);
        assert_eq!(inst.alpha_2_list(), vec![30, 40, 60]);
    }

    #[test]
    fn test_serialize_uses_persisted_keys() {
        let map = InstrumentModel::new().serialize();
        assert_eq!(map.len(), 21);
        assert_eq!(map["Ki"], serde_json::json!(2.662));
        assert_eq!(map["NMO_installed"], serde_json::json!("None"));
        assert_eq!(map["alpha_1"], serde_json::json!(40));
        assert!(!map.contains_key("ki"));
    }
}
