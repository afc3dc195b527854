//! # 倒易空间状态模型
//!
//! 绝对动量转移 (qx, qy, qz)、相对倒易晶格单位 (H, K, L) 与能量转移 deltaE。
//! 两组坐标之间的同步由聚合器显式调用 `update_*` 完成，不会自动联动。
//!
//! ## 依赖关系
//! - 被 `models/application.rs` 使用
//! - 使用 `crystal/lattice.rs` 完成坐标变换

use crate::crystal::lattice::{self, LatticeParameters, Vector3};
use crate::error::GeometryError;
use crate::models::base::observable_fields;
use crate::models::observable::Observable;

/// 倒易空间坐标
#[derive(Debug)]
pub struct ReciprocalSpaceModel {
    /// 动量转移 (Å⁻¹)
    pub qx: Observable<f64>,
    pub qy: Observable<f64>,
    pub qz: Observable<f64>,
    /// 倒易晶格单位 (r.l.u.)
    pub h: Observable<f64>,
    pub k: Observable<f64>,
    pub l: Observable<f64>,
    /// 能量转移 (meV)
    pub delta_e: Observable<f64>,
}

impl ReciprocalSpaceModel {
    pub fn new() -> Self {
        Self {
            qx: Observable::new("qx", 2.0),
            qy: Observable::new("qy", 0.0),
            qz: Observable::new("qz", 0.0),
            h: Observable::new("H", 0.0),
            k: Observable::new("K", 0.0),
            l: Observable::new("L", 0.0),
            delta_e: Observable::new("deltaE", 5.25),
        }
    }

    pub fn q(&self) -> Vector3 {
        [self.qx.get(), self.qy.get(), self.qz.get()]
    }

    pub fn hkl(&self) -> Vector3 {
        [self.h.get(), self.k.get(), self.l.get()]
    }

    pub fn set_q(&mut self, q: Vector3) {
        self.qx.set(q[0]);
        self.qy.set(q[1]);
        self.qz.set(q[2]);
    }

    pub fn set_hkl(&mut self, hkl: Vector3) {
        self.h.set(hkl[0]);
        self.k.set(hkl[1]);
        self.l.set(hkl[2]);
    }

    /// 由 Q 重算 HKL；失败时 HKL 保持不变
    pub fn update_hkl_from_q(&mut self, lattice: &LatticeParameters) -> Result<(), GeometryError> {
        let hkl = lattice::q_to_hkl(lattice, self.q())?;
        self.set_hkl(hkl);
        Ok(())
    }

    /// 由 HKL 重算 Q；失败时 Q 保持不变
    pub fn update_q_from_hkl(&mut self, lattice: &LatticeParameters) -> Result<(), GeometryError> {
        let q = lattice::hkl_to_q(lattice, self.hkl())?;
        self.set_q(q);
        Ok(())
    }

    /// |Q|
    pub fn q_magnitude(&self) -> f64 {
        lattice::norm(&self.q())
    }
}

impl Default for ReciprocalSpaceModel {
    fn default() -> Self {
        Self::new()
    }
}

observable_fields!(
    ReciprocalSpaceModel,
    "reciprocal_space",
    [qx, qy, qz, h, k, l, delta_e]
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_update_hkl_from_q_cubic() {
        let mut rs = ReciprocalSpaceModel::new();
        let lattice = LatticeParameters::cubic(2.0 * PI);
        rs.set_q([1.0, 2.0, -1.0]);

        rs.update_hkl_from_q(&lattice).unwrap();
        let hkl = rs.hkl();
        assert!((hkl[0] - 1.0).abs() < 1e-9);
        assert!((hkl[1] - 2.0).abs() < 1e-9);
        assert!((hkl[2] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_update_round_trip() {
        let mut rs = ReciprocalSpaceModel::new();
        let lattice = LatticeParameters::new(3.78, 4.1, 5.49, 90.0, 100.0, 90.0);
        rs.set_q([2.0, 0.3, -0.7]);

        rs.update_hkl_from_q(&lattice).unwrap();
        rs.set_q([0.0, 0.0, 0.0]);
        rs.update_q_from_hkl(&lattice).unwrap();

        let q = rs.q();
        assert!((q[0] - 2.0).abs() < 1e-6);
        assert!((q[1] - 0.3).abs() < 1e-6);
        assert!((q[2] + 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_failed_update_leaves_hkl_untouched() {
        let mut rs = ReciprocalSpaceModel::new();
        rs.set_hkl([1.0, 1.0, 1.0]);
        let lattice = LatticeParameters::new(4.05, 4.05, 4.05, 0.0, 0.0, 0.0);

        assert!(rs.update_hkl_from_q(&lattice).is_err());
        assert_eq!(rs.hkl(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_q_magnitude() {
        let mut rs = ReciprocalSpaceModel::new();
        rs.set_q([3.0, 4.0, 0.0]);
        assert!((rs.q_magnitude() - 5.0).abs() < 1e-12);
    }
}
