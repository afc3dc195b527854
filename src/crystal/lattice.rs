//! # 晶格参数与倒易空间变换
//!
//! 在绝对动量转移 Q = (qx, qy, qz) 与相对倒易晶格单位 (H, K, L) 之间转换。
//!
//! ## 算法概述
//! 1. 角度转换为弧度
//! 2. 晶胞体积 V = abc·sqrt(1 − cos²α − cos²β − cos²γ + 2cosα·cosβ·cosγ)，
//!    V ≤ 0 时报 `DegenerateCell`
//! 3. 构造倒易矩阵，列向量为
//!    - b1 = (2π·b·c·sinα / V, 0, 0)
//!    - b2 = (2π·c·cosβ / V, 2π·a·c·sinβ / V, 0)
//!    - b3 = (2π·a·b·sinγ / V, 2π·b·cosα / V, 2π·c / V)
//! 4. Q→HKL：条件数超过 1e10 时拒绝求解，否则解 M·HKL = Q
//! 5. HKL→Q：直接矩阵乘法 Q = M·HKL
//!
//! 两个方向共用同一矩阵构造，因此对良态晶胞互为精确逆变换。
//!
//! ## 依赖关系
//! - 被 `models/reciprocal_space.rs`, `models/sample.rs`, `commands/coords.rs` 使用
//! - 使用 `error.rs` 的 GeometryError

use crate::error::GeometryError;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 3×3 矩阵，`m[row][col]`
pub type Matrix3 = [[f64; 3]; 3];

/// 三维向量
pub type Vector3 = [f64; 3];

/// Q→HKL 允许的最大条件数
pub const MAX_CONDITION_NUMBER: f64 = 1e10;

/// 晶格参数 (a, b, c, α, β, γ)
///
/// 长度单位 Å，角度单位：度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl LatticeParameters {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// 立方晶胞
    pub fn cubic(a: f64) -> Self {
        Self::new(a, a, a, 90.0, 90.0, 90.0)
    }

    /// 检查长度为正、角度在 (0°, 180°) 内
    pub fn validate(&self) -> Result<(), GeometryError> {
        for (name, value) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::InvalidLength { name, value });
            }
        }
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !value.is_finite() || value <= 0.0 || value >= 180.0 {
                return Err(GeometryError::InvalidAngle { name, value });
            }
        }
        Ok(())
    }

    /// 晶胞体积（Å³）
    pub fn volume(&self) -> Result<f64, GeometryError> {
        self.validate()?;

        let (cos_a, cos_b, cos_g) = (
            self.alpha.to_radians().cos(),
            self.beta.to_radians().cos(),
            self.gamma.to_radians().cos(),
        );
        let radicand =
            1.0 - cos_a * cos_a - cos_b * cos_b - cos_g * cos_g + 2.0 * cos_a * cos_b * cos_g;

        // 负被开方数对应无法闭合的晶胞（三个角度自相交）
        if radicand <= 0.0 {
            return Err(GeometryError::DegenerateCell { volume: 0.0 });
        }

        let volume = self.a * self.b * self.c * radicand.sqrt();
        if !volume.is_finite() || volume <= 0.0 {
            return Err(GeometryError::DegenerateCell { volume });
        }
        Ok(volume)
    }

    /// 构造倒易矩阵
    pub fn reciprocal_matrix(&self) -> Result<ReciprocalMatrix, GeometryError> {
        ReciprocalMatrix::from_lattice(self)
    }
}

impl Default for LatticeParameters {
    fn default() -> Self {
        Self::cubic(4.05)
    }
}

/// 倒易晶格矩阵（列向量为 b1, b2, b3）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReciprocalMatrix {
    matrix: Matrix3,
}

impl ReciprocalMatrix {
    /// 从晶格参数构造；体积检查先于任何矩阵计算
    pub fn from_lattice(lattice: &LatticeParameters) -> Result<Self, GeometryError> {
        let volume = lattice.volume()?;

        let alpha = lattice.alpha.to_radians();
        let beta = lattice.beta.to_radians();
        let gamma = lattice.gamma.to_radians();
        let (a, b, c) = (lattice.a, lattice.b, lattice.c);
        let factor = 2.0 * PI / volume;

        let b1 = [factor * b * c * alpha.sin(), 0.0, 0.0];
        let b2 = [factor * c * beta.cos(), factor * a * c * beta.sin(), 0.0];
        let b3 = [
            factor * a * b * gamma.sin(),
            factor * b * alpha.cos(),
            factor * c,
        ];

        Ok(Self::from_columns(b1, b2, b3))
    }

    fn from_columns(b1: Vector3, b2: Vector3, b3: Vector3) -> Self {
        let mut matrix = [[0.0; 3]; 3];
        for row in 0..3 {
            matrix[row] = [b1[row], b2[row], b3[row]];
        }
        Self { matrix }
    }

    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// 2-范数条件数 ‖M‖·‖M⁻¹‖；奇异矩阵返回无穷大
    pub fn condition_number(&self) -> f64 {
        let Some(inverse) = invert(&self.matrix) else {
            return f64::INFINITY;
        };
        let cond = spectral_norm(&self.matrix) * spectral_norm(&inverse);
        if cond.is_finite() {
            cond
        } else {
            f64::INFINITY
        }
    }

    /// HKL → Q，不做条件数检查
    pub fn hkl_to_q(&self, hkl: Vector3) -> Vector3 {
        mat_vec(&self.matrix, &hkl)
    }

    /// Q → HKL
    pub fn q_to_hkl(&self, q: Vector3) -> Result<Vector3, GeometryError> {
        let condition = self.condition_number();
        if condition > MAX_CONDITION_NUMBER {
            return Err(GeometryError::IllConditioned { condition });
        }
        solve(&self.matrix, &q).ok_or(GeometryError::Singular)
    }
}

/// 一步完成 Q → HKL
pub fn q_to_hkl(lattice: &LatticeParameters, q: Vector3) -> Result<Vector3, GeometryError> {
    lattice.reciprocal_matrix()?.q_to_hkl(q)
}

/// 一步完成 HKL → Q
pub fn hkl_to_q(lattice: &LatticeParameters, hkl: Vector3) -> Result<Vector3, GeometryError> {
    Ok(lattice.reciprocal_matrix()?.hkl_to_q(hkl))
}

/// 向量模长
pub fn norm(v: &Vector3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// 矩阵乘向量
fn mat_vec(m: &Matrix3, v: &Vector3) -> Vector3 {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn determinant(m: &Matrix3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// 伴随矩阵求逆
fn invert(m: &Matrix3) -> Option<Matrix3> {
    let det = determinant(m);
    if det == 0.0 || !det.is_finite() {
        return None;
    }

    let mut inv = [[0.0; 3]; 3];
    for row in 0..3 {
        for col in 0..3 {
            // 余子式 C[col][row] 的转置
            let (r1, r2) = ((col + 1) % 3, (col + 2) % 3);
            let (c1, c2) = ((row + 1) % 3, (row + 2) % 3);
            inv[row][col] = (m[r1][c1] * m[r2][c2] - m[r1][c2] * m[r2][c1]) / det;
        }
    }
    Some(inv)
}

/// 谱范数：sqrt(λmax(MᵀM))
fn spectral_norm(m: &Matrix3) -> f64 {
    let mut gram = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            gram[i][j] = (0..3).map(|k| m[k][i] * m[k][j]).sum();
        }
    }
    largest_symmetric_eigenvalue(&gram).max(0.0).sqrt()
}

/// 3×3 实对称矩阵的最大特征值（三角函数解析解）
fn largest_symmetric_eigenvalue(a: &Matrix3) -> f64 {
    let p1 = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
    if p1 == 0.0 {
        return a[0][0].max(a[1][1]).max(a[2][2]);
    }

    let q = (a[0][0] + a[1][1] + a[2][2]) / 3.0;
    let p2 = (a[0][0] - q).powi(2) + (a[1][1] - q).powi(2) + (a[2][2] - q).powi(2) + 2.0 * p1;
    let p = (p2 / 6.0).sqrt();

    let mut b = *a;
    for (i, row) in b.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            let shifted = if i == j { *value - q } else { *value };
            *value = shifted / p;
        }
    }

    let r = (determinant(&b) / 2.0).clamp(-1.0, 1.0);
    let phi = r.acos() / 3.0;
    q + 2.0 * p * phi.cos()
}

/// 部分选主元高斯消元求解 M·x = y
fn solve(m: &Matrix3, y: &Vector3) -> Option<Vector3> {
    let mut a = *m;
    let mut rhs = *y;
    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }

    for col in 0..3 {
        let pivot = (col..3)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() <= f64::EPSILON * scale {
            return None;
        }
        a.swap(col, pivot);
        rhs.swap(col, pivot);

        for row in (col + 1)..3 {
            let factor = a[row][col] / a[col][col];
            for k in col..3 {
                a[row][k] -= factor * a[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = [0.0; 3];
    for row in (0..3).rev() {
        let tail: f64 = ((row + 1)..3).map(|k| a[row][k] * x[k]).sum();
        x[row] = (rhs[row] - tail) / a[row][row];
    }

    x.iter().all(|v| v.is_finite()).then_some(x)
}
