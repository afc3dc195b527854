//! # 晶体学计算模块
//!
//! 晶格 → 倒易晶格变换、空间群数据库与系统消光规则。
//!
//! ## 依赖关系
//! - 被 `models/`, `commands/` 使用
//! - 子模块: lattice, space_group, extinction

pub mod extinction;
pub mod lattice;
pub mod space_group;

pub use extinction::{generate_allowed, is_allowed, Centering, ExtinctionRule};
pub use lattice::{LatticeParameters, ReciprocalMatrix, Vector3};
pub use space_group::{CrystalSystem, SpaceGroup};
