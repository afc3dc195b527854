//! # 配置模块
//!
//! 仪器 JSON 描述文件的只读加载。
//!
//! ## 依赖关系
//! - 被 `commands/instrument.rs` 使用
//! - 子模块: instrument

pub mod instrument;

pub use instrument::{CrystalInfo, InstrumentConfig};
