//! # 状态模型模块
//!
//! 可观察参数、模型序列化契约与谱仪的各领域模型。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 子模块: observable, base, instrument, sample, reciprocal_space, scan,
//!   diagnostics, data, legacy, application

pub mod application;
pub mod base;
pub mod data;
pub mod diagnostics;
pub mod instrument;
pub mod legacy;
pub mod observable;
pub mod reciprocal_space;
pub mod sample;
pub mod scan;

pub use application::ApplicationModel;
pub use base::{FieldMap, Model};
pub use observable::{Observable, Subscriber};
