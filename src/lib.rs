//! # TAVI - 三轴谱仪虚拟仪器核心
//!
//! 模拟三轴中子谱仪的状态模型与晶体学计算核心，供界面层与命令行工具使用。
//!
//! ## 模块
//! - `models`  - 可观察参数与各领域模型、状态持久化
//! - `crystal` - 倒易空间变换、空间群数据库、系统消光
//! - `scan`    - 扫描命令解析与扫描点展开
//! - `config`  - 仪器描述文件
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── models/   (状态模型)
//!   │     ├── crystal/ (坐标变换)
//!   │     └── scan/    (扫描点)
//!   ├── config/   (仪器描述)
//!   └── error.rs  (错误处理)
//! ```

pub mod config;
pub mod crystal;
pub mod error;
pub mod models;
pub mod scan;

pub use error::{GeometryError, Result, TaviError};
