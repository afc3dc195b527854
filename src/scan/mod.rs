//! # 扫描模块
//!
//! 扫描命令解析、扫描点展开与扫描点目录命名。
//!
//! ## 依赖关系
//! - 被 `models/scan.rs`, `models/application.rs`, `commands/scan.rs` 使用
//! - 子模块: command, naming

pub mod command;
pub mod naming;

pub use command::{expand, expand_commands, ScanCommand, ScanMode, ScanPoint, ZERO_POINT};
pub use naming::{parse_point_folder_name, point_folder_name, PointFolderValues};
