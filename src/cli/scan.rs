//! # scan 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scan.rs`

use clap::Args;
use std::path::PathBuf;

/// scan 子命令参数
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// First scan command, e.g. "qx 2 2.2 0.1" (overrides the state file)
    #[arg(long, allow_hyphen_values = true)]
    pub command1: Option<String>,

    /// Second scan command, e.g. "deltaE 3 7 0.25" (overrides the state file)
    #[arg(long, allow_hyphen_values = true)]
    pub command2: Option<String>,

    /// Number of points to print
    #[arg(long, default_value_t = 20)]
    pub top_n: usize,

    /// Export all points to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
