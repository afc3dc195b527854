//! # state 子命令 CLI 定义
//!
//! - `init`: 写入默认状态
//! - `show`: 打印当前状态
//! - `migrate`: 在当前格式与旧版扁平格式之间转换
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/state.rs`

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

/// state 主命令参数
#[derive(Args, Debug)]
pub struct StateArgs {
    #[command(subcommand)]
    pub command: StateCommands,
}

/// state 子命令
#[derive(Subcommand, Debug)]
pub enum StateCommands {
    /// Write the default state to the state file
    Init(InitArgs),

    /// Print the current state as tables
    Show(ShowArgs),

    /// Convert a state file between the current and the legacy format
    Migrate(MigrateArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing state file
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Only print one section (instrument, sample, reciprocal_space, scan, diagnostics, data)
    #[arg(short, long)]
    pub section: Option<String>,
}

/// 迁移方向
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum MigrateDirection {
    /// Current nested format → legacy flat format
    ToLegacy,
    /// Legacy flat format → current nested format
    FromLegacy,
}

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Conversion direction
    #[arg(long, value_enum)]
    pub direction: MigrateDirection,

    /// Input file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,
}
