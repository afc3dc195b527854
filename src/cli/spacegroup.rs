//! # spacegroup 子命令 CLI 定义
//!
//! - `search`: 按编号/符号/晶系搜索
//! - `show`: 单个空间群详情与消光规则
//! - `reflections`: 列出允许衍射
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/spacegroup.rs`

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;
use tavi::crystal::CrystalSystem;

/// spacegroup 主命令参数
#[derive(Args, Debug)]
pub struct SpaceGroupArgs {
    #[command(subcommand)]
    pub command: SpaceGroupCommands,
}

/// spacegroup 子命令
#[derive(Subcommand, Debug)]
pub enum SpaceGroupCommands {
    /// Search space groups by number, symbol or crystal system
    Search(SearchArgs),

    /// Show one space group and its extinction rule
    Show(ShowArgs),

    /// List allowed reflections within an (h, k, l) box
    Reflections(ReflectionsArgs),
}

/// 晶系
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SystemArg {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Trigonal,
    Hexagonal,
    Cubic,
}

impl From<SystemArg> for CrystalSystem {
    fn from(arg: SystemArg) -> Self {
        match arg {
            SystemArg::Triclinic => CrystalSystem::Triclinic,
            SystemArg::Monoclinic => CrystalSystem::Monoclinic,
            SystemArg::Orthorhombic => CrystalSystem::Orthorhombic,
            SystemArg::Tetragonal => CrystalSystem::Tetragonal,
            SystemArg::Trigonal => CrystalSystem::Trigonal,
            SystemArg::Hexagonal => CrystalSystem::Hexagonal,
            SystemArg::Cubic => CrystalSystem::Cubic,
        }
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search text (number, symbol or crystal system); empty lists the table
    #[arg(default_value = "")]
    pub query: String,

    /// Maximum number of results
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Restrict results to one crystal system
    #[arg(long, value_enum)]
    pub system: Option<SystemArg>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Space group number or symbol (e.g. 225, Fm-3m)
    pub group: String,
}

#[derive(Args, Debug)]
pub struct ReflectionsArgs {
    /// Space group number or symbol, or a centering letter (P, I, F, C, A, B, R)
    pub group: String,

    /// Maximum |h|
    #[arg(long, default_value_t = 2)]
    pub h_max: i32,

    /// Maximum |k|
    #[arg(long, default_value_t = 2)]
    pub k_max: i32,

    /// Maximum |l|
    #[arg(long, default_value_t = 2)]
    pub l_max: i32,

    /// Number of reflections to print
    #[arg(long, default_value_t = 30)]
    pub top_n: usize,

    /// Export all allowed reflections to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
