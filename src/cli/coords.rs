//! # coords 子命令 CLI 定义
//!
//! 晶格参数可由 `--lattice` 直接给出，否则取自状态文件中的样品晶格。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/coords.rs`

use clap::{Args, Subcommand};

/// coords 主命令参数
#[derive(Args, Debug)]
pub struct CoordsArgs {
    #[command(subcommand)]
    pub command: CoordsCommands,
}

/// coords 子命令
#[derive(Subcommand, Debug)]
pub enum CoordsCommands {
    /// Convert momentum transfer (qx qy qz, 1/Å) to HKL
    Q2hkl(ConvertArgs),

    /// Convert HKL to momentum transfer (qx qy qz, 1/Å)
    Hkl2q(ConvertArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input vector (three components)
    #[arg(num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub vector: Vec<f64>,

    /// Lattice parameters: a b c alpha beta gamma (Å, degrees)
    #[arg(
        long,
        num_args = 6,
        value_names = ["A", "B", "C", "ALPHA", "BETA", "GAMMA"],
        allow_negative_numbers = true
    )]
    pub lattice: Option<Vec<f64>>,

    /// Write the converted coordinates back into the state file
    #[arg(long, default_value_t = false)]
    pub save: bool,
}
