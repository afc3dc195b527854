//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `state`: 状态文件（嵌套子命令 init / show / migrate）
//! - `coords`: 坐标换算（嵌套子命令 q2hkl / hkl2q）
//! - `scan`: 扫描点展开
//! - `spacegroup`: 空间群（嵌套子命令 search / show / reflections）
//! - `instrument`: 仪器描述
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: state, coords, scan, spacegroup, instrument

pub mod coords;
pub mod instrument;
pub mod scan;
pub mod spacegroup;
pub mod state;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TAVI - 三轴谱仪虚拟仪器
#[derive(Parser)]
#[command(name = "tavi")]
#[command(version)]
#[command(about = "Triple-axis spectrometer state and crystallography toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// State file used by commands that read or write the instrument state
    #[arg(
        short,
        long,
        global = true,
        env = "TAVI_PARAMETERS",
        default_value = "parameters.json"
    )]
    pub parameters: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Create, inspect or migrate the instrument state file
    State(state::StateArgs),

    /// Convert between momentum transfer (Q) and reciprocal lattice units (HKL)
    Coords(coords::CoordsArgs),

    /// Expand the scan commands into scan points
    Scan(scan::ScanArgs),

    /// Search the space-group table and list allowed reflections
    Spacegroup(spacegroup::SpaceGroupArgs),

    /// Summarize an instrument description file
    Instrument(instrument::InstrumentArgs),
}
