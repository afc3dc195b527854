//! # instrument 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/instrument.rs`

use clap::Args;
use std::path::PathBuf;

/// instrument 子命令参数
#[derive(Args, Debug)]
pub struct InstrumentArgs {
    /// Instrument description file (JSON)
    #[arg(env = "TAVI_INSTRUMENT")]
    pub config: Option<PathBuf>,

    /// List the `<name>_config.json` descriptions found in a directory
    #[arg(long)]
    pub list: Option<PathBuf>,
}
