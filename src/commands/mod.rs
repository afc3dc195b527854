//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `utils/` 与 `tavi` 库
//! - 子模块: state, coords, scan, spacegroup, instrument

pub mod coords;
pub mod instrument;
pub mod scan;
pub mod spacegroup;
pub mod state;

use crate::cli::{Cli, Commands};
use std::path::Path;
use tavi::models::ApplicationModel;
use tavi::Result;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let parameters = cli.parameters.as_path();
    match cli.command {
        Commands::State(args) => state::execute(args, parameters),
        Commands::Coords(args) => coords::execute(args, parameters),
        Commands::Scan(args) => scan::execute(args, parameters),
        Commands::Spacegroup(args) => spacegroup::execute(args),
        Commands::Instrument(args) => instrument::execute(args),
    }
}

/// 读取状态文件；文件不存在时使用默认状态
pub(crate) fn load_state(parameters: &Path) -> Result<ApplicationModel> {
    let mut app = ApplicationModel::new();
    app.load_parameters(parameters)?;
    Ok(app)
}
