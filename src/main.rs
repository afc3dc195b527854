//! # TAVI - 三轴谱仪虚拟仪器命令行工具
//!
//! 管理谱仪状态文件、坐标换算、扫描点展开与空间群查询。
//!
//! ## 子命令
//! - `state`      - 状态文件初始化、查看、格式迁移
//! - `coords`     - Q ↔ HKL 坐标换算
//! - `scan`       - 展开扫描点（表格 / CSV）
//! - `spacegroup` - 空间群搜索、详情、允许衍射列表
//! - `instrument` - 仪器描述文件概要
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── tavi   (状态模型与晶体学核心)
//!   └── utils/      (终端输出)
//! ```

mod cli;
mod commands;
mod utils;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
