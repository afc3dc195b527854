//! # state 子命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/state.rs` 定义的参数
//! - 使用 `tavi::models` 的 ApplicationModel 与 Model 序列化

use crate::cli::state::{InitArgs, MigrateArgs, MigrateDirection, ShowArgs, StateArgs, StateCommands};
use crate::commands::load_state;
use crate::utils::output;

use serde_json::Value;
use std::path::Path;
use tabled::{Table, Tabled};
use tavi::models::{ApplicationModel, Model};
use tavi::{Result, TaviError};

/// 执行 state 命令
pub fn execute(args: StateArgs, parameters: &Path) -> Result<()> {
    match args.command {
        StateCommands::Init(a) => init(a, parameters),
        StateCommands::Show(a) => show(a, parameters),
        StateCommands::Migrate(a) => migrate(a),
    }
}

fn init(args: InitArgs, parameters: &Path) -> Result<()> {
    if parameters.exists() && !args.force {
        return Err(TaviError::InvalidArgument(format!(
            "'{}' already exists (use --force to overwrite)",
            parameters.display()
        )));
    }

    let mut app = ApplicationModel::new();
    let cwd = std::env::current_dir().map_err(|e| TaviError::Other(e.to_string()))?;
    app.data.use_default_folders(&cwd);
    app.set_defaults()?;
    app.save_parameters(parameters)?;

    output::print_success(&format!(
        "Default state written to '{}'",
        parameters.display()
    ));
    Ok(())
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn show(args: ShowArgs, parameters: &Path) -> Result<()> {
    if !parameters.exists() {
        output::print_warning(&format!(
            "'{}' not found, showing defaults",
            parameters.display()
        ));
    }
    let app = load_state(parameters)?;
    let state = app.serialize();

    if let Some(ref section) = args.section {
        if !state.contains_key(section) {
            return Err(TaviError::InvalidArgument(format!(
                "Unknown section '{}'",
                section
            )));
        }
    }

    for (section, fields) in &state {
        if args.section.as_deref().is_some_and(|s| s != section.as_str()) {
            continue;
        }
        let Value::Object(fields) = fields else {
            continue;
        };

        let rows: Vec<FieldRow> = fields
            .iter()
            .map(|(name, value)| FieldRow {
                name: name.clone(),
                value: display_value(value),
            })
            .collect();

        output::print_header(section);
        println!("{}", Table::new(&rows));
    }

    if args.section.is_none() || args.section.as_deref() == Some("scan") {
        output::print_info(&format!(
            "Scan mode: {}, {} point(s)",
            app.scan.scan_mode(),
            app.scan_points().len()
        ));
    }
    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => "\"\"".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn migrate(args: MigrateArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(TaviError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let mut app = ApplicationModel::new();
    match args.direction {
        MigrateDirection::ToLegacy => {
            app.load_parameters(&args.input)?;
            app.save_legacy_parameters(&args.output)?;
        }
        MigrateDirection::FromLegacy => {
            app.load_legacy_parameters(&args.input)?;
            app.save_parameters(&args.output)?;
        }
    }

    output::print_success(&format!(
        "'{}' -> '{}'",
        args.input.display(),
        args.output.display()
    ));
    Ok(())
}
