//! # scan 子命令实现
//!
//! 在状态文件的当前坐标上展开扫描命令，打印前若干点，可选导出全部点到 CSV。
//! 动量模式下，若样品晶格有效，目录名附带每个点对应的 HKL。
//!
//! ## 依赖关系
//! - 使用 `cli/scan.rs` 定义的参数
//! - 使用 `tavi::scan` 展开与命名扫描点

use crate::cli::scan::ScanArgs;
use crate::commands::load_state;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};
use tavi::crystal::{ReciprocalMatrix, Vector3};
use tavi::scan::{point_folder_name, ScanMode, ScanPoint};
use tavi::{Result, TaviError};

const FOCUS_LABELS: [&str; 4] = ["rhm", "rvm", "rha", "rva"];

/// 执行 scan 命令
pub fn execute(args: ScanArgs, parameters: &Path) -> Result<()> {
    let mut app = load_state(parameters)?;
    if let Some(cmd) = args.command1 {
        app.scan.scan_command1.set(cmd);
    }
    if let Some(cmd) = args.command2 {
        app.scan.scan_command2.set(cmd);
    }

    let mode = app.scan.scan_mode();
    let points = app.scan_points();

    // 晶格无效时仅省略 HKL
    let matrix = match app.sample.lattice().reciprocal_matrix() {
        Ok(m) => Some(m),
        Err(e) => {
            output::print_warning(&format!("HKL omitted from folder names: {}", e));
            None
        }
    };

    output::print_header("Scan Points");
    output::print_field("Command 1", app.scan.scan_command1.value());
    output::print_field("Command 2", app.scan.scan_command2.value());
    output::print_field("Mode", mode.as_str());
    output::print_field("Points", &points.len().to_string());
    println!();

    let rows: Vec<PointRow> = points
        .iter()
        .take(args.top_n)
        .enumerate()
        .map(|(i, p)| PointRow::new(i, p, mode, matrix.as_ref()))
        .collect();
    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }
    if points.len() > rows.len() {
        output::print_info(&format!(
            "{} more point(s) not shown",
            points.len() - rows.len()
        ));
    }

    if let Some(ref csv_path) = args.csv {
        save_points_csv(&points, mode, matrix.as_ref(), csv_path)?;
        output::print_success(&format!(
            "{} point(s) saved to '{}'",
            points.len(),
            csv_path.display()
        ));
    }

    Ok(())
}

/// 动量模式下的 HKL；其余模式或求解失败时为 None
fn point_hkl(point: &ScanPoint, mode: ScanMode, matrix: Option<&ReciprocalMatrix>) -> Option<Vector3> {
    match mode {
        ScanMode::Momentum => matrix?.q_to_hkl([point[0], point[1], point[2]]).ok(),
        _ => None,
    }
}

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Coordinates")]
    coordinates: String,
    #[tabled(rename = "Focusing")]
    focusing: String,
    #[tabled(rename = "Folder")]
    folder: String,
}

impl PointRow {
    fn new(index: usize, point: &ScanPoint, mode: ScanMode, matrix: Option<&ReciprocalMatrix>) -> Self {
        let coordinates = mode
            .axis_labels()
            .iter()
            .zip(point.iter())
            .map(|(label, v)| format!("{}={}", label, v))
            .collect::<Vec<_>>()
            .join(" ");
        let focusing = FOCUS_LABELS
            .iter()
            .zip(point[4..].iter())
            .map(|(label, v)| format!("{}={}", label, v))
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            index: index + 1,
            coordinates,
            focusing,
            folder: point_folder_name(point, mode, point_hkl(point, mode, matrix)),
        }
    }
}

/// 保存扫描点到 CSV
fn save_points_csv(
    points: &[ScanPoint],
    mode: ScanMode,
    matrix: Option<&ReciprocalMatrix>,
    output_path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(TaviError::CsvError)?;

    let mut header: Vec<&str> = vec!["index"];
    header.extend(mode.axis_labels());
    header.extend(FOCUS_LABELS);
    header.push("folder");
    wtr.write_record(&header).map_err(TaviError::CsvError)?;

    for (i, point) in points.iter().enumerate() {
        let mut record = vec![(i + 1).to_string()];
        record.extend(point.iter().map(|v| v.to_string()));
        record.push(point_folder_name(point, mode, point_hkl(point, mode, matrix)));
        wtr.write_record(&record).map_err(TaviError::CsvError)?;
    }

    wtr.flush().map_err(|e| TaviError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
