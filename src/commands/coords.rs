//! # coords 子命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/coords.rs` 定义的参数
//! - 使用 `tavi::crystal::lattice` 完成坐标变换

use crate::cli::coords::{ConvertArgs, CoordsArgs, CoordsCommands};
use crate::commands::load_state;
use crate::utils::output;

use std::path::Path;
use tavi::crystal::lattice::{self, LatticeParameters, Vector3};
use tavi::{Result, TaviError};

/// 执行 coords 命令
pub fn execute(args: CoordsArgs, parameters: &Path) -> Result<()> {
    match args.command {
        CoordsCommands::Q2hkl(a) => convert(a, parameters, Direction::QToHkl),
        CoordsCommands::Hkl2q(a) => convert(a, parameters, Direction::HklToQ),
    }
}

#[derive(Clone, Copy)]
enum Direction {
    QToHkl,
    HklToQ,
}

fn to_vector(values: &[f64]) -> Result<Vector3> {
    match values {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(TaviError::InvalidArgument(format!(
            "Expected 3 components, got {}",
            values.len()
        ))),
    }
}

fn convert(args: ConvertArgs, parameters: &Path, direction: Direction) -> Result<()> {
    let input = to_vector(&args.vector)?;
    let mut app = load_state(parameters)?;

    let lat = match args.lattice.as_deref() {
        Some(&[a, b, c, alpha, beta, gamma]) => LatticeParameters::new(a, b, c, alpha, beta, gamma),
        Some(other) => {
            return Err(TaviError::InvalidArgument(format!(
                "Expected 6 lattice parameters, got {}",
                other.len()
            )))
        }
        None => app.sample.lattice(),
    };

    let matrix = lat.reciprocal_matrix()?;
    let (q, hkl) = match direction {
        Direction::QToHkl => (input, matrix.q_to_hkl(input)?),
        Direction::HklToQ => (matrix.hkl_to_q(input), input),
    };

    output::print_header("Reciprocal Space Conversion");
    output::print_field(
        "Lattice",
        &format!(
            "a={} b={} c={} α={} β={} γ={}",
            lat.a, lat.b, lat.c, lat.alpha, lat.beta, lat.gamma
        ),
    );
    output::print_field("Volume (Å³)", &format!("{:.4}", lat.volume()?));
    output::print_field(
        "Condition number",
        &format!("{:.3e}", matrix.condition_number()),
    );
    output::print_field(
        "Q (1/Å)",
        &format!("({:.6}, {:.6}, {:.6})", q[0], q[1], q[2]),
    );
    output::print_field("|Q| (1/Å)", &format!("{:.6}", lattice::norm(&q)));
    output::print_field(
        "HKL (r.l.u.)",
        &format!("({:.6}, {:.6}, {:.6})", hkl[0], hkl[1], hkl[2]),
    );

    if args.save {
        app.sample.set_lattice(&lat);
        app.reciprocal_space.set_q(q);
        app.reciprocal_space.set_hkl(hkl);
        app.save_parameters(parameters)?;
        output::print_success(&format!("State saved to '{}'", parameters.display()));
    }

    Ok(())
}
