//! # instrument 子命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/instrument.rs` 定义的参数
//! - 使用 `tavi::config::InstrumentConfig`

use crate::cli::instrument::InstrumentArgs;
use crate::utils::output;

use std::collections::BTreeMap;
use tabled::{Table, Tabled};
use tavi::config::{CrystalInfo, InstrumentConfig};
use tavi::{Result, TaviError};

/// 执行 instrument 命令
pub fn execute(args: InstrumentArgs) -> Result<()> {
    if let Some(ref dir) = args.list {
        let names = InstrumentConfig::discover(dir)?;
        if names.is_empty() {
            output::print_warning(&format!(
                "No instrument descriptions found in '{}'",
                dir.display()
            ));
        } else {
            output::print_header(&format!("Instruments in '{}'", dir.display()));
            for name in &names {
                println!("  {}", name);
            }
        }
        if args.config.is_none() {
            return Ok(());
        }
    }

    let path = args.config.ok_or_else(|| {
        TaviError::InvalidArgument(
            "No instrument description given (pass a path or set TAVI_INSTRUMENT)".to_string(),
        )
    })?;
    let config = InstrumentConfig::load(&path)?;
    print_summary(&config);
    Ok(())
}

#[derive(Tabled)]
struct CrystalRow {
    #[tabled(rename = "Crystal")]
    name: String,
    #[tabled(rename = "d (Å)")]
    d_spacing: String,
    #[tabled(rename = "Slab (w×h, m)")]
    slab: String,
    #[tabled(rename = "Cols×Rows")]
    grid: String,
    #[tabled(rename = "Mosaic (')")]
    mosaic: String,
    #[tabled(rename = "R0")]
    r0: String,
}

fn crystal_rows(crystals: &BTreeMap<String, CrystalInfo>) -> Vec<CrystalRow> {
    crystals
        .iter()
        .map(|(name, c)| CrystalRow {
            name: name.clone(),
            d_spacing: format!("{:.4}", c.d_spacing),
            slab: format!("{}×{}", c.slab_width, c.slab_height),
            grid: format!("{}×{}", c.n_columns, c.n_rows),
            mosaic: format!("{}", c.mosaic),
            r0: format!("{}", c.r0),
        })
        .collect()
}

fn print_summary(config: &InstrumentConfig) {
    output::print_header(&config.name);
    if !config.description.is_empty() {
        output::print_field("Description", &config.description);
    }

    let arms = &config.arm_lengths;
    output::print_field(
        "Arm lengths (m)",
        &format!("L1={} L2={} L3={} L4={}", arms.l1, arms.l2, arms.l3, arms.l4),
    );

    let focus = &config.focusing;
    output::print_field(
        "Focusing ranges",
        &format!(
            "rhm {:?} rvm {:?} rha {:?} rva={}",
            focus.rhm_range, focus.rvm_range, focus.rha_range, focus.rva_value
        ),
    );
    output::print_field(
        "NMO options",
        &config.experimental_modules.nmo_options.join(", "),
    );
    output::print_field(
        "Velocity selector",
        if config.experimental_modules.v_selector_available {
            "available"
        } else {
            "not available"
        },
    );

    let coll = &config.collimators;
    output::print_field(
        "Collimators (')",
        &format!(
            "α1 {:?} α2 {:?} α3 {:?} α4 {:?}",
            coll.alpha_1_options, coll.alpha_2_options, coll.alpha_3_options, coll.alpha_4_options
        ),
    );

    let slits = &config.slits;
    output::print_field(
        "Slit gaps (m)",
        &format!(
            "hbl {}×{} vbl {} pbl {}×{} dbl {}",
            slits.hbl_hgap, slits.hbl_vgap, slits.vbl_hgap, slits.pbl_hgap, slits.pbl_vgap, slits.dbl_hgap
        ),
    );

    for (title, crystals) in [
        ("Monochromator Crystals", &config.monochromator_crystals),
        ("Analyzer Crystals", &config.analyzer_crystals),
    ] {
        if crystals.is_empty() {
            output::print_warning(&format!("{}: none defined", title));
            continue;
        }
        output::print_header(title);
        println!("{}", Table::new(&crystal_rows(crystals)));
    }
}
