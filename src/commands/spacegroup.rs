//! # spacegroup 子命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/spacegroup.rs` 定义的参数
//! - 使用 `tavi::crystal::space_group` 与 `tavi::crystal::extinction`

use crate::cli::spacegroup::{ReflectionsArgs, SearchArgs, ShowArgs, SpaceGroupArgs, SpaceGroupCommands};
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};
use tavi::crystal::extinction::{self, Centering};
use tavi::crystal::space_group::{self, CrystalSystem, SpaceGroup};
use tavi::{Result, TaviError};

/// 执行 spacegroup 命令
pub fn execute(args: SpaceGroupArgs) -> Result<()> {
    match args.command {
        SpaceGroupCommands::Search(a) => search(a),
        SpaceGroupCommands::Show(a) => show(a),
        SpaceGroupCommands::Reflections(a) => reflections(a),
    }
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "No.")]
    number: u16,
    #[tabled(rename = "Symbol")]
    symbol: &'static str,
    #[tabled(rename = "System")]
    system: CrystalSystem,
    #[tabled(rename = "Centering")]
    centering: Centering,
}

impl From<&SpaceGroup> for GroupRow {
    fn from(sg: &SpaceGroup) -> Self {
        Self {
            number: sg.number,
            symbol: sg.symbol,
            system: sg.crystal_system,
            centering: sg.centering,
        }
    }
}

fn search(args: SearchArgs) -> Result<()> {
    let results: Vec<&SpaceGroup> = match args.system {
        Some(system) => {
            let query = args.query.trim().to_lowercase();
            space_group::filter_by_crystal_system(system.into())
                .into_iter()
                .filter(|sg| sg.search_text().contains(&query))
                .take(args.limit)
                .collect()
        }
        None => space_group::search(&args.query, args.limit),
    };

    if results.is_empty() {
        output::print_warning(&format!("No space group matches '{}'", args.query));
        return Ok(());
    }

    let rows: Vec<GroupRow> = results.into_iter().map(GroupRow::from).collect();
    output::print_header(&format!("{} Space Group(s)", rows.len()));
    println!("{}", Table::new(&rows));
    Ok(())
}

fn find_group(identifier: &str) -> Result<&'static SpaceGroup> {
    space_group::lookup(identifier)
        .ok_or_else(|| TaviError::SpaceGroupNotFound(identifier.to_string()))
}

fn show(args: ShowArgs) -> Result<()> {
    let sg = find_group(&args.group)?;
    let rule = sg.extinction_rule();
    let (low, high) = sg.crystal_system.number_range();

    output::print_header(&sg.display_name());
    output::print_field("Number", &sg.number.to_string());
    output::print_field("Symbol", sg.symbol);
    output::print_field(
        "Crystal system",
        &format!("{} (groups {}-{})", sg.crystal_system, low, high),
    );
    output::print_field("Lattice constraints", sg.crystal_system.constraints());
    output::print_field("Centering", &format!("{} ({})", sg.centering, rule.name));
    output::print_field("Allowed", rule.allowed);
    output::print_field("Forbidden", rule.forbidden);
    Ok(())
}

#[derive(Tabled)]
struct ReflectionRow {
    #[tabled(rename = "h")]
    h: i32,
    #[tabled(rename = "k")]
    k: i32,
    #[tabled(rename = "l")]
    l: i32,
}

fn reflections(args: ReflectionsArgs) -> Result<()> {
    if args.h_max < 0 || args.k_max < 0 || args.l_max < 0 {
        return Err(TaviError::InvalidArgument(
            "Index bounds must be non-negative".to_string(),
        ));
    }

    // 单个中心化字母优先于空间群查找
    let (title, centering) = match args.group.trim().chars().collect::<Vec<_>>().as_slice() {
        [c] if Centering::from_letter(*c).is_some() => {
            let rule = extinction::extinction_rule(&args.group);
            (rule.name.to_string(), args.group.trim().to_uppercase())
        }
        _ => {
            let sg = find_group(&args.group)?;
            (sg.display_name(), sg.centering.to_string())
        }
    };

    let allowed = extinction::generate_allowed(&centering, args.h_max, args.k_max, args.l_max);

    output::print_header(&format!("Allowed Reflections: {}", title));
    output::print_field("Centering", &centering);
    output::print_field(
        "Range",
        &format!("|h|≤{} |k|≤{} |l|≤{}", args.h_max, args.k_max, args.l_max),
    );
    output::print_field("Allowed", &allowed.len().to_string());
    println!();

    let rows: Vec<ReflectionRow> = allowed
        .iter()
        .take(args.top_n)
        .map(|&(h, k, l)| ReflectionRow { h, k, l })
        .collect();
    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }

    if let Some(ref csv_path) = args.csv {
        save_reflections_csv(&allowed, csv_path)?;
        output::print_success(&format!(
            "{} reflection(s) saved to '{}'",
            allowed.len(),
            csv_path.display()
        ));
    }
    Ok(())
}

fn save_reflections_csv(reflections: &[(i32, i32, i32)], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(TaviError::CsvError)?;

    wtr.write_record(["h", "k", "l"]).map_err(TaviError::CsvError)?;
    for (h, k, l) in reflections {
        wtr.write_record([h.to_string(), k.to_string(), l.to_string()])
            .map_err(TaviError::CsvError)?;
    }

    wtr.flush().map_err(|e| TaviError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
