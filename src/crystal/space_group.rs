//! # 空间群数据库
//!
//! 内置 230 个晶体学空间群（国际表 A 卷编号），以及按编号、按符号（大小写不敏感）的只读索引。
//!
//! ## 功能
//! - `lookup`: 按编号或符号查找，符号失败时尝试解析开头的编号（如 "225 - Fm-3m"）
//! - `search`: 按编号/符号/晶系模糊搜索
//! - `filter_by_crystal_system`: 按晶系筛选
//!
//! ## 依赖关系
//! - 被 `models/sample.rs`, `commands/spacegroup.rs` 使用
//! - 使用 `crystal/extinction.rs` 的 Centering

use crate::crystal::extinction::{Centering, ExtinctionRule};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// 晶系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrystalSystem {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Trigonal,
    Hexagonal,
    Cubic,
}

impl CrystalSystem {
    pub const ALL: [CrystalSystem; 7] = [
        CrystalSystem::Triclinic,
        CrystalSystem::Monoclinic,
        CrystalSystem::Orthorhombic,
        CrystalSystem::Tetragonal,
        CrystalSystem::Trigonal,
        CrystalSystem::Hexagonal,
        CrystalSystem::Cubic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CrystalSystem::Triclinic => "triclinic",
            CrystalSystem::Monoclinic => "monoclinic",
            CrystalSystem::Orthorhombic => "orthorhombic",
            CrystalSystem::Tetragonal => "tetragonal",
            CrystalSystem::Trigonal => "trigonal",
            CrystalSystem::Hexagonal => "hexagonal",
            CrystalSystem::Cubic => "cubic",
        }
    }

    /// 空间群编号范围（闭区间）
    pub fn number_range(self) -> (u16, u16) {
        match self {
            CrystalSystem::Triclinic => (1, 2),
            CrystalSystem::Monoclinic => (3, 15),
            CrystalSystem::Orthorhombic => (16, 74),
            CrystalSystem::Tetragonal => (75, 142),
            CrystalSystem::Trigonal => (143, 167),
            CrystalSystem::Hexagonal => (168, 194),
            CrystalSystem::Cubic => (195, 230),
        }
    }

    /// 晶格约束说明
    pub fn constraints(self) -> &'static str {
        match self {
            CrystalSystem::Triclinic => "a ≠ b ≠ c, α ≠ β ≠ γ",
            CrystalSystem::Monoclinic => "a ≠ b ≠ c, α = γ = 90°, β ≠ 90°",
            CrystalSystem::Orthorhombic => "a ≠ b ≠ c, α = β = γ = 90°",
            CrystalSystem::Tetragonal => "a = b ≠ c, α = β = γ = 90°",
            CrystalSystem::Trigonal => {
                "a = b ≠ c, α = β = 90°, γ = 120° (hex) or a = b = c, α = β = γ (rhomb)"
            }
            CrystalSystem::Hexagonal => "a = b ≠ c, α = β = 90°, γ = 120°",
            CrystalSystem::Cubic => "a = b = c, α = β = γ = 90°",
        }
    }

    /// 解析晶系名（大小写不敏感）
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for CrystalSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 空间群记录（不可变）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpaceGroup {
    /// 国际编号 (1-230)
    pub number: u16,
    /// 简写 Hermann-Mauguin 符号（如 "Fm-3m"）
    pub symbol: &'static str,
    pub crystal_system: CrystalSystem,
    pub centering: Centering,
}

impl SpaceGroup {
    /// 显示名，如 "225 - Fm-3m (Cubic)"
    pub fn display_name(&self) -> String {
        let system = self.crystal_system.as_str();
        let mut chars = system.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("{} - {} ({})", self.number, self.symbol, capitalized)
    }

    /// 搜索用文本（小写）
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.number, self.symbol, self.crystal_system).to_lowercase()
    }

    /// 该空间群中心化的消光规则
    pub fn extinction_rule(&self) -> ExtinctionRule {
        self.centering.rule()
    }

    /// (h, k, l) 是否允许
    pub fn allows(&self, h: i32, k: i32, l: i32) -> bool {
        self.centering.allows(h, k, l)
    }
}

mod table {
    use super::CrystalSystem::{self, *};
    use super::SpaceGroup;
    use crate::crystal::extinction::Centering::{self, *};

    const fn sg(
        number: u16,
        symbol: &'static str,
        crystal_system: CrystalSystem,
        centering: Centering,
    ) -> SpaceGroup {
        SpaceGroup {
            number,
            symbol,
            crystal_system,
            centering,
        }
    }

    /// 按编号排列的 230 个空间群
    pub(super) static SPACE_GROUPS: [SpaceGroup; 230] = [
        // Triclinic
        sg(1, "P1", Triclinic, P),
        sg(2, "P-1", Triclinic, P),
        // Monoclinic
        sg(3, "P2", Monoclinic, P),
        sg(4, "P2₁", Monoclinic, P),
        sg(5, "C2", Monoclinic, C),
        sg(6, "Pm", Monoclinic, P),
        sg(7, "Pc", Monoclinic, P),
        sg(8, "Cm", Monoclinic, C),
        sg(9, "Cc", Monoclinic, C),
        sg(10, "P2/m", Monoclinic, P),
        sg(11, "P2₁/m", Monoclinic, P),
        sg(12, "C2/m", Monoclinic, C),
        sg(13, "P2/c", Monoclinic, P),
        sg(14, "P2₁/c", Monoclinic, P),
        sg(15, "C2/c", Monoclinic, C),
        // Orthorhombic
        sg(16, "P222", Orthorhombic, P),
        sg(17, "P222₁", Orthorhombic, P),
        sg(18, "P2₁2₁2", Orthorhombic, P),
        sg(19, "P2₁2₁2₁", Orthorhombic, P),
        sg(20, "C222₁", Orthorhombic, C),
        sg(21, "C222", Orthorhombic, C),
        sg(22, "F222", Orthorhombic, F),
        sg(23, "I222", Orthorhombic, I),
        sg(24, "I2₁2₁2₁", Orthorhombic, I),
        sg(25, "Pmm2", Orthorhombic, P),
        sg(26, "Pmc2₁", Orthorhombic, P),
        sg(27, "Pcc2", Orthorhombic, P),
        sg(28, "Pma2", Orthorhombic, P),
        sg(29, "Pca2₁", Orthorhombic, P),
        sg(30, "Pnc2", Orthorhombic, P),
        sg(31, "Pmn2₁", Orthorhombic, P),
        sg(32, "Pba2", Orthorhombic, P),
        sg(33, "Pna2₁", Orthorhombic, P),
        sg(34, "Pnn2", Orthorhombic, P),
        sg(35, "Cmm2", Orthorhombic, C),
        sg(36, "Cmc2₁", Orthorhombic, C),
        sg(37, "Ccc2", Orthorhombic, C),
        sg(38, "Amm2", Orthorhombic, A),
        sg(39, "Aem2", Orthorhombic, A),
        sg(40, "Ama2", Orthorhombic, A),
        sg(41, "Aea2", Orthorhombic, A),
        sg(42, "Fmm2", Orthorhombic, F),
        sg(43, "Fdd2", Orthorhombic, F),
        sg(44, "Imm2", Orthorhombic, I),
        sg(45, "Iba2", Orthorhombic, I),
        sg(46, "Ima2", Orthorhombic, I),
        sg(47, "Pmmm", Orthorhombic, P),
        sg(48, "Pnnn", Orthorhombic, P),
        sg(49, "Pccm", Orthorhombic, P),
        sg(50, "Pban", Orthorhombic, P),
        sg(51, "Pmma", Orthorhombic, P),
        sg(52, "Pnna", Orthorhombic, P),
        sg(53, "Pmna", Orthorhombic, P),
        sg(54, "Pcca", Orthorhombic, P),
        sg(55, "Pbam", Orthorhombic, P),
        sg(56, "Pccn", Orthorhombic, P),
        sg(57, "Pbcm", Orthorhombic, P),
        sg(58, "Pnnm", Orthorhombic, P),
        sg(59, "Pmmn", Orthorhombic, P),
        sg(60, "Pbcn", Orthorhombic, P),
        sg(61, "Pbca", Orthorhombic, P),
        sg(62, "Pnma", Orthorhombic, P),
        sg(63, "Cmcm", Orthorhombic, C),
        sg(64, "Cmce", Orthorhombic, C),
        sg(65, "Cmmm", Orthorhombic, C),
        sg(66, "Cccm", Orthorhombic, C),
        sg(67, "Cmme", Orthorhombic, C),
        sg(68, "Ccce", Orthorhombic, C),
        sg(69, "Fmmm", Orthorhombic, F),
        sg(70, "Fddd", Orthorhombic, F),
        sg(71, "Immm", Orthorhombic, I),
        sg(72, "Ibam", Orthorhombic, I),
        sg(73, "Ibca", Orthorhombic, I),
        sg(74, "Imma", Orthorhombic, I),
        // Tetragonal
        sg(75, "P4", Tetragonal, P),
        sg(76, "P4₁", Tetragonal, P),
        sg(77, "P4₂", Tetragonal, P),
        sg(78, "P4₃", Tetragonal, P),
        sg(79, "I4", Tetragonal, I),
        sg(80, "I4₁", Tetragonal, I),
        sg(81, "P-4", Tetragonal, P),
        sg(82, "I-4", Tetragonal, I),
        sg(83, "P4/m", Tetragonal, P),
        sg(84, "P4₂/m", Tetragonal, P),
        sg(85, "P4/n", Tetragonal, P),
        sg(86, "P4₂/n", Tetragonal, P),
        sg(87, "I4/m", Tetragonal, I),
        sg(88, "I4₁/a", Tetragonal, I),
        sg(89, "P422", Tetragonal, P),
        sg(90, "P42₁2", Tetragonal, P),
        sg(91, "P4₁22", Tetragonal, P),
        sg(92, "P4₁2₁2", Tetragonal, P),
        sg(93, "P4₂22", Tetragonal, P),
        sg(94, "P4₂2₁2", Tetragonal, P),
        sg(95, "P4₃22", Tetragonal, P),
        sg(96, "P4₃2₁2", Tetragonal, P),
        sg(97, "I422", Tetragonal, I),
        sg(98, "I4₁22", Tetragonal, I),
        sg(99, "P4mm", Tetragonal, P),
        sg(100, "P4bm", Tetragonal, P),
        sg(101, "P4₂cm", Tetragonal, P),
        sg(102, "P4₂nm", Tetragonal, P),
        sg(103, "P4cc", Tetragonal, P),
        sg(104, "P4nc", Tetragonal, P),
        sg(105, "P4₂mc", Tetragonal, P),
        sg(106, "P4₂bc", Tetragonal, P),
        sg(107, "I4mm", Tetragonal, I),
        sg(108, "I4cm", Tetragonal, I),
        sg(109, "I4₁md", Tetragonal, I),
        sg(110, "I4₁cd", Tetragonal, I),
        sg(111, "P-42m", Tetragonal, P),
        sg(112, "P-42c", Tetragonal, P),
        sg(113, "P-42₁m", Tetragonal, P),
        sg(114, "P-42₁c", Tetragonal, P),
        sg(115, "P-4m2", Tetragonal, P),
        sg(116, "P-4c2", Tetragonal, P),
        sg(117, "P-4b2", Tetragonal, P),
        sg(118, "P-4n2", Tetragonal, P),
        sg(119, "I-4m2", Tetragonal, I),
        sg(120, "I-4c2", Tetragonal, I),
        sg(121, "I-42m", Tetragonal, I),
        sg(122, "I-42d", Tetragonal, I),
        sg(123, "P4/mmm", Tetragonal, P),
        sg(124, "P4/mcc", Tetragonal, P),
        sg(125, "P4/nbm", Tetragonal, P),
        sg(126, "P4/nnc", Tetragonal, P),
        sg(127, "P4/mbm", Tetragonal, P),
        sg(128, "P4/mnc", Tetragonal, P),
        sg(129, "P4/nmm", Tetragonal, P),
        sg(130, "P4/ncc", Tetragonal, P),
        sg(131, "P4₂/mmc", Tetragonal, P),
        sg(132, "P4₂/mcm", Tetragonal, P),
        sg(133, "P4₂/nbc", Tetragonal, P),
        sg(134, "P4₂/nnm", Tetragonal, P),
        sg(135, "P4₂/mbc", Tetragonal, P),
        sg(136, "P4₂/mnm", Tetragonal, P),
        sg(137, "P4₂/nmc", Tetragonal, P),
        sg(138, "P4₂/ncm", Tetragonal, P),
        sg(139, "I4/mmm", Tetragonal, I),
        sg(140, "I4/mcm", Tetragonal, I),
        sg(141, "I4₁/amd", Tetragonal, I),
        sg(142, "I4₁/acd", Tetragonal, I),
        // Trigonal
        sg(143, "P3", Trigonal, P),
        sg(144, "P3₁", Trigonal, P),
        sg(145, "P3₂", Trigonal, P),
        sg(146, "R3", Trigonal, R),
        sg(147, "P-3", Trigonal, P),
        sg(148, "R-3", Trigonal, R),
        sg(149, "P312", Trigonal, P),
        sg(150, "P321", Trigonal, P),
        sg(151, "P3₁12", Trigonal, P),
        sg(152, "P3₁21", Trigonal, P),
        sg(153, "P3₂12", Trigonal, P),
        sg(154, "P3₂21", Trigonal, P),
        sg(155, "R32", Trigonal, R),
        sg(156, "P3m1", Trigonal, P),
        sg(157, "P31m", Trigonal, P),
        sg(158, "P3c1", Trigonal, P),
        sg(159, "P31c", Trigonal, P),
        sg(160, "R3m", Trigonal, R),
        sg(161, "R3c", Trigonal, R),
        sg(162, "P-31m", Trigonal, P),
        sg(163, "P-31c", Trigonal, P),
        sg(164, "P-3m1", Trigonal, P),
        sg(165, "P-3c1", Trigonal, P),
        sg(166, "R-3m", Trigonal, R),
        sg(167, "R-3c", Trigonal, R),
        // Hexagonal
        sg(168, "P6", Hexagonal, P),
        sg(169, "P6₁", Hexagonal, P),
        sg(170, "P6₅", Hexagonal, P),
        sg(171, "P6₂", Hexagonal, P),
        sg(172, "P6₄", Hexagonal, P),
        sg(173, "P6₃", Hexagonal, P),
        sg(174, "P-6", Hexagonal, P),
        sg(175, "P6/m", Hexagonal, P),
        sg(176, "P6₃/m", Hexagonal, P),
        sg(177, "P622", Hexagonal, P),
        sg(178, "P6₁22", Hexagonal, P),
        sg(179, "P6₅22", Hexagonal, P),
        sg(180, "P6₂22", Hexagonal, P),
        sg(181, "P6₄22", Hexagonal, P),
        sg(182, "P6₃22", Hexagonal, P),
        sg(183, "P6mm", Hexagonal, P),
        sg(184, "P6cc", Hexagonal, P),
        sg(185, "P6₃cm", Hexagonal, P),
        sg(186, "P6₃mc", Hexagonal, P),
        sg(187, "P-6m2", Hexagonal, P),
        sg(188, "P-6c2", Hexagonal, P),
        sg(189, "P-62m", Hexagonal, P),
        sg(190, "P-62c", Hexagonal, P),
        sg(191, "P6/mmm", Hexagonal, P),
        sg(192, "P6/mcc", Hexagonal, P),
        sg(193, "P6₃/mcm", Hexagonal, P),
        sg(194, "P6₃/mmc", Hexagonal, P),
        // Cubic
        sg(195, "P23", Cubic, P),
        sg(196, "F23", Cubic, F),
        sg(197, "I23", Cubic, I),
        sg(198, "P2₁3", Cubic, P),
        sg(199, "I2₁3", Cubic, I),
        sg(200, "Pm-3", Cubic, P),
        sg(201, "Pn-3", Cubic, P),
        sg(202, "Fm-3", Cubic, F),
        sg(203, "Fd-3", Cubic, F),
        sg(204, "Im-3", Cubic, I),
        sg(205, "Pa-3", Cubic, P),
        sg(206, "Ia-3", Cubic, I),
        sg(207, "P432", Cubic, P),
        sg(208, "P4₂32", Cubic, P),
        sg(209, "F432", Cubic, F),
        sg(210, "F4₁32", Cubic, F),
        sg(211, "I432", Cubic, I),
        sg(212, "P4₃32", Cubic, P),
        sg(213, "P4₁32", Cubic, P),
        sg(214, "I4₁32", Cubic, I),
        sg(215, "P-43m", Cubic, P),
        sg(216, "F-43m", Cubic, F),
        sg(217, "I-43m", Cubic, I),
        sg(218, "P-43n", Cubic, P),
        sg(219, "F-43c", Cubic, F),
        sg(220, "I-43d", Cubic, I),
        sg(221, "Pm-3m", Cubic, P),
        sg(222, "Pn-3n", Cubic, P),
        sg(223, "Pm-3n", Cubic, P),
        sg(224, "Pn-3m", Cubic, P),
        sg(225, "Fm-3m", Cubic, F),
        sg(226, "Fm-3c", Cubic, F),
        sg(227, "Fd-3m", Cubic, F),
        sg(228, "Fd-3c", Cubic, F),
        sg(229, "Im-3m", Cubic, I),
        sg(230, "Ia-3d", Cubic, I),
    ];
}

/// 只读索引，首次访问时从表构建
struct SpaceGroupIndex {
    by_number: HashMap<u16, usize>,
    by_symbol: HashMap<String, usize>,
}

fn index() -> &'static SpaceGroupIndex {
    static INDEX: OnceLock<SpaceGroupIndex> = OnceLock::new();
    INDEX.get_or_init(|| {
        let mut by_number = HashMap::with_capacity(table::SPACE_GROUPS.len());
        let mut by_symbol = HashMap::with_capacity(table::SPACE_GROUPS.len());
        for (i, sg) in table::SPACE_GROUPS.iter().enumerate() {
            by_number.insert(sg.number, i);
            by_symbol.insert(sg.symbol.to_lowercase(), i);
        }
        SpaceGroupIndex {
            by_number,
            by_symbol,
        }
    })
}

/// 全部空间群（按编号顺序）
pub fn all() -> &'static [SpaceGroup] {
    &table::SPACE_GROUPS
}

/// 查找标识：编号或文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceGroupId<'a> {
    Number(i64),
    Text(&'a str),
}

impl From<i64> for SpaceGroupId<'_> {
    fn from(n: i64) -> Self {
        SpaceGroupId::Number(n)
    }
}

impl From<i32> for SpaceGroupId<'_> {
    fn from(n: i32) -> Self {
        SpaceGroupId::Number(i64::from(n))
    }
}

impl From<u16> for SpaceGroupId<'_> {
    fn from(n: u16) -> Self {
        SpaceGroupId::Number(i64::from(n))
    }
}

impl<'a> From<&'a str> for SpaceGroupId<'a> {
    fn from(s: &'a str) -> Self {
        SpaceGroupId::Text(s)
    }
}

/// 按编号查找
pub fn by_number(number: i64) -> Option<&'static SpaceGroup> {
    let number = u16::try_from(number).ok()?;
    index()
        .by_number
        .get(&number)
        .map(|&i| &table::SPACE_GROUPS[i])
}

/// 按符号查找（大小写不敏感）
pub fn by_symbol(symbol: &str) -> Option<&'static SpaceGroup> {
    index()
        .by_symbol
        .get(&symbol.trim().to_lowercase())
        .map(|&i| &table::SPACE_GROUPS[i])
}

/// 按编号或符号查找
///
/// 文本先精确匹配符号，再取第一个空白分隔词中 '-' 之前的部分按编号查找。
pub fn lookup<'a>(id: impl Into<SpaceGroupId<'a>>) -> Option<&'static SpaceGroup> {
    match id.into() {
        SpaceGroupId::Number(n) => by_number(n),
        SpaceGroupId::Text(text) => by_symbol(text).or_else(|| {
            let token = text.split_whitespace().next()?.split('-').next()?;
            by_number(token.parse().ok()?)
        }),
    }
}

/// 搜索空间群
///
/// 空查询返回表中前 `limit` 项；否则先放入编号精确匹配，
/// 再按表顺序追加搜索文本包含查询串（大小写不敏感）的项，最多 `limit` 项。
pub fn search(query: &str, limit: usize) -> Vec<&'static SpaceGroup> {
    if query.is_empty() {
        return all().iter().take(limit).collect();
    }
    if limit == 0 {
        return Vec::new();
    }

    let query = query.trim().to_lowercase();
    let mut results: Vec<&'static SpaceGroup> = Vec::new();

    if let Ok(number) = query.parse::<i64>() {
        if (1..=230).contains(&number) {
            if let Some(sg) = by_number(number) {
                results.push(sg);
            }
        }
    }

    for sg in all() {
        if results.len() >= limit {
            break;
        }
        if results.iter().any(|r| r.number == sg.number) {
            continue;
        }
        if sg.search_text().contains(&query) {
            results.push(sg);
        }
    }

    results
}

/// 指定晶系的全部空间群
pub fn filter_by_crystal_system(system: CrystalSystem) -> Vec<&'static SpaceGroup> {
    all().iter().filter(|sg| sg.crystal_system == system).collect()
}

/// 由编号推断晶系
pub fn crystal_system_for_number(number: i64) -> Option<CrystalSystem> {
    CrystalSystem::ALL.into_iter().find(|s| {
        let (low, high) = s.number_range();
        (i64::from(low)..=i64::from(high)).contains(&number)
    })
}

/// 由符号首字母推断中心化，无法识别时为 P
pub fn centering_from_symbol(symbol: &str) -> Centering {
    symbol
        .chars()
        .next()
        .and_then(Centering::from_letter)
        .unwrap_or(Centering::P)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete_and_ordered() {
        assert_eq!(all().len(), 230);
        for (i, sg) in all().iter().enumerate() {
            assert_eq!(usize::from(sg.number), i + 1);
        }
    }

    #[test]
    fn test_table_consistent_with_derived_rules() {
        for sg in all() {
            assert_eq!(
                crystal_system_for_number(i64::from(sg.number)),
                Some(sg.crystal_system)
            );
            assert_eq!(centering_from_symbol(sg.symbol), sg.centering);
        }
    }

    #[test]
    fn test_symbol_index_is_unique() {
        assert_eq!(index().by_symbol.len(), 230);
        assert_eq!(index().by_number.len(), 230);
    }

    #[test]
    fn test_lookup_by_number_and_symbol() {
        let sg = lookup(225).unwrap();
        assert_eq!(sg.symbol, "Fm-3m");
        assert_eq!(sg.crystal_system, CrystalSystem::Cubic);
        assert_eq!(sg.centering, Centering::F);

        assert_eq!(lookup("fm-3m").unwrap().number, 225);
        assert_eq!(lookup("P2₁/c").unwrap().number, 14);
        assert!(lookup(0).is_none());
        assert!(lookup(231).is_none());
    }

    #[test]
    fn test_lookup_display_name_falls_back_to_number() {
        let sg = lookup("225 - Fm-3m (Cubic)").unwrap();
        assert_eq!(sg.number, 225);
        assert_eq!(lookup("62").unwrap().symbol, "Pnma");
        assert!(lookup("not-a-group").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(lookup(225).unwrap().display_name(), "225 - Fm-3m (Cubic)");
    }

    #[test]
    fn test_search_exact_number_first() {
        let results = search("225", 20);
        assert_eq!(results[0].number, 225);
        assert_eq!(results[0].symbol, "Fm-3m");
        assert_eq!(results.iter().filter(|sg| sg.number == 225).count(), 1);
    }

    #[test]
    fn test_search_number_then_substring_matches() {
        let results = search("22", 50);
        assert_eq!(results[0].number, 22);
        // 其余结果按表顺序，包含 "22"（如 P222、222 号等）
        assert!(results[1..]
            .windows(2)
            .all(|w| w[0].number < w[1].number));
        assert!(results.iter().any(|sg| sg.number == 16));
        assert!(results.iter().any(|sg| sg.number == 220));
    }

    #[test]
    fn test_search_empty_query_returns_table_prefix() {
        let results = search("", 5);
        let numbers: Vec<u16> = results.iter().map(|sg| sg.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_respects_limit() {
        assert_eq!(search("cubic", 3).len(), 3);
        assert_eq!(search("22", 1).len(), 1);
        assert!(search("cubic", 0).is_empty());
        assert_eq!(search("CUBIC", 100).len(), 36);
    }

    #[test]
    fn test_filter_by_crystal_system() {
        assert_eq!(filter_by_crystal_system(CrystalSystem::Triclinic).len(), 2);
        assert_eq!(filter_by_crystal_system(CrystalSystem::Trigonal).len(), 25);
        assert_eq!(filter_by_crystal_system(CrystalSystem::Cubic).len(), 36);
    }

    #[test]
    fn test_centering_from_symbol_defaults_to_primitive() {
        assert_eq!(centering_from_symbol("Ia-3d"), Centering::I);
        assert_eq!(centering_from_symbol(""), Centering::P);
        assert_eq!(centering_from_symbol("Xyz"), Centering::P);
    }
}
