//! # 系统消光规则
//!
//! 按 Bravais 格子中心化类型判断衍射 (h, k, l) 是否系统消光。
//!
//! | 中心化 | 允许条件 |
//! |--------|----------|
//! | P | 全部允许 |
//! | I | h + k + l 为偶数 |
//! | F | h, k, l 奇偶性相同 |
//! | C | h + k 为偶数 |
//! | A | k + l 为偶数 |
//! | B | h + l 为偶数 |
//! | R | −h + k + l ≡ 0 (mod 3) |
//!
//! 未知中心化字母一律视为允许。
//!
//! ## 依赖关系
//! - 被 `crystal/space_group.rs`, `commands/spacegroup.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bravais 格子中心化类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Centering {
    P,
    I,
    F,
    C,
    A,
    B,
    R,
}

impl Centering {
    pub const ALL: [Centering; 7] = [
        Centering::P,
        Centering::I,
        Centering::F,
        Centering::C,
        Centering::A,
        Centering::B,
        Centering::R,
    ];

    /// 从字母解析（大小写不敏感）
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(Centering::P),
            'I' => Some(Centering::I),
            'F' => Some(Centering::F),
            'C' => Some(Centering::C),
            'A' => Some(Centering::A),
            'B' => Some(Centering::B),
            'R' => Some(Centering::R),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Centering::P => 'P',
            Centering::I => 'I',
            Centering::F => 'F',
            Centering::C => 'C',
            Centering::A => 'A',
            Centering::B => 'B',
            Centering::R => 'R',
        }
    }

    /// 该中心化下 (h, k, l) 是否允许
    pub fn allows(self, h: i32, k: i32, l: i32) -> bool {
        match self {
            Centering::P => true,
            Centering::I => (h + k + l).rem_euclid(2) == 0,
            Centering::F => {
                let (ph, pk, pl) = (h.rem_euclid(2), k.rem_euclid(2), l.rem_euclid(2));
                ph == pk && pk == pl
            }
            Centering::C => (h + k).rem_euclid(2) == 0,
            Centering::A => (k + l).rem_euclid(2) == 0,
            Centering::B => (h + l).rem_euclid(2) == 0,
            Centering::R => (-h + k + l).rem_euclid(3) == 0,
        }
    }

    /// 规则说明
    pub fn rule(self) -> ExtinctionRule {
        let (name, forbidden, allowed) = match self {
            Centering::P => (
                "Primitive",
                "None (all reflections allowed)",
                "Any h, k, l",
            ),
            Centering::I => ("Body-centered", "h + k + l = odd", "h + k + l = even"),
            Centering::F => (
                "Face-centered",
                "h, k, l mixed (some odd, some even)",
                "h, k, l all odd OR all even",
            ),
            Centering::C => (
                "C-centered (base-centered on ab face)",
                "h + k = odd",
                "h + k = even",
            ),
            Centering::A => (
                "A-centered (base-centered on bc face)",
                "k + l = odd",
                "k + l = even",
            ),
            Centering::B => (
                "B-centered (base-centered on ac face)",
                "h + l = odd",
                "h + l = even",
            ),
            Centering::R => (
                "Rhombohedral (hexagonal axes)",
                "-h + k + l ≠ 3n",
                "-h + k + l = 3n (n integer)",
            ),
        };
        ExtinctionRule {
            name,
            forbidden,
            allowed,
        }
    }
}

impl fmt::Display for Centering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// 消光规则的文字说明
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtinctionRule {
    pub name: &'static str,
    pub forbidden: &'static str,
    pub allowed: &'static str,
}

impl ExtinctionRule {
    pub const UNKNOWN: ExtinctionRule = ExtinctionRule {
        name: "Unknown",
        forbidden: "Unknown",
        allowed: "Unknown",
    };
}

fn parse_centering(centering: &str) -> Option<Centering> {
    let mut chars = centering.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Centering::from_letter(letter),
        _ => None,
    }
}

/// 判断 (h, k, l) 在给定中心化字母下是否允许；未知字母视为允许
pub fn is_allowed(h: i32, k: i32, l: i32, centering: &str) -> bool {
    parse_centering(centering).map_or(true, |c| c.allows(h, k, l))
}

/// 中心化字母对应的规则说明；未知字母返回 `ExtinctionRule::UNKNOWN`
pub fn extinction_rule(centering: &str) -> ExtinctionRule {
    parse_centering(centering).map_or(ExtinctionRule::UNKNOWN, Centering::rule)
}

/// 枚举 [−h_max, h_max]×[−k_max, k_max]×[−l_max, l_max] 内（不含原点）的允许衍射
///
/// 枚举顺序：h 外层、k 中层、l 内层
pub fn generate_allowed(
    centering: &str,
    h_max: i32,
    k_max: i32,
    l_max: i32,
) -> Vec<(i32, i32, i32)> {
    let mut allowed = Vec::new();

    for h in -h_max..=h_max {
        for k in -k_max..=k_max {
            for l in -l_max..=l_max {
                // 跳过 (0,0,0)
                if h == 0 && k == 0 && l == 0 {
                    continue;
                }
                if is_allowed(h, k, l, centering) {
                    allowed.push((h, k, l));
                }
            }
        }
    }

    allowed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_centered_rule() {
        assert!(is_allowed(2, 2, 2, "F"));
        assert!(!is_allowed(1, 1, 2, "F"));
        assert!(is_allowed(1, 1, 1, "F"));
        assert!(is_allowed(-1, 1, 3, "F"));
        assert!(!is_allowed(-1, 0, 0, "F"));
    }

    #[test]
    fn test_body_centered_rule_with_negative_indices() {
        assert!(is_allowed(-1, 1, 0, "I"));
        assert!(!is_allowed(-1, 0, 0, "I"));
    }

    #[test]
    fn test_base_centered_rules() {
        assert!(is_allowed(1, 1, 0, "C"));
        assert!(!is_allowed(1, 0, 0, "C"));
        assert!(is_allowed(0, 1, 1, "A"));
        assert!(!is_allowed(0, 1, 0, "A"));
        assert!(is_allowed(1, 0, 1, "B"));
        assert!(!is_allowed(0, 0, 1, "B"));
    }

    #[test]
    fn test_rhombohedral_rule() {
        assert!(is_allowed(1, 0, 1, "R"));
        assert!(is_allowed(0, 0, 3, "R"));
        assert!(!is_allowed(0, 0, 1, "R"));
        assert!(is_allowed(-1, 0, -1, "R"));
        assert!(!is_allowed(1, 0, 0, "R"));
    }

    #[test]
    fn test_unknown_centering_is_permissive() {
        assert!(is_allowed(1, 0, 0, "X"));
        assert!(is_allowed(1, 0, 0, ""));
        assert_eq!(extinction_rule("X"), ExtinctionRule::UNKNOWN);
    }

    #[test]
    fn test_lowercase_letter_accepted() {
        assert!(!is_allowed(1, 1, 2, "f"));
        assert_eq!(extinction_rule("i").name, "Body-centered");
    }

    #[test]
    fn test_generate_allowed_primitive_counts_all_but_origin() {
        let all = generate_allowed("P", 1, 1, 1);
        assert_eq!(all.len(), 26);
        assert_eq!(all.first(), Some(&(-1, -1, -1)));
        assert_eq!(all.last(), Some(&(1, 1, 1)));
        assert!(!all.contains(&(0, 0, 0)));
    }

    #[test]
    fn test_generate_allowed_ordering_is_h_k_l_nested() {
        let f = generate_allowed("F", 1, 1, 1);
        // 全奇 8 个 + 全偶（仅原点，已排除）
        assert_eq!(f.len(), 8);
        assert_eq!(f[0], (-1, -1, -1));
        assert_eq!(f[1], (-1, -1, 1));
        assert_eq!(f[2], (-1, 1, -1));
        assert!(f.iter().all(|&(h, k, l)| is_allowed(h, k, l, "F")));
    }

    #[test]
    fn test_generate_allowed_zero_bounds_is_empty() {
        assert!(generate_allowed("P", 0, 0, 0).is_empty());
    }
}
