//! # 旧版扁平参数格式
//!
//! 旧版参数文件把每个字段放在带 `_var` 后缀的顶层键下，部分数值字段以字符串保存。
//! 本模块以一张静态映射表完成旧版格式与当前嵌套格式之间的双向转换。
//!
//! ## 映射规则
//! | 类型 | 写出 | 读入 |
//! |------|------|------|
//! | `Text` | 数值转为字符串 | 数值或数值字符串，否则取默认值 |
//! | `Number` | 原样 | 数值或数值字符串，否则取默认值 |
//! | `Integer` | 原样 | 整数或整数文本，否则取默认值 |
//! | `Raw` | 原样 | 原样 |
//!
//! 旧版文件中缺失的键不会出现在转换结果中，因此加载时对应字段保持当前值。
//!
//! ## 依赖关系
//! - 被 `models/application.rs`, `commands/state.rs` 使用
//! - 使用 `models/base.rs` 的 FieldMap

use crate::models::base::FieldMap;

use serde_json::{Number, Value};

/// 字段的读写方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegacyKind {
    Text { default: f64 },
    Number { default: f64 },
    Integer { default: i64 },
    Raw,
}

/// 映射表中的一行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyField {
    pub legacy_key: &'static str,
    pub section: &'static str,
    pub field: &'static str,
    pub kind: LegacyKind,
}

const fn row(
    legacy_key: &'static str,
    section: &'static str,
    field: &'static str,
    kind: LegacyKind,
) -> LegacyField {
    LegacyField {
        legacy_key,
        section,
        field,
        kind,
    }
}

const fn text(default: f64) -> LegacyKind {
    LegacyKind::Text { default }
}

const fn number(default: f64) -> LegacyKind {
    LegacyKind::Number { default }
}

const fn integer(default: i64) -> LegacyKind {
    LegacyKind::Integer { default }
}

const RAW: LegacyKind = LegacyKind::Raw;

/// 旧版键 ↔ (模型, 字段)
pub const LEGACY_FIELDS: [LegacyField; 37] = [
    row("mtt_var", "instrument", "mtt", text(30.0)),
    row("stt_var", "instrument", "stt", number(30.0)),
    row("psi_var", "instrument", "psi", number(30.0)),
    row("att_var", "instrument", "att", text(30.0)),
    row("Ki_var", "instrument", "Ki", text(2.662)),
    row("Kf_var", "instrument", "Kf", text(2.662)),
    row("Ei_var", "instrument", "Ei", text(14.7)),
    row("Ef_var", "instrument", "Ef", text(14.7)),
    row("number_neutrons_var", "scan", "number_neutrons", number(1e8)),
    row("K_fixed_var", "scan", "K_fixed", RAW),
    row("NMO_installed_var", "instrument", "NMO_installed", RAW),
    row("V_selector_installed_var", "instrument", "V_selector_installed", RAW),
    row("rhmfac_var", "instrument", "rhmfac", number(1.0)),
    row("rvmfac_var", "instrument", "rvmfac", number(1.0)),
    row("rhafac_var", "instrument", "rhafac", number(1.0)),
    row("fixed_E_var", "scan", "fixed_E", text(14.7)),
    row("qx_var", "reciprocal_space", "qx", number(2.0)),
    row("qy_var", "reciprocal_space", "qy", number(0.0)),
    row("qz_var", "reciprocal_space", "qz", number(0.0)),
    row("deltaE_var", "reciprocal_space", "deltaE", text(5.25)),
    row("monocris_var", "instrument", "monocris", RAW),
    row("anacris_var", "instrument", "anacris", RAW),
    row("alpha_1_var", "instrument", "alpha_1", integer(40)),
    row("alpha_2_30_var", "instrument", "alpha_2_30", RAW),
    row("alpha_2_40_var", "instrument", "alpha_2_40", RAW),
    row("alpha_2_60_var", "instrument", "alpha_2_60", RAW),
    row("alpha_3_var", "instrument", "alpha_3", integer(30)),
    row("alpha_4_var", "instrument", "alpha_4", integer(30)),
    row("diagnostic_mode_var", "scan", "diagnostic_mode", RAW),
    row("lattice_a_var", "sample", "lattice_a", number(4.05)),
    row("lattice_b_var", "sample", "lattice_b", number(4.05)),
    row("lattice_c_var", "sample", "lattice_c", number(4.05)),
    row("lattice_alpha_var", "sample", "lattice_alpha", number(90.0)),
    row("lattice_beta_var", "sample", "lattice_beta", number(90.0)),
    row("lattice_gamma_var", "sample", "lattice_gamma", number(90.0)),
    row("scan_command_var1", "scan", "scan_command1", RAW),
    row("scan_command_var2", "scan", "scan_command2", RAW),
];

const DIAGNOSTICS_KEY: &str = "diagnostic_settings";
const SAMPLE_SETTINGS_KEY: &str = "current_sample_settings";
const LAST_SELECTED_KEY: &str = "last_selected";

/// 当前格式 → 旧版格式
pub fn to_legacy(state: &FieldMap) -> FieldMap {
    let mut legacy = FieldMap::new();

    for row in &LEGACY_FIELDS {
        let Some(value) = lookup(state, row.section, row.field) else {
            continue;
        };
        let value = match row.kind {
            LegacyKind::Text { .. } => Value::String(display_value(value)),
            _ => value.clone(),
        };
        legacy.insert(row.legacy_key.to_string(), value);
    }

    if let Some(diagnostics) = state.get("diagnostics") {
        legacy.insert(DIAGNOSTICS_KEY.to_string(), diagnostics.clone());
    }
    if let Some(sample_type) = lookup(state, "sample", "sample_type") {
        let mut settings = FieldMap::new();
        settings.insert(LAST_SELECTED_KEY.to_string(), sample_type.clone());
        legacy.insert(SAMPLE_SETTINGS_KEY.to_string(), Value::Object(settings));
    }

    legacy
}

/// 旧版格式 → 当前格式
pub fn from_legacy(legacy: &FieldMap) -> FieldMap {
    let mut state = FieldMap::new();

    for row in &LEGACY_FIELDS {
        let Some(raw) = legacy.get(row.legacy_key) else {
            continue;
        };
        let value = match row.kind {
            LegacyKind::Text { default } | LegacyKind::Number { default } => {
                number_value(parse_number(raw).unwrap_or_else(|| {
                    tracing::warn!(key = row.legacy_key, value = %raw, default, "unparseable legacy value, using default");
                    default
                }))
            }
            LegacyKind::Integer { default } => {
                Value::from(parse_integer(raw).unwrap_or_else(|| {
                    tracing::warn!(key = row.legacy_key, value = %raw, default, "unparseable legacy value, using default");
                    default
                }))
            }
            LegacyKind::Raw => raw.clone(),
        };
        insert(&mut state, row.section, row.field, value);
    }

    if let Some(Value::Object(diagnostics)) = legacy.get(DIAGNOSTICS_KEY) {
        for (name, value) in diagnostics {
            insert(&mut state, "diagnostics", name, value.clone());
        }
    }
    if let Some(selected) = legacy
        .get(SAMPLE_SETTINGS_KEY)
        .and_then(|s| s.get(LAST_SELECTED_KEY))
    {
        insert(&mut state, "sample", "sample_type", selected.clone());
    }

    state
}

fn lookup<'a>(state: &'a FieldMap, section: &str, field: &str) -> Option<&'a Value> {
    state.get(section)?.get(field)
}

fn insert(state: &mut FieldMap, section: &str, field: &str, value: Value) {
    let entry = state
        .entry(section.to_string())
        .or_insert_with(|| Value::Object(FieldMap::new()));
    if let Value::Object(map) = entry {
        map.insert(field.to_string(), value);
    }
}

/// 数值的文本形式：浮点数始终带小数点（`30.0`），整数不带
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) if !n.is_f64() => i.to_string(),
            (_, Some(f)) => format!("{:?}", f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn number_value(x: f64) -> Value {
    Number::from_f64(x).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> FieldMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_to_legacy_coerces_text_fields() {
        let state = object(json!({
            "instrument": {"mtt": 30.0, "stt": 31.5, "Ki": 2.662, "alpha_1": 40},
            "reciprocal_space": {"deltaE": 5.25, "qx": 2.0},
        }));
        let legacy = to_legacy(&state);

        assert_eq!(legacy["mtt_var"], json!("30.0"));
        assert_eq!(legacy["Ki_var"], json!("2.662"));
        assert_eq!(legacy["deltaE_var"], json!("5.25"));
        assert_eq!(legacy["stt_var"], json!(31.5));
        assert_eq!(legacy["qx_var"], json!(2.0));
        assert_eq!(legacy["alpha_1_var"], json!(40));
        assert!(!legacy.contains_key("psi_var"));
    }

    #[test]
    fn test_to_legacy_nested_sections() {
        let state = object(json!({
            "sample": {"sample_type": "Aluminum rod Bragg"},
            "diagnostics": {"Source PSD": true},
        }));
        let legacy = to_legacy(&state);

        assert_eq!(
            legacy["current_sample_settings"],
            json!({"last_selected": "Aluminum rod Bragg"})
        );
        assert_eq!(legacy["diagnostic_settings"], json!({"Source PSD": true}));
    }

    #[test]
    fn test_from_legacy_parses_or_defaults() {
        let legacy = object(json!({
            "mtt_var": "41.2",
            "att_var": "not a number",
            "stt_var": "33",
            "qx_var": "2.5",
            "alpha_1_var": "60",
            "alpha_3_var": 40.0,
            "alpha_4_var": "x",
            "monocris_var": "Cu[111]",
        }));
        let state = from_legacy(&legacy);

        assert_eq!(state["instrument"]["mtt"], json!(41.2));
        assert_eq!(state["instrument"]["att"], json!(30.0));
        assert_eq!(state["instrument"]["stt"], json!(33.0));
        assert_eq!(state["reciprocal_space"]["qx"], json!(2.5));
        assert_eq!(state["instrument"]["alpha_1"], json!(60));
        assert_eq!(state["instrument"]["alpha_3"], json!(40));
        assert_eq!(state["instrument"]["alpha_4"], json!(30));
        assert_eq!(state["instrument"]["monocris"], json!("Cu[111]"));
    }

    #[test]
    fn test_from_legacy_missing_keys_are_absent() {
        let state = from_legacy(&object(json!({"Kf_var": "2.5"})));
        assert_eq!(state.len(), 1);
        assert_eq!(object(state["instrument"].clone()).len(), 1);
    }

    #[test]
    fn test_from_legacy_nested_sections() {
        let legacy = object(json!({
            "diagnostic_settings": {"Detector PSD": true, "Source PSD": false},
            "current_sample_settings": {"last_selected": "None"},
            "scan_command_var1": "qx 2 2.2 0.1",
        }));
        let state = from_legacy(&legacy);

        assert_eq!(state["diagnostics"]["Detector PSD"], json!(true));
        assert_eq!(state["sample"]["sample_type"], json!("None"));
        assert_eq!(state["scan"]["scan_command1"], json!("qx 2 2.2 0.1"));
    }

    #[test]
    fn test_legacy_keys_are_unique() {
        for (i, a) in LEGACY_FIELDS.iter().enumerate() {
            for b in &LEGACY_FIELDS[i + 1..] {
                assert_ne!(a.legacy_key, b.legacy_key);
                assert!(a.section != b.section || a.field != b.field);
            }
        }
    }
}
