//! # 模型基础契约
//!
//! 每个模型以显式字段表声明其可观察字段和嵌套模型，
//! 序列化/反序列化按字段表遍历，不依赖运行时反射。
//!
//! ## 序列化规则
//! - `serialize`: 字段名 → 值 的映射（键有序），嵌套模型递归展开
//! - `deserialize`: 仅处理输入中存在且名称匹配的字段；
//!   未知键忽略，缺失字段保持原值，类型不匹配的值记录日志后忽略
//!
//! ## 依赖关系
//! - 被 `models/` 下所有领域模型实现
//! - 使用 `models/observable.rs`
//! - 使用 `serde_json::Value` 作为通用值类型

use crate::models::observable::Observable;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// 序列化后的字段映射
pub type FieldMap = serde_json::Map<String, Value>;

/// 可按名称读写的单个可观察字段
pub trait ObservableField {
    fn field_name(&self) -> &'static str;
    fn to_value(&self) -> Value;
    /// 从通用值写入；类型不匹配时返回 false 且不修改当前值
    fn set_from_value(&mut self, value: &Value) -> bool;
}

impl<T> ObservableField for Observable<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned,
{
    fn field_name(&self) -> &'static str {
        self.name()
    }

    fn to_value(&self) -> Value {
        serde_json::to_value(self.value()).unwrap_or(Value::Null)
    }

    fn set_from_value(&mut self, value: &Value) -> bool {
        match T::deserialize(value) {
            Ok(v) => {
                self.set(v);
                true
            }
            Err(e) => {
                tracing::warn!(field = self.name(), error = %e, "ignoring value with unexpected type");
                false
            }
        }
    }
}

/// 字段表中的只读条目
pub enum Field<'a> {
    Value(&'a dyn ObservableField),
    Model(&'a dyn Model),
}

/// 字段表中的可写条目
pub enum FieldMut<'a> {
    Value(&'a mut dyn ObservableField),
    Model(&'a mut dyn Model),
}

impl Field<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Value(f) => f.field_name(),
            Field::Model(m) => m.model_name(),
        }
    }
}

impl FieldMut<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            FieldMut::Value(f) => f.field_name(),
            FieldMut::Model(m) => m.model_name(),
        }
    }
}

/// 由可观察字段和嵌套模型组成的模型
pub trait Model {
    /// 模型名（作为父模型中的键）
    fn model_name(&self) -> &'static str;

    /// 公开字段表
    fn fields(&self) -> Vec<Field<'_>>;

    /// 公开字段表（可写）
    fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;

    /// 序列化为字段映射
    fn serialize(&self) -> FieldMap {
        let mut map = FieldMap::new();
        for field in self.fields() {
            let value = match &field {
                Field::Value(f) => f.to_value(),
                Field::Model(m) => Value::Object(m.serialize()),
            };
            map.insert(field.name().to_string(), value);
        }
        map
    }

    /// 从字段映射部分更新
    fn deserialize(&mut self, data: &FieldMap) {
        for field in self.fields_mut() {
            let Some(value) = data.get(field.name()) else {
                continue;
            };
            match field {
                FieldMut::Value(f) => {
                    f.set_from_value(value);
                }
                FieldMut::Model(m) => {
                    if let Value::Object(nested) = value {
                        m.deserialize(nested);
                    }
                }
            }
        }
    }
}

/// 为仅由可观察字段组成的模型生成字段表
macro_rules! observable_fields {
    ($ty:ty, $name:literal, [$($field:ident),* $(,)?]) => {
        impl $crate::models::base::Model for $ty {
            fn model_name(&self) -> &'static str {
                $name
            }

            fn fields(&self) -> Vec<$crate::models::base::Field<'_>> {
                vec![$($crate::models::base::Field::Value(&self.$field)),*]
            }

            fn fields_mut(&mut self) -> Vec<$crate::models::base::FieldMut<'_>> {
                vec![$($crate::models::base::FieldMut::Value(&mut self.$field)),*]
            }
        }
    };
}

pub(crate) use observable_fields;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Inner {
        x: Observable<f64>,
    }

    observable_fields!(Inner, "inner", [x]);

    struct Outer {
        label: Observable<String>,
        count: Observable<i64>,
        inner: Inner,
    }

    impl Model for Outer {
        fn model_name(&self) -> &'static str {
            "outer"
        }

        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::Value(&self.label),
                Field::Value(&self.count),
                Field::Model(&self.inner),
            ]
        }

        fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
            vec![
                FieldMut::Value(&mut self.label),
                FieldMut::Value(&mut self.count),
                FieldMut::Model(&mut self.inner),
            ]
        }
    }

    fn outer() -> Outer {
        Outer {
            label: Observable::new("label", "PG[002]".to_string()),
            count: Observable::new("count", 40),
            inner: Inner {
                x: Observable::new("x", 1.5),
            },
        }
    }

    #[test]
    fn test_serialize_recurses_into_nested_models() {
        let map = outer().serialize();
        assert_eq!(
            Value::Object(map),
            json!({"label": "PG[002]", "count": 40, "inner": {"x": 1.5}})
        );
    }

    #[test]
    fn test_deserialize_is_partial_and_ignores_unknown_keys() {
        let mut m = outer();
        let data = json!({"count": 60, "unknown": true, "inner": {"x": 2.5, "y": 1}});
        m.deserialize(data.as_object().unwrap());

        assert_eq!(m.count.get(), 60);
        assert_eq!(m.label.get(), "PG[002]");
        assert_eq!(m.inner.x.get(), 2.5);
    }

    #[test]
    fn test_deserialize_skips_mismatched_types() {
        let mut m = outer();
        let data = json!({"count": "sixty", "inner": 3.0, "label": "Cu[111]"});
        m.deserialize(data.as_object().unwrap());

        assert_eq!(m.count.get(), 40);
        assert_eq!(m.inner.x.get(), 1.5);
        assert_eq!(m.label.get(), "Cu[111]");
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let mut m = outer();
        m.count.set(30);
        let snapshot = m.serialize();

        m.deserialize(&snapshot);
        assert_eq!(m.serialize(), snapshot);
    }
}
