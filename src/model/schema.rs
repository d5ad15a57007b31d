//! 类型推断：遍历 JSON 文档，产出语言无关的记录类型集合
//!
//! 结构去重：字段名与字段类型完全一致的两个对象形状折叠为同一个
//! 记录类型；命名取自所属键名（PascalCase），冲突按首次出现顺序
//! 追加数字后缀。推断假定输入是已解析成功的 `Value`，本身不会失败。

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::utils::naming::to_class_name_camel_case;

/// 标量字段类型，按 布尔 -> 32位整数 -> 64位整数 -> 浮点 -> 字符串
/// 的优先级取最窄匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Int,
    Long,
    Double,
    Bool,
}

/// 字段类型标签联合。`Reference` 的目标在记录集合中有且只有一个。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Primitive(PrimitiveKind),
    ArrayOf(Box<FieldType>),
    Reference(String),
    /// JSON null 或空数组元素：类型未知
    UnknownOrNull,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// 文档中的原始键名
    pub json_name: String,
    pub ty: FieldType,
    /// 源值为 JSON null 时为真；各语言配置可再整体放宽
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordType {
    pub name: String,
    /// 按文档键序排列
    pub fields: Vec<Field>,
}

/// 一次推断的产物：根记录名 + 按 根优先、字段声明序深度优先
/// 排列的记录列表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSchema {
    pub root: String,
    pub records: Vec<RecordType>,
}

impl TypeSchema {
    pub fn record(&self, name: &str) -> Option<&RecordType> {
        self.records.iter().find(|r| r.name == name)
    }
}

/// 推断入口。根对象得到用户指定的类名；根为对象数组时按首元素
/// 推断元素形状并冠以根名；其余非对象根产出空记录。
pub fn infer_schema(root: &Value, root_name: &str) -> TypeSchema {
    let normalized = {
        let n = to_class_name_camel_case(root_name);
        if n.is_empty() { "JsonClass".to_string() } else { n }
    };

    let mut inferencer = Inferencer::default();
    let root_record = match root {
        Value::Object(map) => inferencer.infer_object(map, &normalized),
        Value::Array(arr) => match arr.first() {
            Some(Value::Object(map)) => inferencer.infer_object(map, &normalized),
            _ => inferencer.push_empty_record(&normalized),
        },
        _ => inferencer.push_empty_record(&normalized),
    };
    let records = inferencer.into_ordered(&root_record);
    TypeSchema { root: root_record, records }
}

#[derive(Default)]
struct Inferencer {
    used_names: HashSet<String>,
    records: Vec<RecordType>,
    /// 结构指纹 -> 已注册的记录名
    by_fingerprint: HashMap<String, String>,
}

impl Inferencer {
    /// 推断一个对象形状，返回其记录名。
    ///
    /// 名字在递归进入字段之前保留（前序），这样冲突后缀跟随首次
    /// 出现顺序；若推断完字段后发现形状与已有记录相同，释放保留
    /// 的名字并复用既有记录。
    fn infer_object(&mut self, map: &Map<String, Value>, name_candidate: &str) -> String {
        let reserved = self.allocate_name(name_candidate);

        let fields: Vec<Field> = map
            .iter()
            .map(|(key, value)| Field {
                json_name: key.clone(),
                ty: self.infer_field_type(value, key),
                optional: value.is_null(),
            })
            .collect();

        let fingerprint = fingerprint_of(&fields);
        if let Some(existing) = self.by_fingerprint.get(&fingerprint) {
            let existing = existing.clone();
            if existing != reserved {
                self.used_names.remove(&reserved);
            }
            return existing;
        }

        self.by_fingerprint.insert(fingerprint, reserved.clone());
        self.records.push(RecordType { name: reserved.clone(), fields });
        reserved
    }

    fn infer_field_type(&mut self, value: &Value, owning_key: &str) -> FieldType {
        match value {
            Value::Object(map) => {
                let candidate = {
                    let n = to_class_name_camel_case(owning_key);
                    if n.is_empty() { "JsonClass".to_string() } else { n }
                };
                FieldType::Reference(self.infer_object(map, &candidate))
            }
            Value::Array(arr) => {
                // 元素类型只看首元素，异构数组不做并集；空数组元素未知
                let element = match arr.first() {
                    None => FieldType::UnknownOrNull,
                    Some(first) => self.infer_field_type(first, owning_key),
                };
                FieldType::ArrayOf(Box::new(element))
            }
            Value::Null => FieldType::UnknownOrNull,
            Value::Bool(_) => FieldType::Primitive(PrimitiveKind::Bool),
            Value::Number(n) => FieldType::Primitive(classify_number(n)),
            Value::String(_) => FieldType::Primitive(PrimitiveKind::String),
        }
    }

    fn push_empty_record(&mut self, name_candidate: &str) -> String {
        let name = self.allocate_name(name_candidate);
        self.records.push(RecordType { name: name.clone(), fields: Vec::new() });
        name
    }

    /// 占用一个未使用的名字，冲突时追加 2 起始的数字后缀
    fn allocate_name(&mut self, candidate: &str) -> String {
        let base = if candidate.is_empty() { "JsonClass" } else { candidate };
        let mut name = base.to_string();
        let mut suffix = 2u32;
        while self.used_names.contains(&name) {
            name = format!("{}{}", base, suffix);
            suffix += 1;
        }
        self.used_names.insert(name.clone());
        name
    }

    /// 按 根优先、引用字段声明序深度优先 重排记录，
    /// 输出顺序与输入文档一一对应
    fn into_ordered(self, root: &str) -> Vec<RecordType> {
        let mut by_name: HashMap<String, RecordType> =
            self.records.into_iter().map(|r| (r.name.clone(), r)).collect();
        let mut ordered = Vec::with_capacity(by_name.len());
        collect_dfs(root, &mut by_name, &mut ordered);
        ordered
    }
}

fn collect_dfs(name: &str, by_name: &mut HashMap<String, RecordType>, out: &mut Vec<RecordType>) {
    let Some(record) = by_name.remove(name) else {
        return;
    };
    let referenced: Vec<String> = record
        .fields
        .iter()
        .filter_map(|f| referenced_record(&f.ty).map(str::to_string))
        .collect();
    out.push(record);
    for child in referenced {
        collect_dfs(&child, by_name, out);
    }
}

fn referenced_record(ty: &FieldType) -> Option<&str> {
    match ty {
        FieldType::Reference(name) => Some(name),
        FieldType::ArrayOf(inner) => referenced_record(inner),
        _ => None,
    }
}

fn classify_number(n: &serde_json::Number) -> PrimitiveKind {
    if let Some(i) = n.as_i64() {
        if i >= i64::from(i32::MIN) && i <= i64::from(i32::MAX) {
            PrimitiveKind::Int
        } else {
            PrimitiveKind::Long
        }
    } else if n.as_u64().is_some() {
        PrimitiveKind::Long
    } else {
        PrimitiveKind::Double
    }
}

/// 字段名 + 字段类型的稳定文本指纹，用于结构去重。
/// 引用以记录名参与，嵌套去重因此可传递。
fn fingerprint_of(fields: &[Field]) -> String {
    let mut out = String::new();
    for field in fields {
        out.push_str(&field.json_name);
        out.push(':');
        push_type_key(&field.ty, &mut out);
        out.push(';');
    }
    out
}

fn push_type_key(ty: &FieldType, out: &mut String) {
    match ty {
        FieldType::Primitive(kind) => {
            out.push_str(match kind {
                PrimitiveKind::String => "s",
                PrimitiveKind::Int => "i",
                PrimitiveKind::Long => "l",
                PrimitiveKind::Double => "d",
                PrimitiveKind::Bool => "b",
            });
        }
        FieldType::ArrayOf(inner) => {
            out.push('[');
            push_type_key(inner, out);
            out.push(']');
        }
        FieldType::Reference(name) => {
            out.push('@');
            out.push_str(name);
        }
        FieldType::UnknownOrNull => out.push('?'),
    }
}
