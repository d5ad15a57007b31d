//! 目标语言与各语言的生成配置
//!
//! 每种语言只暴露对它有意义的选项；与某语言无关的选项由对应
//! 的生成器直接忽略。

/// Kotlin 序列化框架（决定注解与 import 块）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KotlinSerializationFramework {
    Kotlinx,
    Gson,
    Jackson,
}

/// Java 类体风格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JavaSerializationFramework {
    Records,
    Lombok,
    PlainTypes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KotlinConfig {
    pub class_name: String,
    pub save_classes_as_separate_files: bool,
    pub file_extension: String,
    pub serialization_framework: KotlinSerializationFramework,
    /// 为真时所有属性渲染为可空并带默认值，与源值是否为 null 无关
    pub all_properties_optional: bool,
}

impl Default for KotlinConfig {
    fn default() -> Self {
        Self {
            class_name: "JsonClass".to_string(),
            save_classes_as_separate_files: false,
            file_extension: ".kt".to_string(),
            serialization_framework: KotlinSerializationFramework::Kotlinx,
            all_properties_optional: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaConfig {
    pub class_name: String,
    pub save_classes_as_separate_files: bool,
    pub file_extension: String,
    /// 为真用原生数组 T[]，否则 List<T>（附带 import）
    pub use_arrays: bool,
    pub serialization_framework: JavaSerializationFramework,
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            class_name: "JsonClass".to_string(),
            save_classes_as_separate_files: true,
            file_extension: ".java".to_string(),
            use_arrays: true,
            serialization_framework: JavaSerializationFramework::Lombok,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoConfig {
    pub class_name: String,
    pub save_classes_as_separate_files: bool,
    pub file_extension: String,
    /// 可选字段用指针类型表达
    pub use_pointers: bool,
    /// 可选字段的 json tag 追加 ,omitempty
    pub omit_empty: bool,
    /// 为真时所有字段按可选处理，与源值是否为 null 无关
    pub all_properties_optional: bool,
}

impl Default for GoConfig {
    fn default() -> Self {
        Self {
            class_name: "JsonStruct".to_string(),
            save_classes_as_separate_files: false,
            file_extension: ".go".to_string(),
            use_pointers: true,
            omit_empty: true,
            all_properties_optional: false,
        }
    }
}

/// 目标语言选择器，携带各自的配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetLanguage {
    Kotlin(KotlinConfig),
    Java(JavaConfig),
    Go(GoConfig),
}

impl Default for TargetLanguage {
    fn default() -> Self {
        TargetLanguage::Kotlin(KotlinConfig::default())
    }
}

impl TargetLanguage {
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::Kotlin(_) => "Kotlin",
            TargetLanguage::Java(_) => "Java",
            TargetLanguage::Go(_) => "Go",
        }
    }

    pub fn class_name(&self) -> &str {
        match self {
            TargetLanguage::Kotlin(c) => &c.class_name,
            TargetLanguage::Java(c) => &c.class_name,
            TargetLanguage::Go(c) => &c.class_name,
        }
    }

    /// 类名为空时的兜底默认值
    pub fn effective_class_name(&self) -> &str {
        let name = self.class_name();
        if !name.is_empty() {
            return name;
        }
        match self {
            TargetLanguage::Go(_) => "JsonStruct",
            _ => "JsonClass",
        }
    }

    pub fn file_extension(&self) -> &str {
        match self {
            TargetLanguage::Kotlin(c) => &c.file_extension,
            TargetLanguage::Java(c) => &c.file_extension,
            TargetLanguage::Go(c) => &c.file_extension,
        }
    }

    pub fn save_classes_as_separate_files(&self) -> bool {
        match self {
            TargetLanguage::Kotlin(c) => c.save_classes_as_separate_files,
            TargetLanguage::Java(c) => c.save_classes_as_separate_files,
            TargetLanguage::Go(c) => c.save_classes_as_separate_files,
        }
    }

    /// 换类名，其余配置不动
    pub fn with_class_name(&self, class_name: &str) -> TargetLanguage {
        match self {
            TargetLanguage::Kotlin(c) => TargetLanguage::Kotlin(KotlinConfig {
                class_name: class_name.to_string(),
                ..c.clone()
            }),
            TargetLanguage::Java(c) => TargetLanguage::Java(JavaConfig {
                class_name: class_name.to_string(),
                ..c.clone()
            }),
            TargetLanguage::Go(c) => TargetLanguage::Go(GoConfig {
                class_name: class_name.to_string(),
                ..c.clone()
            }),
        }
    }
}
