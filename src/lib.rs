//! JSON工匠：类型生成与结构视图核心库
//!
//! 从JSON文档推断类型模式并生成目标语言（Kotlin/Java/Go）的
//! 类型声明；同时把文档投影为可搜索、可增量展开的结构树。
//! UI渲染、文件对话框等由外部协作方承担，本库只暴露纯数据接口。

pub mod emit;
pub mod model;
pub mod session;
pub mod utils;

// 重新导出主要类型
pub use emit::{render_schema, GeneratedClass, GeneratedType};
pub use model::events::SessionEvent;
pub use model::json_tree::{flatten_json_tree, toggle_expanded_path, JsonTreeItem, ScalarKind};
pub use model::schema::{infer_schema, Field, FieldType, PrimitiveKind, RecordType, TypeSchema};
pub use model::search::{item_matches_search, search_tree_items, SearchState};
pub use model::target_language::{
    GoConfig, JavaConfig, JavaSerializationFramework, KotlinConfig, KotlinSerializationFramework,
    TargetLanguage,
};
pub use session::{AppError, JsonSession};
pub use utils::fs::SaveFileResult;
