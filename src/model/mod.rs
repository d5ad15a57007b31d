//! 领域模型：类型推断、结构树、搜索、目标语言与会话事件

pub mod events;
pub mod json_tree;
pub mod schema;
pub mod search;
pub mod target_language;
