//! # Pattern Worksheet
//!
//! 从模式数据集中选出最多 5 个模式，生成口语 / 排序练习卷
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 模式记录、数据集、文档模型
//! - `loaders` - JSON 数据集加载、TOML 数据集目录加载
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，全部是纯函数
//! - `distributor` - 按 base + remainder 规则分配题目
//! - `assembler` - 组装合并版式 / 分页版式的文档模型
//! - `serializer` - 纯文本 / JSON 输出
//! - `selection` - 选择状态（上限 5 个）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次生成"的完整流程
//! - `AppState` - 当前数据集 + 当前选择，由调用方持有
//! - `WorksheetFlow` - 检查选择 → 组装 → 命名 → 序列化
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 加载数据、应用选择、写出文件
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Block, Dataset, DocumentModel, PatternLookup, PatternRecord, QuestionItem, SectionKind};
pub use orchestrator::App;
pub use services::{distribute, Assembler, DistributionResult, LayoutMode, Selection};
pub use workflow::{AppState, GeneratedWorksheet, WorksheetFlow};
