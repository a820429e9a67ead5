//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责把各层串起来，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (加载目录 / 数据集, 写出文件)
//!     ↓
//! workflow::WorksheetFlow (一次生成)
//!     ↓
//! services (能力层：distributor / assembler / serializer)
//!     ↓
//! models (数据：PatternRecord / DocumentModel)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层读写文件
//! 2. **向下依赖**：编排层 → workflow → services → models
//! 3. **无业务逻辑**：只做调度和统计，题目分配和排版都在 services

pub mod app;

pub use app::App;
