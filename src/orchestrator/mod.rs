//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用生命周期
//! - 组装 OCR 客户端、LLM 服务
//! - 绑定端口、运行 HTTP 服务、优雅关闭
//!
//! ### `routes` - HTTP 路由
//! - 存活检查、上传参数校验、返回 xlsx
//!
//! ### `request_processor` - 单次上传处理器
//! - OCR → 分类 → 中间工作簿 → LLM 补全 → 最终工作簿
//!
//! ## 层次关系
//!
//! ```text
//! app / routes (HTTP)
//!     ↓
//! request_processor (处理一对上传文档)
//!     ↓
//! workflow (classify_flow / enrich_flow)
//!     ↓
//! services (切分、分类、提示词、LLM、工作簿)
//!     ↓
//! clients (OCR)
//! ```

pub mod app;
pub mod request_processor;
pub mod routes;

pub use app::App;
pub use request_processor::RequestProcessor;
pub use routes::{routes, AppState};
