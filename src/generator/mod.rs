//! # 二维码生成模块（generator）
//!
//! ## 设计思路
//!
//! 该模块将“输入变化 → 状态机转换 → 编码渲染 → 结果分发”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `commands`：仅做 IPC 入参/出参适配（薄封装）
//! - `service`：承载可注入状态（`GeneratorServiceState`），执行副作用
//! - `controller`：纯有限状态机（Idle / Pending / Ready）与过期结果丢弃
//! - `encoder`：外部 `qrcode` 编码器封装与纠错等级
//! - `render`：模块矩阵 → 像素 → PNG → Data URL
//! - `clipboard_writer`：结果写入系统剪贴板（含重试）
//! - `config/error/model/style`：配置、错误、数据模型、配色样式
//!
//! ## 实现思路
//!
//! 对外仅暴露必要类型与命令函数，内部细节保持 `mod` 私有。
//! 在 Tauri 侧通过 `GeneratorServiceState` 注入状态，提升测试隔离能力。
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! 前端 invoke
//!    ↓
//! commands.rs（参数适配）
//!    ↓
//! service.rs（State 注入、副作用编排、事件推送）
//!    ↓
//! controller.rs（纯状态机：发出请求 / 应用或丢弃结果）
//!    ├─ encoder.rs（qrcode crate 封装）
//!    ├─ render.rs（像素渲染 + PNG + Data URL，阻塞线程池执行）
//!    └─ clipboard_writer.rs（写剪贴板 + 重试）
//!    ↓
//! `qr-state-changed` 事件 / AppError 返回前端
//! ```
//!
//! ## 分层职责建议
//!
//! - 调用入口变更（命令名/参数）优先改 `commands.rs`
//! - 状态转换规则变更优先改 `controller.rs`
//! - 配置与策略变更优先改 `config.rs`
//! - 像素输出与配色问题优先看 `render.rs` 与 `style.rs`

pub mod commands;
mod clipboard_writer;
mod config;
mod controller;
mod encoder;
mod error;
mod model;
mod render;
mod service;
mod style;

pub use commands::{
    copy_qr_to_clipboard,
    export_qr_png,
    get_generator_snapshot,
    list_qr_styles,
    reset_generator,
    set_qr_error_level,
    set_qr_size,
    set_qr_style,
    set_qr_text,
};
pub use config::GeneratorConfig;
pub use controller::{
    CompletionOutcome, GeneratorController, GeneratorSnapshot, GeneratorState, TextTransition,
};
pub use encoder::ErrorLevel;
pub use error::GeneratorError;
pub use model::{EncodeRequest, QrImagePayload, QrImageView};
pub use render::generate_payload;
pub use service::{GeneratorServiceState, QR_STATE_EVENT};
pub use style::{ALL_STYLES, StyleInfo, StylePalette};
