//! # 二维码生成工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    前端 (输入面板 + 展示层)               │
//! │                                                          │
//! │  文本输入 ── 样式选择 ── 尺寸滑块 ── 纠错下拉             │
//! │       │  (每次变化 invoke，监听 qr-state-changed)         │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ Tauri IPC (Result<T, AppError>)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            后端 (Rust)                           │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ generator ── 生成控制器状态机 + 编码渲染流水线        │
//! │  │   ├─ controller  纯状态机 (Idle/Pending/Ready)        │
//! │  │   ├─ encoder     外部 qrcode 编码器封装               │
//! │  │   ├─ render      像素渲染 · PNG · Data URL            │
//! │  │   └─ clipboard_writer  结果复制到剪贴板               │
//! │  │                                                       │
//! │  └─ export ───── 结果导出 qr-code.png (返回 Result)       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，所有 Tauri command 的返回类型 |
//! | [`generator`] | 生成控制器状态机、编码渲染流水线、剪贴板复制 |
//! | [`export`] | 结果落盘为 `qr-code.png`，目录解析与自动创建 |

pub mod error;
pub mod export;
pub mod generator;
