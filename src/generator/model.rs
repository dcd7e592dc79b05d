//! # 请求与中间模型
//!
//! ## 设计思路
//!
//! 将“一次生成请求”和“生成结果”解耦为两个不可变模型：
//! - `EncodeRequest` 表示参数快照，发出后不再修改
//! - `QrImagePayload` 表示已渲染完成、可展示/导出/复制的结果
//!
//! 请求携带单调递增的序号 `seq`，完成回调只在序号仍是最新时生效，
//! 以此丢弃被新输入取代的过期结果。

use serde::Serialize;

use super::encoder::ErrorLevel;

/// 一次编码请求的参数快照。发出后不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    /// 请求序号，由控制器单调递增分配。
    pub seq: u64,
    /// 待编码文本（原样传给编码器，不做裁剪）。
    pub text: String,
    /// 输出边长（像素，方形），已被钳制在配置范围内。
    pub size_px: u32,
    /// 纠错等级。
    pub error_level: ErrorLevel,
    /// 深色模块颜色（`#rrggbb`）。
    pub dark: &'static str,
    /// 浅色模块颜色（`#rrggbb`）。
    pub light: &'static str,
}

/// 渲染完成的二维码结果。
#[derive(Debug, Clone)]
pub struct QrImagePayload {
    /// PNG 编码字节，用于导出与复制。
    pub png: Vec<u8>,
    /// 图像边长（像素，方形）。
    pub size_px: u32,
    /// 前端可直接展示的 `data:image/png;base64,` 地址。
    pub data_url: String,
}

/// 结果在 IPC 快照中的展示视图（不携带 PNG 字节）。
#[derive(Debug, Clone, Serialize)]
pub struct QrImageView {
    pub data_url: String,
    pub size_px: u32,
}

impl QrImagePayload {
    pub(crate) fn view(&self) -> QrImageView {
        QrImageView {
            data_url: self.data_url.clone(),
            size_px: self.size_px,
        }
    }
}
