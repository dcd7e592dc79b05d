//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载二维码生成链路中的所有错误来源，
//! 避免字符串拼接式错误处理。通过 `thiserror` 保持人类可读错误，
//! 同时让调用侧可按分支匹配。

/// 二维码生成统一错误类型。
///
/// 该类型会在命令层被上转为 `AppError`，最终透传给前端。
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// 外部编码器拒绝了本次请求（例如文本超出符号容量）。
    #[error("编码失败：{0}")]
    Encode(String),

    #[error("渲染失败：{0}")]
    Render(String),

    #[error("颜色格式错误：{0}")]
    InvalidColor(String),

    #[error("未知样式：{0}")]
    UnknownStyle(String),

    #[error("未知纠错等级：{0}")]
    UnknownLevel(String),

    #[error("剪贴板错误：{0}")]
    Clipboard(String),

    /// 导出/复制时当前状态不是 Ready。
    #[error("当前没有可用的二维码结果")]
    NoResult,

    #[error("状态错误：{0}")]
    State(String),
}

impl From<GeneratorError> for String {
    /// 兼容部分仍使用字符串错误的调用点。
    fn from(error: GeneratorError) -> Self {
        error.to_string()
    }
}
