//! # 编码器封装模块
//!
//! ## 设计思路
//!
//! 符号构造、纠错编码与模块矩阵布局（ISO/IEC 18004）全部委托给外部
//! `qrcode` crate，本模块只做两件事：
//! 1. 把前端的纠错等级字符串收敛为封闭枚举 `ErrorLevel`
//! 2. 把编码器错误统一映射为 `GeneratorError::Encode`
//!
//! 对任意文本与合法参数，编码实际上只会因超出符号容量而失败。

use qrcode::{EcLevel, QrCode};

use super::GeneratorError;

/// 纠错等级（可恢复损伤比例：L≈7%，M≈15%，Q≈25%，H≈30%）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl ErrorLevel {
    /// 从外部字符串解析纠错等级。
    pub fn from_str(level: &str) -> Result<Self, GeneratorError> {
        match level.trim().to_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(GeneratorError::UnknownLevel(format!(
                "{}（可选：L / M / Q / H）",
                other
            ))),
        }
    }

    /// 稳定标识符，供前端下拉框与快照使用。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }

    fn to_ec_level(self) -> EcLevel {
        match self {
            Self::L => EcLevel::L,
            Self::M => EcLevel::M,
            Self::Q => EcLevel::Q,
            Self::H => EcLevel::H,
        }
    }
}

/// 调用外部编码器生成模块矩阵。
///
/// 文本原样传入，不做任何预处理；版本号由编码器按容量自动选择。
pub(crate) fn encode(text: &str, level: ErrorLevel) -> Result<QrCode, GeneratorError> {
    QrCode::with_error_correction_level(text.as_bytes(), level.to_ec_level())
        .map_err(|e| GeneratorError::Encode(e.to_string()))
}
