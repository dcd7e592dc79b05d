//! # 样式调色板模块
//!
//! ## 设计思路
//!
//! 将 8 套固定配色建模为封闭枚举 + 关联查表，而不是可变列表：
//! 任意时刻恰好有一个样式被选中，非法样式在解析阶段即被拒绝。
//!
//! ## 实现思路
//!
//! - 枚举变体与 `ALL` 表一一对应，新增样式只需同步两处。
//! - 颜色以 `#rrggbb` 字面量存储，渲染层负责解析为像素值。
//! - `from_str` / `as_str` 提供与前端交换用的稳定标识符。

use serde::Serialize;

use super::GeneratorError;

/// 二维码配色样式（深色模块色 + 浅色模块色）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StylePalette {
    #[default]
    Classic,
    Ocean,
    Forest,
    Sunset,
    Purple,
    Pink,
    DarkMode,
    Gold,
}

/// 全部样式，按前端选择器展示顺序排列。首位为默认样式。
pub const ALL_STYLES: [StylePalette; 8] = [
    StylePalette::Classic,
    StylePalette::Ocean,
    StylePalette::Forest,
    StylePalette::Sunset,
    StylePalette::Purple,
    StylePalette::Pink,
    StylePalette::DarkMode,
    StylePalette::Gold,
];

/// 样式在 IPC 列表中的展示条目。
#[derive(Debug, Clone, Serialize)]
pub struct StyleInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub dark: &'static str,
    pub light: &'static str,
}

impl StylePalette {
    /// 从外部字符串解析样式标识。
    pub fn from_str(style: &str) -> Result<Self, GeneratorError> {
        match style.trim().to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "ocean" => Ok(Self::Ocean),
            "forest" => Ok(Self::Forest),
            "sunset" => Ok(Self::Sunset),
            "purple" => Ok(Self::Purple),
            "pink" => Ok(Self::Pink),
            "dark-mode" => Ok(Self::DarkMode),
            "gold" => Ok(Self::Gold),
            other => Err(GeneratorError::UnknownStyle(format!(
                "{}（可选：classic / ocean / forest / sunset / purple / pink / dark-mode / gold）",
                other
            ))),
        }
    }

    /// 稳定标识符，供前端选择器与快照使用。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
            Self::Sunset => "sunset",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::DarkMode => "dark-mode",
            Self::Gold => "gold",
        }
    }

    /// 展示名称。
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Ocean => "Ocean",
            Self::Forest => "Forest",
            Self::Sunset => "Sunset",
            Self::Purple => "Purple",
            Self::Pink => "Pink",
            Self::DarkMode => "Dark Mode",
            Self::Gold => "Gold",
        }
    }

    /// 深色模块颜色（`#rrggbb`）。
    pub fn dark(self) -> &'static str {
        match self {
            Self::Classic => "#000000",
            Self::Ocean => "#0077be",
            Self::Forest => "#2d5a27",
            Self::Sunset => "#ff6b35",
            Self::Purple => "#6366f1",
            Self::Pink => "#ec4899",
            Self::DarkMode => "#ffffff",
            Self::Gold => "#d4af37",
        }
    }

    /// 浅色模块颜色（`#rrggbb`）。
    pub fn light(self) -> &'static str {
        match self {
            Self::Classic => "#ffffff",
            Self::Ocean => "#e6f3ff",
            Self::Forest => "#f0f8ff",
            Self::Sunset => "#fff5f0",
            Self::Purple => "#f0f0ff",
            Self::Pink => "#fdf2f8",
            Self::DarkMode => "#1a1a1a",
            Self::Gold => "#fffbf0",
        }
    }

    pub fn info(self) -> StyleInfo {
        StyleInfo {
            id: self.as_str(),
            name: self.display_name(),
            dark: self.dark(),
            light: self.light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_first_palette_entry() {
        assert_eq!(StylePalette::default(), ALL_STYLES[0]);
        assert_eq!(StylePalette::default(), StylePalette::Classic);
    }

    #[test]
    fn roundtrip_all_identifiers() {
        for style in ALL_STYLES {
            assert_eq!(StylePalette::from_str(style.as_str()).unwrap(), style);
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(
            StylePalette::from_str("  Dark-Mode ").unwrap(),
            StylePalette::DarkMode
        );
    }

    #[test]
    fn unknown_style_is_rejected() {
        assert!(matches!(
            StylePalette::from_str("rainbow"),
            Err(GeneratorError::UnknownStyle(_))
        ));
    }

    #[test]
    fn all_color_pairs_are_distinct() {
        for (i, a) in ALL_STYLES.iter().enumerate() {
            for b in &ALL_STYLES[i + 1..] {
                assert!(a.dark() != b.dark() || a.light() != b.light());
            }
        }
    }
}
