//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `GeneratorConfig`，保证运行时行为可观测、
//! 可调整、可测试。配置只存在于内存中，不落盘、不读环境变量。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的参数：默认边长 256、静区 2 模块、
//!   尺寸范围 [128, 512]。
//! - 单次请求链路使用同一配置快照，避免处理中途配置漂移。

use image::imageops::FilterType;

/// 二维码生成配置。
///
/// 字段覆盖了尺寸钳制、渲染与剪贴板写入重试三个阶段。
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// 输出边长下限（像素）。
    pub min_size_px: u32,
    /// 输出边长上限（像素）。
    pub max_size_px: u32,
    /// 默认输出边长（像素）。
    pub default_size_px: u32,
    /// 静区宽度（模块数）。扫描可靠性要求的空白边框。
    pub quiet_zone_modules: u32,
    /// 精确缩放到目标边长时使用的回退滤镜。
    ///
    /// 模块矩阵先按整数倍放大，再缩放到精确边长；
    /// `Nearest` 保持模块边缘锐利。
    pub resize_filter: FilterType,
    /// 写入剪贴板失败时最大重试次数。
    pub clipboard_retries: u32,
    /// 首次重试间隔（毫秒），之后指数退避。
    pub clipboard_retry_delay: u64,
    /// 单次退避延迟上限（毫秒）。
    pub clipboard_retry_max_delay_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_size_px: 128,
            max_size_px: 512,
            default_size_px: 256,
            quiet_zone_modules: 2,
            resize_filter: FilterType::Nearest,
            clipboard_retries: 3,
            clipboard_retry_delay: 100,
            clipboard_retry_max_delay_ms: 900,
        }
    }
}

impl GeneratorConfig {
    /// 将请求边长钳制到 `[min_size_px, max_size_px]`。
    pub fn clamp_size(&self, size_px: u32) -> u32 {
        size_px.clamp(self.min_size_px, self.max_size_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_parameters() {
        let config = GeneratorConfig::default();
        assert_eq!(config.min_size_px, 128);
        assert_eq!(config.max_size_px, 512);
        assert_eq!(config.default_size_px, 256);
        assert_eq!(config.quiet_zone_modules, 2);
    }

    #[test]
    fn clamp_size_bounds_both_ends() {
        let config = GeneratorConfig::default();
        assert_eq!(config.clamp_size(0), 128);
        assert_eq!(config.clamp_size(127), 128);
        assert_eq!(config.clamp_size(256), 256);
        assert_eq!(config.clamp_size(513), 512);
        assert_eq!(config.clamp_size(u32::MAX), 512);
    }
}
