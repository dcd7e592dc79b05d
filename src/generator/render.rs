//! # 渲染流水线模块
//!
//! ## 设计思路
//!
//! 将“模块矩阵 → 像素 → PNG → Data URL”的过程集中管理：
//! 1. 解析调色板颜色
//! 2. 按整数倍放大绘制模块矩阵（含静区）
//! 3. 精确缩放到目标边长（最近邻，保持模块边缘锐利）
//! 4. PNG 编码并生成前端可展示的 Data URL
//!
//! ## 实现思路
//!
//! - 整数放大保证每个模块是整块色区；与目标边长的差值由
//!   `fast_image_resize` 最近邻缩放弥补，失败时回退 `image::resize_exact`。
//! - 输出恒为 `size_px × size_px` 的方形图像。

use base64::{Engine as _, engine::general_purpose};
use fast_image_resize as fr;
use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};
use once_cell::sync::Lazy;
use qrcode::QrCode;
use regex::Regex;
use std::time::Instant;

use super::model::{EncodeRequest, QrImagePayload};
use super::{GeneratorConfig, GeneratorError, encoder};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color regex"));

/// 解析 `#rrggbb` 颜色为不透明 RGBA 像素。
pub(crate) fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, GeneratorError> {
    if !HEX_COLOR.is_match(hex) {
        return Err(GeneratorError::InvalidColor(format!(
            "{}（需要 #rrggbb 格式）",
            hex
        )));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|e| GeneratorError::InvalidColor(format!("{}：{}", hex, e)))
    };

    Ok(Rgba([channel(1..3)?, channel(3..5)?, channel(5..7)?, 255]))
}

/// 计算模块的整数放大倍数（至少 1）。
fn module_scale(total_modules: u32, size_px: u32) -> u32 {
    (size_px / total_modules).max(1)
}

/// 将模块矩阵渲染为目标边长的 PNG 结果。
pub(crate) fn render(code: &QrCode, request: &EncodeRequest, config: &GeneratorConfig)
-> Result<QrImagePayload, GeneratorError> {
    let dark = parse_hex_color(request.dark)?;
    let light = parse_hex_color(request.light)?;

    let modules = code.width() as u32;
    let total = modules + 2 * config.quiet_zone_modules;
    let scale = module_scale(total, request.size_px);
    let canvas_px = total * scale;

    let mut canvas = RgbaImage::from_pixel(canvas_px, canvas_px, light);
    let colors = code.to_colors();
    for (index, color) in colors.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let mx = (index as u32) % modules + config.quiet_zone_modules;
        let my = (index as u32) / modules + config.quiet_zone_modules;
        for dy in 0..scale {
            for dx in 0..scale {
                canvas.put_pixel(mx * scale + dx, my * scale + dy, dark);
            }
        }
    }

    let exact = if canvas_px == request.size_px {
        canvas
    } else {
        resize_exact(canvas, request.size_px, config)?
    };

    let png = encode_png(&exact)?;
    let data_url = format!("data:image/png;base64,{}", general_purpose::STANDARD.encode(&png));

    Ok(QrImagePayload {
        png,
        size_px: request.size_px,
        data_url,
    })
}

/// 精确缩放到目标边长。优先 `fast_image_resize`，失败回退 `image`。
fn resize_exact(canvas: RgbaImage, size_px: u32, config: &GeneratorConfig)
-> Result<RgbaImage, GeneratorError> {
    let (src_width, src_height) = canvas.dimensions();

    let src_image = match fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        canvas.clone().into_raw(),
        fr::PixelType::U8x4,
    ) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("⚠️ fast_image_resize 构建源缓冲失败，回退 image::resize_exact：{}", e);
            return Ok(fallback_resize(canvas, size_px, config));
        }
    };

    let mut dst_image = fr::images::Image::new(size_px, size_px, fr::PixelType::U8x4);
    let options = fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Nearest);

    if let Err(e) = fr::Resizer::new().resize(&src_image, &mut dst_image, Some(&options)) {
        log::warn!("⚠️ fast_image_resize 执行失败，回退 image::resize_exact：{}", e);
        return Ok(fallback_resize(canvas, size_px, config));
    }

    ImageBuffer::from_raw(size_px, size_px, dst_image.into_vec())
        .ok_or_else(|| GeneratorError::Render("缩放输出缓冲长度异常".to_string()))
}

fn fallback_resize(canvas: RgbaImage, size_px: u32, config: &GeneratorConfig) -> RgbaImage {
    DynamicImage::ImageRgba8(canvas)
        .resize_exact(size_px, size_px, config.resize_filter)
        .to_rgba8()
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, GeneratorError> {
    use image::ImageEncoder;
    use image::codecs::png::PngEncoder;

    let mut bytes = Vec::new();
    let encoder = PngEncoder::new(&mut bytes);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| GeneratorError::Render(format!("PNG 编码失败：{}", e)))?;
    Ok(bytes)
}

/// 执行完整生成链路：编码 → 渲染。
///
/// CPU 密集阶段放到阻塞线程池执行，调用方（服务层）保持非阻塞。
/// 记录 `encode/render/total` 阶段耗时，便于性能诊断。
pub async fn generate_payload(
    request: EncodeRequest,
    config: GeneratorConfig,
) -> Result<QrImagePayload, GeneratorError> {
    tokio::task::spawn_blocking(move || {
        let started = Instant::now();

        let code = encoder::encode(&request.text, request.error_level)?;
        let encode_elapsed = started.elapsed();

        let render_started = Instant::now();
        let payload = render(&code, &request, &config)?;
        let render_elapsed = render_started.elapsed();

        log::info!(
            "✅ 二维码生成完成 - seq={} 边长={}px 等级={} 耗时 encode={}ms render={}ms total={}ms",
            request.seq,
            request.size_px,
            request.error_level.as_str(),
            encode_elapsed.as_millis(),
            render_elapsed.as_millis(),
            started.elapsed().as_millis()
        );

        Ok(payload)
    })
    .await
    .map_err(|e| GeneratorError::State(format!("线程执行失败：{}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::encoder::ErrorLevel;

    fn request(size_px: u32, dark: &'static str, light: &'static str) -> EncodeRequest {
        EncodeRequest {
            seq: 1,
            text: "https://example.com".to_string(),
            size_px,
            error_level: ErrorLevel::M,
            dark,
            light,
        }
    }

    #[test]
    fn parse_hex_color_accepts_palette_values() {
        assert_eq!(parse_hex_color("#000000").unwrap(), Rgba([0, 0, 0, 255]));
        assert_eq!(
            parse_hex_color("#0077be").unwrap(),
            Rgba([0x00, 0x77, 0xbe, 255])
        );
    }

    #[test]
    fn parse_hex_color_rejects_malformed_input() {
        for bad in ["000000", "#fff", "#gg0000", "#0077be00", ""] {
            assert!(matches!(
                parse_hex_color(bad),
                Err(GeneratorError::InvalidColor(_))
            ));
        }
    }

    #[test]
    fn module_scale_never_below_one() {
        assert_eq!(module_scale(29, 256), 8);
        assert_eq!(module_scale(181, 128), 1);
        assert_eq!(module_scale(29, 512), 17);
    }

    #[test]
    fn render_outputs_exact_square_dimensions() {
        let config = GeneratorConfig::default();
        let code = encoder::encode("https://example.com", ErrorLevel::M).unwrap();

        for size in [128, 256, 512] {
            let payload = render(&code, &request(size, "#000000", "#ffffff"), &config).unwrap();
            assert_eq!(payload.size_px, size);

            let decoded = image::load_from_memory(&payload.png).unwrap();
            assert_eq!(decoded.width(), size);
            assert_eq!(decoded.height(), size);
        }
    }

    #[test]
    fn quiet_zone_corner_uses_light_color() {
        let config = GeneratorConfig::default();
        let code = encoder::encode("hello", ErrorLevel::M).unwrap();
        let payload = render(&code, &request(256, "#0077be", "#e6f3ff"), &config).unwrap();

        let decoded = image::load_from_memory(&payload.png).unwrap().to_rgba8();
        assert_eq!(*decoded.get_pixel(0, 0), Rgba([0xe6, 0xf3, 0xff, 255]));
    }

    #[test]
    fn render_contains_both_palette_colors() {
        let config = GeneratorConfig::default();
        let code = encoder::encode("hello", ErrorLevel::M).unwrap();
        let payload = render(&code, &request(256, "#2d5a27", "#f0f8ff"), &config).unwrap();

        let decoded = image::load_from_memory(&payload.png).unwrap().to_rgba8();
        let dark = Rgba([0x2d, 0x5a, 0x27, 255]);
        let light = Rgba([0xf0, 0xf8, 0xff, 255]);
        assert!(decoded.pixels().any(|p| *p == dark));
        assert!(decoded.pixels().any(|p| *p == light));
        // 最近邻缩放不产生中间色
        assert!(decoded.pixels().all(|p| *p == dark || *p == light));
    }

    #[test]
    fn data_url_has_png_prefix() {
        let config = GeneratorConfig::default();
        let code = encoder::encode("hello", ErrorLevel::M).unwrap();
        let payload = render(&code, &request(128, "#000000", "#ffffff"), &config).unwrap();
        assert!(payload.data_url.starts_with("data:image/png;base64,"));
    }
}
