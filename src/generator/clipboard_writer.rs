//! # 剪贴板写入模块
//!
//! 将当前二维码结果写入系统剪贴板。剪贴板在部分平台上可能被
//! 其他进程短暂占用，因此写入带有限次指数退避重试。

use std::borrow::Cow;
use std::time::Duration;

use super::model::QrImagePayload;
use super::{GeneratorConfig, GeneratorError};

/// 计算第 `attempt` 次重试前的退避延迟（指数增长，封顶）。
fn backoff_delay_ms(base_delay_ms: u64, attempt: u32, max_delay_ms: u64) -> u64 {
    let exp = 1_u64 << attempt.saturating_sub(1).min(6);
    base_delay_ms.saturating_mul(exp).min(max_delay_ms)
}

/// 将 PNG 结果解码并写入系统剪贴板（含重试）。
pub(crate) async fn copy_to_clipboard(
    payload: QrImagePayload,
    config: &GeneratorConfig,
) -> Result<(), GeneratorError> {
    log::debug!("📋 准备复制二维码到剪贴板 - {}px", payload.size_px);

    let retries = config.clipboard_retries;
    let retry_delay = config.clipboard_retry_delay;
    let max_delay_ms = config.clipboard_retry_max_delay_ms;

    tokio::task::spawn_blocking(move || {
        let decoded = image::load_from_memory(&payload.png)
            .map_err(|e| GeneratorError::Clipboard(format!("结果解码失败：{}", e)))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        let bytes = decoded.into_raw();

        write_with_retry(width as usize, height as usize, &bytes, retries, retry_delay, max_delay_ms)
    })
    .await
    .map_err(|e| GeneratorError::Clipboard(format!("线程执行失败：{}", e)))?
}

/// 在阻塞线程中执行写入 + 重试。
fn write_with_retry(
    width: usize,
    height: usize,
    bytes: &[u8],
    retries: u32,
    retry_delay: u64,
    max_delay_ms: u64,
) -> Result<(), GeneratorError> {
    let retry_count = retries.max(1);
    let mut last_error = None;

    for attempt in 1..=retry_count {
        if attempt > 1 {
            let wait_ms = backoff_delay_ms(retry_delay.max(1), attempt - 1, max_delay_ms);
            log::debug!("🔄 剪贴板重试 {}/{}，等待 {}ms", attempt, retry_count, wait_ms);
            std::thread::sleep(Duration::from_millis(wait_ms));
        }

        match try_write(width, height, bytes) {
            Ok(()) => {
                log::info!("✅ 二维码已复制到剪贴板 (尝试 {})", attempt);
                return Ok(());
            }
            Err(err) => {
                log::warn!("⚠️ 剪贴板写入失败 (尝试 {}/{}): {}", attempt, retry_count, err);
                last_error = Some(err);
            }
        }
    }

    Err(GeneratorError::Clipboard(
        last_error.unwrap_or_else(|| "未知错误".to_string()),
    ))
}

fn try_write(width: usize, height: usize, bytes: &[u8]) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
    clipboard
        .set_image(arboard::ImageData {
            width,
            height,
            bytes: Cow::Borrowed(bytes),
        })
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_exponentially_until_cap() {
        assert_eq!(backoff_delay_ms(100, 1, 900), 100);
        assert_eq!(backoff_delay_ms(100, 2, 900), 200);
        assert_eq!(backoff_delay_ms(100, 3, 900), 400);
        assert_eq!(backoff_delay_ms(100, 4, 900), 800);
        assert_eq!(backoff_delay_ms(100, 5, 900), 900);
        assert_eq!(backoff_delay_ms(100, 60, 900), 900);
    }
}
