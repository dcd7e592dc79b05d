//! 结果导出模块
//!
//! # 设计思路
//!
//! 统一管理二维码结果的落盘路径：优先使用前端保存对话框选定的目录，
//! 未选定时回退到系统下载目录，并在目录不存在时自动创建。
//!
//! # 实现思路
//!
//! - 导出文件名固定为 `qr-code.png`。
//! - 目录不存在时自动 `create_dir_all`，避免上层判断。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::fs;
use std::path::{Path, PathBuf};

use tauri::{AppHandle, Manager};

use crate::error::AppError;

/// 导出文件名（固定）。
pub const QR_EXPORT_FILE_NAME: &str = "qr-code.png";

/// 解析导出目录
///
/// # 参数
/// * `app` - Tauri 应用句柄，用于获取系统下载目录
/// * `custom_dir` - 前端对话框选定的目录（可选）
///
/// # 返回
/// - `Ok(PathBuf)` — 可用的导出目录
/// - `Err(AppError::Storage)` — 无法获取或创建目录
pub fn resolve_export_dir(app: &AppHandle, custom_dir: Option<String>) -> Result<PathBuf, AppError> {
    // 优先使用前端选定的目录
    if let Some(dir) = custom_dir {
        if !dir.is_empty() {
            let path = PathBuf::from(&dir);
            if !path.exists() {
                fs::create_dir_all(&path).map_err(|e| {
                    AppError::Storage(format!("创建导出目录 '{}' 失败: {}", dir, e))
                })?;
            }
            return Ok(path);
        }
    }

    // 回退到系统下载目录
    let download_dir = app
        .path()
        .download_dir()
        .map_err(|e| AppError::Storage(format!("获取下载目录失败: {}", e)))?;
    if !download_dir.exists() {
        fs::create_dir_all(&download_dir)
            .map_err(|e| AppError::Storage(format!("创建下载目录失败: {}", e)))?;
    }
    Ok(download_dir)
}

/// 导出文件完整路径。
fn export_file_path(dir: &Path) -> PathBuf {
    dir.join(QR_EXPORT_FILE_NAME)
}

/// 将 PNG 字节写入导出目录，返回写入的文件路径。
pub fn save_qr_png(
    app: &AppHandle,
    custom_dir: Option<String>,
    png: &[u8],
) -> Result<String, AppError> {
    let dir = resolve_export_dir(app, custom_dir)?;
    let file_path = export_file_path(&dir);

    fs::write(&file_path, png)?;
    log::info!("💾 二维码已导出: {}", file_path.display());

    Ok(file_path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_path_uses_fixed_file_name() {
        let path = export_file_path(Path::new("/tmp/some-dir"));
        assert_eq!(path.file_name().unwrap(), "qr-code.png");
    }
}
