//! # Tauri 命令层
//!
//! ## 设计思路
//!
//! 命令层仅做 IPC 参数接收与结果返回，不承载业务逻辑。
//! 所有实际处理交由 `GeneratorServiceState`，保持命令函数薄、稳定、易测试。

use tauri::{AppHandle, State};

use super::service::GeneratorServiceState;
use super::style::{ALL_STYLES, StyleInfo};
use crate::error::AppError;
use crate::export;

/// 更新输入文本；非空白文本会触发一次新的生成。
#[tauri::command]
pub async fn set_qr_text(
    state: State<'_, GeneratorServiceState>,
    app: AppHandle,
    text: String,
) -> Result<(), AppError> {
    state.apply_text(&app, text).await?;
    Ok(())
}

/// 切换配色样式（仅对下一次生成生效）。
#[tauri::command]
pub fn set_qr_style(state: State<'_, GeneratorServiceState>, style: String) -> Result<(), AppError> {
    state.set_style(&style)?;
    Ok(())
}

/// 更新输出边长，返回钳制到 [128, 512] 后的实际值。
#[tauri::command]
pub fn set_qr_size(state: State<'_, GeneratorServiceState>, size_px: u32) -> Result<u32, AppError> {
    Ok(state.set_size(size_px)?)
}

/// 切换纠错等级（仅对下一次生成生效）。
#[tauri::command]
pub fn set_qr_error_level(
    state: State<'_, GeneratorServiceState>,
    level: String,
) -> Result<(), AppError> {
    state.set_error_level(&level)?;
    Ok(())
}

/// 清除结果并恢复默认参数；输入文本保持不变。
#[tauri::command]
pub fn reset_generator(state: State<'_, GeneratorServiceState>, app: AppHandle) -> Result<(), AppError> {
    state.reset(&app)?;
    Ok(())
}

/// 查询控制器当前快照（状态 + 参数 + 结果视图）。
#[tauri::command]
pub fn get_generator_snapshot(
    state: State<'_, GeneratorServiceState>,
) -> Result<super::GeneratorSnapshot, AppError> {
    Ok(state.snapshot()?)
}

/// 列出全部可选样式，供前端选择器渲染。
#[tauri::command]
pub fn list_qr_styles() -> Vec<StyleInfo> {
    ALL_STYLES.iter().map(|style| style.info()).collect()
}

/// 将当前结果导出为 `qr-code.png`，返回写入的文件路径。
#[tauri::command]
pub fn export_qr_png(
    state: State<'_, GeneratorServiceState>,
    app: AppHandle,
    target_dir: Option<String>,
) -> Result<String, AppError> {
    let payload = state.current_payload()?;
    export::save_qr_png(&app, target_dir, &payload.png)
}

/// 将当前结果复制到系统剪贴板。
#[tauri::command]
pub async fn copy_qr_to_clipboard(state: State<'_, GeneratorServiceState>) -> Result<(), AppError> {
    state.copy_current_to_clipboard().await?;
    Ok(())
}
