//! # 服务层（可注入状态）
//!
//! ## 设计思路
//!
//! 使用 `GeneratorServiceState` 作为 Tauri 注入状态，持有纯状态机
//! `GeneratorController` 并负责全部副作用：调度编码任务、应用或丢弃
//! 完成结果、向前端推送状态变化事件。
//!
//! 好处：
//! 1. 生命周期清晰（由 `main.rs` 统一管理）
//! 2. 状态机保持纯净，测试可脱离 Tauri 独立构造实例
//! 3. 后续可扩展多窗口或按会话配置
//!
//! ## 实现思路
//!
//! - 控制器锁只在状态转换期间持有，绝不跨越编码调用。
//! - 编码失败静默处理：记录日志、回到 Idle，
//!   不向前端返回错误（导出/复制等显式操作除外）。
//! - 每次状态转换后通过 `qr-state-changed` 事件推送快照。

use std::sync::{Mutex, RwLock};

use tauri::{AppHandle, Emitter};

use super::controller::{CompletionOutcome, GeneratorController, GeneratorSnapshot, TextTransition};
use super::encoder::ErrorLevel;
use super::model::QrImagePayload;
use super::style::StylePalette;
use super::{GeneratorConfig, GeneratorError, clipboard_writer, render};

/// 状态变化事件名。载荷为 [`GeneratorSnapshot`]。
pub const QR_STATE_EVENT: &str = "qr-state-changed";

/// 二维码生成服务状态。
///
/// 作为 Tauri `State` 注入到命令层，内部持有生成控制器。
pub struct GeneratorServiceState {
    controller: Mutex<GeneratorController>,
    config: RwLock<GeneratorConfig>,
}

impl GeneratorServiceState {
    /// 使用默认配置创建服务状态。
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// 使用自定义配置创建服务状态。主要用于测试。
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            controller: Mutex::new(GeneratorController::new(config.clone())),
            config: RwLock::new(config),
        }
    }

    /// 获取配置快照，保证单次请求链路使用一致参数。
    fn config_snapshot(&self) -> Result<GeneratorConfig, GeneratorError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| GeneratorError::State("配置读取锁已中毒".to_string()))
    }

    fn lock_controller(&self) -> Result<std::sync::MutexGuard<'_, GeneratorController>, GeneratorError> {
        self.controller
            .lock()
            .map_err(|_| GeneratorError::State("控制器锁已中毒".to_string()))
    }

    /// 应用新的输入文本，必要时调度一次生成。
    ///
    /// 文本变化是唯一的重新生成触发源。编码失败不返回错误
    /// （记录日志并回到 Idle）；返回的 `Err` 仅表示内部状态异常。
    pub async fn apply_text(&self, app: &AppHandle, text: String) -> Result<(), GeneratorError> {
        let (transition, snapshot) = {
            let mut controller = self.lock_controller()?;
            let transition = controller.set_text(&text);
            (transition, controller.snapshot())
        };

        let request = match transition {
            TextTransition::NoChange => return Ok(()),
            TextTransition::ClearedToIdle => {
                emit_state(app, &snapshot);
                return Ok(());
            }
            TextTransition::Issued(request) => {
                emit_state(app, &snapshot);
                request
            }
        };

        let seq = request.seq;
        let config = self.config_snapshot()?;

        match render::generate_payload(request, config).await {
            Ok(payload) => self.apply_completion(app, seq, payload),
            Err(err) => {
                // 失败静默处理：只记录日志，不向用户暴露错误
                log::error!("❌ 二维码生成失败 (seq={})，回到空闲状态: {}", seq, err);
                self.apply_failure(app, seq)
            }
        }
    }

    fn apply_completion(
        &self,
        app: &AppHandle,
        seq: u64,
        payload: QrImagePayload,
    ) -> Result<(), GeneratorError> {
        let mut controller = self.lock_controller()?;
        match controller.complete(seq, payload) {
            CompletionOutcome::Applied => {
                emit_state(app, &controller.snapshot());
            }
            CompletionOutcome::Stale => {
                log::debug!("⏭️ 忽略过期生成结果 (seq={})", seq);
            }
        }
        Ok(())
    }

    fn apply_failure(&self, app: &AppHandle, seq: u64) -> Result<(), GeneratorError> {
        let mut controller = self.lock_controller()?;
        match controller.fail(seq) {
            CompletionOutcome::Applied => {
                emit_state(app, &controller.snapshot());
            }
            CompletionOutcome::Stale => {
                log::debug!("⏭️ 忽略过期失败回调 (seq={})", seq);
            }
        }
        Ok(())
    }

    /// 切换样式，仅对下一次请求生效。
    pub fn set_style(&self, style: &str) -> Result<(), GeneratorError> {
        let palette = StylePalette::from_str(style)?;
        self.lock_controller()?.set_style(palette);
        Ok(())
    }

    /// 更新输出边长，返回钳制后的实际值。
    pub fn set_size(&self, size_px: u32) -> Result<u32, GeneratorError> {
        Ok(self.lock_controller()?.set_size(size_px))
    }

    /// 切换纠错等级，仅对下一次请求生效。
    pub fn set_error_level(&self, level: &str) -> Result<(), GeneratorError> {
        let level = ErrorLevel::from_str(level)?;
        self.lock_controller()?.set_error_level(level);
        Ok(())
    }

    /// 清除结果并恢复默认参数；当前文本保持不变。
    pub fn reset(&self, app: &AppHandle) -> Result<(), GeneratorError> {
        let mut controller = self.lock_controller()?;
        controller.reset();
        emit_state(app, &controller.snapshot());
        Ok(())
    }

    /// 当前控制器快照，供前端初始化与状态查询。
    pub fn snapshot(&self) -> Result<GeneratorSnapshot, GeneratorError> {
        Ok(self.lock_controller()?.snapshot())
    }

    /// Ready 状态下的结果副本；其余状态返回 [`GeneratorError::NoResult`]。
    pub fn current_payload(&self) -> Result<QrImagePayload, GeneratorError> {
        self.lock_controller()?
            .payload()
            .cloned()
            .ok_or(GeneratorError::NoResult)
    }

    /// 将当前结果复制到系统剪贴板。
    pub async fn copy_current_to_clipboard(&self) -> Result<(), GeneratorError> {
        let payload = self.current_payload()?;
        let config = self.config_snapshot()?;
        clipboard_writer::copy_to_clipboard(payload, &config).await
    }
}

impl Default for GeneratorServiceState {
    fn default() -> Self {
        Self::new()
    }
}

fn emit_state(app: &AppHandle, snapshot: &GeneratorSnapshot) {
    if let Err(err) = app.emit(QR_STATE_EVENT, snapshot) {
        log::warn!("发送状态变化事件失败: {}", err);
    }
}
