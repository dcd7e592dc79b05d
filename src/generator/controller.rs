//! # 生成控制器模块
//!
//! ## 设计思路
//!
//! 将“文本 + 样式 + 尺寸 + 纠错等级 → 展示状态”的全部行为收敛为
//! 一个显式有限状态机：`Idle →（文本变化）→ Pending →（编码完成）→
//! Ready →（文本清空）→ Idle`。状态机本身是纯的：不发 IPC、不碰
//! 编码器、不依赖运行时，所有转换都返回决策值由服务层执行副作用，
//! 因此可以脱离任何渲染框架单独测试。
//!
//! ## 实现思路
//!
//! - 每个发出的请求携带单调递增序号 `seq`，完成回调只在“状态仍是
//!   Pending 且序号匹配”时生效，乱序到达的过期结果直接丢弃。
//!   由此保证：每个最新输入至多应用一个结果。
//! - 文本置空：清除结果并回到 Idle，不发出新请求。
//! - 样式/尺寸/等级只更新“下一次请求”的参数，不触发重新生成
//!   （见 DESIGN.md 的已知问题记录）。
//! - `reset`：结果清空、参数回到默认值，当前文本保持不变。

use super::encoder::ErrorLevel;
use super::model::{EncodeRequest, QrImagePayload, QrImageView};
use super::style::StylePalette;
use super::GeneratorConfig;

/// 展示状态机的三个状态。
#[derive(Debug, Clone)]
pub enum GeneratorState {
    /// 无文本，或被显式重置。
    Idle,
    /// 已向编码器发出请求，结果尚未就绪。
    Pending { seq: u64 },
    /// 结果可展示。
    Ready { payload: QrImagePayload },
}

impl GeneratorState {
    /// IPC 快照中的状态标识。
    pub fn as_status_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending { .. } => "pending",
            Self::Ready { .. } => "ready",
        }
    }
}

/// `set_text` 的转换决策，由服务层据此执行副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTransition {
    /// 文本与当前值相同，无事发生。
    NoChange,
    /// 文本为空白，结果已清除并回到 Idle。
    ClearedToIdle,
    /// 已进入 Pending，需要把该请求交给编码器。
    Issued(EncodeRequest),
}

/// 完成/失败回调的判定结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// 回调对应最新请求，状态已转换。
    Applied,
    /// 回调已被更新的输入取代（或状态已离开 Pending），结果被丢弃。
    Stale,
}

/// 控制器当前状态的可序列化视图，用于 IPC 查询与状态变化事件。
#[derive(Debug, Clone, serde::Serialize)]
pub struct GeneratorSnapshot {
    /// `idle` / `pending` / `ready`。
    pub status: &'static str,
    /// 最近一次发出的请求序号。
    pub seq: u64,
    pub text: String,
    pub style: &'static str,
    pub size_px: u32,
    pub error_level: &'static str,
    /// Ready 状态下的结果视图，其余状态为 `None`。
    pub image: Option<QrImageView>,
}

/// 生成控制器：持有当前文本、参数选择与状态机。
#[derive(Debug)]
pub struct GeneratorController {
    config: GeneratorConfig,
    text: String,
    style: StylePalette,
    size_px: u32,
    error_level: ErrorLevel,
    /// 最近一次发出的请求序号，0 表示尚未发出任何请求。
    seq: u64,
    state: GeneratorState,
}

impl GeneratorController {
    pub fn new(config: GeneratorConfig) -> Self {
        let size_px = config.default_size_px;
        Self {
            config,
            text: String::new(),
            style: StylePalette::default(),
            size_px,
            error_level: ErrorLevel::default(),
            seq: 0,
            state: GeneratorState::Idle,
        }
    }

    /// 更新当前文本并决定后续动作。
    ///
    /// 文本变化是唯一的重新生成触发源。空白文本（trim 后为空）
    /// 清除结果并回到 Idle，不发出编码请求。
    pub fn set_text(&mut self, text: &str) -> TextTransition {
        if text == self.text {
            return TextTransition::NoChange;
        }
        self.text = text.to_string();

        if self.text.trim().is_empty() {
            self.state = GeneratorState::Idle;
            return TextTransition::ClearedToIdle;
        }

        TextTransition::Issued(self.issue_request())
    }

    /// 更新样式，仅对下一次请求生效。
    pub fn set_style(&mut self, style: StylePalette) {
        self.style = style;
    }

    /// 更新输出边长（自动钳制到配置范围），仅对下一次请求生效。
    pub fn set_size(&mut self, size_px: u32) -> u32 {
        self.size_px = self.config.clamp_size(size_px);
        self.size_px
    }

    /// 更新纠错等级，仅对下一次请求生效。
    pub fn set_error_level(&mut self, level: ErrorLevel) {
        self.error_level = level;
    }

    /// 清除结果并恢复默认参数；当前文本保持不变。
    pub fn reset(&mut self) {
        self.style = StylePalette::default();
        self.size_px = self.config.default_size_px;
        self.error_level = ErrorLevel::default();
        self.state = GeneratorState::Idle;
    }

    /// 编码成功回调。仅当 `seq` 仍是最新 Pending 请求时应用结果。
    pub fn complete(&mut self, seq: u64, payload: QrImagePayload) -> CompletionOutcome {
        match &self.state {
            GeneratorState::Pending { seq: pending } if *pending == seq => {
                self.state = GeneratorState::Ready { payload };
                CompletionOutcome::Applied
            }
            _ => CompletionOutcome::Stale,
        }
    }

    /// 编码失败回调。仅当 `seq` 仍是最新 Pending 请求时回到 Idle。
    pub fn fail(&mut self, seq: u64) -> CompletionOutcome {
        match &self.state {
            GeneratorState::Pending { seq: pending } if *pending == seq => {
                self.state = GeneratorState::Idle;
                CompletionOutcome::Applied
            }
            _ => CompletionOutcome::Stale,
        }
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    /// Ready 状态下的结果，否则 `None`。
    pub fn payload(&self) -> Option<&QrImagePayload> {
        match &self.state {
            GeneratorState::Ready { payload } => Some(payload),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> GeneratorSnapshot {
        GeneratorSnapshot {
            status: self.state.as_status_str(),
            seq: self.seq,
            text: self.text.clone(),
            style: self.style.as_str(),
            size_px: self.size_px,
            error_level: self.error_level.as_str(),
            image: self.payload().map(QrImagePayload::view),
        }
    }

    /// 以当前参数构造不可变请求快照并进入 Pending。
    fn issue_request(&mut self) -> EncodeRequest {
        self.seq += 1;
        self.state = GeneratorState::Pending { seq: self.seq };
        EncodeRequest {
            seq: self.seq,
            text: self.text.clone(),
            size_px: self.size_px,
            error_level: self.error_level,
            dark: self.style.dark(),
            light: self.style.light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> GeneratorController {
        GeneratorController::new(GeneratorConfig::default())
    }

    fn dummy_payload(size_px: u32, tag: &str) -> QrImagePayload {
        QrImagePayload {
            png: tag.as_bytes().to_vec(),
            size_px,
            data_url: format!("data:image/png;base64,{tag}"),
        }
    }

    #[test]
    fn starts_idle_with_defaults() {
        let c = controller();
        let snap = c.snapshot();
        assert_eq!(snap.status, "idle");
        assert_eq!(snap.style, "classic");
        assert_eq!(snap.size_px, 256);
        assert_eq!(snap.error_level, "M");
        assert!(snap.image.is_none());
    }

    #[test]
    fn text_change_issues_request_with_current_parameters() {
        let mut c = controller();
        c.set_style(StylePalette::Ocean);
        c.set_size(300);
        c.set_error_level(ErrorLevel::H);

        let TextTransition::Issued(request) = c.set_text("hello") else {
            panic!("expected request");
        };
        assert_eq!(request.seq, 1);
        assert_eq!(request.text, "hello");
        assert_eq!(request.size_px, 300);
        assert_eq!(request.error_level, ErrorLevel::H);
        assert_eq!(request.dark, "#0077be");
        assert_eq!(request.light, "#e6f3ff");
        assert_eq!(c.snapshot().status, "pending");
    }

    #[test]
    fn unchanged_text_does_not_reissue() {
        let mut c = controller();
        assert!(matches!(c.set_text("hello"), TextTransition::Issued(_)));
        assert_eq!(c.set_text("hello"), TextTransition::NoChange);
        assert_eq!(c.snapshot().seq, 1);
    }

    #[test]
    fn blank_text_clears_result_from_any_state() {
        let mut c = controller();
        let TextTransition::Issued(request) = c.set_text("hello") else {
            panic!("expected request");
        };
        assert_eq!(
            c.complete(request.seq, dummy_payload(256, "a")),
            CompletionOutcome::Applied
        );
        assert_eq!(c.snapshot().status, "ready");

        assert_eq!(c.set_text("   \t"), TextTransition::ClearedToIdle);
        assert_eq!(c.snapshot().status, "idle");
        assert!(c.payload().is_none());
    }

    #[test]
    fn parameter_changes_alone_do_not_retrigger() {
        // 只有文本变化触发重新生成
        let mut c = controller();
        let TextTransition::Issued(request) = c.set_text("hello") else {
            panic!("expected request");
        };
        c.complete(request.seq, dummy_payload(256, "a"));

        c.set_style(StylePalette::Gold);
        c.set_size(512);
        c.set_error_level(ErrorLevel::L);

        assert_eq!(c.snapshot().status, "ready");
        assert_eq!(c.snapshot().seq, 1);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut c = controller();
        let TextTransition::Issued(first) = c.set_text("T1") else {
            panic!("expected request");
        };
        let TextTransition::Issued(second) = c.set_text("T2") else {
            panic!("expected request");
        };

        // T1 的结果乱序先到：丢弃
        assert_eq!(
            c.complete(first.seq, dummy_payload(256, "t1")),
            CompletionOutcome::Stale
        );
        assert_eq!(c.snapshot().status, "pending");

        assert_eq!(
            c.complete(second.seq, dummy_payload(256, "t2")),
            CompletionOutcome::Applied
        );
        assert_eq!(c.payload().unwrap().png, b"t2");
    }

    #[test]
    fn completion_after_clear_is_discarded() {
        let mut c = controller();
        let TextTransition::Issued(request) = c.set_text("hello") else {
            panic!("expected request");
        };
        c.set_text("");
        assert_eq!(
            c.complete(request.seq, dummy_payload(256, "a")),
            CompletionOutcome::Stale
        );
        assert_eq!(c.snapshot().status, "idle");
    }

    #[test]
    fn failure_returns_to_idle_only_for_latest_request() {
        let mut c = controller();
        let TextTransition::Issued(first) = c.set_text("T1") else {
            panic!("expected request");
        };
        let TextTransition::Issued(second) = c.set_text("T2") else {
            panic!("expected request");
        };

        assert_eq!(c.fail(first.seq), CompletionOutcome::Stale);
        assert_eq!(c.snapshot().status, "pending");

        assert_eq!(c.fail(second.seq), CompletionOutcome::Applied);
        assert_eq!(c.snapshot().status, "idle");
    }

    #[test]
    fn reset_restores_defaults_but_keeps_text() {
        let mut c = controller();
        c.set_style(StylePalette::Pink);
        c.set_size(400);
        c.set_error_level(ErrorLevel::Q);
        let TextTransition::Issued(request) = c.set_text("hello") else {
            panic!("expected request");
        };
        c.complete(request.seq, dummy_payload(400, "a"));

        c.reset();

        let snap = c.snapshot();
        assert_eq!(snap.status, "idle");
        assert_eq!(snap.style, "classic");
        assert_eq!(snap.size_px, 256);
        assert_eq!(snap.error_level, "M");
        assert!(snap.image.is_none());
        assert_eq!(snap.text, "hello");
    }

    #[test]
    fn completion_after_reset_is_discarded() {
        let mut c = controller();
        let TextTransition::Issued(request) = c.set_text("hello") else {
            panic!("expected request");
        };
        c.reset();
        assert_eq!(
            c.complete(request.seq, dummy_payload(256, "a")),
            CompletionOutcome::Stale
        );
        assert_eq!(c.snapshot().status, "idle");
    }

    #[test]
    fn set_size_clamps_to_configured_range() {
        let mut c = controller();
        assert_eq!(c.set_size(64), 128);
        assert_eq!(c.set_size(1024), 512);
        assert_eq!(c.set_size(333), 333);
    }
}
