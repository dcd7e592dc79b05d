// 防止在 Windows 发布版本中显示额外的控制台窗口，不要删除！
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! # 二维码生成工具 — 应用入口
//!
//! 本文件仅负责应用初始化与插件/命令注册。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use qr_studio::generator::{self, GeneratorServiceState};
use tauri::Manager;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        // 插件初始化
        .plugin(tauri_plugin_dialog::init())
        // 应用设置
        .setup(|app| {
            log::info!("setup: begin");

            // 注册生成服务为托管状态
            app.manage(GeneratorServiceState::new());
            log::info!("setup: generator service managed");

            Ok(())
        })
        // 注册所有 Tauri 命令
        .invoke_handler(tauri::generate_handler![
            // 生成控制
            generator::commands::set_qr_text,
            generator::commands::set_qr_style,
            generator::commands::set_qr_size,
            generator::commands::set_qr_error_level,
            generator::commands::reset_generator,
            generator::commands::get_generator_snapshot,
            generator::commands::list_qr_styles,
            // 结果分发
            generator::commands::export_qr_png,
            generator::commands::copy_qr_to_clipboard,
        ])
        .run(tauri::generate_context!())
        .expect("运行 Tauri 应用时出错");
}
