fn main() {
    // 只有桌面外壳需要 tauri 的构建步骤（读取 tauri.conf.json、生成上下文）
    #[cfg(feature = "desktop")]
    tauri_build::build()
}
