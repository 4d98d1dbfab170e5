// 在 Windows release 版本中不显示控制台窗口
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    gacha_stats_lib::run()
}
