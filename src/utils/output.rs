//! # 美化输出工具
//!
//! 提供统一的终端输出样式。
//!
//! ## 依赖关系
//! - 被 `main.rs` 和所有 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 失败列表最多显示的条数
const MAX_LISTED_FAILURES: usize = 10;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印带单位的能量值
pub fn print_energy(label: &str, value_ev: f64) {
    println!(
        "{} {:<28} {}",
        "[=]".cyan().bold(),
        label,
        format!("{:.4} eV", value_ev).bold()
    );
}

/// 打印批量处理中失败的文件
pub fn print_failures(failures: &[(String, String)]) {
    if failures.is_empty() {
        return;
    }
    print_warning("Failed files:");
    for (path, err) in failures.iter().take(MAX_LISTED_FAILURES) {
        print_error(&format!("  {}: {}", path, err));
    }
    if failures.len() > MAX_LISTED_FAILURES {
        print_warning(&format!(
            "  ... and {} more",
            failures.len() - MAX_LISTED_FAILURES
        ));
    }
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
