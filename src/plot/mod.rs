//! # 图表生成模块
//!
//! 使用 `plotters` 绘制能带图与收敛曲线。
//!
//! ## 子模块
//! - `bands`: 能带结构图
//! - `convergence`: Γ 点带隙收敛图
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs`, `commands/gamma.rs` 调用
//! - 使用 `models/`, `analysis/convergence.rs`

pub mod bands;
pub mod convergence;

pub use bands::{BandColors, BandPlotOptions, BandRole, BandStructureArtist};

use crate::error::BandsError;
use std::path::Path;

/// 根据扩展名判断是否输出 SVG
pub fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// 绘图后端错误
pub(crate) fn plot_err<E: std::fmt::Debug>(e: E) -> BandsError {
    BandsError::Other(format!("Plot error: {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_svg() {
        assert!(is_svg(Path::new("bands.svg")));
        assert!(is_svg(Path::new("bands.SVG")));
        assert!(!is_svg(Path::new("bands.png")));
        assert!(!is_svg(Path::new("bands")));
    }
}
