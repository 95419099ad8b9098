//! # Γ 点带隙收敛图
//!
//! 以 1/n_k 或 1/ecut 为横坐标绘制 Γ 点带隙。
//!
//! ## 依赖关系
//! - 被 `commands/gamma.rs` 调用
//! - 使用 `analysis/convergence.rs` 的 ConvergencePoint
//! - 使用 `plotters` 渲染图表

use crate::analysis::{ConvergencePoint, SweepKind};
use crate::error::{BandsError, Result};
use crate::plot::{is_svg, plot_err};

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 生成收敛图（PNG 或 SVG）
pub fn generate_convergence_plot(
    points: &[ConvergencePoint],
    kind: SweepKind,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    if points.is_empty() {
        return Err(BandsError::Other("No data to plot".to_string()));
    }

    if is_svg(output_path) {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_convergence_chart(&root, points, kind)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_convergence_chart(&root, points, kind)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

/// 数据范围外扩 10%，单点时给固定宽度
fn padded_range(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    let margin = (max - min).abs() * 0.1;
    if margin > 0.0 {
        (min - margin, max + margin)
    } else {
        (min - 0.1 * min.abs().max(1.0), max + 0.1 * max.abs().max(1.0))
    }
}

fn draw_convergence_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[ConvergencePoint],
    kind: SweepKind,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (x_min, x_max) = padded_range(points.iter().map(|p| p.inverse_parameter));
    let (y_min, y_max) = padded_range(points.iter().map(|p| p.gamma_gap_ev));

    let x_desc = match kind {
        SweepKind::KGrid => "1/n_k",
        SweepKind::Ecut => "1/ecut_wfc",
    };

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("Γ-point gap convergence ({})", kind),
            ("sans-serif", 22).into_font(),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("E_g at Γ (eV)")
        .draw()
        .map_err(plot_err)?;

    let color = RGBColor(0, 102, 204);

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.inverse_parameter, p.gamma_gap_ev)),
            color.mix(0.4).stroke_width(1),
        ))
        .map_err(plot_err)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.inverse_parameter, p.gamma_gap_ev), 5, color.filled())),
        )
        .map_err(plot_err)?;

    for p in points {
        chart
            .draw_series(std::iter::once(Text::new(
                p.label.clone(),
                (p.inverse_parameter, p.gamma_gap_ev),
                ("sans-serif", 12).into_font().color(&BLACK),
            )))
            .map_err(plot_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range([1.0, 2.0].into_iter());
        assert!((lo - 0.9).abs() < 1e-12);
        assert!((hi - 2.1).abs() < 1e-12);

        let (lo, hi) = padded_range([0.0].into_iter());
        assert!(lo < 0.0 && hi > 0.0);
    }

    #[test]
    fn test_empty_points_rejected() {
        let err = generate_convergence_plot(
            &[],
            SweepKind::KGrid,
            Path::new("unused.png"),
            (400, 300),
        )
        .unwrap_err();
        assert!(matches!(err, BandsError::Other(_)));
    }
}
