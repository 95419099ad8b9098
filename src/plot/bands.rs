//! # 能带结构图
//!
//! 绘制已解析的能带结构：价带紫色、导带绿色、其余黑色，
//! 能量以 `e_ref`（默认价带顶）为零点，并标出 VBM / CBM。
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs` 调用
//! - 使用 `models/band_structure.rs`
//! - 使用 `plotters` 渲染图表

use crate::error::{BandsError, Result};
use crate::models::BandStructure;
use crate::plot::{is_svg, plot_err};

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 能带在图中的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandRole {
    Valence,
    Conduction,
    Other,
}

/// 能带配色
#[derive(Debug, Clone, Copy)]
pub struct BandColors {
    pub valence: RGBColor,
    pub conduction: RGBColor,
    pub other: RGBColor,
}

impl Default for BandColors {
    fn default() -> Self {
        BandColors {
            valence: RGBColor(128, 0, 128),
            conduction: RGBColor(0, 128, 0),
            other: BLACK,
        }
    }
}

impl BandColors {
    fn color(&self, role: BandRole) -> RGBColor {
        match role {
            BandRole::Valence => self.valence,
            BandRole::Conduction => self.conduction,
            BandRole::Other => self.other,
        }
    }
}

/// 绘图选项
#[derive(Debug, Clone)]
pub struct BandPlotOptions<'a> {
    /// 能量窗口（相对 e_ref）
    pub e_range: (f64, f64),
    /// 能量零点，缺省为价带顶
    pub e_ref: Option<f64>,
    /// 高对称点位置
    pub high_symmetry: &'a [f64],
    /// 高对称点标签
    pub labels: &'a [String],
    pub title: Option<&'a str>,
}

/// 单条能带的绘制数据
#[derive(Debug, Clone, PartialEq)]
pub struct BandSeries {
    pub role: BandRole,
    pub points: Vec<(f64, f64)>,
}

/// 能带结构绘制器
#[derive(Debug, Clone, Default)]
pub struct BandStructureArtist {
    colors: BandColors,
}

impl BandStructureArtist {
    /// 计算每条能带的 (k, E - e_ref) 序列
    pub fn band_series(band_structure: &BandStructure, e_ref: f64) -> Vec<BandSeries> {
        band_structure
            .bands()
            .iter()
            .enumerate()
            .map(|(i, band)| {
                let role = if i == band_structure.valence_index() {
                    BandRole::Valence
                } else if i == band_structure.conduction_index() {
                    BandRole::Conduction
                } else {
                    BandRole::Other
                };
                let points = band
                    .k_points_x()
                    .iter()
                    .zip(band.eigv())
                    .map(|(&k, &e)| (k, e - e_ref))
                    .collect();
                BandSeries { role, points }
            })
            .collect()
    }

    /// k 轴范围，取第一条能带的 k 坐标
    pub fn k_range(band_structure: &BandStructure) -> (f64, f64) {
        let k = band_structure.bands()[0].k_points_x();
        let k_min = k.iter().copied().fold(f64::INFINITY, f64::min);
        let k_max = k.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if k_max > k_min {
            (k_min, k_max)
        } else {
            (k_min - 0.5, k_max + 0.5)
        }
    }

    /// 保存为 PNG 或 SVG（按扩展名）
    pub fn save(
        &self,
        band_structure: &BandStructure,
        options: &BandPlotOptions,
        output_path: &Path,
        size: (u32, u32),
    ) -> Result<()> {
        if is_svg(output_path) {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            self.draw_plot(&root, band_structure, options)?;
            root.present().map_err(plot_err)?;
        } else {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            self.draw_plot(&root, band_structure, options)?;
            root.present().map_err(plot_err)?;
        }
        Ok(())
    }

    /// 在给定绘图区上绘制能带结构
    pub fn draw_plot<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        band_structure: &BandStructure,
        options: &BandPlotOptions,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let (e_min, e_max) = options.e_range;
        if e_min >= e_max {
            return Err(BandsError::InvalidArgument(format!(
                "Energy range must be increasing, got {} to {}",
                e_min, e_max
            )));
        }

        let e_ref = options
            .e_ref
            .unwrap_or_else(|| band_structure.valence_band().max_eigv());
        let (k_min, k_max) = Self::k_range(band_structure);

        root.fill(&WHITE).map_err(plot_err)?;

        let mut builder = ChartBuilder::on(root);
        builder
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60);
        if let Some(title) = options.title {
            builder.caption(title, ("sans-serif", 24).into_font());
        }
        let mut chart = builder
            .build_cartesian_2d(k_min..k_max, e_min..e_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc("k")
            .y_desc("E - E_ref (eV)")
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(plot_err)?;

        // 高对称点竖线与标签
        let guide = RGBColor(160, 160, 160);
        for (i, &x) in options.high_symmetry.iter().enumerate() {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x, e_min), (x, e_max)],
                    guide.stroke_width(1),
                )))
                .map_err(plot_err)?;

            if let Some(label) = options.labels.get(i) {
                chart
                    .draw_series(std::iter::once(Text::new(
                        label.clone(),
                        (x, e_max - 0.05 * (e_max - e_min)),
                        ("sans-serif", 16).into_font().color(&BLACK),
                    )))
                    .map_err(plot_err)?;
            }
        }

        for series in Self::band_series(band_structure, e_ref) {
            let width = match series.role {
                BandRole::Other => 1,
                _ => 2,
            };
            chart
                .draw_series(LineSeries::new(
                    series.points,
                    self.colors.color(series.role).stroke_width(width),
                ))
                .map_err(plot_err)?;
        }

        // VBM / CBM 标记（并列时取第一个位置）
        let vb = band_structure.valence_band();
        let cb = band_structure.conduction_band();
        let edges = [
            (vb.max_k_points_x().first().copied(), vb.max_eigv(), BandRole::Valence),
            (cb.min_k_points_x().first().copied(), cb.min_eigv(), BandRole::Conduction),
        ];
        for (k, e, role) in edges {
            if let Some(k) = k {
                chart
                    .draw_series(std::iter::once(Circle::new(
                        (k, e - e_ref),
                        4,
                        self.colors.color(role).filled(),
                    )))
                    .map_err(plot_err)?;
            }
        }

        Ok(())
    }
}
