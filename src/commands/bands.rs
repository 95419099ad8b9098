//! # bands 命令实现
//!
//! 解析 bands.x 能带数据，报告能带边并绘制能带图。
//!
//! ## 功能
//! - 从 SCF 输出或命令行参数获取电子数
//! - 构造能带结构，计算带隙
//! - 终端表格输出 VBM / CBM 位置
//! - 可选读取高对称点并绘图
//!
//! ## 依赖关系
//! - 使用 `cli/bands.rs` 定义的参数
//! - 使用 `parsers/bands_data.rs`, `parsers/bands_out.rs`, `parsers/scf_out.rs`
//! - 使用 `plot/bands.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::bands::BandsArgs;
use crate::error::{BandsError, Result};
use crate::models::{BandStructure, EnergyBand, Spin};
use crate::parsers::{parse_high_symmetry_points, parse_scf_output, BandsDataReader};
use crate::plot::{BandPlotOptions, BandStructureArtist};
use crate::utils::{output, progress};

use std::path::Path;
use tabled::{Table, Tabled};

/// 能带边表格行
#[derive(Debug, Clone, Tabled)]
struct EdgeRow {
    #[tabled(rename = "Edge")]
    edge: String,
    #[tabled(rename = "Band")]
    band: usize,
    #[tabled(rename = "Energy (eV)")]
    energy: String,
    #[tabled(rename = "k index")]
    k_index: String,
    #[tabled(rename = "k position")]
    k_position: String,
    #[tabled(rename = "Spin")]
    spin: String,
}

impl EdgeRow {
    fn new(
        edge: &str,
        band_index: usize,
        band: &EnergyBand,
        energy: f64,
        k_index: &[usize],
        k: &[f64],
    ) -> Self {
        let spin = k_index
            .first()
            .and_then(|&i| band.spins().get(i).copied().flatten())
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        EdgeRow {
            edge: edge.to_string(),
            band: band_index + 1,
            spin,
            energy: format!("{:.4}", energy),
            k_index: join(k_index.iter().map(|i| i.to_string())),
            k_position: join(k.iter().map(|x| format!("{:.4}", x))),
        }
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

/// 执行 bands 命令
pub fn execute(args: BandsArgs) -> Result<()> {
    output::print_header("Band Structure Analysis");

    if !args.bands_file.exists() {
        return Err(BandsError::FileNotFound {
            path: args.bands_file.display().to_string(),
        });
    }

    let n_electrons = resolve_electron_count(&args)?;
    output::print_info(&format!("Number of electrons: {}", n_electrons));

    let spin = args.spin.map(Spin::from);
    if let Some(spin) = spin {
        output::print_info(&format!("Spin channel: {}", spin));
    }

    let spinner = progress::create_spinner(&format!(
        "Reading '{}'",
        args.bands_file.display()
    ));
    let mut reader = BandsDataReader::new(&args.bands_file, n_electrons)?.with_spin(spin);
    let result = reader.read_file().map(|_| ());
    spinner.finish_and_clear();
    result?;
    let band_structure = reader.band_structure()?;

    report(band_structure);

    if args.no_plot {
        return Ok(());
    }

    let high_symmetry = match &args.bands_out {
        Some(path) => {
            let points = parse_high_symmetry_points(path)?;
            output::print_info(&format!("Found {} high-symmetry points", points.len()));
            points
        }
        None => Vec::new(),
    };

    if !args.labels.is_empty() && args.labels.len() != high_symmetry.len() {
        output::print_warning(&format!(
            "{} labels given for {} high-symmetry points",
            args.labels.len(),
            high_symmetry.len()
        ));
    }

    let title = args
        .title
        .clone()
        .unwrap_or_else(|| file_label(&args.bands_file));
    let options = BandPlotOptions {
        e_range: (args.emin, args.emax),
        e_ref: args.e_ref,
        high_symmetry: &high_symmetry,
        labels: &args.labels,
        title: Some(title.as_str()),
    };

    BandStructureArtist::default().save(
        band_structure,
        &options,
        &args.output,
        (args.width, args.height),
    )?;
    output::print_success(&format!(
        "Band structure plot saved to '{}'",
        args.output.display()
    ));

    Ok(())
}

/// 电子数：命令行优先，否则读取 SCF 输出
fn resolve_electron_count(args: &BandsArgs) -> Result<usize> {
    if let Some(n) = args.n_electrons {
        return Ok(n);
    }
    match &args.scf {
        Some(path) => parse_scf_output(path)?.electron_count(),
        None => Err(BandsError::InvalidArgument(
            "Either --scf or --n-electrons is required".to_string(),
        )),
    }
}

/// 打印能带边摘要
fn report(band_structure: &BandStructure) {
    output::print_info(&format!(
        "Parsed {} bands, {} k-points per band",
        band_structure.bands().len(),
        band_structure.bands()[0].k_count()
    ));

    let vb: &EnergyBand = band_structure.valence_band();
    let cb: &EnergyBand = band_structure.conduction_band();
    let rows = vec![
        EdgeRow::new(
            "VBM",
            band_structure.valence_index(),
            vb,
            vb.max_eigv(),
            &vb.max_k_index(),
            &vb.max_k_points_x(),
        ),
        EdgeRow::new(
            "CBM",
            band_structure.conduction_index(),
            cb,
            cb.min_eigv(),
            &cb.min_k_index(),
            &cb.min_k_points_x(),
        ),
    ];
    println!("{}", Table::new(&rows));

    output::print_energy("Band gap", band_structure.band_gap());
    if band_structure.has_band_overlap() {
        output::print_warning("Valence and conduction bands overlap (metallic character)");
    } else if is_direct(vb, cb) {
        output::print_info("Gap is direct");
    } else {
        output::print_info("Gap is indirect");
    }
}

/// VBM 与 CBM 是否出现在同一 k 点
fn is_direct(vb: &EnergyBand, cb: &EnergyBand) -> bool {
    let cbm = cb.min_k_index();
    vb.max_k_index().iter().any(|i| cbm.contains(i))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("band structure")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(eigv: Vec<f64>) -> EnergyBand {
        let k = (0..eigv.len()).map(|i| i as f64 * 0.5).collect();
        EnergyBand::without_spin(k, eigv).unwrap()
    }

    #[test]
    fn test_direct_and_indirect() {
        let vb = band(vec![0.0, 1.0, 0.5]);
        assert!(is_direct(&vb, &band(vec![3.0, 2.0, 2.5])));
        assert!(!is_direct(&vb, &band(vec![2.0, 3.0, 2.5])));
    }

    #[test]
    fn test_edge_row_lists_all_ties() {
        let vb = band(vec![0.0, 5.1234, 1.0, 5.1234]);
        let row = EdgeRow::new("VBM", 559, &vb, 5.1234, &[1, 3], &[0.5, 1.5]);
        assert_eq!(row.band, 560);
        assert_eq!(row.spin, "-");
        assert_eq!(row.energy, "5.1234");
        assert_eq!(row.k_index, "1, 3");
        assert_eq!(row.k_position, "0.5000, 1.5000");
    }

    #[test]
    fn test_edge_row_shows_spin_channel() {
        let cb = EnergyBand::new(
            vec![0.0, 0.5],
            vec![2.0, 1.5],
            vec![Some(Spin::Down); 2],
        )
        .unwrap();
        let row = EdgeRow::new("CBM", 2, &cb, 1.5, &cb.min_k_index(), &cb.min_k_points_x());
        assert_eq!(row.spin, "down");
        assert_eq!(row.k_index, "1");
    }

    #[test]
    fn test_file_label() {
        assert_eq!(
            file_label(Path::new("out/pbi.bands.dat.gnu")),
            "pbi.bands.dat.gnu"
        );
    }
}
