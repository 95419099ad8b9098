//! # gamma-gap 命令实现
//!
//! 对一组 SCF 输出计算 Γ 点带隙，检查 k 网格或截断能收敛性。
//!
//! ## 功能
//! - glob 模式收集 SCF 输出
//! - 并行解析（rayon），单文件失败不影响其他文件
//! - 终端表格、CSV 输出
//! - 可选绘制收敛图
//!
//! ## 依赖关系
//! - 使用 `cli/gamma.rs` 定义的参数
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `analysis/convergence.rs`, `plot/convergence.rs`

use crate::analysis::convergence::{self, ConvergencePoint, SweepKind};
use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::gamma::GammaGapArgs;
use crate::error::{BandsError, Result};
use crate::plot::convergence::generate_convergence_plot;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 收敛表格行
#[derive(Debug, Clone, Tabled)]
struct ConvergenceRow {
    #[tabled(rename = "Parameter")]
    label: String,
    #[tabled(rename = "1/param")]
    inverse: String,
    #[tabled(rename = "E_F (eV)")]
    fermi: String,
    #[tabled(rename = "Γ gap (eV)")]
    gap: String,
    #[tabled(rename = "File")]
    file: String,
}

impl From<&ConvergencePoint> for ConvergenceRow {
    fn from(p: &ConvergencePoint) -> Self {
        ConvergenceRow {
            label: p.label.clone(),
            inverse: format!("{:.6}", p.inverse_parameter),
            fermi: format!("{:.4}", p.fermi_energy_ev),
            gap: format!("{:.4}", p.gamma_gap_ev),
            file: p.file.clone(),
        }
    }
}

/// 执行 gamma-gap 命令
pub fn execute(args: GammaGapArgs) -> Result<()> {
    output::print_header("Γ-Point Gap Convergence");

    let kind: SweepKind = args.sweep.into();
    let files = FileCollector::new(&args.pattern).collect()?;
    if files.is_empty() {
        return Err(BandsError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }
    output::print_info(&format!(
        "Found {} SCF outputs ({} sweep)",
        files.len(),
        kind
    ));

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));
    let result = runner.run(files, |file| {
        match convergence::convergence_point(file, kind) {
            Ok(point) if convergence::meets_min_parameter(&point, args.min_parameter) => {
                ProcessResult::Success(point)
            }
            Ok(_) => ProcessResult::Skipped(file.display().to_string()),
            Err(e) => ProcessResult::Failed(file.display().to_string(), e.to_string()),
        }
    })?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} processed, {} success, {} skipped, {} failed",
        result.total(),
        result.success(),
        result.skipped,
        result.failed()
    ));
    output::print_failures(&result.failures);

    let mut points = result.outputs;
    if points.is_empty() {
        output::print_warning("No Γ-point gaps could be computed.");
        return Ok(());
    }
    convergence::sort_points(&mut points);

    let rows: Vec<ConvergenceRow> = points.iter().map(ConvergenceRow::from).collect();
    println!("{}", Table::new(&rows));

    save_points_csv(&points, &args.output_csv)?;
    output::print_success(&format!(
        "Convergence data saved to '{}'",
        args.output_csv.display()
    ));

    if !args.no_plot {
        generate_convergence_plot(&points, kind, &args.output_plot, (800, 600))?;
        output::print_success(&format!(
            "Convergence plot saved to '{}'",
            args.output_plot.display()
        ));
    }

    Ok(())
}

/// 保存收敛数据到 CSV
fn save_points_csv(points: &[ConvergencePoint], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for point in points {
        wtr.serialize(point)?;
    }

    wtr.flush().map_err(|e| BandsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
