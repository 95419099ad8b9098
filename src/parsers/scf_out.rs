//! # pw.x SCF 输出解析器
//!
//! 从 pw.x 输出中提取电子数、费米能以及 Γ 点本征值。
//!
//! ## 状态机
//! ```text
//! scan  --(遇到 "k = 0.0000 0.0000 0.0000")-->  gamma
//! gamma --(本征值之后的第一个空行)----------->  scan
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs`, `analysis/convergence.rs` 使用
//! - 使用 `parsers/reader.rs` 状态机
//! - 使用 `models/calculation.rs`

use crate::error::{BandsError, Result};
use crate::models::ScfResult;
use crate::parsers::reader::{parse_f64, ParserState, StatefulReader, Transition};

use std::fs;
use std::path::Path;

const SCAN_STATE: &str = "scan";
const GAMMA_STATE: &str = "gamma";

/// 费米能所在行
pub const FERMI_MARKER: &str = "the Fermi energy is";
/// Γ 点本征值块的起始行
pub const GAMMA_MARKER: &str = "k = 0.0000 0.0000 0.0000";
/// 电子数所在行
pub const ELECTRONS_MARKER: &str = "number of electrons";

/// 费米能是该行第 5 个记号
const FERMI_TOKEN_INDEX: usize = 4;

/// 扫描关键行
struct ScanState;

impl ParserState<ScfResult> for ScanState {
    fn consume_line(&mut self, line: &str, ctx: &mut ScfResult) -> Result<Transition> {
        // "     the Fermi energy is     6.5432 ev"
        if ctx.fermi_energy.is_none() && line.contains(FERMI_MARKER) {
            let token = line
                .split_whitespace()
                .nth(FERMI_TOKEN_INDEX)
                .ok_or_else(|| BandsError::MissingToken {
                    index: FERMI_TOKEN_INDEX + 1,
                    line: line.to_string(),
                })?;
            ctx.fermi_energy = Some(parse_f64(token)?);
        }

        // "     number of electrons       =       560.00"
        if ctx.num_electrons.is_none() && line.contains(ELECTRONS_MARKER) {
            if let Some(token) = value_after_eq(line) {
                ctx.num_electrons = Some(parse_f64(token)?);
            }
        }

        if ctx.gamma_eigenvalues.is_none() && line.contains(GAMMA_MARKER) {
            return Ok(Transition::Goto(GAMMA_STATE));
        }

        Ok(Transition::Stay)
    }
}

/// 累积 Γ 点本征值，遇到数据后的空行结束
#[derive(Default)]
struct GammaState {
    eigenvalues: Vec<f64>,
    started: bool,
}

impl ParserState<ScfResult> for GammaState {
    fn enter(&mut self, _ctx: &mut ScfResult) -> Result<()> {
        self.eigenvalues.clear();
        self.started = false;
        Ok(())
    }

    fn consume_line(&mut self, line: &str, _ctx: &mut ScfResult) -> Result<Transition> {
        if line.trim().is_empty() {
            // 标记行与第一行本征值之间的空行
            if !self.started {
                return Ok(Transition::Stay);
            }
            return Ok(Transition::Goto(SCAN_STATE));
        }

        for token in line.split_whitespace() {
            self.eigenvalues.push(parse_f64(token)?);
        }
        self.started = true;
        Ok(Transition::Stay)
    }

    fn exit(&mut self, ctx: &mut ScfResult) -> Result<()> {
        if self.eigenvalues.is_empty() || ctx.gamma_eigenvalues.is_some() {
            return Ok(());
        }
        let mut eigenvalues = std::mem::take(&mut self.eigenvalues);
        eigenvalues.sort_by(|a, b| a.total_cmp(b));
        ctx.gamma_eigenvalues = Some(eigenvalues);
        Ok(())
    }
}

fn new_reader(source_name: &str) -> Result<StatefulReader<ScfResult>> {
    StatefulReader::new(
        vec![
            (
                SCAN_STATE,
                Box::new(ScanState) as Box<dyn ParserState<ScfResult>>,
            ),
            (
                GAMMA_STATE,
                Box::new(GammaState::default()) as Box<dyn ParserState<ScfResult>>,
            ),
        ],
        SCAN_STATE,
        ScfResult::new(source_name),
    )
}

/// 解析 pw.x SCF 输出文件
pub fn parse_scf_output(path: &Path) -> Result<ScfResult> {
    let content = fs::read_to_string(path).map_err(|e| BandsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_scf_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 SCF 输出
pub fn parse_scf_content(content: &str, source_name: &str) -> Result<ScfResult> {
    let mut reader = new_reader(source_name)?;
    reader.read_lines(content.as_bytes())?;
    Ok(reader.into_context())
}

/// 读取费米能 (eV)
pub fn read_fermi_energy(path: &Path) -> Result<f64> {
    parse_scf_output(path)?.fermi_energy()
}

/// 读取升序排列的 Γ 点本征值 (eV)
pub fn read_gamma_eigenvalues(path: &Path) -> Result<Vec<f64>> {
    Ok(parse_scf_output(path)?.gamma_eigenvalues()?.to_vec())
}

/// 提取等号后的第一个记号
fn value_after_eq(line: &str) -> Option<&str> {
    let (_, after) = line.split_once('=')?;
    after.split_whitespace().next()
}
