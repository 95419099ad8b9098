//! # bands.x 能带数据 (.dat.gnu) 解析器
//!
//! 解析 `bands.x` 输出的两列数据文件，每条能带一段，段之间以空行分隔。
//!
//! ## 格式说明
//! ```text
//!     0.0000  -56.1234
//!     0.0125  -56.1201
//!     ...
//!
//!     0.0000  -55.9876
//!     ...
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs` 使用
//! - 使用 `parsers/reader.rs` 状态机
//! - 使用 `models/band.rs`, `models/band_structure.rs`

use crate::error::{BandsError, Result};
use crate::models::{BandStructure, EnergyBand, Spin};
use crate::parsers::reader::{parse_f64, ParserState, StatefulReader, Transition};

use std::path::PathBuf;

const BANDS_STATE: &str = "bands";

/// 读取器输出上下文
#[derive(Debug)]
pub struct BandsDataOutput {
    n_electrons: usize,
    /// 自旋通道标记；`None` 时每个采样点均无标记
    spin: Option<Spin>,
    band_structure: Option<BandStructure>,
}

/// 逐段累积能带数据
#[derive(Debug, Default)]
struct BandsDataState {
    current_k_points: Vec<f64>,
    current_eigv: Vec<f64>,
    bands: Vec<EnergyBand>,
}

impl BandsDataState {
    /// 将当前缓冲区收尾为一条能带；空缓冲区不产生能带
    fn flush_band(&mut self, spin: Option<Spin>) -> Result<()> {
        if self.current_eigv.is_empty() {
            return Ok(());
        }
        let k_points = std::mem::take(&mut self.current_k_points);
        let eigv = std::mem::take(&mut self.current_eigv);
        let band = match spin {
            Some(spin) => {
                let spins = vec![Some(spin); eigv.len()];
                EnergyBand::new(k_points, eigv, spins)?
            }
            None => EnergyBand::without_spin(k_points, eigv)?,
        };
        self.bands.push(band);
        Ok(())
    }
}

impl ParserState<BandsDataOutput> for BandsDataState {
    fn enter(&mut self, ctx: &mut BandsDataOutput) -> Result<()> {
        self.current_k_points.clear();
        self.current_eigv.clear();
        self.bands.clear();
        ctx.band_structure = None;
        Ok(())
    }

    fn consume_line(&mut self, line: &str, ctx: &mut BandsDataOutput) -> Result<Transition> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.is_empty() {
            self.flush_band(ctx.spin)?;
            return Ok(Transition::Stay);
        }

        // 只取前两列，其余列不属于能带数据
        if tokens.len() < 2 {
            return Err(BandsError::MissingToken {
                index: 2,
                line: line.to_string(),
            });
        }
        self.current_k_points.push(parse_f64(tokens[0])?);
        self.current_eigv.push(parse_f64(tokens[1])?);

        Ok(Transition::Stay)
    }

    fn exit(&mut self, ctx: &mut BandsDataOutput) -> Result<()> {
        // 文件末尾未必有空行
        self.flush_band(ctx.spin)?;
        let bands = std::mem::take(&mut self.bands);
        ctx.band_structure = Some(BandStructure::new(bands, ctx.n_electrons)?);
        Ok(())
    }
}

/// 能带数据文件读取器
pub struct BandsDataReader {
    path: PathBuf,
    reader: StatefulReader<BandsDataOutput>,
}

impl BandsDataReader {
    pub fn new(path: impl Into<PathBuf>, n_electrons: usize) -> Result<Self> {
        Ok(BandsDataReader {
            path: path.into(),
            reader: new_reader(n_electrons)?,
        })
    }

    /// 为读取的能带标记自旋通道（bands.x `spin_component` 输出）
    pub fn with_spin(mut self, spin: Option<Spin>) -> Self {
        self.reader.context_mut().spin = spin;
        self
    }

    /// 读取整个文件并构造能带结构
    pub fn read_file(&mut self) -> Result<&BandStructure> {
        if let Err(e) = self.reader.read_file(&self.path) {
            self.reader.context_mut().band_structure = None;
            return Err(e);
        }
        self.band_structure()
    }

    pub fn band_structure(&self) -> Result<&BandStructure> {
        self.reader
            .context()
            .band_structure
            .as_ref()
            .ok_or(BandsError::NotYetRead("band structure"))
    }
}

fn new_reader(n_electrons: usize) -> Result<StatefulReader<BandsDataOutput>> {
    StatefulReader::new(
        vec![(
            BANDS_STATE,
            Box::new(BandsDataState::default()) as Box<dyn ParserState<BandsDataOutput>>,
        )],
        BANDS_STATE,
        BandsDataOutput {
            n_electrons,
            spin: None,
            band_structure: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_bands_data_content(content: &str, n_electrons: usize) -> Result<BandStructure> {
        let mut reader = new_reader(n_electrons)?;
        reader.read_lines(content.as_bytes())?;
        reader
            .into_context()
            .band_structure
            .ok_or(BandsError::NotYetRead("band structure"))
    }

    const THREE_BANDS: &str = r#"    0.0000  -5.0000
    0.5000  -4.5000
    1.0000  -4.0000

    0.0000   1.0000
    0.5000   0.2000
    1.0000   0.2000

    0.0000   2.5000
    0.5000   3.0000
"#;

    #[test]
    fn test_blocks_become_bands() {
        let bs = parse_bands_data_content(THREE_BANDS, 2).unwrap();
        assert_eq!(bs.bands().len(), 3);
        assert_eq!(bs.bands()[0].k_count(), 3);
        assert_eq!(bs.bands()[1].k_count(), 3);
        assert_eq!(bs.bands()[2].k_count(), 2);
        assert_eq!(bs.bands()[0].eigv(), &[-5.0, -4.5, -4.0]);
        assert_eq!(bs.bands()[2].k_points_x(), &[0.0, 0.5]);
        assert!(bs.bands()[0].spins().iter().all(|s| s.is_none()));

        assert_eq!(bs.valence_band().max_eigv(), 1.0);
        assert_eq!(bs.valence_band().min_k_points_x(), vec![0.5, 1.0]);
        assert_eq!(bs.band_gap(), 2.5 - 1.0);
    }

    #[test]
    fn test_repeated_blank_lines_do_not_emit_empty_bands() {
        let content = "\n\n0.0 1.0\n0.5 2.0\n\n\n\n0.0 3.0\n0.5 4.0\n\n0.0 5.0\n\n\n";
        let bs = parse_bands_data_content(content, 2).unwrap();
        assert_eq!(bs.bands().len(), 3);
        assert!(bs.bands().iter().all(|b| b.k_count() > 0));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let content = "0.0 1.0 99.0 xyz\n0.5 2.0 98.0\n\n0.0 3.0\n\n0.0 4.0\n";
        let bs = parse_bands_data_content(content, 2).unwrap();
        assert_eq!(bs.bands()[0].eigv(), &[1.0, 2.0]);
    }

    #[test]
    fn test_tabs_are_whitespace() {
        let content = "0.0\t1.0\n\n0.0\t2.0\n\n0.0\t3.0\n";
        let bs = parse_bands_data_content(content, 2).unwrap();
        assert_eq!(bs.bands().len(), 3);
    }

    #[test]
    fn test_invalid_number_fails_fast() {
        let content = "0.0 1.0\n0.5 abc\n\n0.0 2.0\n";
        let err = parse_bands_data_content(content, 2).unwrap_err();
        match &err {
            BandsError::AtLine { line, .. } => assert_eq!(*line, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root(), BandsError::InvalidNumber { token } if token == "abc"));
    }

    #[test]
    fn test_single_column_line_rejected() {
        let err = parse_bands_data_content("0.0\n", 2).unwrap_err();
        assert!(matches!(err.root(), BandsError::MissingToken { .. }));
    }

    #[test]
    fn test_structure_checked_on_exit() {
        let err = parse_bands_data_content(THREE_BANDS, 3).unwrap_err();
        assert!(matches!(err, BandsError::InvalidElectronCount(3)));

        let err = parse_bands_data_content(THREE_BANDS, 4).unwrap_err();
        assert!(matches!(err, BandsError::BandIndexOutOfRange { .. }));
    }

    #[test]
    fn test_regression_band_gap_560_electrons() {
        let mut content = String::new();
        for i in 0..562 {
            let eigv: [&str; 3] = match i {
                559 => ["4.9000", "5.1234", "5.0000"],
                560 => ["6.4000", "6.2952", "6.5000"],
                i if i < 559 => ["-20.0000", "-19.0000", "-18.0000"],
                _ => ["10.0000", "11.0000", "12.0000"],
            };
            for (k, e) in ["0.0000", "0.5000", "1.0000"].iter().zip(eigv.iter()) {
                content.push_str(&format!("{:>10}{:>10}\n", k, e));
            }
            content.push('\n');
        }

        let bs = parse_bands_data_content(&content, 560).unwrap();
        assert_eq!(bs.bands().len(), 562);
        assert_eq!(bs.valence_band().max_k_points_x(), vec![0.5]);
        assert_eq!(bs.conduction_band().min_k_index(), vec![1]);
        assert_eq!(bs.band_gap(), 1.1718000000000002);
    }

    #[test]
    fn test_reader_before_and_after_read() {
        let path = std::env::temp_dir().join(format!("qebands_test_{}.dat.gnu", std::process::id()));
        std::fs::write(&path, THREE_BANDS).unwrap();

        let mut reader = BandsDataReader::new(&path, 2).unwrap();
        assert!(matches!(
            reader.band_structure(),
            Err(BandsError::NotYetRead(_))
        ));
        let gap = reader.read_file().unwrap().band_gap();
        assert_eq!(gap, 1.5);
        assert_eq!(reader.band_structure().unwrap().bands().len(), 3);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let mut reader = BandsDataReader::new("/nonexistent/bands.dat.gnu", 2).unwrap();
        let err = reader.read_file().unwrap_err();
        assert!(matches!(err, BandsError::FileReadError { .. }));
        assert!(reader.band_structure().is_err());
    }

    #[test]
    fn test_spin_channel_tags_every_sample() {
        let path = std::env::temp_dir().join(format!("qebands_spin_{}.dat.gnu", std::process::id()));
        std::fs::write(&path, THREE_BANDS).unwrap();

        let mut reader = BandsDataReader::new(&path, 2)
            .unwrap()
            .with_spin(Some(Spin::Down));
        let bs = reader.read_file().unwrap();
        assert!(bs
            .bands()
            .iter()
            .all(|b| b.spins().iter().all(|s| *s == Some(Spin::Down))));

        std::fs::remove_file(&path).ok();
    }
}
