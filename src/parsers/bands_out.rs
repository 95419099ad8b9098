//! # bands.x 标准输出解析器
//!
//! 提取高对称点在 k 路径上的位置（每行最后一个数）。
//!
//! ## 格式说明
//! ```text
//!      high-symmetry point:  0.0000 0.0000 0.0000   x coordinate   0.0000
//!      high-symmetry point:  0.5000 0.0000 0.0000   x coordinate   0.5000
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs` 使用
//! - 使用 `parsers/reader.rs` 状态机

use crate::error::{BandsError, Result};
use crate::parsers::reader::{parse_f64, ParserState, StatefulReader, Transition};

use std::path::{Path, PathBuf};

const SCAN_STATE: &str = "scan";

/// 高对称点行的首个记号
pub const HIGH_SYMMETRY_MARKER: &str = "high-symmetry";

/// 逐行收集高对称点
struct HighSymmetryState;

impl ParserState<Vec<f64>> for HighSymmetryState {
    fn consume_line(&mut self, line: &str, points: &mut Vec<f64>) -> Result<Transition> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() == Some(&HIGH_SYMMETRY_MARKER) {
            // 仅有标记的行也取最后一个记号，解析失败即报错
            points.push(parse_f64(tokens[tokens.len() - 1])?);
        }
        Ok(Transition::Stay)
    }
}

/// bands.x 输出读取器
///
/// 高对称点列表首次读取后缓存，之后不再重复读取。
pub struct BandsOutputReader {
    path: PathBuf,
    reader: StatefulReader<Vec<f64>>,
    k_points_x: Option<Vec<f64>>,
}

impl BandsOutputReader {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let reader = StatefulReader::new(
            vec![(
                SCAN_STATE,
                Box::new(HighSymmetryState) as Box<dyn ParserState<Vec<f64>>>,
            )],
            SCAN_STATE,
            Vec::new(),
        )?;

        Ok(BandsOutputReader {
            path: path.into(),
            reader,
            k_points_x: None,
        })
    }

    /// 读取文件，替换已缓存的列表
    pub fn read_file(&mut self) -> Result<&[f64]> {
        self.reader.context_mut().clear();
        let result = self.reader.read_file(&self.path);
        self.store(result)
    }

    /// 已读取的高对称点；未读取时报错
    pub fn k_points_x(&self) -> Result<&[f64]> {
        self.k_points_x
            .as_deref()
            .ok_or(BandsError::NotYetRead("high-symmetry k-points"))
    }

    /// 惰性读取：仅在尚未读取时读文件
    pub fn load_k_points_x(&mut self) -> Result<&[f64]> {
        if self.k_points_x.is_none() {
            self.read_file()?;
        }
        self.k_points_x()
    }

    fn store(&mut self, result: Result<()>) -> Result<&[f64]> {
        let points = std::mem::take(self.reader.context_mut());
        result?;
        self.k_points_x = Some(points);
        self.k_points_x()
    }
}

/// 读取 bands.x 输出中的高对称点
pub fn parse_high_symmetry_points(path: &Path) -> Result<Vec<f64>> {
    let mut reader = BandsOutputReader::new(path)?;
    Ok(reader.load_k_points_x()?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANDS_OUT: &str = r#"
     Program BANDS v.7.2 starts on  1Jan2024 at 10:00:00

     Reading xml data from directory:

     high-symmetry point:  0.0000 0.0000 0.0000   x coordinate   0.0000
     high-symmetry point:  0.5000 0.0000 0.0000   x coordinate   0.5000
     high-symmetry point:  0.5000 0.5000 0.0000   x coordinate   1.0000
     Not a high-symmetry line
     high-symmetry point:  0.0000 0.0000 0.0000   x coordinate   1.7071

     BANDS        :      0.52s CPU      0.61s WALL
"#;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "qebands_{}_{}.out",
            name,
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_extracts_last_token() {
        let path = temp_file("extract", BANDS_OUT);
        let mut reader = BandsOutputReader::new(&path).unwrap();
        let points = reader.read_file().unwrap();
        assert_eq!(points, &[0.0, 0.5, 1.0, 1.7071]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_access_before_read_fails() {
        let reader = BandsOutputReader::new("/nonexistent/bands.out").unwrap();
        assert!(matches!(
            reader.k_points_x(),
            Err(BandsError::NotYetRead(_))
        ));
    }

    #[test]
    fn test_no_markers_gives_empty_list() {
        let path = temp_file("empty", "nothing here\n\n");
        let mut reader = BandsOutputReader::new(&path).unwrap();
        assert!(reader.load_k_points_x().unwrap().is_empty());
        assert!(reader.k_points_x().unwrap().is_empty());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_lazy_load_reads_once() {
        let path = temp_file("lazy", BANDS_OUT);
        let mut reader = BandsOutputReader::new(&path).unwrap();

        assert_eq!(reader.load_k_points_x().unwrap().len(), 4);
        // 文件删除后仍返回缓存
        std::fs::remove_file(&path).unwrap();
        assert_eq!(reader.load_k_points_x().unwrap().len(), 4);
    }

    #[test]
    fn test_reread_does_not_append() {
        let path = temp_file("reread", BANDS_OUT);
        let mut reader = BandsOutputReader::new(&path).unwrap();
        reader.read_file().unwrap();
        let points = reader.read_file().unwrap();
        assert_eq!(points.len(), 4);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_bad_coordinate_is_parse_error() {
        let path = temp_file("bad", "high-symmetry point: x coordinate oops\n");
        let mut reader = BandsOutputReader::new(&path).unwrap();
        let err = reader.read_file().unwrap_err();
        assert!(matches!(err.root(), BandsError::InvalidNumber { .. }));
        assert!(reader.k_points_x().is_err());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_parse_high_symmetry_points_from_file() {
        let path = temp_file("points", BANDS_OUT);
        let points = parse_high_symmetry_points(&path).unwrap();
        assert_eq!(points, vec![0.0, 0.5, 1.0, 1.7071]);
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            parse_high_symmetry_points(Path::new("/nonexistent/bands.out")),
            Err(BandsError::FileReadError { .. })
        ));
    }

    #[test]
    fn test_marker_only_line_is_parse_error() {
        let path = temp_file("marker_only", "   high-symmetry\n");
        let err = parse_high_symmetry_points(&path).unwrap_err();
        match err.root() {
            BandsError::InvalidNumber { token } => assert_eq!(token, HIGH_SYMMETRY_MARKER),
            other => panic!("unexpected error: {other}"),
        }
        std::fs::remove_file(&path).ok();
    }
}
