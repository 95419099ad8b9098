//! # Γ 点带隙
//!
//! 由升序排列的 Γ 点本征值和费米能确定价带顶、导带底。
//!
//! ## 依赖关系
//! - 被 `models/calculation.rs`, `analysis/convergence.rs` 使用
//! - 无外部模块依赖

use crate::error::{BandsError, Result};

/// Γ 点带边
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaEdges {
    pub valence_index: usize,
    pub conduction_index: usize,
    pub valence_eigv: f64,
    pub conduction_eigv: f64,
}

impl GammaEdges {
    pub fn gap(&self) -> f64 {
        self.conduction_eigv - self.valence_eigv
    }
}

/// 计算 Γ 点带边
///
/// `eigv` 须已升序排列（此处不排序）。严格低于费米能的本征值个数为 `c`，
/// 价带下标为 `c - 1`，导带下标为 `c`；任一越界均报错。
pub fn gamma_band_edges(eigv: &[f64], fermi_energy: f64) -> Result<GammaEdges> {
    let below = eigv.iter().filter(|&&e| e < fermi_energy).count();

    if below == 0 {
        return Err(BandsError::GammaIndexOutOfRange {
            index: -1,
            len: eigv.len(),
            fermi_energy,
        });
    }
    if below >= eigv.len() {
        return Err(BandsError::GammaIndexOutOfRange {
            index: below as isize,
            len: eigv.len(),
            fermi_energy,
        });
    }

    Ok(GammaEdges {
        valence_index: below - 1,
        conduction_index: below,
        valence_eigv: eigv[below - 1],
        conduction_eigv: eigv[below],
    })
}

/// Γ 点带隙 = eigv[c] - eigv[c - 1]
pub fn gamma_gap(eigv: &[f64], fermi_energy: f64) -> Result<f64> {
    Ok(gamma_band_edges(eigv, fermi_energy)?.gap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_gap_basic() {
        let eigv = [-5.0, -3.0, 2.0, 4.0];
        let edges = gamma_band_edges(&eigv, 0.0).unwrap();
        assert_eq!(edges.valence_index, 1);
        assert_eq!(edges.conduction_index, 2);
        assert_eq!(gamma_gap(&eigv, 0.0).unwrap(), 5.0);
    }

    #[test]
    fn test_fermi_on_eigenvalue_counts_strictly_below() {
        // 2.0 不严格低于 E_F
        let eigv = [-5.0, -3.0, 2.0, 4.0];
        assert_eq!(gamma_gap(&eigv, 2.0).unwrap(), 5.0);
    }

    #[test]
    fn test_fermi_below_all_is_error() {
        let err = gamma_gap(&[1.0, 2.0], 0.0).unwrap_err();
        assert!(matches!(
            err,
            BandsError::GammaIndexOutOfRange { index: -1, len: 2, .. }
        ));
    }

    #[test]
    fn test_fermi_above_all_is_error() {
        let err = gamma_gap(&[1.0, 2.0], 10.0).unwrap_err();
        assert!(matches!(
            err,
            BandsError::GammaIndexOutOfRange { index: 2, len: 2, .. }
        ));
    }

    #[test]
    fn test_empty_eigenvalues() {
        assert!(gamma_gap(&[], 0.0).is_err());
    }
}
