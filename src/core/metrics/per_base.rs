use crate::core::model::{BaseHist, NUM_BASES, QualHist, round_half_away};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RowLabel {
    Total,
    /// 1-based position within the read.
    Base(usize),
}

#[derive(Clone, Debug)]
pub struct CompositionRow {
    pub label: RowLabel,
    /// Percentage of each base, indexed by `Base::index`.
    pub base_percent: [f64; NUM_BASES],
    /// Quality scores per thousand for `0..=max_qual`.
    pub qual_per_mille: Vec<i64>,
    /// Phred-scaled mean error rate.
    pub aggregate_quality: f64,
}

impl CompositionRow {
    /// `denom` is the number of bases the row describes and must be non-zero.
    pub fn build(
        label: RowLabel,
        bases: &BaseHist,
        quals: &QualHist,
        max_qual: u8,
        denom: u64,
    ) -> Self {
        let d = denom as f64;
        let mut base_percent = [0.0; NUM_BASES];
        for (pct, &count) in base_percent.iter_mut().zip(bases.iter()) {
            *pct = 100.0 * (count as f64 / d);
        }

        let mut qual_per_mille = Vec::with_capacity(max_qual as usize + 1);
        let mut erate = 0.0f64;
        for (q, &count) in quals.iter().enumerate().take(max_qual as usize + 1) {
            qual_per_mille.push(per_mille(count, denom));
            erate += phred_to_error(q) * count as f64;
        }

        Self {
            label,
            base_percent,
            qual_per_mille,
            aggregate_quality: error_to_phred(erate / d),
        }
    }
}

#[inline]
pub fn per_mille(count: u64, denom: u64) -> i64 {
    round_half_away(1000.0 * (count as f64 / denom as f64))
}

#[inline]
pub fn phred_to_error(q: usize) -> f64 {
    10f64.powf(q as f64 / -10.0)
}

#[inline]
pub fn error_to_phred(p: f64) -> f64 {
    -10.0 * p.ln() / 10f64.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::NUM_QUALS;

    #[test]
    fn per_mille_rounds_half_away_from_zero() {
        // 1/16 and 5/16 are exact in binary, so these are true ties.
        assert_eq!(per_mille(1, 16), 63);
        assert_eq!(per_mille(5, 16), 313);
        assert_eq!(per_mille(16, 16), 1000);
        assert_eq!(per_mille(0, 16), 0);
    }

    #[test]
    fn phred_round_trip() {
        for q in [0usize, 10, 20, 30, 40] {
            let back = error_to_phred(phred_to_error(q));
            assert!((back - q as f64).abs() < 1e-9, "q={q} back={back}");
        }
    }

    #[test]
    fn aggregate_quality_weights_error_probabilities() {
        let bases = [1, 1, 0, 0, 0];
        let mut quals = [0u64; NUM_QUALS];
        quals[10] = 1;
        quals[30] = 1;
        let row = CompositionRow::build(RowLabel::Total, &bases, &quals, 30, 2);
        // mean error (0.1 + 0.001) / 2 = 0.0505
        let expected = -10.0 * 0.0505f64.log10();
        assert!((row.aggregate_quality - expected).abs() < 1e-9);
        assert_eq!(row.base_percent, [50.0, 50.0, 0.0, 0.0, 0.0]);
        assert_eq!(row.qual_per_mille.len(), 31);
        assert_eq!(row.qual_per_mille[10], 500);
        assert_eq!(row.qual_per_mille[30], 500);
    }

    #[test]
    fn all_zero_quality_gives_zero_aggregate() {
        let bases = [0, 0, 0, 0, 3];
        let mut quals = [0u64; NUM_QUALS];
        quals[0] = 3;
        let row = CompositionRow::build(RowLabel::Base(1), &bases, &quals, 0, 3);
        assert_eq!(row.aggregate_quality, 0.0);
        assert_eq!(row.qual_per_mille, vec![1000]);
    }
}
