pub struct BasicStats {
    pub total_sequences: u64,
    pub total_length: u64,
    /// Present only when at least one sequence was read.
    pub average_len: Option<f64>,
    pub max_len: usize,
}

/// Binomial standard errors at p = 0.25, as percentages.
pub struct Deviations {
    pub total: f64,
    pub per_base: f64,
}

impl Deviations {
    pub fn at_quarter(total_bases: u64, total_reads: u64) -> Self {
        Self {
            total: binomial_sd_percent(total_bases),
            per_base: binomial_sd_percent(total_reads),
        }
    }
}

fn binomial_sd_percent(n: u64) -> f64 {
    let n = n as f64;
    100.0 * ((0.25 * n).sqrt() / n)
}

/// Mean read length, computed in single precision like fastqcheck.
pub fn average_len(total_bases: u64, total_reads: u64) -> f64 {
    (total_bases as f32 / total_reads as f32) as f64
}
