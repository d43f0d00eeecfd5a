use crate::core::error::CheckError;
use crate::core::fastq::FastqRecord;
use crate::core::model::{BaseHist, NUM_BASES, NUM_QUALS, QualHist};

mod basic;
mod per_base;

pub use basic::{BasicStats, Deviations};
pub use per_base::{CompositionRow, RowLabel};

/// Running totals for one pass over the input.
///
/// Per-position rows grow on demand to the longest read seen, bounded by
/// `max_length`.
#[derive(Clone, Debug)]
pub struct Counters {
    pub max_length: usize,
    pub total_reads: u64,
    pub total_bases: u64,
    pub max_len: usize,
    pub max_qual: u8,
    pub base_counts: BaseHist,
    pub qual_counts: QualHist,
    pub per_pos_base: Vec<BaseHist>,
    pub per_pos_qual: Vec<QualHist>,
    /// Reads by exact length, indexed `0..=max_len`.
    pub length_hist: Vec<u64>,
}

pub struct FinalMetrics {
    pub basic: BasicStats,
    pub max_qual: u8,
    /// Empty when no bases were read.
    pub deviations: Option<Deviations>,
    pub total: Option<CompositionRow>,
    pub per_base: Vec<CompositionRow>,
}

impl Counters {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            total_reads: 0,
            total_bases: 0,
            max_len: 0,
            max_qual: 0,
            base_counts: [0u64; NUM_BASES],
            qual_counts: [0u64; NUM_QUALS],
            per_pos_base: Vec::new(),
            per_pos_qual: Vec::new(),
            length_hist: Vec::new(),
        }
    }

    /// Folds one record into the counters. A record over capacity leaves
    /// every counter untouched.
    pub fn update_read(&mut self, read: &FastqRecord) -> Result<(), CheckError> {
        let len = read.len();
        if len > self.max_length {
            return Err(CheckError::RecordTooLong {
                id: read.id.clone(),
                length: len,
                max: self.max_length,
            });
        }

        if self.per_pos_base.len() < len {
            self.per_pos_base.resize(len, [0u64; NUM_BASES]);
        }
        if self.per_pos_qual.len() < len {
            self.per_pos_qual.resize(len, [0u64; NUM_QUALS]);
        }
        if self.length_hist.len() <= len {
            self.length_hist.resize(len + 1, 0);
        }

        for (i, (&base, &q)) in read.seq.iter().zip(read.qual.iter()).enumerate() {
            let b = base.index();
            self.base_counts[b] += 1;
            self.per_pos_base[i][b] += 1;
            self.qual_counts[q as usize] += 1;
            self.per_pos_qual[i][q as usize] += 1;
            if q > self.max_qual {
                self.max_qual = q;
            }
        }

        self.total_reads += 1;
        self.total_bases += len as u64;
        self.length_hist[len] += 1;
        if len > self.max_len {
            self.max_len = len;
        }
        Ok(())
    }

    /// Number of reads long enough to have a base at each position
    /// `0..max_len`.
    pub fn reads_covering(&self) -> Vec<u64> {
        let mut remaining = self.total_reads;
        let mut out = Vec::with_capacity(self.max_len);
        for i in 0..self.max_len {
            remaining -= self.length_hist[i];
            out.push(remaining);
        }
        out
    }

    pub fn finalize(&self) -> FinalMetrics {
        let basic = BasicStats {
            total_sequences: self.total_reads,
            total_length: self.total_bases,
            average_len: if self.total_reads == 0 {
                None
            } else {
                Some(basic::average_len(self.total_bases, self.total_reads))
            },
            max_len: self.max_len,
        };

        if self.total_bases == 0 {
            return FinalMetrics {
                basic,
                max_qual: self.max_qual,
                deviations: None,
                total: None,
                per_base: Vec::new(),
            };
        }

        let deviations = Deviations::at_quarter(self.total_bases, self.total_reads);
        let total = CompositionRow::build(
            RowLabel::Total,
            &self.base_counts,
            &self.qual_counts,
            self.max_qual,
            self.total_bases,
        );

        // The longest read covers every position below max_len, so the
        // denominator is never zero here.
        let mut per_base = Vec::with_capacity(self.max_len);
        for (i, remaining) in self.reads_covering().into_iter().enumerate() {
            per_base.push(CompositionRow::build(
                RowLabel::Base(i + 1),
                &self.per_pos_base[i],
                &self.per_pos_qual[i],
                self.max_qual,
                remaining,
            ));
        }

        FinalMetrics {
            basic,
            max_qual: self.max_qual,
            deviations: Some(deviations),
            total: Some(total),
            per_base,
        }
    }
}
