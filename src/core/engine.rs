use crate::core::error::CheckError;
use crate::core::fastq::FastqReader;
use crate::core::io::InputSource;
use crate::core::metrics::Counters;
use crate::core::model::PhredOffset;
use crate::core::stats::{self, log_stage};
use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

pub struct RunConfig {
    /// `None` reads standard input.
    pub input: Option<PathBuf>,
    pub max_length: usize,
    pub phred_offset: PhredOffset,
}

impl RunConfig {
    pub fn input_name(&self) -> String {
        match &self.input {
            Some(p) if p.as_os_str() != "-" => p.display().to_string(),
            _ => "stdin".to_string(),
        }
    }
}

pub struct RunOutput {
    pub counters: Counters,
    pub lines: u64,
    pub input_bytes: Option<usize>,
}

pub fn run(cfg: &RunConfig) -> Result<RunOutput> {
    let stats = stats::enabled();
    let t_total = Instant::now();

    let t_open = Instant::now();
    let mut input = InputSource::open(cfg.input.as_deref())?;
    log_stage(stats, "engine.input_open", t_open);
    let input_bytes = input.len_hint();

    let t_decode = Instant::now();
    let mut output = check_reader(input.reader(), cfg)
        .with_context(|| format!("failed to check {}", cfg.input_name()))?;
    output.input_bytes = input_bytes;
    log_stage(stats, "engine.decode", t_decode);
    log_stage(stats, "engine.total", t_total);

    Ok(output)
}

/// Decodes every record from `reader` and folds it into fresh counters.
/// Stops at the first error; no partial counters are returned.
pub fn check_reader<R: BufRead>(reader: R, cfg: &RunConfig) -> Result<RunOutput, CheckError> {
    let mut reader = FastqReader::new(reader, cfg.phred_offset.value());
    let mut counters = Counters::new(cfg.max_length);
    while let Some(record) = reader.next_record()? {
        counters.update_read(&record)?;
    }
    Ok(RunOutput {
        counters,
        lines: reader.lines_read(),
        input_bytes: None,
    })
}
