use crate::core::model::DEFAULT_MAX_LENGTH;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const USAGE: &str = "Usage:  kira-fastqcheck lane1.fastq   (or pipe FASTQ on stdin)";

#[derive(Parser)]
#[command(
    name = "kira-fastqcheck",
    version,
    about = "Reads a FASTQ file, validates it and prints per-cycle base and quality statistics"
)]
pub struct Cli {
    /// FASTQ input; standard input when omitted or `-`
    pub input: Option<PathBuf>,

    /// Longest read accepted before the run is aborted
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    #[arg(long, value_enum, default_value_t = PhredOffsetArg::P33)]
    pub phred_offset: PhredOffsetArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PhredOffsetArg {
    #[value(name = "33")]
    P33,
    #[value(name = "64")]
    P64,
}
