use crate::cli::args::{Cli, PhredOffsetArg};
use crate::core::engine::{self, RunConfig};
use crate::core::model::PhredOffset;
use crate::core::stats::{self, fmt_dur, log_stage};
use crate::report;
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(args: Cli) -> Result<()> {
    let stats = stats::enabled();
    let t0 = Instant::now();

    let t_pre = Instant::now();
    if args.max_length == 0 {
        bail!("--max-length must be >= 1");
    }
    let phred_offset = match args.phred_offset {
        PhredOffsetArg::P33 => PhredOffset::Sanger,
        PhredOffsetArg::P64 => PhredOffset::Illumina15,
    };
    let config = RunConfig {
        input: args.input,
        max_length: args.max_length,
        phred_offset,
    };
    log_stage(stats, "preflight", t_pre);

    let t_engine = Instant::now();
    let output = engine::run(&config)?;
    log_stage(stats, "engine", t_engine);
    if stats {
        let bytes = output
            .input_bytes
            .map_or_else(|| "unknown".to_string(), |b| b.to_string());
        eprintln!(
            "KIRA_STATS input={} bytes={} lines={} reads={} bases={}",
            config.input_name(),
            bytes,
            output.lines,
            output.counters.total_reads,
            output.counters.total_bases
        );
    }

    let t_report = Instant::now();
    let metrics = output.counters.finalize();
    let stdout = io::stdout();
    let mut w = BufWriter::new(stdout.lock());
    report::check_txt::write(&mut w, &metrics).context("failed to write report")?;
    w.flush().context("failed to write report")?;
    log_stage(stats, "report", t_report);

    if stats {
        eprintln!("KIRA_STATS total={}", fmt_dur(t0.elapsed()));
    }

    Ok(())
}
