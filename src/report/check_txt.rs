use crate::core::metrics::{CompositionRow, FinalMetrics, RowLabel};
use anyhow::Result;
use std::io::Write;

const BASE_COLUMNS: &str = "            A    C    G    T    N ";

pub fn write(w: &mut dyn Write, metrics: &FinalMetrics) -> Result<()> {
    write_summary(w, metrics)?;
    let (Some(dev), Some(total)) = (&metrics.deviations, &metrics.total) else {
        return Ok(());
    };

    writeln!(
        w,
        "Standard deviations at 0.25:  total {:5.2} %, per base {:5.2} %",
        dev.total, dev.per_base
    )?;
    write_header(w, metrics.max_qual)?;
    write_row(w, total)?;
    for row in &metrics.per_base {
        write_row(w, row)?;
    }
    Ok(())
}

pub fn render(metrics: &FinalMetrics) -> Result<String> {
    let mut buf = Vec::new();
    write(&mut buf, metrics)?;
    Ok(String::from_utf8(buf)?)
}

fn write_summary(w: &mut dyn Write, metrics: &FinalMetrics) -> Result<()> {
    let basic = &metrics.basic;
    write!(
        w,
        "{} sequences, {} total length",
        basic.total_sequences, basic.total_length
    )?;
    if let Some(avg) = basic.average_len {
        write!(w, ", {:.2} average, {} max", avg, basic.max_len)?;
    }
    writeln!(w)?;
    Ok(())
}

fn write_header(w: &mut dyn Write, max_qual: u8) -> Result<()> {
    write!(w, "{}", BASE_COLUMNS)?;
    for q in 0..=max_qual {
        write!(w, " {:3}", q)?;
    }
    writeln!(w, " AQ")?;
    Ok(())
}

fn write_row(w: &mut dyn Write, row: &CompositionRow) -> Result<()> {
    match row.label {
        RowLabel::Total => write!(w, "Total  ")?,
        RowLabel::Base(pos) => write!(w, "base {:2}", pos)?,
    }
    write!(w, " ")?;
    for pct in row.base_percent {
        write!(w, " {:4.1}", pct)?;
    }
    write!(w, " ")?;
    for v in &row.qual_per_mille {
        write!(w, " {:3}", v)?;
    }
    writeln!(w, " {:4.1}", row.aggregate_quality)?;
    Ok(())
}
