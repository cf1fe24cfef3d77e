use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;

use bytewise::{
    config::{CliArgs, DemoConfig},
    util::{
        bits::{apply_mask, count_bits, fmt_bits, operand_width, round_up, MaskOp},
        format::{FmtRepeat, FmtRow},
    },
};

const LABEL_COLUMN: usize = 16;

fn op_label(op: MaskOp) -> &'static str {
    match op {
        MaskOp::Set => "Bitwise Set:",
        MaskOp::Clear => "Bitwise Clear:",
        MaskOp::Toggle => "Bitwise Toggle:",
    }
}

pub fn main_inner() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let config = DemoConfig::resolve(&args)?;
    log::debug!("Resolved config: {config:?}");

    let stdout = io::stdout();
    write_report(&mut stdout.lock(), &config).context("failed to write report")?;

    Ok(())
}

/// The row width for a config: wide enough for both operands and `min_width`, rounded up to
/// `pad_multiple`.
pub fn print_width(config: &DemoConfig) -> anyhow::Result<u32> {
    let widest = count_bits(config.mask)
        .max(count_bits(config.data))
        .max(config.min_width);

    Ok(round_up(widest, config.pad_multiple)?)
}

pub fn write_report(out: &mut impl Write, config: &DemoConfig) -> anyhow::Result<()> {
    let width = print_width(config)?;
    let min_length = width as usize;
    log::info!(
        "Printing {width} bits per row (mask: {}, data: {})",
        config.mask,
        config.data,
    );

    writeln!(out, "{}", FmtRepeat('-', LABEL_COLUMN + min_length))?;
    writeln!(
        out,
        "{}",
        FmtRow::new("User Mask:", LABEL_COLUMN, fmt_bits(config.mask, min_length)),
    )?;
    writeln!(
        out,
        "{}",
        FmtRow::new("User Data:", LABEL_COLUMN, fmt_bits(config.data, min_length)),
    )?;

    let op_width = operand_width(config.data, config.mask);

    for op in MaskOp::ALL {
        let result = apply_mask(op, config.data, config.mask, op_width);
        writeln!(
            out,
            "{}",
            FmtRow::new(op_label(op), LABEL_COLUMN, fmt_bits(result, min_length)),
        )?;
    }

    Ok(())
}
