use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use dxil_disasm::{DisasmConfig, Disassembler};

#[derive(Parser, Debug)]
#[command(
    name = "dxil-disasm",
    version,
    about = "Disassemble a DXIL shader container into a text report."
)]
struct Args {
    /// Container, bare program or raw bitcode to disassemble
    input: PathBuf,

    /// Also write the report to this file
    output: Option<PathBuf>,

    /// Character that starts each report line
    #[arg(long, value_name = "CHAR", default_value_t = ';')]
    comment: char,

    /// Load the DXIL part even when the container has an ILDB debug part
    #[arg(long, action = clap::ArgAction::SetTrue)]
    no_debug_bitcode: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // Usage errors exit 1, not clap's 2; help and version exit 0.
            process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = real_main(args) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn real_main(args: Args) -> anyhow::Result<()> {
    let input = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let config = DisasmConfig {
        comment: args.comment,
        prefer_debug_bitcode: !args.no_debug_bitcode,
    };
    let report = Disassembler::new(config)
        .disassemble(&input)
        .with_context(|| format!("failed to disassemble {}", args.input.display()))?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(report.as_bytes())
        .context("failed to write report to stdout")?;
    stdout.flush().context("failed to flush stdout")?;

    if let Some(output) = &args.output {
        fs::write(output, &report)
            .with_context(|| format!("failed to write {}", output.display()))?;
    }
    Ok(())
}
