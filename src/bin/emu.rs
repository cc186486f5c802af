use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use clap_num::maybe_hex;
use log::LevelFilter;

use chip8_interp::{
    Chip8, Chip8Runner, Display, LogTracer, RunnerConfig, TickResult, u4,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DumpKind {
    Registers,
    Memory,
    Video,
}

fn parse_key(s: &str) -> Result<u4, String> {
    let value = maybe_hex::<u8>(s)?;
    u4::try_from(value).map_err(|value| format!("{value:#X} is not a keypad slot (0x0-0xF)"))
}

/// Headless CHIP-8 interpreter.
///
/// Runs a ROM for a fixed number of host ticks and prints the final frame.
/// Set RUST_LOG to control logging; --trace logs every instruction.
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Path to the CHIP-8 ROM file
    rom_path: PathBuf,

    /// Host ticks to run before stopping
    #[arg(short, long, default_value_t = 60)]
    ticks: usize,

    /// Instructions executed per tick
    #[arg(short, long, default_value_t = RunnerConfig::default().steps_per_tick)]
    steps_per_tick: usize,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Keypad slot (0x0-0xF) held down for the whole run, may be repeated
    #[arg(long = "hold", value_parser = parse_key)]
    hold: Vec<u4>,

    /// Log every executed instruction
    #[arg(long)]
    trace: bool,

    /// State to print after the run, may be repeated
    #[arg(long, value_enum)]
    dump: Vec<DumpKind>,

    /// Don't print the final frame
    #[arg(long)]
    no_frame: bool,
}

fn init_logging(trace: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if trace {
        builder.filter_module("chip8_interp", LevelFilter::Trace);
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.trace);

    let rom = std::fs::read(&args.rom_path)
        .with_context(|| format!("Failed to read ROM file {}", args.rom_path.display()))?;

    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };
    chip8
        .load(&rom)
        .context("Failed to load ROM into CHIP-8 memory")?;

    if args.trace {
        chip8.set_tracer(LogTracer);
    }
    for &key in &args.hold {
        chip8.keypad_mut().press(key);
    }

    let config = RunnerConfig {
        steps_per_tick: args.steps_per_tick,
    };
    let mut runner = Chip8Runner::new(chip8, config);

    let mut frames = 0usize;
    let mut screen = |_: &Display<u8>| frames += 1;
    let mut ticks = 0;
    while ticks < args.ticks {
        ticks += 1;
        if runner.tick(&mut screen) == TickResult::Stopped {
            break;
        }
    }

    log::info!(
        "ran {ticks} ticks, {frames} repaints, {} unknown opcodes",
        runner.unknown_opcodes()
    );

    let chip8 = runner.chip8_ref();
    if !args.no_frame {
        print!("{}", chip8.dump_video());
    }
    for kind in &args.dump {
        match kind {
            DumpKind::Registers => print!("{}", chip8.dump_registers()),
            DumpKind::Memory => print!("{}", chip8.dump_memory()),
            DumpKind::Video => print!("{}", chip8.dump_video()),
        }
    }

    Ok(())
}
