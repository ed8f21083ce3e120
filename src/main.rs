//! Thin binary: parses CLI arguments, loads ROM/TAP images, and drives
//! `oricust::Machine` either headlessly (frame-paced, no window) or,
//! behind the `display` feature, through a real `pixels`/`winit` window.
//! Mirrors `main()` in `original_source/oric.cpp`, which does the same
//! ROM load / reset / run dance before handing control to `Oric::Run`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use oricust::error::Result;
use oricust::machine::Machine;
use oricust::monitor::{self, State};

const FRAME_PERIOD: Duration = Duration::from_micros(20_000);

/// Cycle-driven Oric-1 / Atmos emulator.
#[derive(Parser, Debug)]
#[command(name = "oricust", about = "Oric-1/Atmos emulator core")]
struct Cli {
    /// BASIC ROM image, loaded at 0xC000.
    #[arg(long, default_value = "ROMS/basic11b.rom")]
    basic_rom: PathBuf,

    /// Character generator ROM image, loaded at 0xB400.
    #[arg(long, default_value = "ROMS/font.rom")]
    font_rom: PathBuf,

    /// Optional .tap file to attach before reset.
    #[arg(long)]
    tape: Option<PathBuf>,

    /// Start with CPU trace logging enabled (`log::trace!` per instruction).
    /// The monitor's `quiet`/`debug` commands toggle this at runtime.
    #[arg(long)]
    debug: bool,

    /// Open a real window instead of running headless (requires the
    /// `display` feature).
    #[arg(long)]
    display: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut machine = Machine::new();
    machine.load_rom(&cli.basic_rom, 0xC000)?;
    machine.load_rom(&cli.font_rom, 0xB400)?;
    if let Some(tape) = &cli.tape {
        machine.attach_tape(tape)?;
    }
    machine.reset();
    machine.cpu_mut().set_quiet(!cli.debug);

    if cli.display {
        return run_display(machine);
    }

    run_headless(machine)
}

#[cfg(feature = "display")]
fn run_display(machine: Machine) -> Result<()> {
    oricust::display::run(machine);
    Ok(())
}

#[cfg(not(feature = "display"))]
fn run_display(_machine: Machine) -> Result<()> {
    log::error!("built without the `display` feature; re-run with --features display");
    Ok(())
}

/// Headless run/monitor loop: paces frames to 50 Hz and drops into the
/// monitor REPL whenever BRK fires, mirroring `Oric::Run`'s state machine
/// without any window/event-pump dependency.
fn run_headless(mut machine: Machine) -> Result<()> {
    let mut state = State::Run;
    let mut last_command = String::new();
    let stdin = io::stdin();

    loop {
        state = match state {
            State::Run => {
                let frame_start = Instant::now();
                let brk = machine.run_frame()?;
                pace_frame(frame_start);
                if brk {
                    State::Monitor
                } else {
                    State::Run
                }
            }
            State::Monitor => {
                print!(">> ");
                io::stdout().flush().ok();
                let mut line = String::new();
                match stdin.lock().read_line(&mut line) {
                    Ok(0) => State::Quit,
                    Ok(_) => monitor::handle_command(&mut machine, &line, &mut last_command),
                    Err(_) => State::Quit,
                }
            }
            State::Quit => return Ok(()),
        };
    }
}

fn pace_frame(start: Instant) {
    let elapsed = start.elapsed();
    if elapsed < FRAME_PERIOD {
        std::thread::sleep(FRAME_PERIOD - elapsed);
    }
}
