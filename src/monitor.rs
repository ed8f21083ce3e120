//! Line-oriented debugger REPL, command-for-command with `Oric::HandleCommand`
//! in `original_source/oric.cpp`: `h`, `g`, `pc <hex>`, `s [n]`, `i`, `v`,
//! `m <addr> <len>`, `quiet`, `debug`, `q` (spec §6 "Monitor CLI").
//!
//! This module only decides *what a command means*; reading the line and
//! driving the run/monitor state machine is `main.rs`'s job, the same
//! split the original has between `Oric::Run` (state machine) and
//! `Oric::HandleCommand` (command interpreter).

use crate::machine::Machine;

/// The monitor's run/stop state, mirroring `Oric::State`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Run,
    Monitor,
    Quit,
}

const HELP_TEXT: &str = "\
Available monitor commands:

h              : help (showing this text)
g              : resume running
pc <address>   : set program counter to address
s [n]          : step one or possible n instructions
i              : print CPU info
v              : print VIA info
m <address> <n>: dump memory from address and n bytes ahead
quiet          : prevent trace output at run time
debug          : show trace output at run time
q              : quit
";

/// Parse and apply one command line, returning the monitor's next state.
/// An empty line repeats `last_command`, exactly as the original does
/// (`if a_Line.length() == 0 { a_Line = m_LastCommand }`).
pub fn handle_command(machine: &mut Machine, line: &str, last_command: &mut String) -> State {
    let line = if line.trim().is_empty() {
        last_command.clone()
    } else {
        *last_command = line.to_string();
        line.to_string()
    };

    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return State::Monitor;
    };

    match cmd {
        "h" => {
            print!("{HELP_TEXT}");
            State::Monitor
        }
        "g" => State::Run,
        "pc" => {
            match parts.next().and_then(|a| u16::from_str_radix(a, 16).ok()) {
                Some(addr) => {
                    machine.cpu_mut().set_pc(addr);
                    print_cpu_info(machine);
                }
                None => println!("Error: missing or invalid address"),
            }
            State::Monitor
        }
        "s" => {
            match parts.next().and_then(|n| n.parse::<u32>().ok()) {
                Some(n) => {
                    for _ in 0..n {
                        if let Err(e) = machine.step_instruction() {
                            println!("error: {e}");
                            break;
                        }
                    }
                }
                None => match machine.step_instruction() {
                    Ok(_) => {
                        if machine.cpu_mut().take_brk_fired() {
                            println!("Instruction BRK executed.");
                        }
                    }
                    Err(e) => println!("error: {e}"),
                },
            }
            State::Monitor
        }
        "i" => {
            print_cpu_info(machine);
            State::Monitor
        }
        "v" => {
            print_via_info(machine);
            State::Monitor
        }
        "m" => {
            let addr = parts.next().and_then(|a| u16::from_str_radix(a, 16).ok());
            let len = parts.next().and_then(|a| a.parse::<u16>().ok());
            match (addr, len) {
                (Some(addr), Some(len)) => print_memory_dump(machine, addr, len),
                _ => println!("Use: m <start address> <length>"),
            }
            State::Monitor
        }
        "quiet" => {
            machine.cpu_mut().set_quiet(true);
            println!("Quiet mode enabled");
            State::Monitor
        }
        "debug" => {
            machine.cpu_mut().set_quiet(false);
            println!("Debug mode enabled");
            State::Monitor
        }
        "q" => {
            println!("quit");
            State::Quit
        }
        other => {
            println!("unknown command: {other}");
            State::Monitor
        }
    }
}

fn print_cpu_info(machine: &Machine) {
    let cpu = machine.cpu();
    println!(
        "PC=0x{:04X} A=0x{:02X} X=0x{:02X} Y=0x{:02X} SP=0x{:02X} P=0x{:02X} cycles={}",
        cpu.pc(),
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.sp(),
        cpu.status(),
        cpu.cycles()
    );
}

fn print_via_info(machine: &Machine) {
    let via = machine.via();
    println!(
        "ORA=0x{:02X} ORB=0x{:02X} DDRA=0x{:02X} DDRB=0x{:02X} ACR=0x{:02X} PCR=0x{:02X} IFR=0x{:02X} IER=0x{:02X}",
        via.ora_bus(),
        via.orb_raw(),
        via.ddra(),
        via.ddrb(),
        via.acr(),
        via.pcr(),
        via.ifr(),
        via.ier(),
    );
}

fn print_memory_dump(machine: &Machine, addr: u16, len: u16) {
    let mem = machine.memory();
    for row_start in (0..len).step_by(16) {
        print!("{:04X}: ", addr.wrapping_add(row_start));
        for col in 0..16u16 {
            if col >= len - row_start {
                break;
            }
            print!("{:02X} ", mem.peek(addr.wrapping_add(row_start + col)));
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_repeats_last_command() {
        let mut machine = Machine::new();
        let mut last = "i".to_string();
        let state = handle_command(&mut machine, "", &mut last);
        assert_eq!(state, State::Monitor);
        assert_eq!(last, "i");
    }

    #[test]
    fn go_resumes_run_state() {
        let mut machine = Machine::new();
        let mut last = String::new();
        assert_eq!(handle_command(&mut machine, "g", &mut last), State::Run);
    }

    #[test]
    fn quit_returns_quit_state() {
        let mut machine = Machine::new();
        let mut last = String::new();
        assert_eq!(handle_command(&mut machine, "q", &mut last), State::Quit);
    }

    #[test]
    fn pc_command_sets_program_counter() {
        let mut machine = Machine::new();
        let mut last = String::new();
        handle_command(&mut machine, "pc c000", &mut last);
        assert_eq!(machine.cpu().pc(), 0xC000);
    }
}
