//! MOS 6522 Versatile Interface Adapter.
//!
//! Multiplexes keyboard row/column selection, AY-3-8912 control lines,
//! tape handshake (CB1) and the two interval timers behind a 16-register
//! window (spec §4.3). The VIA knows nothing about the PSG or the tape
//! deck directly — it only exposes its handshake line state and an event
//! struct from `step`; the machine loop (the sole owner of every
//! component) forwards those events to the PSG and reads CB1 pulses from
//! the tape deck. This keeps the VIA free of the callback-graph cycle the
//! original C++ implementation had (Design Notes, "callback graph").

/// Register index space, matching the canonical table in SPEC_FULL.md.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Reg {
    Orb = 0x0,
    Ora = 0x1,
    Ddrb = 0x2,
    Ddra = 0x3,
    T1CLo = 0x4,
    T1CHi = 0x5,
    T1LLo = 0x6,
    T1LHi = 0x7,
    T2CLo = 0x8,
    T2CHi = 0x9,
    Sr = 0xA,
    Acr = 0xB,
    Pcr = 0xC,
    Ifr = 0xD,
    Ier = 0xE,
    IoRa2 = 0xF,
}

impl Reg {
    fn from_index(i: u8) -> Reg {
        match i & 0x0F {
            0x0 => Reg::Orb,
            0x1 => Reg::Ora,
            0x2 => Reg::Ddrb,
            0x3 => Reg::Ddra,
            0x4 => Reg::T1CLo,
            0x5 => Reg::T1CHi,
            0x6 => Reg::T1LLo,
            0x7 => Reg::T1LHi,
            0x8 => Reg::T2CLo,
            0x9 => Reg::T2CHi,
            0xA => Reg::Sr,
            0xB => Reg::Acr,
            0xC => Reg::Pcr,
            0xD => Reg::Ifr,
            0xE => Reg::Ier,
            _ => Reg::IoRa2,
        }
    }
}

/// IFR/IER bit layout (GLOSSARY).
pub mod irq_bits {
    pub const CA2: u8 = 1 << 0;
    pub const CA1: u8 = 1 << 1;
    pub const SR: u8 = 1 << 2;
    pub const CB2: u8 = 1 << 3;
    pub const CB1: u8 = 1 << 4;
    pub const T2: u8 = 1 << 5;
    pub const T1: u8 = 1 << 6;
    pub const ANY: u8 = 1 << 7;
}

/// Handshake-line and timer-underflow events produced by a single `step`,
/// for the machine loop to forward to the PSG (CA2 -> PSG BC1, CB2 -> PSG
/// BDIR) and the CPU (IRQ line).
#[derive(Copy, Clone, Debug, Default)]
pub struct ViaEvents {
    /// `Some(level)` when CA2 changed during this step.
    pub ca2: Option<bool>,
    /// `Some(level)` when CB2 changed during this step.
    pub cb2: Option<bool>,
}

pub struct Via {
    ora: u8,
    orb: u8,
    ira: u8,
    irb: u8,
    ddra: u8,
    ddrb: u8,

    t1c: i32,
    t1_latch_lo: u8,
    t1_latch_hi: u8,
    t1_run: bool,

    t2c: i32,
    t2_latch_lo: u8,
    t2_latch_hi: u8,
    t2_run: bool,

    sr: u8,
    acr: u8,
    pcr: u8,
    ifr: u8,
    ier: u8,

    ca1: bool,
    ca2: bool,
    ca2_pulse_pending: bool,
    cb1: bool,
    cb2: bool,
    cb2_pulse_pending: bool,
}

const PCR_CA1_POSITIVE_EDGE: u8 = 0x01;
// CA2 mode occupies PCR bits 1..3 (three bits); CB2 mode occupies bits 5..7.
const PCR_CA2_MODE_MASK: u8 = 0x0E;
const PCR_CB1_POSITIVE_EDGE: u8 = 0x10;
const PCR_CB2_MODE_MASK: u8 = 0xE0;

impl Default for Via {
    fn default() -> Self {
        Self::new()
    }
}

impl Via {
    pub fn new() -> Self {
        Self {
            ora: 0,
            orb: 0,
            ira: 0,
            irb: 0,
            ddra: 0,
            ddrb: 0,
            t1c: 0,
            t1_latch_lo: 0,
            t1_latch_hi: 0,
            t1_run: false,
            t2c: 0,
            t2_latch_lo: 0,
            t2_latch_hi: 0,
            t2_run: false,
            sr: 0,
            acr: 0,
            pcr: 0,
            ifr: 0,
            ier: 0,
            ca1: false,
            ca2: false,
            ca2_pulse_pending: false,
            cb1: false,
            cb2: false,
            cb2_pulse_pending: false,
        }
    }

    // -------------------------------------------------------------
    // Interrupt flag composition
    // -------------------------------------------------------------

    #[inline]
    fn recompute_any(&mut self) {
        if (self.ifr & self.ier) & 0x7F != 0 {
            self.ifr |= irq_bits::ANY;
        } else {
            self.ifr &= !irq_bits::ANY;
        }
    }

    fn irq_set(&mut self, bits: u8) {
        self.ifr |= bits;
        self.recompute_any();
    }

    fn irq_clear(&mut self, bits: u8) {
        self.ifr &= !bits;
        self.recompute_any();
    }

    /// Whether the CPU's IRQ line is asserted (spec §2: bit 7 of IFR).
    #[inline]
    pub fn irq_asserted(&self) -> bool {
        self.ifr & irq_bits::ANY != 0
    }

    // -------------------------------------------------------------
    // Register I/O
    // -------------------------------------------------------------

    pub fn read(&mut self, index: u8) -> u8 {
        match Reg::from_index(index) {
            Reg::Orb => {
                self.irq_clear(irq_bits::CB1);
                match self.pcr & PCR_CB2_MODE_MASK {
                    0x00 | 0x40 => self.irq_clear(irq_bits::CB2),
                    0x80 => self.set_cb2(false),
                    0xA0 => {
                        self.set_cb2(false);
                        self.cb2_pulse_pending = true;
                    }
                    _ => {}
                }
                (self.orb & self.ddrb) | (self.irb & !self.ddrb)
            }
            Reg::Ora | Reg::IoRa2 => {
                if matches!(Reg::from_index(index), Reg::Ora) {
                    self.irq_clear(irq_bits::CA1);
                    match self.pcr & PCR_CA2_MODE_MASK {
                        0x00 | 0x04 => self.irq_clear(irq_bits::CA2),
                        0x08 => self.set_ca2(false),
                        0x0A => {
                            self.set_ca2(false);
                            self.ca2_pulse_pending = true;
                        }
                        _ => {}
                    }
                }
                (self.ora & self.ddra) | (self.ira & !self.ddra)
            }
            Reg::Ddrb => self.ddrb,
            Reg::Ddra => self.ddra,
            Reg::T1CLo => {
                self.irq_clear(irq_bits::T1);
                (self.t1c & 0x00FF) as u8
            }
            Reg::T1CHi => ((self.t1c >> 8) & 0xFF) as u8,
            Reg::T1LLo => self.t1_latch_lo,
            Reg::T1LHi => self.t1_latch_hi,
            Reg::T2CLo => {
                self.irq_clear(irq_bits::T2);
                (self.t2c & 0x00FF) as u8
            }
            Reg::T2CHi => ((self.t2c >> 8) & 0xFF) as u8,
            Reg::Sr => {
                self.irq_clear(irq_bits::SR);
                self.sr
            }
            Reg::Acr => self.acr,
            Reg::Pcr => self.pcr,
            Reg::Ifr => self.ifr,
            Reg::Ier => self.ier | irq_bits::ANY,
        }
    }

    pub fn write(&mut self, index: u8, value: u8) {
        match Reg::from_index(index) {
            Reg::Orb => {
                self.orb = value;
                self.irq_clear(irq_bits::CB1);
                match self.pcr & PCR_CB2_MODE_MASK {
                    0x00 | 0x40 => self.irq_clear(irq_bits::CB2),
                    0x80 => self.set_cb2(false),
                    0xA0 => {
                        self.set_cb2(false);
                        self.cb2_pulse_pending = true;
                    }
                    _ => {}
                }
            }
            Reg::Ora => {
                self.ora = value;
                self.irq_clear(irq_bits::CA1);
                match self.pcr & PCR_CA2_MODE_MASK {
                    0x00 | 0x04 => self.irq_clear(irq_bits::CA2),
                    0x08 => self.set_ca2(false),
                    0x0A => {
                        self.set_ca2(false);
                        self.ca2_pulse_pending = true;
                    }
                    _ => {}
                }
            }
            Reg::IoRa2 => self.ora = value,
            Reg::Ddrb => self.ddrb = value,
            Reg::Ddra => self.ddra = value,
            Reg::T1CLo => self.t1_latch_lo = value,
            Reg::T1CHi => {
                self.t1_latch_hi = value;
                self.t1c = ((self.t1_latch_hi as i32) << 8) | self.t1_latch_lo as i32;
                self.t1_run = true;
                self.irq_clear(irq_bits::T1);
            }
            Reg::T1LLo => self.t1_latch_lo = value,
            Reg::T1LHi => {
                self.t1_latch_hi = value;
                self.irq_clear(irq_bits::T1);
            }
            Reg::T2CLo => self.t2_latch_lo = value,
            Reg::T2CHi => {
                self.t2_latch_hi = value;
                self.t2c = ((self.t2_latch_hi as i32) << 8) | self.t2_latch_lo as i32;
                self.t2_run = true;
                self.irq_clear(irq_bits::T2);
            }
            Reg::Sr => {
                self.sr = value;
                self.irq_clear(irq_bits::SR);
            }
            Reg::Acr => self.acr = value,
            Reg::Pcr => {
                self.pcr = value;
                // Manual output modes take effect immediately.
                if self.pcr & 0x0C == 0x0C {
                    self.set_ca2(self.pcr & 0x02 != 0);
                }
                if self.pcr & 0xC0 == 0xC0 {
                    self.set_cb2(self.pcr & 0x20 != 0);
                }
            }
            Reg::Ifr => {
                self.ifr &= (!value) & 0x7F;
                self.recompute_any();
            }
            Reg::Ier => {
                if value & 0x80 != 0 {
                    self.ier |= value & 0x7F;
                } else {
                    self.ier &= !(value & 0x7F);
                }
                self.recompute_any();
            }
        }
    }

    /// ORA as seen on the shared data bus, with no side effects — the
    /// read the PSG performs when BDIR rises (spec §4.4: "a pure function
    /// of the VIA's ORA").
    #[inline]
    pub fn ora_bus(&self) -> u8 {
        (self.ora & self.ddra) | (self.ira & !self.ddra)
    }

    #[inline]
    pub fn orb_raw(&self) -> u8 {
        (self.orb & self.ddrb) | (self.irb & !self.ddrb)
    }

    #[inline]
    pub fn ddra(&self) -> u8 {
        self.ddra
    }

    #[inline]
    pub fn ddrb(&self) -> u8 {
        self.ddrb
    }

    #[inline]
    pub fn acr(&self) -> u8 {
        self.acr
    }

    #[inline]
    pub fn pcr(&self) -> u8 {
        self.pcr
    }

    #[inline]
    pub fn ifr(&self) -> u8 {
        self.ifr
    }

    #[inline]
    pub fn ier(&self) -> u8 {
        self.ier | irq_bits::ANY
    }

    /// Set or clear bit 3 of IRB, used by the machine loop to reflect the
    /// keyboard matrix's row-match result (spec §6 Keyboard).
    pub fn set_irb_bit3(&mut self, set: bool) {
        if set {
            self.irb |= 1 << 3;
        } else {
            self.irb &= !(1 << 3);
        }
    }

    // -------------------------------------------------------------
    // Timers and handshake pulses
    // -------------------------------------------------------------

    /// Advance the VIA by `cycles` CPU cycles. Ordering per spec §5:
    /// honor pending CA2/CB2 pulses first, then decrement both timers,
    /// then evaluate underflows.
    pub fn step(&mut self, cycles: u32) -> ViaEvents {
        let mut events = ViaEvents::default();

        if self.ca2_pulse_pending {
            self.ca2 = true;
            self.ca2_pulse_pending = false;
            events.ca2 = Some(true);
        }
        if self.cb2_pulse_pending {
            self.cb2 = true;
            self.cb2_pulse_pending = false;
            events.cb2 = Some(true);
        }

        let c = cycles as i32;

        self.t1c -= c;
        if self.t1c < 0 {
            match self.acr & 0xC0 {
                0x00 | 0x80 => {
                    if self.t1_run {
                        self.irq_set(irq_bits::T1);
                        self.t1_run = false;
                    }
                    self.t1c &= 0xFFFF;
                }
                _ => {
                    if self.t1_run {
                        self.irq_set(irq_bits::T1);
                    }
                    self.t1c += ((self.t1_latch_hi as i32) << 8 | self.t1_latch_lo as i32) + 2;
                }
            }
        }

        self.t2c -= c;
        if self.t2c < 0 {
            if self.t2_run {
                self.irq_set(irq_bits::T2);
                self.t2_run = false;
            }
            self.t2c &= 0xFFFF;
        }

        events
    }

    // -------------------------------------------------------------
    // Handshake line inputs
    // -------------------------------------------------------------

    fn set_ca2(&mut self, level: bool) {
        self.ca2 = level;
    }

    fn set_cb2(&mut self, level: bool) {
        self.cb2 = level;
    }

    pub fn write_ca1(&mut self, level: bool) {
        if self.ca1 == level {
            return;
        }
        self.ca1 = level;
        let positive_edge_selected = self.pcr & PCR_CA1_POSITIVE_EDGE != 0;
        if level == positive_edge_selected {
            self.irq_set(irq_bits::CA1);
            if !self.ca2 && (self.pcr & PCR_CA2_MODE_MASK) == 0x08 {
                self.set_ca2(true);
            }
        }
    }

    pub fn write_ca2(&mut self, level: bool) {
        if self.ca2 == level {
            return;
        }
        self.ca2 = level;
        if (level && (self.pcr & 0x0C) == 0x04) || (!level && (self.pcr & 0x0C) == 0x00) {
            self.irq_set(irq_bits::CA2);
        }
    }

    pub fn write_cb1(&mut self, level: bool) {
        if self.cb1 == level {
            return;
        }
        self.cb1 = level;
        let positive_edge_selected = self.pcr & PCR_CB1_POSITIVE_EDGE != 0;
        if level == positive_edge_selected {
            self.irq_set(irq_bits::CB1);
            if !self.cb2 && (self.pcr & PCR_CB2_MODE_MASK) == 0x80 {
                self.set_cb2(true);
            }
        }
    }

    /// Fixed per REDESIGN FLAGS: the original's `WriteCB2` tested `!ca2`
    /// where it meant `!cb2`. This implementation is the intended,
    /// CA2-symmetric behavior.
    pub fn write_cb2(&mut self, level: bool) {
        if self.cb2 == level {
            return;
        }
        self.cb2 = level;
        if (level && (self.pcr & 0xC0) == 0x40) || (!level && (self.pcr & 0xC0) == 0x00) {
            self.irq_set(irq_bits::CB2);
        }
    }

    pub fn ca2(&self) -> bool {
        self.ca2
    }

    pub fn cb2(&self) -> bool {
        self.cb2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orb_round_trips_with_ddrb_all_outputs() {
        let mut via = Via::new();
        via.write(Reg::Ddrb as u8, 0xFF);
        via.write(Reg::Orb as u8, 0x5A);
        assert_eq!(via.read(Reg::Orb as u8), 0x5A);
    }

    #[test]
    fn t1_latch_and_load() {
        let mut via = Via::new();
        via.write(Reg::T1CLo as u8, 0x34);
        via.write(Reg::T1CHi as u8, 0x12);
        assert_eq!(via.read(Reg::T1LLo as u8), 0x34);
        assert_eq!(via.read(Reg::T1LHi as u8), 0x12);
        assert_eq!(via.t1c, 0x1234);
    }

    #[test]
    fn ier_bit7_set_clear_semantics() {
        let mut via = Via::new();
        via.write(Reg::Ier as u8, 0x80 | irq_bits::T1 | irq_bits::CA1);
        assert_eq!(via.read(Reg::Ier as u8) & 0x7F, irq_bits::T1 | irq_bits::CA1);
        via.write(Reg::Ier as u8, irq_bits::CA1); // bit7=0: clear CA1 only
        assert_eq!(via.read(Reg::Ier as u8) & 0x7F, irq_bits::T1);
        assert_eq!(via.read(Reg::Ier as u8) & 0x80, 0x80);
    }

    #[test]
    fn ifr_write_clears_set_bits_and_recomputes_any() {
        let mut via = Via::new();
        via.write(Reg::Ier as u8, 0x80 | irq_bits::T1);
        via.irq_set(irq_bits::T1);
        assert_ne!(via.read(Reg::Ifr as u8) & irq_bits::ANY, 0);
        via.write(Reg::Ifr as u8, irq_bits::T1);
        assert_eq!(via.read(Reg::Ifr as u8), 0);
    }

    #[test]
    fn timer1_continuous_underflow_reloads() {
        let mut via = Via::new();
        via.write(Reg::Acr as u8, 0x40); // continuous
        via.write(Reg::T1LLo as u8, 0x05);
        via.write(Reg::T1LHi as u8, 0x00);
        via.write(Reg::T1CHi as u8, 0x00); // load counter to 5
        let events = via.step(10);
        let _ = events;
        assert_ne!(via.read(Reg::Ifr as u8) & irq_bits::T1, 0);
        assert_eq!(via.t1c, (5 + 2) - (10 - 5));
    }

    #[test]
    fn timer2_one_shot_does_not_reload() {
        let mut via = Via::new();
        via.write(Reg::T2CLo as u8, 0x02);
        via.write(Reg::T2CHi as u8, 0x00);
        via.step(5);
        assert_ne!(via.read(Reg::Ifr as u8) & irq_bits::T2, 0);
        // Stepping again must not raise IRQ_T2 again (t2_run cleared).
        via.write(Reg::Ifr as u8, irq_bits::T2);
        via.step(1);
        assert_eq!(via.read(Reg::Ifr as u8) & irq_bits::T2, 0);
    }

    #[test]
    fn ca2_pulse_mode_goes_low_then_high() {
        let mut via = Via::new();
        via.write(Reg::Pcr as u8, 0x0A); // CA2 = pulse mode
        via.read(Reg::Ora as u8);
        assert!(!via.ca2());
        let events = via.step(1);
        assert_eq!(events.ca2, Some(true));
        assert!(via.ca2());
    }
}
