use std::fmt;

use crate::addressing_mode::OperandSize;

/*
 * Sfera-36 registers
 * R0 to R7 are 16 bits general purpose registers, R7 is the program counter.
 * processor status word (low byte only):
 * bit 4: Trace flag
 * bit 3: Negative flag
 * bit 2: Zero flag
 * bit 1: oVerflow flag
 * bit 0: Carry flag
 * bits 7 to 5 are not used by the instruction set but they are stored.
 */
pub const REGISTERS_COUNT: usize = 8;
pub const PC: usize = 7;

const C_FLAG: u8 = 0b00000001;
const V_FLAG: u8 = 0b00000010;
const Z_FLAG: u8 = 0b00000100;
const N_FLAG: u8 = 0b00001000;
const T_FLAG: u8 = 0b00010000;

#[derive(Clone, PartialEq, Eq)]
pub struct Registers {
    registers: [u16; REGISTERS_COUNT],
    status_register: u8,
}

impl Registers {
    pub fn new(init_address: u16) -> Registers {
        let mut registers = Registers::default();
        registers.set_program_counter(init_address);

        registers
    }

    /// Register indexes are taken modulo 8.
    pub fn get_register(&self, reg: usize) -> u16 {
        self.registers[reg % REGISTERS_COUNT]
    }

    pub fn set_register(&mut self, reg: usize, value: u16) {
        self.registers[reg % REGISTERS_COUNT] = value;
    }

    pub fn program_counter(&self) -> u16 {
        self.registers[PC]
    }

    pub fn set_program_counter(&mut self, addr: u16) {
        self.registers[PC] = addr;
    }

    pub fn get_status_register(&self) -> u8 {
        self.status_register
    }

    pub fn set_status_register(&mut self, value: u8) {
        self.status_register = value;
    }

    pub fn n_flag_is_set(&self) -> bool {
        self.status_register & N_FLAG == N_FLAG
    }

    pub fn z_flag_is_set(&self) -> bool {
        self.status_register & Z_FLAG == Z_FLAG
    }

    pub fn v_flag_is_set(&self) -> bool {
        self.status_register & V_FLAG == V_FLAG
    }

    pub fn c_flag_is_set(&self) -> bool {
        self.status_register & C_FLAG == C_FLAG
    }

    pub fn t_flag_is_set(&self) -> bool {
        self.status_register & T_FLAG == T_FLAG
    }

    pub fn set_n_flag(&mut self, flag: bool) {
        self.set_flag(N_FLAG, flag);
    }

    pub fn set_z_flag(&mut self, flag: bool) {
        self.set_flag(Z_FLAG, flag);
    }

    pub fn set_v_flag(&mut self, flag: bool) {
        self.set_flag(V_FLAG, flag);
    }

    pub fn set_c_flag(&mut self, flag: bool) {
        self.set_flag(C_FLAG, flag);
    }

    pub fn set_t_flag(&mut self, flag: bool) {
        self.set_flag(T_FLAG, flag);
    }

    /// N and Z from a result of the given width.
    pub fn set_nz_flags(&mut self, value: u16, size: OperandSize) {
        self.set_n_flag(size.is_negative(value));
        self.set_z_flag(value & size.mask() == 0);
    }

    fn set_flag(&mut self, mask: u8, flag: bool) {
        if flag {
            self.status_register |= mask;
        } else {
            self.status_register &= !mask;
        }
    }

    pub fn format_status(&self) -> String {
        format!(
            "{}{}{}{}{}",
            if self.t_flag_is_set() { "T" } else { "t" },
            if self.n_flag_is_set() { "N" } else { "n" },
            if self.z_flag_is_set() { "Z" } else { "z" },
            if self.v_flag_is_set() { "V" } else { "v" },
            if self.c_flag_is_set() { "C" } else { "c" },
        )
    }
}

impl Default for Registers {
    fn default() -> Self {
        Registers {
            registers: [0; REGISTERS_COUNT],
            status_register: 0,
        }
    }
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registers = self
            .registers
            .iter()
            .enumerate()
            .map(|(reg, value)| format!("R{}:{:06o}", reg, value))
            .collect::<Vec<String>>()
            .join(" ");

        write!(
            f,
            "Registers [{} | RS:{:03o} {}]",
            registers,
            self.status_register,
            self.format_status()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_flags() {
        let registers = Registers::new(0o1000);
        assert!(!registers.z_flag_is_set());
        assert!(!registers.n_flag_is_set());
        assert!(!registers.t_flag_is_set());
        assert!(!registers.c_flag_is_set());
        assert!(!registers.v_flag_is_set());
        assert_eq!(0o1000, registers.get_register(PC));
    }

    #[test]
    fn test_set_flags() {
        let mut registers = Registers::new(0o1000);
        registers.set_c_flag(true);
        registers.set_v_flag(true);
        registers.set_z_flag(true);
        registers.set_n_flag(true);
        assert_eq!(0o017, registers.get_status_register());
        assert_eq!("tNZVC", registers.format_status());
        registers.set_z_flag(false);
        registers.set_n_flag(false);
        registers.set_c_flag(false);
        registers.set_v_flag(false);
        assert_eq!(0, registers.get_status_register());
    }

    #[test]
    fn test_trace_flag() {
        let mut registers = Registers::new(0o1000);
        registers.set_t_flag(true);
        assert_eq!(0o020, registers.get_status_register());
        assert_eq!("Tnzvc", registers.format_status());
        registers.set_t_flag(false);
        assert!(!registers.t_flag_is_set());
    }

    #[test]
    fn test_status_byte_is_authoritative() {
        let mut registers = Registers::new(0o1000);
        registers.set_status_register(0o361);
        assert!(registers.t_flag_is_set());
        assert!(registers.c_flag_is_set());
        assert!(!registers.n_flag_is_set());
        registers.set_n_flag(true);
        assert_eq!(0o371, registers.get_status_register());
    }

    #[test]
    fn test_nz_flags_depend_on_width() {
        let mut registers = Registers::new(0o1000);
        registers.set_nz_flags(0o000200, OperandSize::Byte);
        assert!(registers.n_flag_is_set());
        assert!(!registers.z_flag_is_set());
        registers.set_nz_flags(0o000200, OperandSize::Word);
        assert!(!registers.n_flag_is_set());
        registers.set_nz_flags(0o177400, OperandSize::Byte);
        assert!(registers.z_flag_is_set());
    }

    #[test]
    fn test_register_index_wraps() {
        let mut registers = Registers::new(0o1000);
        registers.set_register(11, 0o777);
        assert_eq!(0o777, registers.get_register(3));
    }

    #[test]
    fn test_debug_output() {
        let mut registers = Registers::new(0o1000);
        registers.set_register(3, 5);
        assert_eq!(
            "Registers [R0:000000 R1:000000 R2:000000 R3:000005 R4:000000 R5:000000 R6:000000 R7:001000 | RS:000 tnzvc]",
            format!("{:?}", registers)
        );
    }
}
