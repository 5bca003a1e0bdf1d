use crate::config::*;

pub const HLT: u8 = 0b0000_0001;
pub const LDI: u8 = 0b1000_0010;
pub const PRN: u8 = 0b0100_0111;

pub const ADD: u8 = 0b1010_0000;
pub const MUL: u8 = 0b1010_0010;
pub const CMP: u8 = 0b1010_0111;

pub const PUSH: u8 = 0b0100_0101;
pub const POP: u8 = 0b0100_0110;

pub const CALL: u8 = 0b0101_0000;
pub const RET: u8 = 0b0001_0001;

pub const JMP: u8 = 0b0101_0100;
pub const JEQ: u8 = 0b0101_0101;
pub const JNE: u8 = 0b0101_0110;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Hlt,
    Ldi,
    Prn,
    Add,
    Mul,
    Cmp,
    Push,
    Pop,
    Call,
    Ret,
    Jmp,
    Jeq,
    Jne,
}

impl Opcode {
    pub fn from_byte(byte: u8) -> Option<Opcode> {
        let opcode = match byte {
            HLT => Opcode::Hlt,
            LDI => Opcode::Ldi,
            PRN => Opcode::Prn,
            ADD => Opcode::Add,
            MUL => Opcode::Mul,
            CMP => Opcode::Cmp,
            PUSH => Opcode::Push,
            POP => Opcode::Pop,
            CALL => Opcode::Call,
            RET => Opcode::Ret,
            JMP => Opcode::Jmp,
            JEQ => Opcode::Jeq,
            JNE => Opcode::Jne,
            _ => return None,
        };
        Some(opcode)
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Opcode::Hlt => HLT,
            Opcode::Ldi => LDI,
            Opcode::Prn => PRN,
            Opcode::Add => ADD,
            Opcode::Mul => MUL,
            Opcode::Cmp => CMP,
            Opcode::Push => PUSH,
            Opcode::Pop => POP,
            Opcode::Call => CALL,
            Opcode::Ret => RET,
            Opcode::Jmp => JMP,
            Opcode::Jeq => JEQ,
            Opcode::Jne => JNE,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ldi => "LDI",
            Opcode::Prn => "PRN",
            Opcode::Add => "ADD",
            Opcode::Mul => "MUL",
            Opcode::Cmp => "CMP",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
        }
    }

    pub fn operands(self) -> Word {
        operands_of(self.to_byte())
    }

    /// Total instruction width in bytes, opcode included.
    pub fn width(self) -> Word {
        1 + self.operands()
    }
}

pub fn operands_of(byte: u8) -> Word {
    byte >> OPERANDS_SHIFT
}

pub fn is_alu(byte: u8) -> bool {
    byte & ALU_MASK != 0
}

pub fn sets_pc(byte: u8) -> bool {
    byte & SETS_PC_MASK != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Opcode; 13] = [
        Opcode::Hlt,
        Opcode::Ldi,
        Opcode::Prn,
        Opcode::Add,
        Opcode::Mul,
        Opcode::Cmp,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Call,
        Opcode::Ret,
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jne,
    ];

    #[test]
    fn widths() {
        assert_eq!(1, Opcode::Hlt.width());
        assert_eq!(1, Opcode::Ret.width());
        assert_eq!(2, Opcode::Prn.width());
        assert_eq!(2, Opcode::Push.width());
        assert_eq!(2, Opcode::Pop.width());
        assert_eq!(2, Opcode::Call.width());
        assert_eq!(2, Opcode::Jmp.width());
        assert_eq!(2, Opcode::Jeq.width());
        assert_eq!(2, Opcode::Jne.width());
        assert_eq!(3, Opcode::Ldi.width());
        assert_eq!(3, Opcode::Add.width());
        assert_eq!(3, Opcode::Mul.width());
        assert_eq!(3, Opcode::Cmp.width());
    }

    #[test]
    fn layout_bits() {
        for opcode in ALL.iter() {
            let byte = opcode.to_byte();
            assert_eq!(Some(*opcode), Opcode::from_byte(byte));

            let alu = match opcode {
                Opcode::Add | Opcode::Mul | Opcode::Cmp => true,
                _ => false,
            };
            assert_eq!(alu, is_alu(byte), "{}", opcode.mnemonic());

            let control_flow = match opcode {
                Opcode::Call | Opcode::Ret | Opcode::Jmp | Opcode::Jeq | Opcode::Jne => true,
                _ => false,
            };
            assert_eq!(control_flow, sets_pc(byte), "{}", opcode.mnemonic());
        }
    }

    #[test]
    fn unknown_bytes() {
        assert_eq!(None, Opcode::from_byte(0x00));
        assert_eq!(None, Opcode::from_byte(0xff));
        assert_eq!(None, Opcode::from_byte(0b1010_0001));
    }
}
