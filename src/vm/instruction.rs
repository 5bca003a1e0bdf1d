use crate::config::*;
use crate::vm::opcodes::Opcode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Mul,
}

impl AluOp {
    pub fn name(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Mul => "MUL",
        }
    }
}

/// A decoded instruction. Register operands are raw register indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Hlt,
    Ldi { reg: u8, value: Word },
    Prn { reg: u8 },
    Alu { op: AluOp, reg_a: u8, reg_b: u8 },
    Cmp { reg_a: u8, reg_b: u8 },
    Push { reg: u8 },
    Pop { reg: u8 },
    Call { reg: u8 },
    Ret,
    Jmp { reg: u8 },
    Jeq { reg: u8 },
    Jne { reg: u8 },
}

impl Instruction {
    /// Builds the instruction from its opcode and the two bytes following it.
    /// Bytes past the opcode's operand count are ignored.
    pub fn decode(opcode: Opcode, a: u8, b: u8) -> Instruction {
        match opcode {
            Opcode::Hlt => Instruction::Hlt,
            Opcode::Ldi => Instruction::Ldi { reg: a, value: b },
            Opcode::Prn => Instruction::Prn { reg: a },
            Opcode::Add => {
                Instruction::Alu {
                    op: AluOp::Add,
                    reg_a: a,
                    reg_b: b,
                }
            }
            Opcode::Mul => {
                Instruction::Alu {
                    op: AluOp::Mul,
                    reg_a: a,
                    reg_b: b,
                }
            }
            Opcode::Cmp => Instruction::Cmp { reg_a: a, reg_b: b },
            Opcode::Push => Instruction::Push { reg: a },
            Opcode::Pop => Instruction::Pop { reg: a },
            Opcode::Call => Instruction::Call { reg: a },
            Opcode::Ret => Instruction::Ret,
            Opcode::Jmp => Instruction::Jmp { reg: a },
            Opcode::Jeq => Instruction::Jeq { reg: a },
            Opcode::Jne => Instruction::Jne { reg: a },
        }
    }
}

/// What the engine does with the program counter after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advance(Word),
    Jump(Word),
    Halt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode() {
        assert_eq!(Instruction::Ldi { reg: 0, value: 8 },
                   Instruction::decode(Opcode::Ldi, 0, 8));
        assert_eq!(Instruction::Alu {
                       op: AluOp::Mul,
                       reg_a: 0,
                       reg_b: 1,
                   },
                   Instruction::decode(Opcode::Mul, 0, 1));
        assert_eq!(Instruction::Prn { reg: 3 },
                   Instruction::decode(Opcode::Prn, 3, 0xff));
        assert_eq!(Instruction::Ret, Instruction::decode(Opcode::Ret, 0xaa, 0xbb));
    }
}
