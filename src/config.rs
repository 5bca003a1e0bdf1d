pub type Word = u8;

pub type Data = Vec<u8>;
pub type DataSlice<'a> = &'a [u8];

pub const MEMORY_SIZE: usize = 256;

pub const REGISTERS: usize = 8;

// register index aliased to the stack pointer
pub const SP: u8 = 7;

pub const STACK_TOP: Word = 0xf4;

// opcode layout: AABCDDDD
pub const OPERANDS_SHIFT: u8 = 6;
pub const ALU_MASK: u8 = 0b0010_0000;
pub const SETS_PC_MASK: u8 = 0b0001_0000;

pub type Registers = [Word; REGISTERS];
