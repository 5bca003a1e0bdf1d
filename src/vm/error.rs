//! Defines the [`Error`] type of the crate.

use crate::config::Word;
use std::io;
use thiserror::Error;

/// An error that stops the execution of a program, or prevents it from starting.
#[derive(Error, Debug)]
pub enum Error {
    /// The byte at the program counter is not a known opcode.
    #[error("unsupported opcode {opcode:#04x} at address {address:#04x}")]
    UnsupportedOpcode { opcode: u8, address: Word },
    /// The opcode is flagged as an ALU operation but the ALU does not implement it.
    /// Unknown operations have no mnemonic, so the opcode is shown in the
    /// binary form `.ls8` sources use.
    #[error("unsupported ALU operation {opcode:#010b}")]
    UnsupportedAluOperation { opcode: u8 },
    /// An operand names a register outside of the register file.
    #[error("invalid register {0}")]
    InvalidRegister(u8),
    /// The stack pointer is, or would move, inside the loaded program.
    #[error("stack overflow (SP={0:#04x})")]
    StackOverflow(Word),
    /// A pop would move the stack pointer past the end of memory.
    #[error("stack underflow (SP={0:#04x})")]
    StackUnderflow(Word),
    /// The program does not fit into memory.
    #[error("program is {0} bytes long, memory holds {1}")]
    ProgramTooLarge(usize, usize),
    #[error("couldn't find file {0}")]
    FileNotFound(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
