use crate::config::*;
use crate::utils::data_to_hex;
use std::fmt;
use std::io::Write;
use std::num::Wrapping;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod error;
pub mod flags;
pub mod instruction;
pub mod memory;
pub mod opcodes;
pub mod registers;


pub use self::error::Error;
use self::flags::Flags;
use self::instruction::*;
use self::memory::Memory;
use self::opcodes::*;
use self::registers::RegisterFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

pub struct VM<W: Write> {
    output: W,

    memory: Memory,
    registers: RegisterFile,
    flags: Flags,

    pc: Word,
    ir: u8,

    state: State,
    cycles: u64,
    tracing: bool,

    termination_scheduled: Arc<AtomicBool>,
}

impl<W: Write> VM<W> {
    pub fn new(output: W, termination_scheduled: Arc<AtomicBool>) -> Self {
        VM {
            output: output,
            memory: Memory::new(),
            registers: RegisterFile::new(),
            flags: Flags::empty(),
            pc: 0,
            ir: 0,
            state: State::Running,
            cycles: 0,
            tracing: false,
            termination_scheduled: termination_scheduled,
        }
    }

    /// Writes the program at address 0 and resets the CPU to its initial state.
    pub fn load(&mut self, program: DataSlice) -> Result<(), Error> {
        self.memory.load(program)?;

        self.registers = RegisterFile::new();
        self.flags = Flags::empty();
        self.pc = 0;
        self.ir = 0;
        self.state = State::Running;
        self.cycles = 0;

        Ok(())
    }

    pub fn set_tracing(&mut self, tracing: bool) {
        self.tracing = tracing;
    }

    pub fn run(&mut self) -> Result<(), Error> {
        while self.state == State::Running {
            if self.termination_scheduled.load(Ordering::Relaxed) {
                info!("Terminating...");
                self.state = State::Halted;
                break;
            }

            if self.tracing {
                eprintln!("{}", self.trace());
            }

            self.step()?;
        }

        info!("halted after {} cycles", self.cycles);
        self.output.flush()?;
        Ok(())
    }

    /// Runs a single fetch-decode-execute cycle. Does nothing once halted.
    pub fn step(&mut self) -> Result<(), Error> {
        if self.state != State::Running {
            return Ok(());
        }

        let result = self.fetch()
            .decode()
            .and_then(|(instruction, width)| self.execute(instruction, width));

        match result {
            Ok(transition) => {
                debug_assert!(sets_pc(self.ir) || !is_jump(transition),
                              "{} jumped",
                              to_hex!(self.ir));
                self.apply(transition);
                self.cycles += 1;
                Ok(())
            }
            Err(e) => {
                error!("{} {:?}", e, self);
                debug!("memory {:?}", self.memory);
                self.state = State::Halted;
                Err(e)
            }
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn pc(&self) -> Word {
        self.pc
    }

    pub fn sp(&self) -> Word {
        self.registers.sp()
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn register(&self, index: u8) -> Result<Word, Error> {
        self.registers.get(index)
    }

    pub fn registers(&self) -> Registers {
        self.registers.snapshot()
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn get_output_ref(&self) -> &W {
        &self.output
    }

    /// Bytes on the stack, top first. Empty if SP was moved outside of the
    /// stack region.
    pub fn stack(&self) -> DataSlice {
        let sp = self.registers.sp() as usize;
        if sp >= self.memory.program_end && sp <= self.memory.stack_end {
            self.memory.stack(sp as Word)
        } else {
            &[]
        }
    }

    /// `TRACE: PC | M[PC] M[PC+1] M[PC+2] | R0 .. R7`
    pub fn trace(&self) -> String {
        let registers = self.registers
            .snapshot()
            .iter()
            .map(|r| format!(" {:02X}", r))
            .collect::<String>();

        format!("TRACE: {:02X} | {:02X} {:02X} {:02X} |{}",
                self.pc,
                self.memory.read(self.pc),
                self.memory.read(self.pc.wrapping_add(1)),
                self.memory.read(self.pc.wrapping_add(2)),
                registers)
    }

    fn fetch(&mut self) -> &mut Self {
        self.ir = self.memory.read(self.pc);
        debug!("fetch {:?}", self);
        self
    }

    fn decode(&mut self) -> Result<(Instruction, Word), Error> {
        let opcode = match Opcode::from_byte(self.ir) {
            Some(opcode) => opcode,
            None if is_alu(self.ir) => {
                return Err(Error::UnsupportedAluOperation { opcode: self.ir });
            }
            None => {
                return Err(Error::UnsupportedOpcode {
                    opcode: self.ir,
                    address: self.pc,
                });
            }
        };

        let a = self.memory.read(self.pc.wrapping_add(1));
        let b = self.memory.read(self.pc.wrapping_add(2));
        let instruction = Instruction::decode(opcode, a, b);
        debug!("decode {} {:?}", opcode.mnemonic(), instruction);

        Ok((instruction, opcode.width()))
    }

    fn execute(&mut self, instruction: Instruction, width: Word) -> Result<Transition, Error> {
        let next = Transition::Advance(width);

        let transition = match instruction {
            Instruction::Hlt => Transition::Halt,
            Instruction::Ldi { reg, value } => {
                self.registers.set(reg, value)?;
                next
            }
            Instruction::Prn { reg } => {
                let value = self.registers.get(reg)?;
                writeln!(self.output, "{}", value)?;
                next
            }
            Instruction::Alu { op, reg_a, reg_b } => {
                self.alu(op, reg_a, reg_b)?;
                next
            }
            Instruction::Cmp { reg_a, reg_b } => {
                let a = self.registers.get(reg_a)?;
                let b = self.registers.get(reg_b)?;
                self.flags = Flags::compare(a, b);
                next
            }
            Instruction::Push { reg } => {
                self.registers.get(reg)?;
                let sp = self.stack_decrement()?;
                // PUSH R7 stores the decremented SP
                let value = self.registers.get(reg)?;
                self.memory.write(sp, value);
                next
            }
            Instruction::Pop { reg } => {
                let value = self.stack_peek()?;
                self.registers.set(reg, value)?;
                // POP R7 ends with SP one past the popped value
                self.stack_increment();
                next
            }
            Instruction::Call { reg } => {
                self.registers.get(reg)?;
                let return_address = self.pc.wrapping_add(width);
                self.stack_push(return_address)?;
                Transition::Jump(self.registers.get(reg)?)
            }
            Instruction::Ret => Transition::Jump(self.stack_pop()?),
            Instruction::Jmp { reg } => Transition::Jump(self.registers.get(reg)?),
            Instruction::Jeq { reg } => self.jump_if(self.flags.is_equal(), reg, next)?,
            Instruction::Jne { reg } => self.jump_if(!self.flags.is_equal(), reg, next)?,
        };

        debug!("execute {:?}", transition);
        Ok(transition)
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Advance(width) => self.pc = self.pc.wrapping_add(width),
            Transition::Jump(address) => self.pc = address,
            Transition::Halt => self.state = State::Halted,
        }
    }

    fn jump_if(&self, condition: bool, reg: u8, otherwise: Transition) -> Result<Transition, Error> {
        if condition {
            Ok(Transition::Jump(self.registers.get(reg)?))
        } else {
            Ok(otherwise)
        }
    }

    fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), Error> {
        let a = Wrapping(self.registers.get(reg_a)?);
        let b = Wrapping(self.registers.get(reg_b)?);

        let result = match op {
            AluOp::Add => a + b,
            AluOp::Mul => a * b,
        };

        debug!("alu {} {} {} = {}",
               op.name(),
               to_hex!(a.0),
               to_hex!(b.0),
               to_hex!(result.0));
        self.registers.set(reg_a, result.0)
    }

    // SP stays within [program_end, 0xff] before and after every push and pop

    fn stack_decrement(&mut self) -> Result<Word, Error> {
        let sp = self.registers.sp();
        if sp as usize <= self.memory.program_end {
            return Err(Error::StackOverflow(sp));
        }

        let sp = sp - 1;
        self.registers.set_sp(sp);
        Ok(sp)
    }

    fn stack_peek(&self) -> Result<u8, Error> {
        let sp = self.registers.sp();
        if (sp as usize) < self.memory.program_end {
            return Err(Error::StackOverflow(sp));
        }
        if sp == Word::MAX {
            return Err(Error::StackUnderflow(sp));
        }

        Ok(self.memory.read(sp))
    }

    fn stack_increment(&mut self) {
        let sp = self.registers.sp();
        self.registers.set_sp(sp.wrapping_add(1));
    }

    fn stack_push(&mut self, value: u8) -> Result<(), Error> {
        let sp = self.stack_decrement()?;
        self.memory.write(sp, value);
        Ok(())
    }

    fn stack_pop(&mut self) -> Result<u8, Error> {
        let value = self.stack_peek()?;
        self.stack_increment();
        Ok(value)
    }
}

fn is_jump(transition: Transition) -> bool {
    match transition {
        Transition::Jump(_) => true,
        _ => false,
    }
}

impl<W: Write> fmt::Debug for VM<W> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "PC={} SP={} IR={} FL={} registers=[{}] stack=[{}]",
               to_hex!(self.pc),
               to_hex!(self.registers.sp()),
               to_hex!(self.ir),
               to_hex!(self.flags.bits()),
               data_to_hex(&self.registers.snapshot()),
               data_to_hex(self.stack()))
    }
}
