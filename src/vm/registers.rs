use crate::config::*;
use crate::vm::Error;

/// Eight byte-wide registers. Index [`SP`] is not a general purpose slot: it
/// reads and writes the stack pointer, which is kept as its own field so the
/// stack operations can check it.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    general: [Word; REGISTERS - 1],
    sp: Word,
}

impl RegisterFile {
    pub fn new() -> RegisterFile {
        RegisterFile {
            general: [0; REGISTERS - 1],
            sp: STACK_TOP,
        }
    }

    pub fn get(&self, index: u8) -> Result<Word, Error> {
        match index {
            SP => Ok(self.sp),
            _ => {
                self.general
                    .get(index as usize)
                    .cloned()
                    .ok_or(Error::InvalidRegister(index))
            }
        }
    }

    pub fn set(&mut self, index: u8, value: Word) -> Result<(), Error> {
        match index {
            SP => self.sp = value,
            _ => {
                let register = self.general
                    .get_mut(index as usize)
                    .ok_or(Error::InvalidRegister(index))?;
                *register = value;
            }
        }
        Ok(())
    }

    pub fn sp(&self) -> Word {
        self.sp
    }

    pub fn set_sp(&mut self, sp: Word) {
        self.sp = sp;
    }

    pub fn snapshot(&self) -> Registers {
        let mut registers = [0; REGISTERS];
        registers[..REGISTERS - 1].copy_from_slice(&self.general);
        registers[SP as usize] = self.sp;
        registers
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        RegisterFile::new()
    }
}
