use crate::config::*;
use crate::vm::Error;
use std::fmt;

pub struct Memory {
    raw: [u8; MEMORY_SIZE],

    // the stack may grow down to here
    pub program_end: usize,
    pub stack_end: usize,
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            raw: [0; MEMORY_SIZE],
            program_end: 0,
            stack_end: STACK_TOP as usize,
        }
    }

    pub fn load(&mut self, program: DataSlice) -> Result<(), Error> {
        if program.len() > MEMORY_SIZE {
            return Err(Error::ProgramTooLarge(program.len(), MEMORY_SIZE));
        }

        self.raw = [0; MEMORY_SIZE];
        self.raw[..program.len()].copy_from_slice(program);

        self.program_end = program.len();

        debug!("loaded {} bytes", program.len());
        Ok(())
    }

    pub fn program(&self) -> DataSlice {
        &self.raw[..self.program_end]
    }

    /// Bytes currently on the stack, top first.
    pub fn stack(&self, sp: Word) -> DataSlice {
        let sp = sp as usize;
        assert_ge!(sp, self.program_end);
        assert_le!(sp, self.stack_end);
        &self.raw[sp..self.stack_end]
    }

    pub fn read(&self, address: Word) -> u8 {
        self.raw[address as usize]
    }

    pub fn write(&mut self, address: Word, value: u8) {
        debug!("write address={} value={}", to_hex!(address), to_hex!(value));
        self.raw[address as usize] = value;
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "program_end={} stack_end={} raw={}",
               self.program_end,
               self.stack_end,
               hex::encode(&self.raw[..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load() {
        let mut memory = Memory::new();
        memory.load(&[0x82, 0x00, 0x08]).unwrap();

        assert_eq!(&[0x82, 0x00, 0x08], memory.program());
        assert_eq!(3, memory.program_end);
        assert_eq!(0, memory.read(3));
        assert_eq!(0, memory.read(0xff));
    }

    #[test]
    fn load_replaces_previous_image() {
        let mut memory = Memory::new();
        memory.load(&[0x01, 0x02, 0x03, 0x04]).unwrap();
        memory.load(&[0x01]).unwrap();

        assert_eq!(&[0x01], memory.program());
        assert_eq!(0, memory.read(1));
    }

    #[test]
    fn load_whole_memory() {
        let mut memory = Memory::new();
        memory.load(&[0x01; MEMORY_SIZE]).unwrap();
        assert_eq!(0x01, memory.read(0xff));
    }

    #[test]
    fn program_too_large() {
        let mut memory = Memory::new();
        match memory.load(&[0x00; MEMORY_SIZE + 1]) {
            Err(Error::ProgramTooLarge(257, 256)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn read_write() {
        let mut memory = Memory::new();
        memory.write(0x00, 0x55);
        memory.write(0xff, 0x77);

        assert_eq!(0x55, memory.read(0x00));
        assert_eq!(0x77, memory.read(0xff));
    }

    #[test]
    fn debug_dump() {
        let mut memory = Memory::new();
        memory.load(&[0x82, 0x00, 0x08]).unwrap();
        memory.write(0xff, 0xab);

        let expected = format!("program_end=3 stack_end=244 raw=820008{}ab", "00".repeat(252));
        assert_eq!(expected, format!("{:?}", memory));
    }

    #[test]
    fn stack() {
        let mut memory = Memory::new();
        memory.write(STACK_TOP - 1, 0x33);
        memory.write(STACK_TOP - 2, 0x44);

        assert!(memory.stack(STACK_TOP).is_empty());
        assert_eq!(&[0x44, 0x33], memory.stack(STACK_TOP - 2));
    }
}
