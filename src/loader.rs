//! Reads `.ls8` program files: one binary byte literal per line, `#` starts a
//! comment, lines that are not a binary byte are skipped.

use crate::config::*;
use crate::vm::Error;
use std::fs;
use std::io;
use std::path::Path;

pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Data, Error> {
    let path = path.as_ref();
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    parse(&source)
}

pub fn parse(source: &str) -> Result<Data, Error> {
    let mut program = Data::new();

    for (number, line) in source.lines().enumerate() {
        let line = match line.find('#') {
            Some(comment) => &line[..comment],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match u8::from_str_radix(line, 2) {
            Ok(byte) => program.push(byte),
            Err(e) => {
                warn!("skipping line {}: {:?} ({})", number + 1, line, e);
                continue;
            }
        }
    }

    if program.len() > MEMORY_SIZE {
        return Err(Error::ProgramTooLarge(program.len(), MEMORY_SIZE));
    }

    debug!("parsed {} bytes", program.len());
    Ok(program)
}
