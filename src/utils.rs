use crate::config::*;
use crate::vm::{Error, VM};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

macro_rules! to_hex {
    ($data:expr) => {
        format!("0x{:02x}", $data)
    };
}

pub fn data_to_hex(data: DataSlice) -> String {
    data.iter()
        .map(|i| to_hex!(i))
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn test_run(program: Data) -> (Result<(), Error>, Data, VM<Data>) {
    let _ = env_logger::builder().is_test(true).try_init();

    let output: Data = vec![];
    let termination_scheduled = Arc::new(AtomicBool::new(false));

    let mut vm = VM::new(output, termination_scheduled);
    let result = vm.load(&program).and_then(|_| vm.run());

    let output = vm.get_output_ref().clone();

    (result, output, vm)
}
