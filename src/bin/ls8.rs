extern crate ctrlc;

extern crate ls8;

#[macro_use]
extern crate log;
extern crate env_logger;

extern crate clap;

use clap::{App, ArgMatches};
use ls8::loader;
use ls8::vm::{Error, VM};
use std::env;
use std::io::stdout;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() {
    let matches = App::new("LS-8")
        .about("Runs an LS-8 program")
        .args_from_usage("<FILE> 'Program file (.ls8)'
                          -d, --debug 'Enable debug messages'
                          -t, --trace 'Print CPU state before every cycle'")
        .get_matches();

    if let Err(e) = do_checked_main(matches) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn do_checked_main(matches: ArgMatches) -> Result<(), Error> {
    if matches.is_present("debug") {
        env::set_var("RUST_LOG", "ls8=debug");
    }
    env_logger::init();

    // FILE is required, clap exits before we get here without it
    let program_filename = matches.value_of("FILE").unwrap_or_default();
    let program = loader::load_file(program_filename)?;

    let termination_scheduled = Arc::new(AtomicBool::new(false));
    let r = termination_scheduled.clone();
    let handler = ctrlc::set_handler(move || {
        info!("Terminating...");
        r.store(true, Ordering::Relaxed);
    });
    if let Err(e) = handler {
        warn!("failed to set termination handler: {}", e);
    }

    let mut vm = VM::new(stdout(), termination_scheduled);
    vm.set_tracing(matches.is_present("trace"));
    vm.load(&program)?;
    vm.run()
}
