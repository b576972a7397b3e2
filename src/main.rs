mod art;
mod data;
mod error;
mod export;
mod graphics;
mod math;
mod modes;

use std::{process::ExitCode, time::Instant};

use clap::Parser;

use data::{config::Config, Program};
use modes::Mode;

fn main() -> ExitCode {
    let config = Config::parse();

    data::log::init(config.quiet, config.verbose);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> error::Result<()> {
    let mode = config.mode();
    let prog = Program::new(config, Instant::now());

    prog.print_startup_info(&mode);

    match mode {
        Mode::Win => modes::windowed_mode::winit_main(prog),

        #[cfg(feature = "terminal")]
        Mode::ConBlock => modes::console_mode::con_main(prog),

        Mode::Snapshot(path) => export::write_snapshot(&prog, &path),
    }
}
