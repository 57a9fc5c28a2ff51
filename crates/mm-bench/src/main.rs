mod args;
mod error;
mod harness;

use std::process::ExitCode;

use log::error;
use mm_strassen::StrassenConfig;

use crate::args::Dimensions;
use crate::harness::Harness;

fn main() -> ExitCode {
    env_logger::init();

    let dims = Dimensions::from_args(std::env::args().skip(1));
    let result = Harness::new(StrassenConfig::default())
        .and_then(|harness| harness.run(dims, &mut rand::thread_rng()));

    match result {
        Ok(timings) => {
            println!("Base time (µs): {}", timings.naive.as_micros());
            println!("Cache friendly time (µs): {}", timings.blocked.as_micros());
            println!("Strassen time (µs): {}", timings.strassen.as_micros());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
