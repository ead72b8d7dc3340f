use std::process::ExitCode;

mod cli;
mod config;
mod error;
mod library;
mod organize;
mod runtime;
#[cfg(test)]
mod test_support;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match runtime::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("dubdib: {e}");
            ExitCode::FAILURE
        }
    }
}
