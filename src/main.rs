use std::process::ExitCode;

fn main() -> ExitCode {
    csv_summary_lib::run()
}
