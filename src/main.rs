use std::process::ExitCode;

fn main() -> ExitCode {
    // Delegate to the framework entry point.
    ball_track::run()
}
