use std::ffi::OsString;
use std::io;

fn main() {
    let args: Vec<OsString> = std::env::args_os().collect();
    if let Err(err) = tasklist_cli::run(args, &mut io::stdout().lock()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
