use std::io;

fn main() {
    chipstack_room::init_logging_with("warn");
    let mut out = io::stdout();
    let mut err = io::stderr();
    let code = chipstack_cli::run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
