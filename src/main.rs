use smallsh::shell::Shell;

fn main() {
    if let Err(e) = Shell::new().run() {
        eprintln!("smallsh: {}", e);
        std::process::exit(1);
    }
}
