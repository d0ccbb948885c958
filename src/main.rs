fn main() {
    if let Err(err) = chordwheel::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
