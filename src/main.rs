fn main() {
    if let Err(e) = tailr::get_args().and_then(tailr::run) {
        eprintln!("tailr: {}", e);
        std::process::exit(e.exit_code());
    }
}
