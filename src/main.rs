fn main() {
    if let Err(err) = hierarchy_layout::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
