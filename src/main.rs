fn main() {
    if let Err(err) = timeline_stack::init_logging().and_then(|()| timeline_stack::run()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
