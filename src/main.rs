fn main() {
    std::process::exit(audiotrans_launcher::run());
}
