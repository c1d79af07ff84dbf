fn main() {
    geoseed::cli::run();
}
