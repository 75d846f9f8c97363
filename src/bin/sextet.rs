// Usage: sextet [FILE] [--strategy fine|coarse] [--format tuple|json|raw]

fn main() {
    sextet::cli::run();
}
