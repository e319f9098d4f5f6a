use erb_fmt::format_text;
use std::{env, fs};

fn main() {
    let file_path = env::args().nth(1).unwrap();
    let code = fs::read_to_string(file_path).unwrap();

    let formatted = format_text(&code, &Default::default()).unwrap();
    print!("{formatted}");
}
