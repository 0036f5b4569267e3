//! Simple CLI that reads a page from stdin and prints the decorated page.
//!
//! Usage: `decorate_stdin [options.json] < page.html`

use page_decorator::{decorate_page, Options};
use std::io::{self, Read};

fn load_options(path: Option<String>) -> Result<Options, String> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let json = std::fs::read_to_string(&path).map_err(|err| format!("{path}: {err}"))?;
    Options::from_json(&json).map_err(|err| format!("{path}: {err}"))
}

fn main() {
    let options = match load_options(std::env::args().nth(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Failed to read options: {err}");
            std::process::exit(2);
        }
    };

    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    match decorate_page(&html, options) {
        Ok(out) => println!("{out}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
