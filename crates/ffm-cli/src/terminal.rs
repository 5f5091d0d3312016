// User-facing terminal lines. Diagnostics go to the log file; these are the
// short status lines a person running the command reads.

pub fn progress(msg: &str) {
    println!("→ {msg}");
}

pub fn success(msg: &str) {
    println!("✓ {msg}");
}

pub fn warn(msg: &str) {
    println!("⚠ {msg}");
}

pub fn error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// A blank line, then a heading.
pub fn heading(msg: &str) {
    println!("\n{msg}");
}

pub fn block(text: &str) {
    println!("{text}");
}
