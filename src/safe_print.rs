// Best-effort stderr logging that never panics.
//
// The launcher may run with stderr redirected or with the console already
// closed while the child app is still printing. Rust's `eprintln!` may panic
// on write errors, so we explicitly ignore stderr write failures.

#[macro_export]
macro_rules! safe_eprintln {
    ($($arg:tt)*) => {{
        use std::io::Write;
        let _ = writeln!(std::io::stderr(), $($arg)*);
    }};
}
