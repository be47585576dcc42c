//! Output macros for the vmpooler CLI.
//!
//! Command output goes to stdout; diagnostics go to stderr so that the
//! output of `config get` and friends can be piped.

#[macro_export]
macro_rules! pooler_println {
    () => {
        println!();
    };
    ($($arg:tt)*) => {
        println!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! pooler_error {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! pooler_warning {
    ($($arg:tt)*) => {
        eprintln!("⚠ {}", format!($($arg)*));
    };
}

/// The closing status line of a successful run. Goes to stdout with the
/// command output.
#[macro_export]
macro_rules! pooler_success {
    ($($arg:tt)*) => {
        println!("{}", format!($($arg)*));
    };
}
