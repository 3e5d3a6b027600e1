use std::fmt::Display;

/// Write a message to stderr.
///
/// This is a wrapper around `eprintln!` that keeps user facing messages
/// apart from command output on stdout.
fn print_message(v: impl Display) {
    eprintln!("{v}");
}

/// alias for [print_message]
pub(crate) fn plain(v: impl Display) {
    print_message(v);
}

pub(crate) fn error(v: impl Display) {
    print_message(std::format_args!("ERROR: {v}"));
}
