/// Console logging for the modsorter app.
///
/// Diagnostics go to stderr; stdout is reserved for the record lines.
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        {
            if !RunConfig::get().quiet {
                eprintln!($($arg)*);
            }
        }
    }
}
