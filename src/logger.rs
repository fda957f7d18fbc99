//! Structured logging system with visual formatting.
//!
//! Provides the visual output style used across wakearc: block starts,
//! decorated lines, and indented detail lines built from Unicode box drawing
//! characters, plus standard `[LEVEL]`-prefixed semantic macros.
//!
//! Logging can be disabled at runtime for quiet operation during automated
//! processes or testing, where gesture-lifecycle output would interfere with
//! results.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

// AtomicBool rather than thread_local so tests on other threads see the flag
static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Main logging interface providing structured output formatting.
///
/// ## Logging Conventions
///
/// - **`log_block_start!`**: initiate a new conceptual block of log output
///   (gesture begins, configuration loads). Prepends an empty pipe `┃` for
///   spacing, then prints `┣ message`.
/// - **`log_decorated!`**: a message inside an existing block, `┣ message`.
/// - **`log_indented!`**: nested detail lines, `┃   message`.
/// - **`log_pipe!`**: a single empty `┃` line for vertical spacing, typically
///   before `log_warning!` or `log_error!`.
/// - **`log_warning!`, `log_error!`, `log_debug!`**: semantic macros with a
///   `[LEVEL]` prefix, outside the box-drawing flow.
pub struct Log;

impl Log {
    /// Enable or disable logging temporarily.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }
}

// Public function that routes output (needed by macros)
pub fn write_output(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}

// # Logging Macros

/// Log a decorated message, typically as part of an existing block.
#[macro_export]
macro_rules! log_decorated {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::write_output(&format!("┣ {message}\n"));
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let expr = $expr;
            $crate::logger::write_output(&format!("┣ {expr}\n"));
        }
    }};
}

/// Log an indented message for sub-items or details within a block.
#[macro_export]
macro_rules! log_indented {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::write_output(&format!("┃   {message}\n"));
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let expr = $expr;
            $crate::logger::write_output(&format!("┃   {expr}\n"));
        }
    }};
}

/// Log a visual pipe separator for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            $crate::logger::write_output("┃\n");
        }
    }};
}

/// Log a block start message, initiating a new conceptual block of output.
#[macro_export]
macro_rules! log_block_start {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::write_output(&format!("┃\n┣ {message}\n"));
        }
    }};
    ($expr:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let expr = $expr;
            $crate::logger::write_output(&format!("┃\n┣ {expr}\n"));
        }
    }};
}

/// Log a warning message with a `[WARNING]` prefix.
#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::write_output(&format!("[WARNING] {message}\n"));
        }
    }};
}

/// Log an error message with an `[ERROR]` prefix.
#[macro_export]
macro_rules! log_error {
    ($fmt:literal $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::write_output(&format!("[ERROR] {message}\n"));
        }
    }};
}

/// Log a debug message with a `[DEBUG]` prefix. Compiled in debug builds only.
#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        {
            use $crate::logger::Log;
            if Log::is_enabled() {
                let message = format!($fmt $($arg)*);
                $crate::logger::write_output(&format!("[DEBUG] {message}\n"));
            }
        }
    }};
}
