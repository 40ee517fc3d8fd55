//! Serial logging.
//!
//! With the `esp32-log` feature every `log!` line goes to the ESP serial
//! console. Without it the arguments are still type-checked but nothing
//! is emitted.

#[cfg(feature = "esp32-log")]
macro_rules! log {
    ($($arg:tt)*) => {
        esp_println::println!($($arg)*)
    };
}

#[cfg(not(feature = "esp32-log"))]
macro_rules! log {
    ($($arg:tt)*) => {{
        let _ = ::core::format_args!($($arg)*);
    }};
}
