//! Console logging.
//!
//! With the `esp32-log` feature enabled messages are printed through
//! `esp-println`. Without it the arguments are still type-checked but
//! nothing is emitted.

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "esp32-log")]
        esp_println::println!($($arg)*);
        #[cfg(not(feature = "esp32-log"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "esp32-log")]
        esp_println::println!("WARN {}", format_args!($($arg)*));
        #[cfg(not(feature = "esp32-log"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
