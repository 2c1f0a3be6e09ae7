// Panic hook setup and console logging helpers

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Only the browser has a console to write to, native builds (tests) drop the message
pub fn log_str(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

macro_rules! log {
    ( $( $t:tt )* ) => {
        $crate::utils::log_str(&format!( $( $t )* ))
    };
}
