use once_cell::unsync::OnceCell;

thread_local! {
    static INITIALIZED: OnceCell<()> = const { OnceCell::new() };
}

/// Routes the `log` facade to the browser console. Safe to call more than once.
pub fn init(level: log::Level) {
    INITIALIZED.with(|cell| {
        cell.get_or_init(|| {
            console_error_panic_hook::set_once();
            wasm_logger::init(wasm_logger::Config::new(level));
        });
    });
}

pub fn print_branding() {
    gloo_console::log!(
        "%c📸 Reel & Roll Photography",
        "color: #C9A961; font-size: 24px; font-weight: bold; text-shadow: 2px 2px 4px rgba(0,0,0,0.5);"
    );
    gloo_console::log!(
        "%cCapturing Moments, Creating Memories",
        "color: #a0a0a0; font-size: 14px;"
    );
    gloo_console::log!(
        "%cWebsite designed with ❤️ and ☕",
        "color: #C9A961; font-size: 12px;"
    );
}
