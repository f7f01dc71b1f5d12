use std::env;

/// Bakes the chat service base URL into the binary.
///
/// `CHAT_API_URL` is read from the build environment, falling back to a
/// `.env` file next to `Cargo.toml`. The URL cannot be changed at runtime.
fn main() {
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-env-changed=CHAT_API_URL");

    // Missing .env is fine; the default URL applies.
    let _ = dotenv::dotenv();

    if let Ok(url) = env::var("CHAT_API_URL") {
        let url = url.trim();
        if !url.is_empty() {
            println!("cargo:rustc-env=CHAT_API_URL={url}");
        }
    }
}
