//! SkinCheck Mobile Application
//!
//! Android shell entrypoint for the Dioxus mobile app.

#[cfg(target_os = "android")]
mod app;
#[cfg(any(target_os = "android", test))]
mod auth;
#[cfg(any(target_os = "android", test))]
mod bootstrap_config;
#[cfg(any(target_os = "android", test))]
mod paths;
#[cfg(any(target_os = "android", test))]
mod presenter;
#[cfg(any(target_os = "android", test))]
mod preview;
#[cfg(target_os = "android")]
mod ui;
#[cfg(target_os = "android")]
mod views;

#[cfg(target_os = "android")]
fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skincheck=info".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting SkinCheck mobile shell...");
    dioxus::LaunchBuilder::mobile().launch(app::App);
}

#[cfg(not(target_os = "android"))]
fn main() {
    println!(
        "skincheck-mobile is intended for Android targets. Try: cargo build -p skincheck-mobile --target aarch64-linux-android"
    );
}
