use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_primitives::toast::ToastProvider;
use skincheck_core::{Screen, ScreenController};

use crate::auth::{identity_client, MobileIdentity};
use crate::bootstrap_config::resolve_app_config;
use crate::ui::MOBILE_UI_STYLES;
use crate::views::{AnalysisView, HomeView, PromotionView, RegistrationView, SignInView};

pub type AppController = ScreenController;
pub type IdentitySignal = Signal<Option<Arc<MobileIdentity>>>;

/// Screens that sit beside the analysis flow rather than inside it.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Overlay {
    None,
    Registration,
    Promotion,
}

const TOAST_STYLES: &str = r#"
.toast-container {
    position: fixed;
    inset: auto 12px 12px 12px;
    z-index: 9999;
    pointer-events: none;
}
.toast-list {
    margin: 0;
    padding: 0;
    list-style: none;
    display: flex;
    flex-direction: column;
    gap: 8px;
}
.toast {
    pointer-events: auto;
    border-radius: 12px;
    border: 1px solid #e7d5cb;
    background: #ffffff;
    box-shadow: 0 10px 30px rgba(59, 47, 47, 0.12);
    padding: 10px 12px;
    color: #3b2f2f;
    display: flex;
    gap: 10px;
    align-items: flex-start;
}
.toast[data-type='success'] { border-color: #16a34a; }
.toast[data-type='error'] { border-color: #b42318; }
.toast[data-type='info'] { border-color: #c2410c; }
.toast-content { flex: 1; }
.toast-title { font-size: 13px; font-weight: 700; }
.toast-description { font-size: 12px; color: #7c6a63; margin-top: 2px; }
.toast-close {
    border: 0;
    background: transparent;
    color: #7c6a63;
    font-size: 16px;
    line-height: 1;
    padding: 0;
}
"#;

#[component]
pub fn App() -> Element {
    rsx! {
        ToastProvider {
            AppShell {}
        }
    }
}

#[component]
fn AppShell() -> Element {
    let config = use_signal(resolve_app_config);
    let identity: IdentitySignal = use_signal(|| match identity_client(&config.read()) {
        Ok(Some(client)) => Some(Arc::new(client)),
        Ok(None) => {
            tracing::warn!("No Firebase API key in this build; sign-in is disabled");
            None
        }
        Err(error) => {
            tracing::error!("Failed to build identity client: {}", error);
            None
        }
    });
    let controller = use_signal(AppController::random);
    let mut overlay = use_signal(|| Overlay::None);

    let screen = controller.read().screen();

    rsx! {
        style { "{MOBILE_UI_STYLES}" }
        style { "{TOAST_STYLES}" }

        div {
            class: "ui-screen",
            style: "font-family: system-ui, sans-serif;",
            {match (overlay(), screen) {
                (Overlay::Registration, Screen::Unauthenticated) => rsx! {
                    RegistrationView {
                        controller,
                        identity,
                        on_close: move |()| overlay.set(Overlay::None),
                    }
                },
                (Overlay::Promotion, Screen::Authenticated) => rsx! {
                    PromotionView {
                        config,
                        on_close: move |()| overlay.set(Overlay::None),
                    }
                },
                (_, Screen::Unauthenticated) => rsx! {
                    SignInView {
                        controller,
                        identity,
                        on_register: move |()| overlay.set(Overlay::Registration),
                    }
                },
                (_, Screen::Authenticated) => rsx! {
                    HomeView {
                        controller,
                        identity,
                        on_promote: move |()| overlay.set(Overlay::Promotion),
                    }
                },
                _ => rsx! {
                    AnalysisView { controller, identity }
                },
            }}
        }
    }
}

/// Leave the app: drop the flow state and forget the session tokens.
pub fn sign_out(mut controller: Signal<AppController>, identity: IdentitySignal) {
    controller.write().sign_out();
    if let Some(client) = identity.read().as_ref() {
        if let Err(error) = client.sign_out() {
            tracing::warn!("Failed to clear stored session: {}", error);
        }
    }
}
