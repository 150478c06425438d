use dioxus::prelude::*;

use crate::app::{sign_out, AppController, IdentitySignal};
use crate::ui::{ButtonVariant, ErrorText, UiButton, UiCard};

#[component]
pub fn HomeView(
    controller: Signal<AppController>,
    identity: IdentitySignal,
    on_promote: EventHandler<()>,
) -> Element {
    let mut error_message = use_signal(|| None::<String>);
    let email = controller
        .read()
        .session()
        .and_then(|session| session.user.email.clone())
        .unwrap_or_default();

    let on_analyze = move |_| {
        if let Err(error) = controller.write().open_analysis() {
            error_message.set(Some(error.to_string()));
        }
    };

    rsx! {
        div {
            class: "ui-content",
            h1 { class: "ui-title", "Welcome" }
            if !email.is_empty() {
                p { class: "ui-muted", "Signed in as {email}" }
            }

            UiCard {
                p { style: "margin: 0; font-weight: 600;", "Check your skin" }
                p { class: "ui-muted", "Take or choose a photo and get product recommendations." }
                UiButton {
                    r#type: "button",
                    block: true,
                    onclick: on_analyze,
                    "Analyze my skin"
                }
            }

            UiCard {
                p { style: "margin: 0; font-weight: 600;", "Have a product?" }
                p { class: "ui-muted", "Send it to us for review." }
                UiButton {
                    r#type: "button",
                    block: true,
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_promote.call(()),
                    "Promote your product"
                }
            }

            ErrorText { message: error_message() }

            UiButton {
                r#type: "button",
                block: true,
                variant: ButtonVariant::Ghost,
                onclick: move |_| sign_out(controller, identity),
                "Sign out"
            }
        }
    }
}
