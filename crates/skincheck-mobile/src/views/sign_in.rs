use dioxus::prelude::*;
use skincheck_core::flow::request_password_reset;
use skincheck_core::{AuthError, IdentityProvider};

use crate::app::{AppController, IdentitySignal};
use crate::ui::{ButtonVariant, ErrorText, UiButton, UiCard, UiField, UiInput};

#[component]
pub fn SignInView(
    controller: Signal<AppController>,
    identity: IdentitySignal,
    on_register: EventHandler<()>,
) -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut notice = use_signal(|| None::<String>);

    let error_message = controller
        .read()
        .state()
        .error_message()
        .map(str::to_string)
        .or_else(|| identity.read().is_none().then(|| AuthError::NotConfigured.to_string()));

    let on_sign_in = move |_| {
        let Some(client) = identity.read().clone() else {
            return;
        };
        if busy() {
            return;
        }
        busy.set(true);
        notice.set(None);
        controller.write().clear_error();

        let email_value = email();
        let password_value = password();
        spawn(async move {
            let result = client.sign_in(email_value.trim(), &password_value).await;
            if let Err(error) = controller.write().apply_sign_in(result) {
                tracing::debug!("Sign-in rejected: {}", error);
            }
            busy.set(false);
        });
    };

    let on_forgot_password = move |_| {
        let Some(client) = identity.read().clone() else {
            return;
        };
        let email_value = email();
        spawn(async move {
            match request_password_reset(client.as_ref(), &email_value).await {
                Ok(message) => notice.set(Some(message.to_string())),
                Err(error) => notice.set(Some(error.to_string())),
            }
        });
    };

    rsx! {
        div {
            class: "ui-content",
            style: "justify-content: center;",
            h1 { class: "ui-title", style: "font-size: 26px;", "SkinCheck" }
            p { class: "ui-muted", "Every skin is unique." }

            UiCard {
                UiField {
                    label: "Email",
                    UiInput {
                        r#type: "email",
                        autocomplete: "email",
                        value: "{email}",
                        oninput: move |event: FormEvent| email.set(event.value()),
                    }
                }
                UiField {
                    label: "Password",
                    UiInput {
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |event: FormEvent| password.set(event.value()),
                    }
                }
                ErrorText { message: error_message }
                if let Some(message) = notice() {
                    p { class: "ui-muted", "{message}" }
                }
                UiButton {
                    r#type: "button",
                    block: true,
                    disabled: busy() || identity.read().is_none(),
                    onclick: on_sign_in,
                    if busy() { "Signing in..." } else { "Sign in" }
                }
                UiButton {
                    r#type: "button",
                    block: true,
                    variant: ButtonVariant::Ghost,
                    disabled: identity.read().is_none(),
                    onclick: on_forgot_password,
                    "Forgot password?"
                }
            }

            UiButton {
                r#type: "button",
                block: true,
                variant: ButtonVariant::Outline,
                disabled: identity.read().is_none(),
                onclick: move |_| on_register.call(()),
                "Create an account"
            }
        }
    }
}
