use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions};
use skincheck_core::flow::{RegistrationFlow, RegistrationStage};
use skincheck_core::models::Gender;

use crate::app::{AppController, IdentitySignal};
use crate::presenter::{birth_date_input_value, parse_birth_date};
use crate::ui::{ButtonVariant, ErrorText, ScreenHeader, UiButton, UiCard, UiField, UiInput};

#[component]
pub fn RegistrationView(
    controller: Signal<AppController>,
    identity: IdentitySignal,
    on_close: EventHandler<()>,
) -> Element {
    let mut flow = use_signal(RegistrationFlow::new);
    let mut busy = use_signal(|| false);
    let toasts = use_toast();

    let stage = flow.read().stage();
    let error_message = flow.read().error_message().map(str::to_string);
    let status_message = flow.read().status_message().map(str::to_string);
    let form = flow.read().form.clone();
    let birth_date_value = birth_date_input_value(form.birth_date);

    let on_submit = move |_| {
        let Some(client) = identity.read().clone() else {
            return;
        };
        if busy() {
            return;
        }
        busy.set(true);
        let mut working = flow.read().clone();
        spawn(async move {
            if let Err(error) = working.submit(client.as_ref()).await {
                tracing::debug!("Registration rejected: {}", error);
            }
            flow.set(working);
            busy.set(false);
        });
    };

    let on_resend = move |_| {
        let Some(client) = identity.read().clone() else {
            return;
        };
        let mut working = flow.read().clone();
        spawn(async move {
            if working.send_verification(client.as_ref()).await.is_ok() {
                toasts.info(
                    "Verification email sent".to_string(),
                    ToastOptions::new().description("Check your inbox for the link."),
                );
            }
            flow.set(working);
        });
    };

    let on_check = move |_| {
        let Some(client) = identity.read().clone() else {
            return;
        };
        if busy() {
            return;
        }
        busy.set(true);
        let mut working = flow.read().clone();
        spawn(async move {
            let verified = working.check_verification(client.as_ref()).await;
            let session = working.verified_session().cloned();
            flow.set(working);
            busy.set(false);

            if let (Ok(true), Some(session)) = (verified, session) {
                if let Err(error) = controller.write().accept_session(session) {
                    tracing::warn!("Could not enter the app after verification: {}", error);
                    return;
                }
                on_close.call(());
            }
        });
    };

    let on_cancel = move |_| {
        flow.write().cancel();
        on_close.call(());
    };

    rsx! {
        ScreenHeader {
            title: "Create an account",
            onback: move |()| {
                flow.write().cancel();
                on_close.call(());
            },
        }
        div {
            class: "ui-content",
            if stage == RegistrationStage::Editing {
                UiCard {
                    UiField {
                        label: "First name",
                        UiInput {
                            value: "{form.first_name}",
                            oninput: move |event: FormEvent| flow.write().form.first_name = event.value(),
                        }
                    }
                    UiField {
                        label: "Last name",
                        UiInput {
                            value: "{form.last_name}",
                            oninput: move |event: FormEvent| flow.write().form.last_name = event.value(),
                        }
                    }
                    UiField {
                        label: "Gender",
                        select {
                            class: "ui-select",
                            onchange: move |event: FormEvent| {
                                let value = event.value();
                                if let Some(gender) = Gender::ALL
                                    .into_iter()
                                    .find(|gender| gender.label() == value)
                                {
                                    flow.write().form.gender = gender;
                                }
                            },
                            for gender in Gender::ALL {
                                option {
                                    value: gender.label(),
                                    selected: gender == form.gender,
                                    "{gender.label()}"
                                }
                            }
                        }
                    }
                    UiField {
                        label: "Birth date",
                        UiInput {
                            r#type: "date",
                            value: "{birth_date_value}",
                            onchange: move |event: FormEvent| {
                                if let Some(date) = parse_birth_date(&event.value()) {
                                    flow.write().form.birth_date = date;
                                }
                            },
                        }
                    }
                    UiField {
                        label: "Email",
                        UiInput {
                            r#type: "email",
                            autocomplete: "email",
                            value: "{form.email}",
                            oninput: move |event: FormEvent| flow.write().form.email = event.value(),
                        }
                    }
                    UiField {
                        label: "Password",
                        UiInput {
                            r#type: "password",
                            autocomplete: "new-password",
                            value: "{form.password}",
                            oninput: move |event: FormEvent| flow.write().form.password = event.value(),
                        }
                    }
                    ErrorText { message: error_message }
                    UiButton {
                        r#type: "button",
                        block: true,
                        disabled: busy(),
                        onclick: on_submit,
                        if busy() { "Registering..." } else { "Register" }
                    }
                    UiButton {
                        r#type: "button",
                        block: true,
                        variant: ButtonVariant::Ghost,
                        onclick: on_cancel,
                        "Cancel"
                    }
                }
            } else {
                UiCard {
                    if let Some(message) = status_message {
                        p { class: "ui-muted", "{message}" }
                    }
                    p { class: "ui-muted", "Sent to {form.email}" }
                    ErrorText { message: error_message }
                    UiButton {
                        r#type: "button",
                        block: true,
                        disabled: busy(),
                        onclick: on_check,
                        "I have verified my email"
                    }
                    UiButton {
                        r#type: "button",
                        block: true,
                        variant: ButtonVariant::Outline,
                        onclick: on_resend,
                        "Resend verification email"
                    }
                    UiButton {
                        r#type: "button",
                        block: true,
                        variant: ButtonVariant::Ghost,
                        onclick: on_cancel,
                        "Cancel"
                    }
                }
            }
        }
    }
}
