//! Shared mobile UI primitives aligned with official Dioxus component patterns.

use dioxus::prelude::*;

/// Shared styles for the mobile wrappers and screen layout.
pub const MOBILE_UI_STYLES: &str = r"
.ui-screen {
    min-height: 100vh;
    background: #fdf8f5;
    color: #3b2f2f;
    display: flex;
    flex-direction: column;
}

.ui-content {
    flex: 1;
    padding: 16px;
    display: flex;
    flex-direction: column;
    gap: 12px;
}

.ui-card {
    background: #ffffff;
    border: 1px solid #f1e4dc;
    border-radius: 14px;
    padding: 14px;
    display: flex;
    flex-direction: column;
    gap: 8px;
}

.ui-title {
    margin: 0;
    font-size: 20px;
    font-weight: 700;
    color: #3b2f2f;
}

.ui-muted {
    margin: 0;
    font-size: 13px;
    color: #7c6a63;
}

.ui-error {
    margin: 0;
    font-size: 13px;
    color: #b42318;
}

.ui-label {
    font-size: 12px;
    font-weight: 600;
    color: #7c6a63;
}

.ui-button {
    border-radius: 12px;
    padding: 12px 14px;
    font-size: 14px;
    font-weight: 600;
    border: 1px solid transparent;
    transition: background-color 120ms ease, color 120ms ease, border-color 120ms ease;
}

.ui-button:disabled {
    opacity: 0.55;
}

.ui-button--block {
    width: 100%;
}

.ui-button--primary {
    background: #c2410c;
    color: #ffffff;
    border-color: #c2410c;
}

.ui-button--outline {
    background: #ffffff;
    color: #3b2f2f;
    border-color: #e7d5cb;
}

.ui-button--ghost {
    background: transparent;
    color: #7c6a63;
    border-color: transparent;
}

.ui-input, .ui-textarea, .ui-select {
    width: 100%;
    border: 1px solid #e7d5cb;
    border-radius: 12px;
    padding: 10px 12px;
    font-size: 14px;
    background: #ffffff;
    color: #3b2f2f;
}

.ui-textarea {
    resize: none;
}

.ui-photo {
    width: 100%;
    max-height: 320px;
    object-fit: cover;
    border-radius: 14px;
}
";

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Ghost,
}

impl ButtonVariant {
    const fn class(self) -> &'static str {
        match self {
            Self::Primary => "ui-button--primary",
            Self::Outline => "ui-button--outline",
            Self::Ghost => "ui-button--ghost",
        }
    }
}

#[component]
pub fn UiButton(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] block: bool,
    #[props(default)] disabled: bool,
    onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = button)]
    attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let mut class_name = format!("ui-button {}", variant.class());
    if block {
        class_name.push_str(" ui-button--block");
    }

    rsx! {
        button {
            class: "{class_name}",
            disabled,
            onclick: move |event| {
                if let Some(handler) = &onclick {
                    handler.call(event);
                }
            },
            ..attributes,
            {children}
        }
    }
}

#[component]
pub fn UiInput(
    oninput: Option<EventHandler<FormEvent>>,
    onchange: Option<EventHandler<FormEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = input)]
    attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        input {
            class: "ui-input",
            oninput: move |event| _ = oninput.map(|handler| handler(event)),
            onchange: move |event| _ = onchange.map(|handler| handler(event)),
            ..attributes,
        }
    }
}

#[component]
pub fn UiTextarea(
    oninput: Option<EventHandler<FormEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = textarea)]
    attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        textarea {
            class: "ui-textarea",
            rows: 3,
            oninput: move |event| _ = oninput.map(|handler| handler(event)),
            ..attributes,
        }
    }
}

/// Labelled form row.
#[component]
pub fn UiField(label: String, children: Element) -> Element {
    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 4px;",
            span { class: "ui-label", "{label}" }
            {children}
        }
    }
}

#[component]
pub fn UiCard(children: Element) -> Element {
    rsx! {
        div { class: "ui-card", {children} }
    }
}

#[component]
pub fn ErrorText(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p { class: "ui-error", role: "alert", "{message}" }
        }
    }
}

/// Screen header with an optional back action.
#[component]
pub fn ScreenHeader(title: String, onback: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            style: "
                display: flex;
                align-items: center;
                gap: 8px;
                padding: 12px 16px;
                border-bottom: 1px solid #f1e4dc;
                background: #ffffff;
            ",
            if let Some(handler) = onback {
                UiButton {
                    r#type: "button",
                    variant: ButtonVariant::Ghost,
                    style: "padding: 6px 8px;",
                    onclick: move |_| handler.call(()),
                    "Back"
                }
            }
            h1 { class: "ui-title", style: "font-size: 17px;", "{title}" }
        }
    }
}
