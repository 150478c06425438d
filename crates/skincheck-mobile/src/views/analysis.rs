use std::time::Duration;

use dioxus::prelude::*;
use skincheck_core::flow::AnalysisStart;
use skincheck_core::Screen;

use crate::app::{AppController, IdentitySignal};
use crate::presenter::{product_label, screen_title};
use crate::preview::{photo_preview, picked_photo, PhotoPreview};
use crate::ui::{ButtonVariant, ErrorText, ScreenHeader, UiButton, UiCard, UiInput};

/// How often the pending screen looks for the timer event once the delay
/// has passed.
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[component]
pub fn AnalysisView(controller: Signal<AppController>, identity: IdentitySignal) -> Element {
    let mut pick_error = use_signal(|| None::<String>);

    let screen = controller.read().screen();
    let state_error = controller.read().state().error_message().map(str::to_string);
    let preview = photo_preview(controller.read().state().captured_image());
    let record = controller.read().state().diagnosis_record();

    let on_pick = move |event: FormEvent| {
        let mut files = event.files();
        let Some(file) = files.pop() else {
            return;
        };
        let file_name = file.name();
        let content_type = file.content_type();

        spawn(async move {
            let bytes = match file.read_bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(error) => {
                    pick_error.set(Some(format!("Failed to read selected file: {error}")));
                    return;
                }
            };
            match picked_photo(&file_name, content_type.as_deref(), bytes) {
                Ok(image) => match controller.write().store_capture(Some(image)) {
                    Ok(_) => pick_error.set(None),
                    Err(error) => pick_error.set(Some(error.to_string())),
                },
                Err(rejection) => pick_error.set(Some(rejection.message().to_string())),
            }
        });
    };

    let on_analyze = move |_| {
        let start = controller.write().analyze();
        match start {
            Ok(AnalysisStart::Scheduled(run)) => {
                tracing::debug!("Analysis run {} scheduled", run.get());
                spawn(await_analysis(controller));
            }
            Ok(AnalysisStart::AlreadyDiagnosed(category)) => {
                tracing::debug!("Showing existing diagnosis {}", category);
            }
            Err(error) => tracing::debug!("Analysis not started: {}", error),
        }
    };

    let on_browse = move |_| {
        if let Err(error) = controller.write().browse_products() {
            tracing::warn!("Cannot browse products: {}", error);
        }
    };

    rsx! {
        ScreenHeader {
            title: screen_title(screen),
            onback: move |()| {
                controller.write().back();
            },
        }
        div {
            class: "ui-content",
            {match screen {
                Screen::CaptureReady | Screen::CaptureComplete => rsx! {
                    UiCard {
                        {match preview {
                            PhotoPreview::DataUri(uri) => rsx! {
                                img { class: "ui-photo", src: "{uri}", alt: "Selected photo" }
                            },
                            PhotoPreview::TooLarge => rsx! {
                                p { class: "ui-muted", "Photo selected (too large to preview)." }
                            },
                            PhotoPreview::None => rsx! {
                                p { class: "ui-muted", "Take a photo of your skin or choose one from your library." }
                            },
                        }}
                        label {
                            class: "ui-button ui-button--outline ui-button--block",
                            style: "text-align: center;",
                            "Take photo"
                            UiInput {
                                r#type: "file",
                                accept: "image/*",
                                "capture": "environment",
                                style: "display: none;",
                                onchange: on_pick,
                            }
                        }
                        label {
                            class: "ui-button ui-button--outline ui-button--block",
                            style: "text-align: center;",
                            "Choose from library"
                            UiInput {
                                r#type: "file",
                                accept: "image/*",
                                style: "display: none;",
                                onchange: on_pick,
                            }
                        }
                        ErrorText { message: pick_error().or(state_error) }
                        UiButton {
                            r#type: "button",
                            block: true,
                            onclick: on_analyze,
                            "Analyze"
                        }
                    }
                },
                Screen::AnalysisPending => rsx! {
                    UiCard {
                        if let PhotoPreview::DataUri(uri) = preview {
                            img { class: "ui-photo", src: "{uri}", alt: "Photo being analyzed" }
                        }
                        p { style: "margin: 0; font-weight: 600;", "Analyzing your picture..." }
                        p { class: "ui-muted", "This only takes a moment." }
                    }
                },
                Screen::ResultShown => rsx! {
                    if let Some(record) = record {
                        UiCard {
                            h2 { class: "ui-title", "{record.title}" }
                            p { class: "ui-muted", "Symptoms: {record.symptoms}" }
                        }
                        UiCard {
                            p { style: "margin: 0; font-weight: 600;", "Recommended Products:" }
                            for name in record.product_names() {
                                p { style: "margin: 0;", "- {name}" }
                            }
                        }
                        UiButton {
                            r#type: "button",
                            block: true,
                            onclick: on_browse,
                            "Browse products"
                        }
                    }
                },
                Screen::ProductBrowsing => rsx! {
                    if let Some(record) = record {
                        for (index, product) in record.products.iter().enumerate() {
                            UiCard {
                                key: "{product.name}",
                                p { style: "margin: 0; font-weight: 600;", {product_label(index, product.name)} }
                                a {
                                    href: product.purchase_url,
                                    target: "_blank",
                                    rel: "noopener",
                                    style: "font-size: 13px; color: #c2410c;",
                                    "Buy online"
                                }
                            }
                        }
                    }
                },
                Screen::Unauthenticated | Screen::Authenticated => rsx! {
                    UiButton {
                        r#type: "button",
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            controller.write().back();
                        },
                        "Back"
                    }
                },
            }}
            if identity.read().is_none() {
                p { class: "ui-muted", "Sign-in is disabled in this build." }
            }
        }
    }
}

/// Wait out the analysis delay, then apply the timer event.
async fn await_analysis(mut controller: Signal<AppController>) {
    let delay = controller.read().analysis_delay();
    tokio::time::sleep(delay).await;

    loop {
        let event = controller.write().try_next_event();
        match event {
            Some(event) => {
                if let Err(error) = controller.write().handle_event(event) {
                    tracing::warn!("Failed to apply analysis result: {}", error);
                }
                if controller.read().screen() != Screen::AnalysisPending {
                    return;
                }
            }
            None if controller.read().screen() != Screen::AnalysisPending => return,
            None => tokio::time::sleep(EVENT_POLL_INTERVAL).await,
        }
    }
}
