use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions};
use skincheck_core::config::AppConfig;
use skincheck_core::flow::PromotionScreen;
use skincheck_core::mail::OutboxComposer;
use skincheck_core::ImageSource;

use crate::paths;
use crate::presenter::submission_toast;
use crate::preview::{photo_preview, picked_photo, PhotoPreview, PickedPhoto};
use crate::ui::{ErrorText, ScreenHeader, UiButton, UiCard, UiField, UiInput, UiTextarea};

#[component]
pub fn PromotionView(config: Signal<AppConfig>, on_close: EventHandler<()>) -> Element {
    let mut screen = use_signal(|| PromotionScreen::new(config.read().recipients()));
    let mut busy = use_signal(|| false);
    let mut pick_error = use_signal(|| None::<String>);
    let toasts = use_toast();

    let submission = screen.read().submission.clone();
    let error_message = screen.read().error_message().map(str::to_string);
    let preview = photo_preview(submission.attached_image.as_ref());

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
                Ok(image) => {
                    let mut working = screen.read().clone();
                    working
                        .attach_photo(&PickedPhoto(Some(image)), ImageSource::Library)
                        .await;
                    screen.set(working);
                    pick_error.set(None);
                }
                Err(rejection) => pick_error.set(Some(rejection.message().to_string())),
            }
        });
    };

    let on_submit = move |_| {
        if busy() {
            return;
        }
        busy.set(true);
        let composer = OutboxComposer::new(paths::outbox_dir(&config.read()));
        let mut working = screen.read().clone();
        spawn(async move {
            let delivered = match working.submit(&composer).await {
                Ok(status) => {
                    if let Some((title, description)) = submission_toast(status) {
                        if status.is_delivered() {
                            toasts.success(
                                title.to_string(),
                                ToastOptions::new().description(description),
                            );
                        } else {
                            toasts.error(
                                title.to_string(),
                                ToastOptions::new().description(description),
                            );
                        }
                    }
                    status.is_delivered()
                }
                Err(error) => {
                    tracing::debug!("Promotion rejected: {}", error);
                    false
                }
            };
            screen.set(working);
            busy.set(false);
            if delivered {
                on_close.call(());
            }
        });
    };

    rsx! {
        ScreenHeader {
            title: "Promote your product",
            onback: move |()| on_close.call(()),
        }
        div {
            class: "ui-content",
            UiCard {
                UiField {
                    label: "Your email",
                    UiInput {
                        r#type: "email",
                        autocomplete: "email",
                        value: "{submission.sender_email}",
                        oninput: move |event: FormEvent| screen.write().submission.sender_email = event.value(),
                    }
                }
                UiField {
                    label: "Product name",
                    UiInput {
                        value: "{submission.product_name}",
                        oninput: move |event: FormEvent| screen.write().submission.product_name = event.value(),
                    }
                }
                UiField {
                    label: "Product content",
                    UiTextarea {
                        value: "{submission.product_content}",
                        oninput: move |event: FormEvent| screen.write().submission.product_content = event.value(),
                    }
                }
                UiField {
                    label: "Product functionality",
                    UiTextarea {
                        value: "{submission.product_functionality}",
                        oninput: move |event: FormEvent| {
                            screen.write().submission.product_functionality = event.value();
                        },
                    }
                }

                if let PhotoPreview::DataUri(uri) = preview {
                    img { class: "ui-photo", src: "{uri}", alt: "Product photo" }
                }
                label {
                    class: "ui-button ui-button--outline ui-button--block",
                    style: "text-align: center;",
                    if submission.attached_image.is_some() { "Change photo" } else { "Add a photo" }
                    UiInput {
                        r#type: "file",
                        accept: "image/*",
                        style: "display: none;",
                        onchange: on_pick,
                    }
                }

                ErrorText { message: pick_error().or(error_message) }
                UiButton {
                    r#type: "button",
                    block: true,
                    disabled: busy(),
                    onclick: on_submit,
                    if busy() { "Sending..." } else { "Submit" }
                }
            }
        }
    }
}
