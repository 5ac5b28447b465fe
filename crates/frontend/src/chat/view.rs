//! Chat panel - view components

use contracts::chat::{ChatMessage, ChatRole, FileMeta};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

use super::model;
use super::store::{use_chat_store, ChatStore};
use super::view_model::{ChatPanelVm, UploadPhase};
use crate::shared::dom_utils::{event_target_file, event_target_value, format_size_mb};
use crate::shared::icons::icon;

const FILE_INPUT_ID: &str = "chat-file-input";

const PDF_ONLY_MESSAGE: &str = "Please select a PDF file";

/// Chat message appended for a rejected file, or `None` when the file may be
/// uploaded. The rejection goes into the message log because the drop zone
/// (and its status line) is unmounted once a session is bound.
fn rejected_file_message(mime: &str) -> Option<ChatMessage> {
    if model::is_pdf_mime(mime) {
        None
    } else {
        Some(ChatMessage::assistant(PDF_ONLY_MESSAGE, vec![]))
    }
}

fn click_file_input() {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let Some(input) = document.get_element_by_id(FILE_INPUT_ID) {
                if let Ok(input) = input.dyn_into::<web_sys::HtmlElement>() {
                    input.click();
                }
            }
        }
    }
}

/// Validate and start an upload for the active chat.
///
/// A non-PDF file never reaches the network: the widget shows a validation
/// message and returns. While a request is in flight further selections are
/// ignored.
fn begin_upload(store: ChatStore, vm: ChatPanelVm, file: web_sys::File) {
    let chat = match store.active_chat_untracked() {
        Some(chat) => chat,
        None => return,
    };
    if vm.is_uploading.get_untracked() {
        return;
    }
    if let Some(rejection) = rejected_file_message(&file.type_()) {
        vm.upload_phase.set(UploadPhase::Error);
        vm.upload_status.set(Some(PDF_ONLY_MESSAGE.to_string()));
        store.update_chat(&chat.id, |chat| {
            chat.push_message(rejection);
        });
        return;
    }

    let chat_id = chat.id.clone();
    vm.is_uploading.set(true);
    vm.upload_progress.set(0.0);
    vm.upload_phase.set(UploadPhase::Uploading);
    vm.upload_status.set(Some(format!(
        "Uploading {} ({})",
        file.name(),
        format_size_mb(file.size() as u64)
    )));

    model::upload_document(
        file,
        move |fraction| vm.upload_progress.set(fraction),
        move |result| {
            vm.is_uploading.set(false);
            vm.upload_progress.set(0.0);
            match result {
                Ok(data) => {
                    vm.upload_phase.set(UploadPhase::Done);
                    vm.upload_status.set(Some("Uploaded successfully".to_string()));
                    store.update_chat(&chat_id, |chat| {
                        chat.bind_session(
                            data.session_id.clone(),
                            FileMeta {
                                filename: data.filename.clone(),
                                size: data.size,
                            },
                        );
                        chat.push_message(ChatMessage::assistant(
                            format!(
                                "I've processed {}. What would you like to know?",
                                data.filename
                            ),
                            vec![],
                        ));
                    });
                }
                Err(e) => {
                    log::debug!("upload failed: {}", e);
                    vm.upload_phase.set(UploadPhase::Error);
                    vm.upload_status.set(Some(e.clone()));
                    store.update_chat(&chat_id, |chat| {
                        chat.push_message(ChatMessage::assistant(
                            format!("Upload error: {}", e),
                            vec![],
                        ));
                    });
                }
            }
        },
    );
}

#[component]
#[allow(non_snake_case)]
pub fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let is_user = message.role == ChatRole::User;
    let sources = message.sources.clone();
    view! {
        <div class="chat-message" class:chat-message--user=is_user>
            <div
                class="chat-message__bubble"
                class:chat-message__bubble--user=is_user
            >
                <div class="chat-message__content">
                    {if message.typing { "Thinking…".to_string() } else { message.content.clone() }}
                </div>
                {(!is_user && !sources.is_empty()).then(|| view! {
                    <div class="chat-message__sources">
                        <div class="chat-message__sources-label">"Sources"</div>
                        <div class="chat-message__sources-list">
                            {sources.iter().map(|s| view! {
                                <span class="chat-message__source-chip">{s.clone()}</span>
                            }).collect_view()}
                        </div>
                    </div>
                })}
            </div>
        </div>
    }
}

/// Drop zone shown until a document is bound to the chat.
#[component]
#[allow(non_snake_case)]
fn UploadZone(vm: ChatPanelVm) -> impl IntoView {
    let store = use_chat_store();

    view! {
        <div
            class="upload-zone"
            class:upload-zone--drag-over=move || vm.drag_over.get()
            on:click=move |_| click_file_input()
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                vm.drag_over.set(true);
            }
            on:dragleave=move |_| vm.drag_over.set(false)
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                vm.drag_over.set(false);
                let file = ev
                    .data_transfer()
                    .and_then(|dt| dt.files())
                    .and_then(|files| files.get(0));
                if let Some(file) = file {
                    begin_upload(store, vm, file);
                }
            }
        >
            {icon("file-text")}
            <p class="upload-zone__title">"Drop PDF here or click to browse"</p>
            <p class="upload-zone__hint">"Only PDF documents are supported"</p>

            <Show when=move || vm.upload_phase.get() == UploadPhase::Uploading>
                <div class="upload-zone__progress">
                    <div
                        class="upload-zone__progress-bar"
                        style:width=move || format!("{:.0}%", vm.upload_progress.get() * 100.0)
                    ></div>
                </div>
            </Show>

            {move || vm.upload_status.get().map(|status| {
                let phase = vm.upload_phase.get();
                view! {
                    <div
                        class="upload-zone__status"
                        class:upload-zone__status--error=phase == UploadPhase::Error
                        class:upload-zone__status--done=phase == UploadPhase::Done
                    >
                        {status}
                    </div>
                }
            })}
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ChatPanel() -> impl IntoView {
    let store = use_chat_store();
    let vm = ChatPanelVm::new();
    let messages_container_ref = NodeRef::<leptos::html::Div>::new();

    let active_chat = Memo::new(move |_| store.active_chat());
    let messages = move || {
        active_chat
            .get()
            .map(|c| c.messages)
            .unwrap_or_default()
    };
    let can_prompt = move || active_chat.get().map(|c| c.can_prompt()).unwrap_or(false);
    let needs_upload = move || !can_prompt();

    // Reset the per-chat transient state when the selection changes.
    Effect::new(move |prev: Option<Option<String>>| {
        let id = store.active_id.get();
        if let Some(prev) = prev {
            if prev != id {
                vm.input.set(String::new());
                vm.upload_phase.set(UploadPhase::Idle);
                vm.upload_status.set(None);
            }
        }
        id
    });

    // Keep the newest message in view.
    Effect::new(move |_| {
        let _ = messages();
        if let Some(container) = messages_container_ref.get_untracked() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    let handle_send = move || {
        let chat = match store.active_chat_untracked() {
            Some(chat) => chat,
            None => return,
        };
        // No bound session: submitting is a no-op, the input stays disabled.
        let session_id = match chat.session_id.clone() {
            Some(id) => id,
            None => return,
        };
        if vm.is_sending.get_untracked() {
            return;
        }
        let content = vm.input.get_untracked().trim().to_string();
        if content.is_empty() {
            return;
        }

        vm.input.set(String::new());
        vm.is_sending.set(true);

        let chat_id = chat.id.clone();
        store.update_chat(&chat_id, |chat| {
            chat.push_message(ChatMessage::user(content.clone()));
            chat.push_message(ChatMessage::typing());
            chat.note_prompt(&content);
            chat.auto_title(&content);
        });

        wasm_bindgen_futures::spawn_local(async move {
            let outcome = model::send_prompt(&session_id, &content).await;
            store.update_chat(&chat_id, |chat| {
                let reply = match &outcome {
                    Ok(data) => ChatMessage::assistant(
                        data.answer_text()
                            .unwrap_or_else(|| "No answer received".to_string()),
                        data.sources(),
                    ),
                    Err(e) => {
                        ChatMessage::assistant(format!("Sorry, an error occurred: {}", e), vec![])
                    }
                };
                if !chat.resolve_typing(reply) {
                    log::warn!("typing placeholder already resolved for chat {}", chat.id);
                }
            });
            vm.is_sending.set(false);
        });
    };

    let composer_disabled = Signal::derive(move || !can_prompt() || vm.is_sending.get());
    let send_disabled = Signal::derive(move || {
        !can_prompt() || vm.is_sending.get() || vm.input.get().trim().is_empty()
    });

    view! {
        <div class="chat-panel">
            <input
                type="file"
                accept="application/pdf"
                id=FILE_INPUT_ID
                style="display: none;"
                on:change=move |ev| {
                    if let Some(file) = event_target_file(&ev) {
                        begin_upload(store, vm, file);
                    }
                }
            />

            <Show when=needs_upload>
                <UploadZone vm=vm />
            </Show>

            <div node_ref=messages_container_ref class="chat-panel__messages">
                {move || {
                    messages()
                        .into_iter()
                        .map(|message| view! { <MessageBubble message=message /> })
                        .collect_view()
                }}
            </div>

            <div class="chat-panel__composer">
                <Flex style="gap: 8px; align-items: center;">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=vm.is_uploading
                        on_click=move |_| click_file_input()
                    >
                        {icon("paperclip")}
                    </Button>

                    <div class="chat-panel__input-wrap">
                        <input
                            type="text"
                            class="chat-panel__input"
                            placeholder=move || {
                                if can_prompt() {
                                    "Ask anything about your document…"
                                } else {
                                    "Attach a PDF to start chatting"
                                }
                            }
                            prop:value=vm.input
                            disabled=move || composer_disabled.get()
                            on:input=move |ev| vm.input.set(event_target_value(&ev))
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    handle_send();
                                }
                            }
                        />
                        <Show when=move || vm.is_uploading.get()>
                            <div class="chat-panel__upload-overlay">
                                <div class="chat-panel__upload-track">
                                    <div
                                        class="chat-panel__upload-bar"
                                        style:width=move || {
                                            format!("{:.0}%", vm.upload_progress.get() * 100.0)
                                        }
                                    ></div>
                                </div>
                            </div>
                        </Show>
                    </div>

                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=send_disabled
                        on_click=move |_| handle_send()
                    >
                        {icon("send")}
                        {move || if vm.is_sending.get() { " Sending…" } else { " Send" }}
                    </Button>
                </Flex>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_file_gets_chat_message() {
        let message = rejected_file_message("text/plain").unwrap();
        assert_eq!(message.role, ChatRole::Assistant);
        assert_eq!(message.content, PDF_ONLY_MESSAGE);

        let mut chat = contracts::chat::Chat::new();
        chat.bind_session(
            "abc".to_string(),
            FileMeta {
                filename: "doc.pdf".to_string(),
                size: 7,
            },
        );
        chat.push_message(message);
        assert_eq!(chat.messages.last().unwrap().content, PDF_ONLY_MESSAGE);
    }

    #[test]
    fn test_pdf_file_is_not_rejected() {
        assert!(rejected_file_message("application/pdf").is_none());
    }
}
