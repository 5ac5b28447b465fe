//! App header: brand mark plus an inline editor for the active chat title.

use contracts::chat::DEFAULT_TITLE;
use leptos::prelude::*;

use crate::chat::store::use_chat_store;
use crate::shared::dom_utils::event_target_value;

#[component]
#[allow(non_snake_case)]
pub fn Header() -> impl IntoView {
    view! {
        <header class="app-header">
            <div class="app-header__brand">
                <div class="app-header__status-dot"></div>
                <h1 class="app-header__name">"Q2DOC"</h1>
                <ChatTitleEditor />
            </div>
        </header>
    }
}

#[component]
#[allow(non_snake_case)]
fn ChatTitleEditor() -> impl IntoView {
    let store = use_chat_store();
    let editing = RwSignal::new(false);
    let draft = RwSignal::new(String::new());

    let current_title = Memo::new(move |_| {
        store
            .active_chat()
            .map(|c| c.title)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    });

    let commit = move || {
        if let Some(id) = store.active_id.get_untracked() {
            store.rename_chat(&id, draft.get_untracked());
        }
        editing.set(false);
    };

    view! {
        <Show
            when=move || editing.get()
            fallback=move || {
                view! {
                    <button
                        class="app-header__title-btn"
                        title="Rename chat"
                        on:click=move |_| {
                            draft.set(current_title.get_untracked());
                            editing.set(true);
                        }
                    >
                        {move || current_title.get()}
                    </button>
                }
            }
        >
            <input
                type="text"
                class="app-header__title-input"
                prop:value=draft
                on:input=move |ev| draft.set(event_target_value(&ev))
                on:blur=move |_| commit()
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        commit();
                    }
                    if ev.key() == "Escape" {
                        editing.set(false);
                    }
                }
            />
        </Show>
    }
}
