//! Sidebar with the chat list: new chat, select, delete, collapse toggle.

use leptos::prelude::*;

use crate::chat::store::{sorted_by_recency, use_chat_store};
use crate::shared::icons::icon;

#[component]
#[allow(non_snake_case)]
pub fn Sidebar() -> impl IntoView {
    let store = use_chat_store();
    let collapsed = store.sidebar_collapsed;

    let sorted = move || store.chats.with(|chats| sorted_by_recency(chats));

    view! {
        <aside class="app-sidebar" class:app-sidebar--collapsed=move || collapsed.get()>
            <div class="app-sidebar__header">
                <button
                    class="app-sidebar__new-chat"
                    title="New chat"
                    on:click=move |_| store.create_chat()
                >
                    {icon("plus")}
                    <Show when=move || !collapsed.get()>
                        <span>"New chat"</span>
                    </Show>
                </button>
                <button
                    class="app-sidebar__toggle"
                    title=move || if collapsed.get() { "Expand" } else { "Collapse" }
                    on:click=move |_| store.toggle_sidebar()
                >
                    {move || {
                        if collapsed.get() {
                            icon("chevrons-right")
                        } else {
                            icon("chevrons-left")
                        }
                    }}
                </button>
            </div>

            <div class="app-sidebar__list">
                <Show when=move || sorted().is_empty() && !collapsed.get()>
                    <div class="app-sidebar__empty">"No chats yet. Start a new one."</div>
                </Show>

                {move || {
                    let is_collapsed = collapsed.get();
                    sorted()
                        .into_iter()
                        .map(|chat| {
                            let id = chat.id.clone();
                            let id_for_select = id.clone();
                            let id_for_delete = id.clone();
                            let is_active = move || {
                                store.active_id.get().as_deref() == Some(id.as_str())
                            };
                            let subtitle = chat
                                .file_meta
                                .as_ref()
                                .map(|meta| meta.filename.clone())
                                .unwrap_or_else(|| chat.preview.clone());
                            let title = chat.title.clone();
                            view! {
                                <div
                                    class="app-sidebar__item"
                                    class:app-sidebar__item--active=is_active.clone()
                                    title=title.clone()
                                    on:click=move |_| store.select_chat(&id_for_select)
                                >
                                    {if is_collapsed {
                                        view! {
                                            <div
                                                class="app-sidebar__dot"
                                                class:app-sidebar__dot--active=is_active.clone()
                                            ></div>
                                        }
                                        .into_any()
                                    } else {
                                        view! {
                                            <div class="app-sidebar__item-row">
                                                <div class="app-sidebar__item-body">
                                                    <div class="app-sidebar__item-title">{title.clone()}</div>
                                                    <div class="app-sidebar__item-subtitle">
                                                        {subtitle}
                                                    </div>
                                                </div>
                                                <button
                                                    class="app-sidebar__item-delete"
                                                    title="Delete chat"
                                                    on:click=move |ev| {
                                                        ev.stop_propagation();
                                                        store.delete_chat(&id_for_delete);
                                                    }
                                                >
                                                    {icon("trash")}
                                                </button>
                                            </div>
                                        }
                                        .into_any()
                                    }}
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </aside>
    }
}
