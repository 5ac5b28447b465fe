use leptos::prelude::*;

use crate::chat::store::ChatStore;
use crate::chat::view::ChatPanel;
use crate::layout::{Header, Sidebar};

#[component]
#[allow(non_snake_case)]
pub fn App() -> impl IntoView {
    // Restore the chat store from localStorage and provide it to the whole
    // app via context. `load` guarantees at least one chat exists.
    provide_context(ChatStore::load());

    view! {
        <div class="app-shell">
            <Sidebar />
            <div class="app-shell__main">
                <Header />
                <main class="app-shell__content">
                    <ChatPanel />
                </main>
            </div>
        </div>
    }
}
