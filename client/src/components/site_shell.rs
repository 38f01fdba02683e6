//! Site chrome: header navigation and footer, shared by every page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::chat_launcher::ChatLauncher;
use crate::components::consent_banner::ConsentBanner;
use crate::state::session::SessionStore;

/// Header, footer, consent banner, and chat launcher around `children`.
#[component]
pub fn SiteShell(children: Children) -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let session = store.signal();

    view! {
        <header class="site-header">
            <A attr:class="site-header__brand" href="/">
                "Mainstreet Studio"
            </A>
            <nav class="site-header__nav">
                <A href="/pricing">"Pricing"</A>
                <A href="/industries">"Industries"</A>
                <A href="/locations">"Locations"</A>
                <A href="/portfolio">"Work"</A>
                <Show when=move || session.get().is_authenticated()>
                    <A href="/admin">"Playground"</A>
                </Show>
            </nav>
        </header>
        <main class="site-main">{children()}</main>
        <footer class="site-footer">
            <p>"Mainstreet Studio - websites for local businesses."</p>
            <p class="site-footer__legal">
                "Hand-built sites for plumbers, landscapers, salons, and the rest of Main Street."
            </p>
        </footer>
        <ConsentBanner />
        <ChatLauncher />
    }
}
