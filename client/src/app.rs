//! Application root: context wiring, router, and the SSR shell.
//!
//! ARCHITECTURE
//! ============
//! Everything process-wide (auth events, session store, role cache, consent
//! signal, chat loader cell) is constructed here once and provided via
//! context, so the rest of the tree never reaches for ambient globals.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::site_shell::SiteShell;
use crate::pages::admin::AdminPage;
use crate::pages::home::HomePage;
use crate::pages::industries::{IndustriesIndexPage, IndustryPage};
use crate::pages::locations::{LocationPage, LocationsIndexPage};
use crate::pages::login::LoginPage;
use crate::pages::portfolio::{CaseStudyPage, PortfolioIndexPage};
use crate::pages::pricing::PricingPage;
use crate::state::events::AuthEvents;
use crate::state::roles::RoleResolver;
use crate::state::session::{DeferredAction, SessionStore};
use crate::util::affiliate;
use crate::util::chat::ChatLoader;
use crate::util::consent::{self, ConsentSignal};

/// HTML document shell used by SSR.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let events = AuthEvents::new();
    let resolver = RoleResolver::new();

    // Phase-2 work from auth events runs as its own task, never inline in
    // the event callback.
    let store = SessionStore::install(events.clone(), {
        let resolver = resolver.clone();
        move |action| match action {
            DeferredAction::RefreshRole { user_id } => {
                #[cfg(feature = "hydrate")]
                {
                    let resolver = resolver.clone();
                    leptos::task::spawn_local(async move {
                        let _ = resolver.resolve(Some(user_id), shared::ROLE_ADMIN).await;
                    });
                }
                #[cfg(not(feature = "hydrate"))]
                {
                    let _ = user_id;
                }
            }
            DeferredAction::ClearRoles => resolver.evict_all(),
        }
    });

    let consent = ConsentSignal::install();
    consent::install_change_listener(consent);

    provide_context(events);
    provide_context(resolver);
    provide_context(store);
    provide_context(consent);
    provide_context(ChatLoader::new());

    // Referral capture is consent-gated; the effect re-runs if the visitor
    // accepts after landing.
    Effect::new(move || {
        if consent::unlocks_loaders(consent.0.get()) {
            affiliate::capture_current_location();
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/site.css" />
        <Router>
            <SiteShell>
                <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/pricing") view=PricingPage />
                    <Route path=path!("/industries") view=IndustriesIndexPage />
                    <Route path=path!("/industries/:slug") view=IndustryPage />
                    <Route path=path!("/locations") view=LocationsIndexPage />
                    <Route path=path!("/locations/:slug") view=LocationPage />
                    <Route path=path!("/portfolio") view=PortfolioIndexPage />
                    <Route path=path!("/portfolio/:slug") view=CaseStudyPage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/admin") view=AdminPage />
                </Routes>
            </SiteShell>
        </Router>
    }
}
