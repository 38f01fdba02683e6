//! Route guard wrapping the admin-only playground.
//!
//! ARCHITECTURE
//! ============
//! Combines the session snapshot with the admin role check and renders one of
//! the four [`GuardOutcome`]s. The role check is re-issued whenever the
//! signed-in user changes; while either source is resolving the gate shows a
//! neutral loading state rather than redirecting early.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::roles::{RoleCheck, RoleResolver};
use crate::state::session::SessionStore;
use crate::util::guard::{GuardOutcome, decide, login_redirect};

/// Gate rendering `children` only for signed-in admins.
#[component]
pub fn AdminGate(children: ChildrenFn) -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let resolver = expect_context::<RoleResolver>();
    let session = store.signal();
    let role = RwSignal::new(RoleCheck::pending());
    let navigate = use_navigate();

    // Re-run the role check whenever the signed-in user changes.
    Effect::new(move || {
        let snapshot = session.get();
        if snapshot.loading {
            return;
        }
        let Some(user_id) = snapshot.user_id() else {
            role.set(RoleCheck::denied());
            return;
        };
        role.set(RoleCheck::pending());
        #[cfg(feature = "hydrate")]
        {
            let resolver = resolver.clone();
            leptos::task::spawn_local(async move {
                let granted = resolver.resolve(Some(user_id), shared::ROLE_ADMIN).await;
                // The signed-in user may have changed while the check was in
                // flight; a stale answer must not apply to the new identity.
                if session.get_untracked().is_user(user_id) {
                    role.set(RoleCheck::resolved(granted));
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&resolver, user_id);
        }
    });

    let outcome = move || decide(&session.get(), &role.get());

    // Redirect side effects for the two rejection outcomes.
    Effect::new({
        let navigate = navigate.clone();
        move || match outcome() {
            GuardOutcome::Unauthenticated => {
                navigate(&login_redirect("/admin", false), NavigateOptions::default());
            }
            GuardOutcome::Forbidden => {
                navigate(&login_redirect("/admin", true), NavigateOptions::default());
            }
            GuardOutcome::Pending | GuardOutcome::Authorized => {}
        }
    });

    view! {
        <Show
            when=move || outcome() == GuardOutcome::Authorized
            fallback=move || {
                view! {
                    <Show when=move || outcome() == GuardOutcome::Pending>
                        <div class="gate-loading">
                            <p>"Checking access..."</p>
                        </div>
                    </Show>
                }
            }
        >
            {children()}
        </Show>
    }
}
