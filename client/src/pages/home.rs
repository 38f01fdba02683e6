//! Landing page.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Mainstreet Studio - websites for local businesses" />
        <section class="hero">
            <h1>"Your shop deserves a site that brings in work."</h1>
            <p class="hero__lead">
                "We design, build, and run marketing sites for local service businesses. "
                "One flat monthly price, no agencies-speak, no surprises."
            </p>
            <div class="hero__actions">
                <A attr:class="button button--primary" href="/pricing">"See pricing"</A>
                <A attr:class="button" href="/portfolio">"See our work"</A>
            </div>
        </section>
        <section class="highlights">
            <div class="highlight">
                <h2>"Built for your trade"</h2>
                <p>"Plumbers, landscapers, salons, electricians - layouts that fit how your customers actually search."</p>
            </div>
            <div class="highlight">
                <h2>"Local by default"</h2>
                <p>"Pages tuned for the towns you serve, so nearby customers find you first."</p>
            </div>
            <div class="highlight">
                <h2>"We handle the rest"</h2>
                <p>"Hosting, edits, and updates are included. You answer the phone; we keep the site working."</p>
            </div>
        </section>
    }
}
