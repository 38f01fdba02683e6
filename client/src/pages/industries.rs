//! Industry pages: one template, one entry per trade we build for.

#[cfg(test)]
#[path = "industries_test.rs"]
mod tests;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

pub struct Industry {
    pub slug: &'static str,
    pub name: &'static str,
    pub pitch: &'static str,
}

pub const INDUSTRIES: &[Industry] = &[
    Industry {
        slug: "plumbing",
        name: "Plumbers",
        pitch: "Emergency-call layouts with your phone number above the fold on every page.",
    },
    Industry {
        slug: "landscaping",
        name: "Landscapers",
        pitch: "Seasonal galleries and service-area pages that sell the yard, not the mower.",
    },
    Industry {
        slug: "salons",
        name: "Salons & Barbers",
        pitch: "Booking-first pages with your stylists, prices, and openings up front.",
    },
    Industry {
        slug: "electrical",
        name: "Electricians",
        pitch: "License badges, service menus, and quote forms that pre-qualify the job.",
    },
];

/// Look up an industry entry by its URL slug.
#[must_use]
pub fn industry_by_slug(slug: &str) -> Option<&'static Industry> {
    INDUSTRIES.iter().find(|i| i.slug == slug)
}

#[component]
pub fn IndustriesIndexPage() -> impl IntoView {
    view! {
        <Title text="Industries | Mainstreet Studio" />
        <section class="industry-index">
            <h1>"Trades we build for"</h1>
            <ul>
                {INDUSTRIES
                    .iter()
                    .map(|industry| {
                        view! {
                            <li>
                                <A href=format!("/industries/{}", industry.slug)>{industry.name}</A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}

#[component]
pub fn IndustryPage() -> impl IntoView {
    let params = use_params_map();
    let entry = move || {
        params
            .get()
            .get("slug")
            .and_then(|slug| industry_by_slug(&slug))
    };

    view! {
        <Show
            when=move || entry().is_some()
            fallback=|| view! { <p class="not-found">"We haven't written this one up yet."</p> }
        >
            {move || {
                entry().map(|industry| {
                    view! {
                        <Title text=format!("{} | Mainstreet Studio", industry.name) />
                        <section class="industry">
                            <h1>{industry.name}</h1>
                            <p>{industry.pitch}</p>
                            <A attr:class="button button--primary" href="/pricing">
                                "See what it costs"
                            </A>
                        </section>
                    }
                })
            }}
        </Show>
    }
}
