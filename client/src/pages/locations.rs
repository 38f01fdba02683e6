//! Location pages: the towns we serve, one page per town.

#[cfg(test)]
#[path = "locations_test.rs"]
mod tests;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

pub struct Town {
    pub slug: &'static str,
    pub name: &'static str,
    pub blurb: &'static str,
}

pub const TOWNS: &[Town] = &[
    Town {
        slug: "riverton",
        name: "Riverton",
        blurb: "Our home base. If your truck parks here, we've probably built for your competitor.",
    },
    Town {
        slug: "maple-falls",
        name: "Maple Falls",
        blurb: "Sites for the Falls' main drag, from the hardware store to the new brewery.",
    },
    Town {
        slug: "cedar-grove",
        name: "Cedar Grove",
        blurb: "Service-area pages that put Grove crews on the map before the franchises.",
    },
];

/// Look up a town entry by its URL slug.
#[must_use]
pub fn town_by_slug(slug: &str) -> Option<&'static Town> {
    TOWNS.iter().find(|t| t.slug == slug)
}

#[component]
pub fn LocationsIndexPage() -> impl IntoView {
    view! {
        <Title text="Locations | Mainstreet Studio" />
        <section class="location-index">
            <h1>"Where we work"</h1>
            <ul>
                {TOWNS
                    .iter()
                    .map(|town| {
                        view! {
                            <li>
                                <A href=format!("/locations/{}", town.slug)>{town.name}</A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}

#[component]
pub fn LocationPage() -> impl IntoView {
    let params = use_params_map();
    let entry = move || {
        params
            .get()
            .get("slug")
            .and_then(|slug| town_by_slug(&slug))
    };

    view! {
        <Show
            when=move || entry().is_some()
            fallback=|| view! { <p class="not-found">"We don't cover that town yet - ask us to."</p> }
        >
            {move || {
                entry().map(|town| {
                    view! {
                        <Title text=format!("{} | Mainstreet Studio", town.name) />
                        <section class="location">
                            <h1>{town.name}</h1>
                            <p>{town.blurb}</p>
                        </section>
                    }
                })
            }}
        </Show>
    }
}
