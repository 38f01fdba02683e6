//! Portfolio: case studies of shipped sites.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

pub struct CaseStudy {
    pub slug: &'static str,
    pub client: &'static str,
    pub summary: &'static str,
    pub result: &'static str,
}

pub const CASE_STUDIES: &[CaseStudy] = &[
    CaseStudy {
        slug: "hartline-plumbing",
        client: "Hartline Plumbing",
        summary: "Replaced a decade-old template site with emergency-first pages per town.",
        result: "Calls from search up 60% in the first quarter.",
    },
    CaseStudy {
        slug: "grove-and-garden",
        client: "Grove & Garden",
        summary: "Seasonal photo galleries with a quote form tuned for spring rushes.",
        result: "Booked out eight weeks ahead by April.",
    },
    CaseStudy {
        slug: "shear-luck",
        client: "Shear Luck Salon",
        summary: "Booking-first rebuild with per-stylist pages and live openings.",
        result: "Walk-in no-shows cut in half.",
    },
];

#[must_use]
pub fn case_study_by_slug(slug: &str) -> Option<&'static CaseStudy> {
    CASE_STUDIES.iter().find(|c| c.slug == slug)
}

#[component]
pub fn PortfolioIndexPage() -> impl IntoView {
    view! {
        <Title text="Our work | Mainstreet Studio" />
        <section class="portfolio-index">
            <h1>"Recent work"</h1>
            <div class="portfolio-index__grid">
                {CASE_STUDIES
                    .iter()
                    .map(|case| {
                        view! {
                            <article class="case-card">
                                <h2>
                                    <A href=format!("/portfolio/{}", case.slug)>{case.client}</A>
                                </h2>
                                <p>{case.summary}</p>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn CaseStudyPage() -> impl IntoView {
    let params = use_params_map();
    let entry = move || {
        params
            .get()
            .get("slug")
            .and_then(|slug| case_study_by_slug(&slug))
    };

    view! {
        <Show
            when=move || entry().is_some()
            fallback=|| view! { <p class="not-found">"That case study has moved."</p> }
        >
            {move || {
                entry().map(|case| {
                    view! {
                        <Title text=format!("{} | Mainstreet Studio", case.client) />
                        <article class="case-study">
                            <h1>{case.client}</h1>
                            <p>{case.summary}</p>
                            <p class="case-study__result">{case.result}</p>
                        </article>
                    }
                })
            }}
        </Show>
    }
}
