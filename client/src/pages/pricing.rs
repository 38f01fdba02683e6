//! Pricing page.

use leptos::prelude::*;
use leptos_meta::Title;

struct Tier {
    name: &'static str,
    price: &'static str,
    blurb: &'static str,
    features: &'static [&'static str],
}

const TIERS: &[Tier] = &[
    Tier {
        name: "Storefront",
        price: "$95/mo",
        blurb: "A sharp five-page site that answers the questions customers call about.",
        features: &["5 pages", "Mobile-first design", "Contact + quote forms", "Monthly content edits"],
    },
    Tier {
        name: "Main Street",
        price: "$175/mo",
        blurb: "Everything in Storefront, plus pages for every town and service you cover.",
        features: &["Unlimited service pages", "Location pages", "Review embeds", "Priority edits"],
    },
    Tier {
        name: "Anchor Tenant",
        price: "$320/mo",
        blurb: "For multi-crew outfits that live off their booking calendar.",
        features: &["Online booking", "Campaign landing pages", "Quarterly strategy call", "Same-day edits"],
    },
];

#[component]
pub fn PricingPage() -> impl IntoView {
    view! {
        <Title text="Pricing | Mainstreet Studio" />
        <section class="pricing">
            <h1>"Flat monthly pricing"</h1>
            <p>"No setup fee. Cancel any time and keep your domain."</p>
            <div class="pricing__tiers">
                {TIERS
                    .iter()
                    .map(|tier| {
                        view! {
                            <article class="tier">
                                <h2>{tier.name}</h2>
                                <p class="tier__price">{tier.price}</p>
                                <p class="tier__blurb">{tier.blurb}</p>
                                <ul>
                                    {tier.features.iter().map(|f| view! { <li>{*f}</li> }).collect_view()}
                                </ul>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
