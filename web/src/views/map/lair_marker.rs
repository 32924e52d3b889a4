use leptos::prelude::*;
use leptos_leaflet::prelude::*;
use shared_types::Lair;
use thaw::{Label, LabelSize};

/// Map pin for one listing. The popup carries the listing id back through
/// `on_activate` so a click can open the full detail panel.
#[component]
pub fn LairMarker<F>(lair: Lair, on_activate: F) -> impl IntoView
where
    F: Fn(i64) + 'static + Copy + Send + Sync,
{
    let id = lair.id;

    let icon_svg = format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='28' height='42' viewBox='0 0 28 42'%3E%3Cdefs%3E%3Cfilter id='shadow' x='-50%25' y='-50%25' width='200%25' height='200%25'%3E%3CfeDropShadow dx='0' dy='1' stdDeviation='1.5' flood-color='%23000' flood-opacity='0.25'/%3E%3C/filter%3E%3C/defs%3E%3Cpath fill='{}' stroke='%23ffffff' stroke-width='1.5' filter='url(%23shadow)' d='M14 2C8.5 2 4 6.5 4 12c0 8.5 10 26 10 26s10-17.5 10-26c0-5.5-4.5-10-10-10zm0 13.5c-1.9 0-3.5-1.6-3.5-3.5s1.6-3.5 3.5-3.5 3.5 1.6 3.5 3.5-1.6 3.5-3.5 3.5z'/%3E%3C/svg%3E",
        "%235b21b6"
    );

    view! {
        <Marker
            position=Position::new(lair.lat, lair.lon)
            draggable=false
            icon_url=Some(icon_svg)
            icon_size=Some((28.0, 42.0))
            icon_anchor=Some((14.0, 42.0))
        >
            <Popup>
                <div class="lair-popup">
                    <img src=lair.image.clone() alt=lair.title.clone() />
                    <Label size=LabelSize::Large>{lair.title.clone()}</Label>
                    <button
                        class="lair-popup-details"
                        on:click=move |_| on_activate(id)
                    >
                        "View details"
                    </button>
                </div>
            </Popup>
        </Marker>
    }
}
