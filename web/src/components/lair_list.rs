use leptos::prelude::*;
use shared_types::Lair;
use thaw::{Label, LabelSize};

/// Side list mirroring the markers on the map. Rebuilt wholesale from the
/// same collection every time a refresh applies, so list and map can never
/// disagree.
#[component]
pub fn LairList<F>(lairs: Signal<Vec<Lair>>, on_select: F) -> impl IntoView
where
    F: Fn(i64) + 'static + Copy + Send + Sync,
{
    view! {
        <div class="lair-list">
            {move || {
                let current = lairs.get();
                if current.is_empty() {
                    view! {
                        <p class="lair-list-empty">"No lairs in this area yet."</p>
                    }
                        .into_any()
                } else {
                    current
                        .into_iter()
                        .map(|lair| {
                            let id = lair.id;
                            view! {
                                <div class="lair-entry" on:click=move |_| on_select(id)>
                                    <img src=lair.image.clone() alt=lair.title.clone() />
                                    <Label size=LabelSize::Large>{lair.title.clone()}</Label>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}
