use std::rc::Rc;

use leptos::{prelude::*, task::spawn_local};
use shared_types::{Lair, LatLong, MapBounds};
use thaw::Input;

use crate::api::LairApi;
use crate::components::{feedback::ErrorView, lair_list::LairList, navbar::Navbar};
use crate::sync::ViewportSync;
use crate::views::auth::AccountPanel;
use crate::views::map::{
    create_lair_form::CreateLairForm,
    lair_detail::{DetailRequest, LairDetailPanel},
    map_renderer::LairMapRenderer,
};

/// The map page. Owns the sync loop and every piece of screen state it
/// drives: the listing collection, the live search term, the detail and
/// creation overlays, and the account panel toggle.
#[component]
pub fn LairMap() -> impl IntoView {
    let search = RwSignal::new(String::new());
    let bounds = RwSignal::new(MapBounds::default());
    let lairs = RwSignal::new(Vec::<Lair>::new());
    let refresh_error = RwSignal::new(None::<String>);

    let detail_request = RwSignal::new(None::<DetailRequest>);
    let detail_generation = RwSignal::new(0u64);
    let draft_position = RwSignal::new(None::<LatLong>);
    let account_open = RwSignal::new(false);

    let sync = StoredValue::new_local(Rc::new(ViewportSync::new(
        LairApi::default(),
    )));

    let run_refresh = move || {
        let viewport = bounds.get_untracked();
        if viewport.is_unset() {
            return;
        }
        let term = search.get_untracked();
        let sync = sync.get_value();

        spawn_local(async move {
            match sync.refresh(&viewport, &term).await {
                Ok(Some(applied)) => {
                    leptos::logging::log!("refresh applied with {} lairs", applied.len());
                    lairs.set(applied);
                    refresh_error.set(None);
                }
                Ok(None) => {
                    leptos::logging::log!("refresh superseded by a newer viewport");
                }
                Err(e) => {
                    leptos::logging::log!("refresh failed: {}", e);
                    refresh_error.set(Some(e.to_string()));
                }
            }
        });
    };

    // Pan/zoom end and every search keystroke land here; the initial
    // bounds publication from the map widget triggers the first refresh.
    Effect::new(move |_| {
        let _ = bounds.get();
        let _ = search.get();
        run_refresh();
    });

    let on_activate = move |id: i64| {
        let generation = detail_generation.get_untracked() + 1;
        detail_generation.set(generation);
        detail_request.set(Some(DetailRequest { id, generation }));
    };

    let on_map_click = move |position: LatLong| {
        draft_position.set(Some(position));
    };

    let on_created = move || {
        draft_position.set(None);
        run_refresh();
    };

    view! {
        <div class="lair-page">
            <Navbar on_account=move || account_open.set(true) />

            <div class="lair-toolbar">
                <Input
                    class="lair-searchbar"
                    placeholder="Search lairs..."
                    value=search
                />
            </div>

            {move || refresh_error.get().map(|msg| view! {
                <ErrorView message=Some(msg) />
            })}

            <div class="lair-content">
                <LairList lairs=lairs.into() on_select=on_activate />

                <div class="lair-map-wrapper">
                    <LairMapRenderer
                        bounds=bounds
                        lairs=lairs.into()
                        on_activate=on_activate
                        on_map_click=on_map_click
                    />
                </div>
            </div>

            {move || detail_request.get().map(|request| view! {
                <LairDetailPanel
                    request=request
                    on_close=move || detail_request.set(None)
                    on_deleted=run_refresh
                />
            })}

            {move || draft_position.get().map(|position| view! {
                <CreateLairForm
                    position=position
                    on_close=move || draft_position.set(None)
                    on_created=on_created
                />
            })}

            <AccountPanel open=account_open />
        </div>
    }
}
