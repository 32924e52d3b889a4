use leptos::prelude::*;
use leptos_leaflet::{
    leaflet::{LatLng, LatLngBounds, Map, MouseEvent},
    prelude::*,
};
use shared_types::{Lair, LatLong, MapBounds};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::views::map::lair_marker::LairMarker;

/// The Leaflet wiring: publishes the widget's bounds into `bounds` on every
/// pan/zoom (which drives the sync loop), forwards map clicks with their
/// coordinates, and projects the current listing collection onto markers.
#[component]
pub fn LairMapRenderer<FActivate, FClick>(
    bounds: RwSignal<MapBounds>,
    lairs: Signal<Vec<Lair>>,
    on_activate: FActivate,
    on_map_click: FClick,
) -> impl IntoView
where
    FActivate: Fn(i64) + 'static + Copy + Send + Sync,
    FClick: Fn(LatLong) + 'static + Copy + Send + Sync,
{
    let map: JsRwSignal<Option<Map>> = JsRwSignal::new_local(None::<Map>);

    let update_bounds = move |_| {
        if let Some(map) = map.get_untracked() {
            let map_bounds: LatLngBounds = map.get_bounds();
            let north_east: LatLng = map_bounds.get_north_east();
            let south_west: LatLng = map_bounds.get_south_west();
            bounds.set(MapBounds {
                north_east: LatLong {
                    lat: north_east.lat(),
                    long: north_east.lng(),
                },
                south_west: LatLong {
                    lat: south_west.lat(),
                    long: south_west.lng(),
                },
            })
        }
    };

    Effect::new(move |_| {
        let Some(map_instance) = map.get() else {
            return;
        };

        let move_cb: Closure<dyn FnMut()> = Closure::wrap(Box::new(move || {
            update_bounds(());
        }));
        map_instance.on("moveend", move_cb.as_ref().unchecked_ref());
        map_instance.on("zoomend", move_cb.as_ref().unchecked_ref());
        move_cb.forget();

        let click_cb: Closure<dyn FnMut(MouseEvent)> =
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let position = event.lat_lng();
                on_map_click(LatLong {
                    lat: position.lat(),
                    long: position.lng(),
                });
            }));
        map_instance.on("click", click_cb.as_ref().unchecked_ref());
        click_cb.forget();

        // Seed the sync loop with the widget's initial viewport.
        update_bounds(());
    });

    view! {
        <MapContainer
            style="height: 100%; width: 100%; flex: 1"
            center=Position::new(51.505, -0.09)
            zoom=13.0
            set_view=true
            map=map.write_only()
        >
            <TileLayer
                url="https://tile.openstreetmap.org/{z}/{x}/{y}.png"
                attribution="&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            />
            {move || {
                let current = lairs.get();
                leptos::logging::log!("Rendering {} markers", current.len());
                current
                    .into_iter()
                    .map(|lair| {
                        view! { <LairMarker lair=lair on_activate=on_activate /> }
                    })
                    .collect_view()
            }}
        </MapContainer>
    }
}
