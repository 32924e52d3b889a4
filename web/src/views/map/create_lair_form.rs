use leptos::{prelude::*, task::spawn_local};
use shared_types::domain::NewLair;
use shared_types::LatLong;
use thaw::{Button, ButtonType, Input, Label, LabelSize};

use crate::api::LairApi;
use crate::session;

/// Creation form opened by a click on the map, pre-filled with the clicked
/// coordinates. The form closes only when the backend accepts the listing;
/// validation and server errors keep it open with the message inline.
#[component]
pub fn CreateLairForm<FClose, FCreated>(
    position: LatLong,
    on_close: FClose,
    on_created: FCreated,
) -> impl IntoView
where
    FClose: Fn() + 'static + Copy + Send + Sync,
    FCreated: Fn() + 'static + Copy + Send + Sync,
{
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let image = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let error_message = RwSignal::new(None::<String>);

    let is_button_disabled = Memo::new(move |_| {
        title.get().is_empty() || description.get().is_empty() || image.get().is_empty()
    });

    let submit = move |_| {
        submitting.set(true);
        error_message.set(None);

        let draft = match NewLair::parse(
            title.get(),
            description.get(),
            image.get(),
            position.lat,
            position.long,
        ) {
            Ok(draft) => draft,
            Err(e) => {
                error_message.set(Some(e));
                submitting.set(false);
                return;
            }
        };

        spawn_local(async move {
            let token = session::get().unwrap_or_default();
            match LairApi::default().create_lair(draft, &token).await {
                Ok(()) => on_created(),
                Err(e) => error_message.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="lair-create-backdrop">
            <div class="lair-create-card">
                <button class="lair-create-close" on:click=move |_| on_close()>
                    "✕"
                </button>

                <Label size=LabelSize::Large>"Post a new lair"</Label>
                <p class="lair-create-coords">
                    {format!("At ({:.5}, {:.5})", position.lat, position.long)}
                </p>

                <form on:submit=move |ev| {
                    ev.prevent_default();
                    submit(());
                }>
                    <div class="lair-form-group">
                        <Input placeholder="Title" value=title />
                    </div>
                    <div class="lair-form-group">
                        <Input placeholder="Description" value=description />
                    </div>
                    <div class="lair-form-group">
                        <Input placeholder="Image URL" value=image />
                    </div>

                    {move || error_message.get().map(|msg| view! {
                        <div class="lair-form-error">{msg}</div>
                    })}

                    <Button
                        class="lair-create-submit"
                        button_type=ButtonType::Submit
                        loading=Signal::from(submitting)
                        disabled=Signal::from(is_button_disabled)
                    >
                        "Create"
                    </Button>
                </form>
            </div>
        </div>
    }
}
