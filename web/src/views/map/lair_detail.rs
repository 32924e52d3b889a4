use leptos::{prelude::*, task::spawn_local};
use thaw::{Button, Label, LabelSize};

use crate::api::LairApi;
use crate::components::feedback::{ErrorView, LoadingView};
use crate::session;

/// One detail activation. The generation counter makes every activation a
/// distinct request, so re-opening the same listing still fetches fresh
/// data instead of reusing what an earlier open returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailRequest {
    pub id: i64,
    pub generation: u64,
}

#[component]
pub fn LairDetailPanel<FClose, FDeleted>(
    request: DetailRequest,
    on_close: FClose,
    on_deleted: FDeleted,
) -> impl IntoView
where
    FClose: Fn() + 'static + Copy + Send + Sync,
    FDeleted: Fn() + 'static + Copy + Send + Sync,
{
    let detail = LocalResource::new(move || async move {
        LairApi::default().lair_detail(request.id).await
    });

    let delete_error = RwSignal::new(None::<String>);
    let deleting = RwSignal::new(false);

    let delete_lair = move |_| {
        deleting.set(true);
        delete_error.set(None);

        spawn_local(async move {
            let token = session::get().unwrap_or_default();
            match LairApi::default().delete_lair(request.id, &token).await {
                Ok(()) => {
                    on_close();
                    on_deleted();
                }
                Err(e) => delete_error.set(Some(e.to_string())),
            }
            deleting.set(false);
        });
    };

    view! {
        <div class="lair-detail-backdrop">
            <div class="lair-detail-card">
                <button class="lair-detail-close" on:click=move |_| on_close()>
                    "✕"
                </button>

                {move || match detail.get() {
                    None => view! {
                        <LoadingView message=Some("Fetching lair...".to_string()) />
                    }
                        .into_any(),
                    Some(result) => match result.as_ref() {
                        Ok(lair) => {
                            let lair = lair.clone();
                            view! {
                                <div class="lair-detail-body">
                                    <img src=lair.image.clone() alt=lair.title.clone() />
                                    <Label size=LabelSize::Large>{lair.title.clone()}</Label>
                                    <p class="lair-detail-description">
                                        {lair.description.clone()}
                                    </p>

                                    {move || delete_error.get().map(|msg| view! {
                                        <ErrorView message=Some(msg) />
                                    })}

                                    <Button
                                        class="lair-detail-delete"
                                        loading=Signal::from(deleting)
                                        on_click=delete_lair
                                    >
                                        "Delete this lair"
                                    </Button>
                                </div>
                            }
                                .into_any()
                        }
                        Err(err) => view! {
                            <ErrorView message=Some(err.to_string()) />
                        }
                            .into_any(),
                    },
                }}
            </div>
        </div>
    }
}
