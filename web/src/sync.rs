//! Viewport sync loop.
//!
//! Owns the set of currently displayed listings and keeps it consistent
//! with the backend for the current viewport and search term. Every
//! refresh is tagged with a monotonically increasing sequence number;
//! a response is applied only while no newer response has been applied,
//! so overlapping fetches can complete in any order without a stale
//! result clobbering a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use shared_types::{Lair, MapBounds};

use crate::api::{ApiError, HttpClient, LairApi};

#[derive(Default)]
struct SyncState {
    applied: u64,
    lairs: Vec<Lair>,
}

pub struct ViewportSync<C> {
    api: LairApi<C>,
    issued: AtomicU64,
    state: Mutex<SyncState>,
}

impl<C: HttpClient> ViewportSync<C> {
    pub fn new(api: LairApi<C>) -> Self {
        Self {
            api,
            issued: AtomicU64::new(0),
            state: Mutex::new(SyncState::default()),
        }
    }

    /// Fetches the listings for `bounds` and `search` and, if no
    /// newer-sequenced refresh has been applied in the meantime, replaces
    /// the owned collection wholesale with the response.
    ///
    /// Returns `Ok(Some(listings))` when this refresh was applied,
    /// `Ok(None)` when it was superseded by a newer one. On error the
    /// previously applied collection stays intact.
    pub async fn refresh(
        &self,
        bounds: &MapBounds,
        search: &str,
    ) -> Result<Option<Vec<Lair>>, ApiError> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let lairs = self.api.lairs_in_view(bounds, search).await?;

        let mut state = self.state.lock().expect("sync state poisoned");
        if ticket <= state.applied {
            return Ok(None);
        }
        state.applied = ticket;
        state.lairs = lairs.clone();
        Ok(Some(lairs))
    }

    /// Detail lookup for a marker activation. Always hits the backend;
    /// nothing is served from the owned collection.
    pub async fn detail(&self, id: i64) -> Result<Lair, ApiError> {
        self.api.lair_detail(id).await
    }

    /// Snapshot of the currently applied collection, in response order.
    pub fn current(&self) -> Vec<Lair> {
        self.state.lock().expect("sync state poisoned").lairs.clone()
    }

    pub fn current_ids(&self) -> Vec<i64> {
        self.state
            .lock()
            .expect("sync state poisoned")
            .lairs
            .iter()
            .map(|lair| lair.id)
            .collect()
    }

    pub fn api(&self) -> &LairApi<C> {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use async_trait::async_trait;
    use shared_types::LatLong;
    use tokio::sync::oneshot;

    use super::*;
    use crate::api::http::testing::RecordingClient;
    use crate::api::HttpResponse;

    fn bounds(ne_lat: f64, ne_long: f64, sw_lat: f64, sw_long: f64) -> MapBounds {
        MapBounds {
            north_east: LatLong {
                lat: ne_lat,
                long: ne_long,
            },
            south_west: LatLong {
                lat: sw_lat,
                long: sw_long,
            },
        }
    }

    fn lair_json(id: i64, title: &str) -> String {
        format!(
            r#"{{"id":{id},"title":"{title}","description":"d","image":"https://example.org/{id}.png","lat":51.505,"lon":-0.09}}"#
        )
    }

    fn listing_body(lairs: &[(i64, &str)]) -> String {
        let items: Vec<String> = lairs.iter().map(|(id, t)| lair_json(*id, t)).collect();
        format!("[{}]", items.join(","))
    }

    fn sync_with(responses: Vec<Result<HttpResponse, ApiError>>) -> ViewportSync<RecordingClient> {
        ViewportSync::new(LairApi::new(
            "http://127.0.0.1:5000",
            RecordingClient::with_responses(responses),
        ))
    }

    #[tokio::test]
    async fn an_applied_refresh_mirrors_the_response_exactly() {
        let sync = sync_with(vec![RecordingClient::ok(&listing_body(&[
            (3, "Flat"),
            (1, "Garage"),
            (2, "Tower"),
        ]))]);

        let applied = sync
            .refresh(&bounds(51.51, -0.07, 51.50, -0.12), "")
            .await
            .unwrap();

        assert!(applied.is_some());
        assert_eq!(sync.current_ids(), vec![3, 1, 2], "ids and order must match");
    }

    #[tokio::test]
    async fn the_example_viewport_yields_a_single_listing() {
        let sync = sync_with(vec![RecordingClient::ok(&listing_body(&[(1, "Flat")]))]);

        let applied = sync
            .refresh(&bounds(51.51, -0.07, 51.50, -0.12), "")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].title, "Flat");
        assert_eq!((applied[0].lat, applied[0].lon), (51.505, -0.09));
        assert_eq!(sync.current_ids(), vec![1]);
    }

    #[tokio::test]
    async fn a_search_refresh_replaces_non_matching_listings() {
        let sync = sync_with(vec![
            RecordingClient::ok(&listing_body(&[(1, "Flat"), (2, "Tower")])),
            RecordingClient::ok(&listing_body(&[(9, "Garage")])),
        ]);

        let viewport = bounds(51.51, -0.07, 51.50, -0.12);
        sync.refresh(&viewport, "").await.unwrap();
        sync.refresh(&viewport, "garage").await.unwrap();

        assert_eq!(sync.current_ids(), vec![9]);
        let requests = sync.api().transport().requests();
        assert!(requests[1].url.contains("&search=garage"), "{}", requests[1].url);
    }

    #[tokio::test]
    async fn a_failed_refresh_leaves_the_previous_collection_intact() {
        let sync = sync_with(vec![
            RecordingClient::ok(&listing_body(&[(1, "Flat")])),
            RecordingClient::status(500, r#"{"error":"database unavailable"}"#),
        ]);

        let viewport = bounds(51.51, -0.07, 51.50, -0.12);
        sync.refresh(&viewport, "").await.unwrap();
        let err = sync.refresh(&viewport, "").await.unwrap_err();

        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(sync.current_ids(), vec![1], "prior markers must survive");
    }

    /// Transport double whose responses are released by the test, so
    /// overlapping refreshes can be completed out of order.
    struct GatedClient {
        gates: RefCell<VecDeque<oneshot::Receiver<Result<HttpResponse, ApiError>>>>,
    }

    impl GatedClient {
        fn new(
            gates: Vec<oneshot::Receiver<Result<HttpResponse, ApiError>>>,
        ) -> Self {
            Self {
                gates: RefCell::new(gates.into()),
            }
        }
    }

    #[async_trait(?Send)]
    impl HttpClient for GatedClient {
        async fn get(&self, _url: &str) -> Result<HttpResponse, ApiError> {
            let gate = self
                .gates
                .borrow_mut()
                .pop_front()
                .expect("no gate left for this request");
            gate.await.expect("test dropped the response sender")
        }

        async fn post_json(
            &self,
            _url: &str,
            _body: &str,
            _bearer: Option<&str>,
        ) -> Result<HttpResponse, ApiError> {
            unreachable!("the sync loop only issues GET requests")
        }

        async fn delete(
            &self,
            _url: &str,
            _bearer: Option<&str>,
        ) -> Result<HttpResponse, ApiError> {
            unreachable!("the sync loop only issues GET requests")
        }
    }

    fn ok_body(body: String) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse { status: 200, body })
    }

    #[tokio::test]
    async fn a_stale_response_cannot_overwrite_a_newer_viewport() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let sync = Rc::new(ViewportSync::new(LairApi::new(
            "http://127.0.0.1:5000",
            GatedClient::new(vec![first_rx, second_rx]),
        )));

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let first = tokio::task::spawn_local({
                    let sync = Rc::clone(&sync);
                    async move {
                        sync.refresh(&bounds(51.51, -0.07, 51.50, -0.12), "").await
                    }
                });
                tokio::task::yield_now().await;

                let second = tokio::task::spawn_local({
                    let sync = Rc::clone(&sync);
                    async move {
                        sync.refresh(&bounds(48.86, 2.35, 48.85, 2.29), "").await
                    }
                });
                tokio::task::yield_now().await;

                // The later-issued request answers first...
                second_tx
                    .send(ok_body(listing_body(&[(2, "Tower")])))
                    .unwrap();
                let second = second.await.unwrap().unwrap();
                assert!(second.is_some(), "the newest refresh must apply");
                assert_eq!(sync.current_ids(), vec![2]);

                // ...and the slow stale response arrives afterwards.
                first_tx
                    .send(ok_body(listing_body(&[(1, "Flat")])))
                    .unwrap();
                let first = first.await.unwrap().unwrap();
                assert!(first.is_none(), "the stale refresh must be discarded");
                assert_eq!(
                    sync.current_ids(),
                    vec![2],
                    "displayed state must follow the last issued request"
                );
            })
            .await;
    }

    #[tokio::test]
    async fn out_of_order_issue_with_in_order_arrival_still_converges() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let sync = Rc::new(ViewportSync::new(LairApi::new(
            "http://127.0.0.1:5000",
            GatedClient::new(vec![first_rx, second_rx]),
        )));

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let first = tokio::task::spawn_local({
                    let sync = Rc::clone(&sync);
                    async move {
                        sync.refresh(&bounds(51.51, -0.07, 51.50, -0.12), "").await
                    }
                });
                tokio::task::yield_now().await;
                let second = tokio::task::spawn_local({
                    let sync = Rc::clone(&sync);
                    async move {
                        sync.refresh(&bounds(48.86, 2.35, 48.85, 2.29), "").await
                    }
                });
                tokio::task::yield_now().await;

                first_tx
                    .send(ok_body(listing_body(&[(1, "Flat")])))
                    .unwrap();
                second_tx
                    .send(ok_body(listing_body(&[(2, "Tower")])))
                    .unwrap();

                assert!(first.await.unwrap().unwrap().is_some());
                assert!(second.await.unwrap().unwrap().is_some());
                assert_eq!(sync.current_ids(), vec![2]);
            })
            .await;
    }

    #[tokio::test]
    async fn detail_is_fetched_fresh_on_every_activation() {
        let detail = lair_json(7, "Garage");
        let sync = sync_with(vec![
            RecordingClient::ok(&detail),
            RecordingClient::ok(&detail),
        ]);

        sync.detail(7).await.unwrap();
        sync.detail(7).await.unwrap();

        assert_eq!(sync.api().transport().requests().len(), 2);
    }
}
