//! End-to-end tests wiring settings, the window store, the channel
//! handler, and the resolver together the way a host embeds them.

use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use parking_lot::Mutex;

use transom_agent::Agent;
use transom_channels::ChannelChange;
use transom_core::{AppId, ChannelId, Context};
use transom_resolver::{
    AppIdentifier, Intent, PickerChannel, PickerHost, Resolution, ResolveRequest,
    ResolveResponse, SurfaceHandle, SurfaceIdentity,
};
use transom_settings::TransomSettings;

fn agent() -> Agent {
    Agent::bootstrap(TransomSettings::default()).unwrap()
}

/// Subscribe a recorder that reduces notifications to ID triples.
type ChangeRecord = (
    transom_core::WindowId,
    Option<ChannelId>,
    Option<ChannelId>,
);

fn record_changes(agent: &Agent) -> Arc<Mutex<Vec<ChangeRecord>>> {
    let records = Arc::new(Mutex::new(Vec::new()));
    let records2 = Arc::clone(&records);
    let _ = agent
        .channels()
        .on_channel_changed()
        .subscribe_fn(move |change: ChannelChange| {
            let records = Arc::clone(&records2);
            Box::pin(async move {
                records.lock().push((
                    change.window.id().clone(),
                    change.new_channel.as_ref().map(|c| c.id().clone()),
                    change.previous_channel.as_ref().map(|c| c.id().clone()),
                ));
                Ok(())
            })
        });
    records
}

// ── Channel membership through the full stack ───────────────────────────────

#[tokio::test]
async fn join_moves_window_between_system_channels() {
    let agent = agent();
    let c1 = agent
        .channels()
        .channel_by_id(&ChannelId::from("channel-red"))
        .unwrap();
    let c2 = agent
        .channels()
        .channel_by_id(&ChannelId::from("channel-blue"))
        .unwrap();

    let w1 = agent.open_window(AppId::from("blotter")).await;
    agent.channels().join_channel(&w1, &c1).await;
    agent
        .channels()
        .set_last_broadcast(&c1, Context::new("contact"));

    let records = record_changes(&agent);
    agent.channels().join_channel(&w1, &c2).await;

    assert_eq!(w1.channel().id(), c2.id());
    assert_eq!(
        *records.lock(),
        vec![(w1.id().clone(), Some(c2.id().clone()), Some(c1.id().clone()))]
    );
    // w1 was c1's only member, so its cache is gone.
    assert!(agent.channels().channel_context(&c1).is_none());
}

#[tokio::test]
async fn window_lifecycle_emits_membership_notifications() {
    let agent = agent();
    let records = record_changes(&agent);

    let w = agent.open_window(AppId::from("chart")).await;
    assert!(agent.close_window(&w.id().clone()).await);

    assert_eq!(
        *records.lock(),
        vec![
            (w.id().clone(), Some(ChannelId::from("default")), None),
            (w.id().clone(), None, Some(ChannelId::from("default"))),
        ]
    );
}

#[tokio::test]
async fn closing_last_member_clears_broadcast_cache() {
    let agent = agent();
    let red = agent
        .channels()
        .channel_by_id(&ChannelId::from("channel-red"))
        .unwrap();

    let w = agent.open_window(AppId::from("chart")).await;
    agent.channels().join_channel(&w, &red).await;
    agent
        .channels()
        .set_last_broadcast(&red, Context::new("instrument").with_field("ticker", "AAPL"));
    assert!(agent.channels().channel_context(&red).is_some());

    assert!(agent.close_window(&w.id().clone()).await);
    assert!(agent.channels().channel_context(&red).is_none());
}

#[tokio::test]
async fn app_channels_are_created_once_and_resolvable() {
    let agent = agent();
    let first = agent.channels().app_channel_by_name("trades");
    let second = agent.channels().app_channel_by_name("trades");
    assert!(Arc::ptr_eq(&first, &second));

    let by_id = agent.channels().channel_by_id(first.id()).unwrap();
    assert!(Arc::ptr_eq(&by_id, &first));

    // App channels never show up in the system listing.
    assert!(agent
        .channels()
        .system_channels()
        .iter()
        .all(|c| c.id() != first.id()));
}

#[tokio::test]
async fn broadcast_on_empty_app_channel_is_ignored() {
    let agent = agent();
    let trades = agent.channels().app_channel_by_name("trades");

    agent
        .channels()
        .set_last_broadcast(&trades, Context::new("order"));
    assert!(agent.channels().channel_context(&trades).is_none());

    let w = agent.open_window(AppId::from("blotter")).await;
    agent.channels().join_channel(&w, &trades).await;
    agent
        .channels()
        .set_last_broadcast(&trades, Context::new("order"));
    assert_eq!(
        agent.channels().channel_context(&trades).unwrap().context_type(),
        "order"
    );
}

// ── Intent resolution over a host picker ────────────────────────────────────

struct ScriptedPicker {
    selection: Option<AppIdentifier>,
}

struct ScriptedChannel {
    selection: Option<AppIdentifier>,
}

#[async_trait]
impl PickerChannel for ScriptedChannel {
    async fn resolve(
        &self,
        request: &ResolveRequest,
    ) -> transom_resolver::Result<ResolveResponse> {
        // The picker only ever offers what it was sent.
        assert!(!request.candidate_applications.is_empty());
        Ok(ResolveResponse {
            selected_application: self.selection.clone(),
        })
    }
}

#[async_trait]
impl PickerHost for ScriptedPicker {
    async fn find_surface(&self, _identity: &SurfaceIdentity) -> Option<SurfaceHandle> {
        None
    }

    async fn close_surface(&self, _surface: &SurfaceHandle) -> transom_resolver::Result<()> {
        Ok(())
    }

    async fn create_surface(
        &self,
        identity: &SurfaceIdentity,
    ) -> transom_resolver::Result<SurfaceHandle> {
        Ok(SurfaceHandle::new(format!("{identity}-1")))
    }

    async fn show(&self, _surface: &SurfaceHandle) -> transom_resolver::Result<()> {
        Ok(())
    }

    async fn focus(&self, _surface: &SurfaceHandle) -> transom_resolver::Result<()> {
        Ok(())
    }

    async fn hide(&self, _surface: &SurfaceHandle) -> transom_resolver::Result<()> {
        Ok(())
    }

    async fn open_channel(
        &self,
        _surface: &SurfaceHandle,
    ) -> transom_resolver::Result<Box<dyn PickerChannel>> {
        Ok(Box::new(ScriptedChannel {
            selection: self.selection.clone(),
        }))
    }
}

#[tokio::test]
async fn intent_resolution_returns_user_selection() {
    let agent = agent();
    let resolver = agent.resolution_handler(Arc::new(ScriptedPicker {
        selection: Some(AppIdentifier {
            app_id: "charts".into(),
            title: Some("Charts".into()),
        }),
    }));
    resolver.init().await.unwrap();

    let resolution = resolver
        .handle_intent(
            Intent {
                name: "ViewChart".into(),
                context: Some(Context::new("instrument").with_field("ticker", "AAPL")),
            },
            vec![
                AppIdentifier {
                    app_id: "charts".into(),
                    title: Some("Charts".into()),
                },
                AppIdentifier {
                    app_id: "news".into(),
                    title: None,
                },
            ],
        )
        .await
        .unwrap();

    assert_matches!(
        resolution,
        Resolution::Selected(ref app) if app.app_id.as_str() == "charts"
    );
}

#[tokio::test]
async fn dismissed_picker_resolves_to_cancelled() {
    let agent = agent();
    let resolver = agent.resolution_handler(Arc::new(ScriptedPicker { selection: None }));
    resolver.init().await.unwrap();

    let resolution = resolver
        .handle_intent(
            Intent {
                name: "ViewChart".into(),
                context: None,
            },
            vec![AppIdentifier {
                app_id: "charts".into(),
                title: None,
            }],
        )
        .await
        .unwrap();

    assert_eq!(resolution, Resolution::Cancelled);
    // The handler is reusable after settlement.
    resolver.cancel().await.unwrap();
}
