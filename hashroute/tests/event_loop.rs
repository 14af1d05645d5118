//! Event loop tests: ordering of host and handler-triggered navigations.

use futures::StreamExt;
use hashroute::{
    Dispatcher, Generation, HashRouter, Location, NavigationEvent, NavigationKind,
    NotFoundPolicy, RouteContext, RouteTable, View, memory::MemoryMount, navigation_channel,
    testing::RecordingHandler,
};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

mod common;
use common::Catalogue;

#[test]
fn test_run_until_stalled_follows_redirect() {
    let app = Catalogue::new("#/unknown");
    let dispatcher = app.dispatcher(NotFoundPolicy::Redirect);
    let location = app.location.clone();
    let mut router = HashRouter::new(dispatcher, app.events);

    location.load();
    // load, then the redirect's own hash change
    assert_eq!(router.run_until_stalled(), 2);
    assert_eq!(app.list.count(), 1);
    assert_eq!(location.fragment(), "#/items");
    assert_eq!(location.history(), ["/items"]);
}

#[test]
fn test_handler_navigation_runs_after_current() {
    let (location, events) = hashroute::memory::MemoryLocation::new("");
    let mount = Arc::new(MemoryMount::new("app"));
    let order = Arc::new(Mutex::new(Vec::new()));

    let table = {
        let save_order = order.clone();
        let detail_order = order.clone();
        RouteTable::new()
            .route("/items/save", move |ctx: RouteContext| {
                ctx.navigator().navigate("/items/9", [("saved", "1"), ("note", "")]);
                // the new fragment is not resolved yet
                save_order.lock().unwrap().push("save done".to_string());
            })
            .unwrap()
            .route("/items/:id", move |ctx: RouteContext| {
                let saved = ctx.query().get("saved").unwrap_or("0").to_string();
                detail_order
                    .lock()
                    .unwrap()
                    .push(format!("detail {} saved={saved}", ctx.param("id").unwrap_or("?")));
            })
            .unwrap()
    };
    let dispatcher = Dispatcher::new(table, location.clone(), mount);
    let mut router = HashRouter::new(dispatcher, events);

    location.assign("/items/save");
    assert_eq!(router.run_until_stalled(), 2);
    assert_eq!(*order.lock().unwrap(), ["save done", "detail 9 saved=1"]);
    assert_eq!(location.fragment(), "#/items/9?saved=1");
}

#[test]
fn test_back_resolves_previous_entry() {
    let app = Catalogue::new("#/items");
    let dispatcher = app.dispatcher(NotFoundPolicy::Redirect);
    let location = app.location.clone();
    let mut router = HashRouter::new(dispatcher, app.events);

    location.load();
    location.assign("/items/4");
    router.run_until_stalled();
    assert_eq!(app.detail.count(), 1);

    let navigator = router.dispatcher().navigator().clone();
    assert!(navigator.back());
    assert_eq!(router.run_until_stalled(), 1);
    assert_eq!(app.list.count(), 2);
    assert_eq!(navigator.current_path(), "/items");
}

#[test]
fn test_update_query_rerenders_same_route() {
    let app = Catalogue::new("#/items?page=2&sort=name");
    let dispatcher = app.dispatcher(NotFoundPolicy::Redirect);
    let location = app.location.clone();
    let mut router = HashRouter::new(dispatcher, app.events);

    location.load();
    router.run_until_stalled();

    let navigator = router.dispatcher().navigator().clone();
    navigator.update_query([("page", "3")], true);
    router.run_until_stalled();

    let call = app.list.last().unwrap();
    assert_eq!(call.query.get("page"), Some("3"));
    assert_eq!(call.query.get("sort"), Some("name"));
    assert_eq!(app.list.count(), 2);
}

#[tokio::test]
async fn test_stale_generation_skips_late_render() {
    let (location, events) = hashroute::memory::MemoryLocation::new("");
    let mount = Arc::new(MemoryMount::new("app"));
    let parked: Arc<Mutex<Vec<(Generation, RouteContext)>>> = Arc::default();

    let table = {
        let parked = parked.clone();
        RouteTable::new()
            .route("/slow", move |ctx: RouteContext| {
                parked
                    .lock()
                    .unwrap()
                    .push((ctx.generation().clone(), ctx.clone()));
            })
            .unwrap()
            .route("/fast", |ctx: RouteContext| ctx.render(View::text("fast")))
            .unwrap()
    };
    let dispatcher = Dispatcher::new(table, location.clone(), mount.clone());
    let mut router = HashRouter::new(dispatcher, events);

    location.assign("/slow");
    router.run_until_stalled();
    location.assign("/fast");
    router.run_until_stalled();

    // the slow response arrives after the newer navigation rendered
    tokio::time::sleep(Duration::from_millis(5)).await;
    let (generation, ctx) = parked.lock().unwrap().pop().unwrap();
    assert!(!generation.is_current());
    if generation.is_current() {
        ctx.render(View::text("slow"));
    }
    assert_eq!(mount.last(), Some(View::text("fast")));
    assert_eq!(router.dispatcher().generation(), 2);
}

#[tokio::test]
async fn test_external_sender_drives_router() {
    let (sender, events) = navigation_channel();
    let location = Arc::new(hashroute::memory::MemoryLocation::with_sender("", sender.clone()));
    let mount = Arc::new(MemoryMount::new("app"));
    let list = RecordingHandler::named("list");
    let table = RouteTable::new().route("/items", list.clone()).unwrap();
    let dispatcher = Dispatcher::new(table, location, mount)
        .with_config(Catalogue::config(NotFoundPolicy::Redirect));
    let router = HashRouter::new(dispatcher, events);

    let task = tokio::spawn(router.run());
    sender.send(NavigationEvent::load(""));
    sender.send(NavigationEvent::new("#/items?x=1", NavigationKind::PopState));
    sender.close();

    assert_eq!(task.await.unwrap(), 2);
    assert_eq!(list.count(), 2);
    assert_eq!(list.last().unwrap().query.get("x"), Some("1"));
}

#[tokio::test]
async fn test_events_stream_yields_in_order() {
    let (location, mut events) = hashroute::memory::MemoryLocation::new("");
    location.load();
    location.assign("/a");
    location.replace("/b");
    location.close();

    let mut kinds = Vec::new();
    while let Some(event) = events.next().await {
        kinds.push((event.kind, event.fragment));
    }
    assert_eq!(
        kinds,
        [
            (NavigationKind::Load, String::new()),
            (NavigationKind::HashChange, "/a".to_string()),
            (NavigationKind::HashChange, "/b".to_string()),
        ]
    );
}
