mod common;

use podcast_core::api::CatalogClient;
use podcast_core::catalog::{CatalogQuery, CatalogState, SortKey};
use podcast_core::detail::ShowDetail;
use podcast_core::model::ShowId;
use podcast_core::CatalogError;

#[tokio::test]
async fn fetches_and_normalizes_show_list() {
    let base = common::spawn_fixture_api().await;
    let client = CatalogClient::with_base_url(base).unwrap();

    let shows = client.fetch_show_list().await.unwrap();
    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0].id, ShowId::from("10716"));
    assert_eq!(shows[1].id, ShowId::from("5675"));
    assert_eq!(shows[1].season_count, 1);
    assert_eq!(shows[1].genres, vec![4, 5]);

    let mut catalog = CatalogState::new(CatalogQuery::default());
    catalog.set_shows(shows);
    catalog.set_sort_key(SortKey::DateDesc);
    let titles: Vec<_> = catalog.view().items.iter().map(|s| s.title.clone()).collect();
    assert_eq!(titles, vec!["All Killa No Filla", "Something Was Wrong"]);
}

#[tokio::test]
async fn fetches_show_detail_with_seasons() {
    let base = common::spawn_fixture_api().await;
    let client = CatalogClient::with_base_url(format!("{}/", base)).unwrap();

    let show = client.fetch_show_detail(&ShowId::from("10716")).await.unwrap();
    assert_eq!(show.seasons.len(), 2);
    assert_eq!(show.genres, vec![2]);

    let mut detail = ShowDetail::new(show);
    assert_eq!(detail.total_episodes(), 3);
    let snap = detail.snapshot(1).unwrap();
    assert_eq!(snap.id(), "10716-S1-E2");
    assert_eq!(snap.episode.audio_src, "https://cdn.test/s1e2.mp3");

    detail.next_season();
    assert_eq!(detail.episodes()[0].title, "Ep 1: Back Again");
}

#[tokio::test]
async fn missing_show_is_not_found() {
    let base = common::spawn_fixture_api().await;
    let client = CatalogClient::with_base_url(base).unwrap();

    let err = client.fetch_show_detail(&ShowId::from("nope")).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "no details available");
}

#[tokio::test]
async fn server_error_is_a_fetch_error() {
    let base = common::spawn_fixture_api().await;
    let client = CatalogClient::with_base_url(base).unwrap();

    let err = client.fetch_show_detail(&ShowId::from("boom")).await.unwrap_err();
    match err {
        CatalogError::Fetch { status, .. } => assert_eq!(status, Some(500)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let base = common::spawn_fixture_api().await;
    let client = CatalogClient::with_base_url(base).unwrap();

    let err = client.fetch_show_detail(&ShowId::from("garbage")).await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_host_has_no_status() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CatalogClient::with_base_url(format!("http://{}", addr)).unwrap();
    let err = client.fetch_show_list().await.unwrap_err();
    match err {
        CatalogError::Fetch { status, .. } => assert_eq!(status, None),
        other => panic!("unexpected error: {other:?}"),
    }
}
