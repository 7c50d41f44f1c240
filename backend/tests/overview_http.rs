//! Drives the builders and the select proxy against loopback fakes of the
//! search index and the hosting API.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::RawQuery,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use backend::{
    api::{facet_summary::FacetSummaryBuilder, repository_info::RevisionFetcher},
    config::{RepositoryConfig, SummaryConfig},
    server_extra::{THING_SELECT_PATH, thing_select::thing_select_route},
};
use common::{
    facet_summary::{FacetCell, TOTAL_KEY},
    fetch_error::FetchError,
    repository_info::RepositoryInfoState,
    summary_view_state::{SummaryViewState, UpdateOutcome},
};
use serde_json::{Value, json};

type SeenQueries = Arc<Mutex<Vec<String>>>;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Fake search core answering `/solr/core/select` with `body` and `status`.
async fn fake_index(status: StatusCode, body: Value) -> (SocketAddr, SeenQueries) {
    let seen: SeenQueries = Arc::default();
    let sink = seen.clone();
    let app = Router::new().route(
        "/solr/core/select",
        get(move |RawQuery(q): RawQuery| {
            let sink = sink.clone();
            let body = body.clone();
            async move {
                sink.lock().unwrap().push(q.unwrap_or_default());
                (status, Json(body))
            }
        }),
    );
    (serve(app).await, seen)
}

fn config_for(addr: SocketAddr) -> SummaryConfig {
    SummaryConfig {
        solr_url: format!("http://{}/solr/core/", addr),
        ..SummaryConfig::default()
    }
}

fn query_pairs(raw: &str) -> Vec<(String, String)> {
    reqwest::Url::parse(&format!("http://fake/?{}", raw))
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn material_response() -> Value {
    json!({
        "responseHeader": {"status": 0},
        "response": {"numFound": 5, "start": 0, "docs": []},
        "facet_counts": {
            "facet_fields": {
                "source": ["SESAR", 3, "OPENCONTEXT", 2],
                "hasMaterialCategory": ["Rock", 4, "Mineral", 1]
            },
            "facet_pivot": {
                "source,hasMaterialCategory": [
                    {"field": "source", "value": "SESAR", "count": 3,
                     "pivot": [{"field": "hasMaterialCategory", "value": "Rock", "count": 3}]},
                    {"field": "source", "value": "OPENCONTEXT", "count": 2,
                     "pivot": [{"field": "hasMaterialCategory", "value": "Rock", "count": 1},
                               {"field": "hasMaterialCategory", "value": "Mineral", "count": 1}]}
                ]
            }
        }
    })
}

#[tokio::test]
async fn builder_sends_facet_request_and_tabulates() {
    let (addr, seen) = fake_index(StatusCode::OK, material_response()).await;
    let builder = FacetSummaryBuilder::new(config_for(addr));

    let fields = vec!["hasMaterialCategory".to_string()];
    let summary = builder.build_facet_summary("Rock OR Mineral", &fields).await.unwrap();

    let queries = seen.lock().unwrap().clone();
    assert_eq!(queries.len(), 1);
    let pairs = query_pairs(&queries[0]);
    let get_all = |key: &str| -> Vec<String> {
        pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v.clone()).collect()
    };
    assert_eq!(get_all("q"), vec!["Rock OR Mineral"]);
    assert_eq!(get_all("facet"), vec!["on"]);
    assert_eq!(get_all("facet.method"), vec!["enum"]);
    assert_eq!(get_all("wt"), vec!["json"]);
    assert_eq!(get_all("rows"), vec!["0"]);
    assert_eq!(get_all("facet.field"), vec!["source", "hasMaterialCategory"]);
    assert_eq!(get_all("facet.pivot"), vec!["source,hasMaterialCategory"]);

    assert_eq!(summary.total_records, 5);
    let table = summary.table("hasMaterialCategory").unwrap();
    assert_eq!(table.cell("Rock", "OPENCONTEXT"), Some(FacetCell::Count(1)));
    assert_eq!(table.cell("Mineral", "SESAR"), Some(FacetCell::Count(0)));
    assert_eq!(table.cell(TOTAL_KEY, TOTAL_KEY), Some(FacetCell::Missing));
    assert_eq!(table.cell(TOTAL_KEY, "OPENCONTEXT"), Some(FacetCell::Count(2)));
}

#[tokio::test]
async fn rejected_request_is_a_network_error() {
    let (addr, _) = fake_index(StatusCode::BAD_REQUEST, json!({"error": {"msg": "undefined field"}})).await;
    let builder = FacetSummaryBuilder::new(config_for(addr));

    let err = builder.build_facet_summary("*:*", &["nope".to_string()]).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "{:?}", err);
}

#[tokio::test]
async fn unreachable_index_is_a_network_error() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let builder = FacetSummaryBuilder::new(config_for(addr));
    let err = builder.build_facet_summary("*:*", &[]).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "{:?}", err);
}

#[tokio::test]
async fn response_without_facet_counts_is_malformed() {
    let (addr, _) = fake_index(StatusCode::OK, json!({"response": {"numFound": 3}})).await;
    let builder = FacetSummaryBuilder::new(config_for(addr));

    let err = builder.build_facet_summary("*:*", &["hasMaterialCategory".to_string()]).await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)), "{:?}", err);
}

#[tokio::test]
async fn counts_by_source_keeps_index_order() {
    let (addr, seen) = fake_index(
        StatusCode::OK,
        json!({"response": {"numFound": 10}, "facet_counts": {"facet_fields": {"source": ["GEOME", 6, "SESAR", 4]}}}),
    )
    .await;
    let builder = FacetSummaryBuilder::new(config_for(addr));

    let counts = builder.counts_by_source().await.unwrap();

    assert_eq!(counts, vec![("GEOME".to_string(), 6), ("SESAR".to_string(), 4)]);
    let pairs = query_pairs(&seen.lock().unwrap()[0]);
    assert!(pairs.contains(&("facet.mincount".to_string(), "1".to_string())));
}

#[tokio::test]
async fn view_state_updates_through_the_builder() {
    let (addr, _) = fake_index(StatusCode::OK, material_response()).await;
    let builder = FacetSummaryBuilder::new(config_for(addr));
    let view = SummaryViewState::default();

    let outcome = view.init(Some("source:SESAR"), &builder).await.unwrap();

    assert_eq!(outcome, UpdateOutcome::Applied);
    assert_eq!(view.query(), "source:SESAR");
    assert_eq!(view.sources(), vec!["SESAR", "OPENCONTEXT"]);
    assert_eq!(view.fields().len(), 3);
    // fields the fake index knows nothing about still get a total row
    assert_eq!(view.facets()["hasContextCategory"].ordered_keys, vec![TOTAL_KEY]);
}

#[tokio::test]
async fn select_proxy_relays_query_and_body() {
    let (index_addr, seen) = fake_index(StatusCode::OK, material_response()).await;
    let app = Router::new().route(THING_SELECT_PATH, thing_select_route(config_for(index_addr)));
    let proxy_addr = serve(app).await;

    let response = reqwest::get(format!(
        "http://{}{}?q=Rock&facet=on&facet.field=source&facet.field=hasMaterialCategory",
        proxy_addr, THING_SELECT_PATH
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["response"]["numFound"], 5);
    assert_eq!(
        seen.lock().unwrap()[0],
        "q=Rock&facet=on&facet.field=source&facet.field=hasMaterialCategory"
    );
}

#[tokio::test]
async fn select_proxy_reports_unreachable_index() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = listener.local_addr().unwrap();
    drop(listener);
    let app = Router::new().route(THING_SELECT_PATH, thing_select_route(config_for(dead)));
    let proxy_addr = serve(app).await;

    let response = reqwest::get(format!("http://{}{}?q=*:*", proxy_addr, THING_SELECT_PATH)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

async fn fake_hosting_api(status: StatusCode, body: Value) -> SocketAddr {
    let app = Router::new().route(
        "/repos/isamplesorg/isamples_inabox/commits/develop",
        get(move |headers: axum::http::HeaderMap| {
            let body = body.clone();
            async move {
                if !headers.contains_key(axum::http::header::USER_AGENT) {
                    return (StatusCode::FORBIDDEN, Json(json!({"message": "user agent required"}))).into_response();
                }
                (status, Json(body)).into_response()
            }
        }),
    );
    serve(app).await
}

fn hosting_config(addr: SocketAddr) -> RepositoryConfig {
    RepositoryConfig { api_url: format!("http://{}", addr), ..RepositoryConfig::default() }
}

#[tokio::test]
async fn revision_widget_shows_short_sha_and_date() {
    let addr = fake_hosting_api(
        StatusCode::OK,
        json!({"sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
               "commit": {"author": {"name": "someone", "date": "2021-11-02T17:10:08Z"}}}),
    )
    .await;
    let fetcher = RevisionFetcher::new(hosting_config(addr));
    let widget = RepositoryInfoState::default();

    widget.init(&fetcher).await;

    assert_eq!(widget.info(), "Revision 6dcb09b at 2021-11-02T17:10:08Z");
}

#[tokio::test]
async fn revision_widget_stays_blank_on_failure() {
    let addr = fake_hosting_api(StatusCode::NOT_FOUND, json!({"message": "Not Found"})).await;
    let fetcher = RevisionFetcher::new(hosting_config(addr));

    let err = fetcher.latest_revision().await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));

    let widget = RepositoryInfoState::default();
    widget.init(&fetcher).await;
    assert_eq!(widget.info(), "");
}

#[tokio::test]
async fn revision_payload_without_commit_is_malformed() {
    let addr = fake_hosting_api(StatusCode::OK, json!({"sha": "6dcb09b"})).await;
    let fetcher = RevisionFetcher::new(hosting_config(addr));

    let err = fetcher.latest_revision().await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));
}

#[tokio::test]
async fn revision_body_cut_short_is_a_network_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // promises more body than it sends, then hangs up
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 400\r\n\r\n{\"sha\": \"6dcb")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });
    let fetcher = RevisionFetcher::new(hosting_config(addr));

    let err = fetcher.latest_revision().await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "{:?}", err);
}
