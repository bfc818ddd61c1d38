use axum::http::{Method, Request, StatusCode, header};
use axum::body::Body;
use dispatch_core::domain::layout::{LayoutRepository as _, PageSlug};
use dispatch_core::infrastructure::{repositories::memory::InMemoryStore, theme::DEFAULT_THEME};
use serde_json::{Value, json};
use tower::ServiceExt as _;

mod support;

const FRONTPAGE: &str = "/api/v1/pages/frontpage/components";

fn legacy_theme() -> String {
    let mut theme: Value = serde_json::from_str(DEFAULT_THEME).unwrap();
    theme["components"].as_array_mut().unwrap().push(json!({
        "slug": "legacy_banner",
        "name": "Legacy banner",
        "spots": ["footer"],
        "fields": [{ "name": "text", "label": "Text", "type": "char" }]
    }));
    theme.to_string()
}

#[tokio::test]
async fn detail_of_unsaved_page_lists_spots_and_schemas() {
    let app = support::make_test_router();

    let (status, body) = support::get(&app, FRONTPAGE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], json!({}));

    let spots: Vec<&str> = body["spots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|spot| spot["slug"].as_str().unwrap())
        .collect();
    assert_eq!(spots, ["masthead", "lead", "main", "sidebar", "footer"]);

    let sidebar_options: Vec<&str> = body["spots"][3]["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|option| option["slug"].as_str().unwrap())
        .collect();
    assert_eq!(sidebar_options, ["article_list", "promo", "html_block"]);

    // article_list and html_block are offered in several spots but described once.
    let components = body["components"].as_object().unwrap();
    assert_eq!(components.len(), 5);
    assert_eq!(components["article_list"]["count"]["default"], 5);
    assert_eq!(components["promo"]["title"]["required"], true);
}

#[tokio::test]
async fn template_page_offers_only_its_spots() {
    let app = support::make_test_router();

    let (status, body) = support::get(&app, "/api/v1/pages/about/components").await;
    assert_eq!(status, StatusCode::OK);
    let spots: Vec<&str> = body["spots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|spot| spot["slug"].as_str().unwrap())
        .collect();
    assert_eq!(spots, ["main", "footer"]);

    let (status, body) = support::post_form(
        &app,
        "/api/v1/pages/about/components",
        "component=promo&spot=sidebar&title=Subscribe",
    )
    .await;
    support::assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad Request");
}

#[tokio::test]
async fn first_save_creates_page_then_later_saves_update_it() {
    let app = support::make_test_router();

    let (status, body) =
        support::post_form(&app, FRONTPAGE, "component=html_block&spot=main&html=%3Cp%3Ehi%3C%2Fp%3E")
            .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "saved": true }));

    let (status, body) =
        support::post_form(&app, FRONTPAGE, "component=promo&spot=sidebar&title=Subscribe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "saved": true }));

    let (_, detail) = support::get(&app, FRONTPAGE).await;
    let saved = detail["saved"].as_object().unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved["main"]["slug"], "html_block");
    assert_eq!(saved["main"]["fields"]["html"], "<p>hi</p>");
    assert_eq!(saved["sidebar"]["slug"], "promo");
    assert_eq!(saved["sidebar"]["fields"]["title"], "Subscribe");
}

#[tokio::test]
async fn saving_one_spot_leaves_other_spots_untouched() {
    let app = support::make_test_router();

    support::post_form(&app, FRONTPAGE, "component=promo&spot=footer&title=Donate").await;
    support::post_form(&app, FRONTPAGE, "component=html_block&spot=main&html=one").await;
    let (status, _) =
        support::post_form(&app, FRONTPAGE, "component=html_block&spot=main&html=two").await;
    assert_eq!(status, StatusCode::OK);

    let (_, detail) = support::get(&app, FRONTPAGE).await;
    assert_eq!(detail["saved"]["footer"]["fields"]["title"], "Donate");
    assert_eq!(detail["saved"]["main"]["fields"]["html"], "two");
}

#[tokio::test]
async fn swapping_component_replaces_placement() {
    let store = InMemoryStore::new();
    let app = support::router_for(&store, DEFAULT_THEME);

    support::post_form(&app, FRONTPAGE, "component=html_block&spot=main&html=old").await;
    let (status, _) =
        support::post_form(&app, FRONTPAGE, "component=article_list&spot=main&title=Latest").await;
    assert_eq!(status, StatusCode::OK);

    let (_, detail) = support::get(&app, FRONTPAGE).await;
    assert_eq!(detail["saved"]["main"]["slug"], "article_list");
    assert_eq!(detail["saved"]["main"]["fields"]["count"], 5);
    assert!(detail["saved"]["main"]["fields"].get("html").is_none());

    let page = store
        .repositories()
        .layout
        .find_page(&PageSlug::new("frontpage").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page.placements.len(), 1);
}

#[tokio::test]
async fn same_component_update_inherits_unspecified_fields() {
    let app = support::make_test_router();

    support::post_form(
        &app,
        FRONTPAGE,
        "component=promo&spot=sidebar&title=Subscribe&body=Weekly+digest",
    )
    .await;
    let (status, _) = support::post_form(
        &app,
        FRONTPAGE,
        "component=promo&spot=sidebar&link=https%3A%2F%2Fexample.org",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, detail) = support::get(&app, FRONTPAGE).await;
    let fields = &detail["saved"]["sidebar"]["fields"];
    assert_eq!(fields["title"], "Subscribe");
    assert_eq!(fields["body"], "Weekly digest");
    assert_eq!(fields["link"], "https://example.org");
}

#[tokio::test]
async fn invalid_first_write_leaves_no_page_behind() {
    let app = support::make_test_router();

    let (status, body) =
        support::post_form(&app, "/api/v1/pages/special/components", "component=html_block&spot=main")
            .await;
    support::assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad Request");
    assert_eq!(body["fields"]["html"], "this field is required");

    let (status, _) = support::delete(&app, "/api/v1/pages/special").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = support::post_form(
        &app,
        "/api/v1/pages/special/components",
        "component=html_block&spot=main&html=ok",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn rejects_unknown_components_spots_and_ineligible_placements() {
    let app = support::make_test_router();

    let cases = [
        "component=carousel&spot=main",
        "component=promo&spot=basement&title=x",
        "component=breaking_news&spot=sidebar&headline=x",
        "spot=main&html=x",
    ];
    for form in cases {
        let (status, body) = support::post_form(&app, FRONTPAGE, form).await;
        support::assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad Request");
    }

    let (_, detail) = support::get(&app, FRONTPAGE).await;
    assert_eq!(detail["saved"], json!({}));
}

#[tokio::test]
async fn accepts_json_submissions_and_repeated_form_ids() {
    let app = support::make_test_router();

    let (status, _) = support::post(
        &app,
        FRONTPAGE,
        json!({ "component": "article_list", "spot": "main", "articles": [3, 7], "count": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = support::post_form(
        &app,
        FRONTPAGE,
        "component=article_list&spot=sidebar&articles=4&articles=9",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, detail) = support::get(&app, FRONTPAGE).await;
    assert_eq!(detail["saved"]["main"]["fields"]["articles"], json!([3, 7]));
    assert_eq!(detail["saved"]["main"]["fields"]["count"], 3);
    assert_eq!(detail["saved"]["sidebar"]["fields"]["articles"], json!([4, 9]));
}

#[tokio::test]
async fn form_posts_keep_last_scalar_and_read_unchecked_boxes_as_false() {
    let app = support::make_test_router();

    let (status, _) = support::post_form(
        &app,
        FRONTPAGE,
        "component=breaking_news&spot=masthead&headline=First&headline=Second&active=on",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, detail) = support::get(&app, FRONTPAGE).await;
    assert_eq!(detail["saved"]["masthead"]["fields"]["headline"], "Second");
    assert_eq!(detail["saved"]["masthead"]["fields"]["active"], true);

    let (status, _) =
        support::post_form(&app, FRONTPAGE, "component=breaking_news&spot=masthead").await;
    assert_eq!(status, StatusCode::OK);
    let (_, detail) = support::get(&app, FRONTPAGE).await;
    assert_eq!(detail["saved"]["masthead"]["fields"]["headline"], "Second");
    assert_eq!(detail["saved"]["masthead"]["fields"]["active"], false);

    // JSON bodies only change what they name.
    support::post(
        &app,
        FRONTPAGE,
        json!({ "component": "breaking_news", "spot": "masthead", "active": true }),
    )
    .await;
    let (status, _) = support::post(
        &app,
        FRONTPAGE,
        json!({ "component": "breaking_news", "spot": "masthead", "headline": "Third" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, detail) = support::get(&app, FRONTPAGE).await;
    assert_eq!(detail["saved"]["masthead"]["fields"]["headline"], "Third");
    assert_eq!(detail["saved"]["masthead"]["fields"]["active"], true);
}

#[tokio::test]
async fn unsupported_content_type_is_rejected() {
    let app = support::make_test_router();

    let req = Request::builder()
        .method(Method::POST)
        .uri(FRONTPAGE)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("component=promo"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn placement_of_component_missing_from_theme_is_skipped_on_read() {
    let store = InMemoryStore::new();
    let legacy = support::router_for(&store, &legacy_theme());
    let current = support::router_for(&store, DEFAULT_THEME);

    let (status, _) =
        support::post_form(&legacy, FRONTPAGE, "component=legacy_banner&spot=footer&text=Hi").await;
    assert_eq!(status, StatusCode::CREATED);
    support::post_form(&legacy, FRONTPAGE, "component=html_block&spot=main&html=kept").await;

    let (status, detail) = support::get(&current, FRONTPAGE).await;
    assert_eq!(status, StatusCode::OK);
    let saved = detail["saved"].as_object().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved["main"]["fields"]["html"], "kept");
}

#[tokio::test]
async fn clearing_spot_and_deleting_page() {
    let app = support::make_test_router();

    support::post_form(&app, FRONTPAGE, "component=html_block&spot=main&html=x").await;
    support::post_form(&app, FRONTPAGE, "component=promo&spot=footer&title=y").await;

    let (status, body) = support::delete(&app, "/api/v1/pages/frontpage/components/main").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "saved": true }));

    let (status, _) = support::delete(&app, "/api/v1/pages/frontpage/components/main").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, detail) = support::get(&app, FRONTPAGE).await;
    assert!(detail["saved"].get("main").is_none());
    assert_eq!(detail["saved"]["footer"]["slug"], "promo");

    let (status, body) = support::delete(&app, "/api/v1/pages/frontpage").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "deleted" }));

    let (_, detail) = support::get(&app, FRONTPAGE).await;
    assert_eq!(detail["saved"], json!({}));

    let (status, _) = support::post_form(&app, FRONTPAGE, "component=promo&spot=footer&title=y").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_saves_keep_one_placement_per_spot() {
    let store = InMemoryStore::new();
    let app = support::router_for(&store, DEFAULT_THEME);

    let mut handles = Vec::new();
    for i in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let form = if i % 2 == 0 {
                format!("component=html_block&spot=main&html=v{i}")
            } else {
                format!("component=article_list&spot=main&title=v{i}")
            };
            support::post_form(&app, FRONTPAGE, &form).await.0
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CREATED).count(), 1);
    assert!(statuses.iter().all(|s| *s == StatusCode::CREATED || *s == StatusCode::OK));

    let page = store
        .repositories()
        .layout
        .find_page(&PageSlug::new("frontpage").unwrap())
        .await
        .unwrap()
        .unwrap();
    let in_main = page
        .placements
        .iter()
        .filter(|placement| placement.spot.as_str() == "main")
        .count();
    assert_eq!(in_main, 1);
}
