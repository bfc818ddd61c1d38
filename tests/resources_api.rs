use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;
use support::ArticleBuilder;
use tower::ServiceExt as _;

mod support;

#[tokio::test]
async fn tag_create_is_idempotent_by_name() {
    let app = support::make_test_router();

    let (status, first) = support::post(&app, "/api/v1/tags", json!({ "name": "Sports" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) = support::post(&app, "/api/v1/tags", json!({ "name": "Sports" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);

    let (_, page) = support::get(&app, "/api/v1/tags?q=spo").await;
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn article_listing_filters_by_tag_topic_and_search() {
    let app = support::make_test_router();
    let news = support::seed_section(&app, "News").await;
    let tag = support::seed_tag(&app, "City Hall").await;

    support::seed_article(
        &app,
        ArticleBuilder::new(news)
            .headline("Council approves budget")
            .tag(tag)
            .topic("budget"),
    )
    .await;
    support::seed_article(&app, ArticleBuilder::new(news).headline("Rowing team wins")).await;

    let (status, all) = support::get(&app, "/api/v1/articles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["items"].as_array().unwrap().len(), 2);

    for uri in [
        "/api/v1/articles?tag=City%20Hall",
        "/api/v1/articles?topic=budget",
        "/api/v1/articles?q=APPROVES",
    ] {
        let (_, page) = support::get(&app, uri).await;
        let items = page["items"].as_array().unwrap();
        assert_eq!(items.len(), 1, "{uri}");
        assert_eq!(items[0]["long_headline"], "Council approves budget");
    }

    let (_, paged) = support::get(&app, "/api/v1/articles?limit=1").await;
    assert_eq!(paged["items"].as_array().unwrap().len(), 1);
    assert_eq!(paged["has_more"], true);
}

#[tokio::test]
async fn article_updates_are_kept_as_revisions() {
    let app = support::make_test_router();
    let news = support::seed_section(&app, "News").await;
    let author = support::seed_person(&app, "Jane Reporter").await;
    let id = support::seed_article(&app, ArticleBuilder::new(news).author(author)).await;

    let (status, updated) = support::send_json(
        &app,
        Method::PATCH,
        &format!("/api/v1/articles/{id}"),
        Some(json!({ "long_headline": "Council rejects budget" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["revision_id"], 2);
    assert_eq!(updated["slug"], "council-rejects-budget");
    assert_eq!(updated["authors"], json!([author]));

    let (status, first) =
        support::get(&app, &format!("/api/v1/articles/{id}/revision?revision_id=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["long_headline"], "Council approves budget");

    let (_, revisions) = support::get(&app, &format!("/api/v1/articles/{id}/revisions")).await;
    assert_eq!(revisions.as_array().unwrap().len(), 2);

    let (status, body) =
        support::get(&app, &format!("/api/v1/articles/{id}/revision?revision_id=9")).await;
    support::assert_error(status, &body, StatusCode::NOT_FOUND, "Not Found");
}

#[tokio::test]
async fn article_put_requires_core_fields() {
    let app = support::make_test_router();
    let news = support::seed_section(&app, "News").await;
    let id = support::seed_article(&app, ArticleBuilder::new(news)).await;

    let (status, body) = support::send_json(
        &app,
        Method::PUT,
        &format!("/api/v1/articles/{id}"),
        Some(json!({ "content": "only the body" })),
    )
    .await;
    support::assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad Request");
    assert!(body["message"].as_str().unwrap().contains("long_headline"));
}

#[tokio::test]
async fn article_references_and_slugs_are_checked() {
    let app = support::make_test_router();
    let news = support::seed_section(&app, "News").await;

    let (status, body) = support::post(&app, "/api/v1/articles", ArticleBuilder::new(999).build()).await;
    support::assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad Request");

    let (status, _) =
        support::post(&app, "/api/v1/articles", ArticleBuilder::new(news).author(42).build()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    support::seed_article(&app, ArticleBuilder::new(news).slug("budget")).await;
    let (status, body) =
        support::post(&app, "/api/v1/articles", ArticleBuilder::new(news).slug("budget").build()).await;
    support::assert_error(status, &body, StatusCode::CONFLICT, "Conflict");

    // Generated slugs never collide.
    let second = support::seed_article(&app, ArticleBuilder::new(news)).await;
    let third = support::seed_article(&app, ArticleBuilder::new(news)).await;
    let (_, second) = support::get(&app, &format!("/api/v1/articles/{second}")).await;
    let (_, third) = support::get(&app, &format!("/api/v1/articles/{third}")).await;
    assert_eq!(second["slug"], "council-approves-budget");
    assert_eq!(third["slug"], "council-approves-budget-2");
}

#[tokio::test]
async fn frontpage_lists_published_articles_by_section() {
    let app = support::make_test_router();
    let news = support::seed_section(&app, "News").await;
    let sports = support::seed_section(&app, "Sports").await;

    support::seed_article(&app, ArticleBuilder::new(news).headline("Published news").published()).await;
    support::seed_article(&app, ArticleBuilder::new(news).headline("Draft news")).await;
    support::seed_article(&app, ArticleBuilder::new(sports).headline("Game recap").published()).await;

    let (_, all) = support::get(&app, "/api/v1/frontpage").await;
    assert_eq!(all["items"].as_array().unwrap().len(), 2);

    let (_, by_id) = support::get(&app, &format!("/api/v1/sections/{news}/frontpage")).await;
    let items = by_id["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["long_headline"], "Published news");

    let (status, by_slug) = support::get(&app, "/api/v1/sections/by-slug/sports/frontpage").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug["items"][0]["long_headline"], "Game recap");

    let (status, body) =
        support::get(&app, &format!("/api/v1/frontpage?section_id={news}&section_slug=news")).await;
    support::assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad Request");

    let (status, body) = support::get(&app, "/api/v1/frontpage?section_slug=opinion").await;
    support::assert_error(status, &body, StatusCode::NOT_FOUND, "Not Found");
}

#[tokio::test]
async fn image_authors_default_to_requesting_person() {
    let app = support::make_test_router();
    let photographer = support::seed_person(&app, "Sam Lens").await;

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/images")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-person-id", photographer.to_string())
        .body(Body::from(json!({ "filename": "rally.jpg" }).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let image = support::read_json(resp).await;
    assert_eq!(image["authors"], json!([photographer]));

    let (status, explicit) =
        support::post(&app, "/api/v1/images", json!({ "filename": "crowd.jpg", "authors": [] })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(explicit["authors"], json!([]));

    let (status, body) = support::send_json(
        &app,
        Method::PUT,
        &format!("/api/v1/images/{}", image["id"]),
        Some(json!({ "caption": "no filename" })),
    )
    .await;
    support::assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad Request");
}

#[tokio::test]
async fn images_attach_to_articles() {
    let app = support::make_test_router();
    let news = support::seed_section(&app, "News").await;
    let article = support::seed_article(&app, ArticleBuilder::new(news)).await;
    let image = support::seed_image(&app, "council.jpg").await;

    let (status, attachment) = support::post(
        &app,
        &format!("/api/v1/articles/{article}/attachments"),
        json!({ "image_id": image, "caption": "The chamber" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(attachment["image"]["filename"], "council.jpg");

    let (_, listed) = support::get(&app, &format!("/api/v1/articles/{article}/attachments")).await;
    assert_eq!(listed["items"].as_array().unwrap().len(), 1);

    let (_, everything) = support::get(&app, "/api/v1/attachments").await;
    assert_eq!(everything["items"].as_array().unwrap().len(), 1);

    let (status, _) = support::post(
        &app,
        "/api/v1/articles/999/attachments",
        json!({ "image_id": image }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sections_and_people_support_crud() {
    let app = support::make_test_router();
    let section = support::seed_section(&app, "Culture").await;

    let (status, patched) = support::send_json(
        &app,
        Method::PATCH,
        &format!("/api/v1/sections/{section}"),
        Some(json!({ "slug": "arts" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["name"], "Culture");
    assert_eq!(patched["slug"], "arts");

    support::seed_article(&app, ArticleBuilder::new(section)).await;
    let (status, body) = support::delete(&app, &format!("/api/v1/sections/{section}")).await;
    support::assert_error(status, &body, StatusCode::CONFLICT, "Conflict");

    let person = support::seed_person(&app, "Alex Editor").await;
    let (status, body) = support::delete(&app, &format!("/api/v1/people/{person}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "deleted" }));

    let (status, body) = support::get(&app, &format!("/api/v1/people/{person}")).await;
    support::assert_error(status, &body, StatusCode::NOT_FOUND, "Not Found");
}

#[tokio::test]
async fn docs_are_served() {
    let app = support::make_test_router();

    let (status, doc) = support::get(&app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/v1/pages/{slug}/components").is_some());

    let req = Request::builder().uri("/redoc").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, health) = support::get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
}
