//! End-to-end WordPress migrations against fakes

mod common;

use common::{FakeDestination, PagedSource};
use content_migrator::{
    DestinationId, EntityKind, Method, Migration, Pagination, SourceAdapter, SourceKey,
    SyncError, WordpressSource,
};
use serde_json::{json, Value};
use std::sync::Arc;

const CATEGORIES: &str = "/wp-json/wp/v2/categories";
const TAGS: &str = "/wp-json/wp/v2/tags";
const POSTS: &str = "/wp-json/wp/v2/posts";
const PAGES: &str = "/wp-json/wp/v2/pages";

fn category(id: i64, parent: i64, name: &str) -> Value {
    json!({ "id": id, "parent": parent, "name": name, "description": "", "slug": name.to_lowercase() })
}

fn post(id: i64, title: &str, categories: Vec<i64>, tags: Vec<i64>) -> Value {
    json!({
        "id": id,
        "title": { "rendered": title },
        "content": { "rendered": format!("<p>{title}</p>") },
        "excerpt": { "rendered": "" },
        "categories": categories,
        "tags": tags,
    })
}

fn site() -> PagedSource {
    PagedSource::new(Pagination::ShortPage)
        .with_filtered_collection(
            CATEGORIES,
            vec![
                category(1, 0, "News"),
                category(2, 1, "Local"),
                category(3, 0, "Sport"),
                category(4, 2, "City"),
            ],
            "parent",
            "parent",
        )
        .with_collection(
            TAGS,
            vec![
                json!({ "id": 10, "name": "rust", "description": "lang" }),
                json!({ "id": 11, "name": "web", "description": "" }),
            ],
        )
        .with_collection(
            POSTS,
            vec![
                post(100, "First", vec![1], vec![10, 11]),
                post(101, "Second", vec![4, 3], vec![]),
            ],
        )
        .with_collection(
            PAGES,
            vec![json!({
                "id": 200,
                "title": { "rendered": "About" },
                "content": { "rendered": "<p>about</p>" },
                "excerpt": { "rendered": "" }
            })],
        )
}

fn number(id: &DestinationId) -> i64 {
    match id {
        DestinationId::Number(n) => *n,
        DestinationId::Text(s) => s.parse().unwrap(),
    }
}

#[tokio::test]
async fn parent_child_categories_resolve_parent_id() {
    let source = PagedSource::new(Pagination::ShortPage).with_filtered_collection(
        CATEGORIES,
        vec![category(1, 0, "A"), category(2, 1, "B")],
        "parent",
        "parent",
    );
    let fake = FakeDestination::new();
    let client = fake.client("WORDPRESS");
    let adapter = WordpressSource::new(Arc::new(source));

    adapter.migrate_categories(&client).await.unwrap();

    let created = fake.entities(EntityKind::Category);
    assert_eq!(created.len(), 2);
    assert_eq!(created[0].title(), "A");
    assert_eq!(created[1].title(), "B");
    assert_eq!(created[1].body["parent_id"], json!(created[0].id));
    assert!(created[0].body.get("parent_id").is_none());

    let cache = client.cache();
    assert_eq!(
        cache.get(EntityKind::Category, &SourceKey::from(1i64)),
        Some(DestinationId::Number(created[0].id))
    );
    assert_eq!(
        cache.get(EntityKind::Category, &SourceKey::from(2i64)),
        Some(DestinationId::Number(created[1].id))
    );
}

#[tokio::test]
async fn children_are_requested_only_after_their_parent_exists() {
    let source = Arc::new(site());
    let fake = FakeDestination::new();
    let client = fake.client("WORDPRESS");
    WordpressSource::new(source.clone())
        .migrate_categories(&client)
        .await
        .unwrap();

    let order: Vec<String> = fake
        .entities(EntityKind::Category)
        .iter()
        .map(|e| e.title().to_string())
        .collect();
    for (parent, child) in [("News", "Local"), ("Local", "City")] {
        let p = order.iter().position(|t| t == parent).unwrap();
        let c = order.iter().position(|t| t == child).unwrap();
        assert!(p < c, "{parent} must be created before {child}: {order:?}");
    }

    let parents: Vec<String> = source
        .requests_for(CATEGORIES)
        .iter()
        .map(|r| r.query.get("parent").unwrap().to_string())
        .collect();
    assert_eq!(parents[0], "0");
    assert_eq!(parents.len(), 5); // root plus one request per category
}

#[tokio::test]
async fn full_run_migrates_everything_in_order() {
    let fake = FakeDestination::new();
    let migration = Migration::new(
        Arc::new(WordpressSource::new(Arc::new(site()))),
        fake.client("WORDPRESS"),
    );

    let report = migration.run().await.unwrap();

    assert_eq!(report.categories.created, 4);
    assert_eq!(report.tags.created, 2);
    assert_eq!(report.items.created, 3);
    assert_eq!(report.associations, 2);

    let first = fake.entity(EntityKind::Item, "WORDPRESS|100").unwrap();
    let news = fake.entity(EntityKind::Category, "WORDPRESS|1").unwrap();
    assert_eq!(first.body["categories"], json!([news.id]));
    assert_eq!(first.body["aesirx_tags"], json!([]));
    assert_eq!(first.body["metaverse_content"], "<p>First</p>");

    let rust = fake.entity(EntityKind::Tag, "WORDPRESS|10").unwrap();
    let web = fake.entity(EntityKind::Tag, "WORDPRESS|11").unwrap();
    assert_eq!(fake.links(), vec![(first.id, rust.id), (first.id, web.id)]);
    assert_eq!(rust.body["description"], "lang");

    let second = fake.entity(EntityKind::Item, "WORDPRESS|101").unwrap();
    let city = fake.entity(EntityKind::Category, "WORDPRESS|4").unwrap();
    let sport = fake.entity(EntityKind::Category, "WORDPRESS|3").unwrap();
    assert_eq!(second.body["categories"], json!([city.id, sport.id]));

    let about = fake.entity(EntityKind::Item, "WORDPRESS|200").unwrap();
    assert!(about.body.get("aesirx_tags").is_none());
    assert!(about.body.get("categories").is_none());
}

#[tokio::test]
async fn rerun_updates_in_place() {
    let fake = FakeDestination::new();
    let source = Arc::new(site());

    let first = Migration::new(
        Arc::new(WordpressSource::new(source.clone())),
        fake.client("WORDPRESS"),
    );
    first.run().await.unwrap();
    let ids_before: Vec<i64> = fake.entities(EntityKind::Item).iter().map(|e| e.id).collect();

    let second = Migration::new(
        Arc::new(WordpressSource::new(source)),
        fake.client("WORDPRESS"),
    );
    let report = second.run().await.unwrap();

    assert_eq!(report.categories.created, 0);
    assert_eq!(report.categories.updated, 4);
    assert_eq!(report.tags.updated, 2);
    assert_eq!(report.items.updated, 3);
    assert_eq!(fake.entities(EntityKind::Category).len(), 4);
    let ids_after: Vec<i64> = fake.entities(EntityKind::Item).iter().map(|e| e.id).collect();
    assert_eq!(ids_before, ids_after);

    // Associations are re-issued on every run
    assert_eq!(fake.links().len(), 4);
}

#[tokio::test]
async fn post_with_unmigrated_category_fails() {
    let source = PagedSource::new(Pagination::ShortPage)
        .with_collection(POSTS, vec![post(1, "Orphan", vec![42], vec![])]);
    let fake = FakeDestination::new();
    let client = fake.client("WORDPRESS");

    let err = WordpressSource::new(Arc::new(source))
        .migrate_posts(&client)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Resolution { kind: EntityKind::Category, ref key } if key.as_str() == "42"
    ));
    assert_eq!(fake.count(Method::Post, None), 0);
}

#[tokio::test]
async fn page_size_drives_source_paging() {
    let posts: Vec<Value> = (1..=5).map(|id| post(id, "P", vec![], vec![])).collect();
    let source = Arc::new(PagedSource::new(Pagination::ShortPage).with_collection(POSTS, posts));
    let fake = FakeDestination::new();
    let client = fake.client("WORDPRESS");

    WordpressSource::new(source.clone())
        .with_page_size(2)
        .migrate_posts(&client)
        .await
        .unwrap();

    assert_eq!(source.requests_for(POSTS).len(), 3);
    let ids: Vec<i64> = fake.entities(EntityKind::Item).iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 5);
    assert_eq!(
        number(&client.cache().get(EntityKind::Item, &SourceKey::from(5i64)).unwrap()),
        ids[4]
    );
}
