//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use std::sync::{Arc, Mutex};
use webdex::config::CrawlerConfig;
use webdex::crawler::{CrawlEvent, CrawlObserver, Crawler};
use webdex::robots::{ParsedRobots, RobotsRule};
use webdex::service::{CrawlService, StartCrawlRequest};
use webdex::storage::{load_index, save_index};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a crawler configuration with millisecond delays
fn create_test_config(seed: String) -> CrawlerConfig {
    CrawlerConfig {
        start_urls: vec![seed],
        max_pages: 10,
        max_depth: 3,
        timeout: 2000,
        retry_attempts: 1,
        retry_backoff: 5,
        politeness_delay: 1,
        ..CrawlerConfig::default()
    }
}

/// Mounts an HTML page that must be requested exactly `expected` times
async fn mount_page(server: &MockServer, page_path: &str, html: String, expected: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(html, "text/html; charset=utf-8"),
        )
        .expect(expected)
        .mount(server)
        .await;
}

fn html(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    format!(
        r#"<html><head><title>{}</title></head><body>
        <p>This paragraph is long enough to be indexed.</p>
        {}
        </body></html>"#,
        title, anchors
    )
}

/// Observer that keeps every event for later inspection
#[derive(Clone, Default)]
struct RecordingObserver {
    events: Arc<Mutex<Vec<CrawlEvent>>>,
}

impl CrawlObserver for RecordingObserver {
    fn on_event(&mut self, event: &CrawlEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[tokio::test]
async fn test_full_crawl_breadth_first() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html("Home", &["/page1", "/page2"]), 1).await;
    mount_page(&server, "/page1", html("Page 1", &["/page3"]), 1).await;
    mount_page(&server, "/page2", html("Page 2", &["/"]), 1).await;
    mount_page(&server, "/page3", html("Page 3", &[]), 1).await;

    let mut crawler = Crawler::new(create_test_config(format!("{}/", base))).unwrap();
    let report = crawler.run().await.unwrap();

    let urls: Vec<&str> = report.records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/", base),
            format!("{}/page1", base),
            format!("{}/page2", base),
            format!("{}/page3", base),
        ]
    );

    let depths: Vec<u32> = report.records.iter().map(|r| r.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 2]);

    assert_eq!(report.records[0].title, "Home");
    assert_eq!(report.stats.pages_attempted, 4);
    assert_eq!(report.stats.pages_indexed, 4);
    assert_eq!(report.stats.errors, 0);
    assert_eq!(report.stats.queue_remaining, 0);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_robots_disallow_respected() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"))
        .expect(1)
        .mount(&server)
        .await;

    mount_page(&server, "/", html("Home", &["/private", "/public"]), 1).await;
    mount_page(&server, "/private", html("Private", &[]), 0).await;
    mount_page(&server, "/public", html("Public", &[]), 1).await;

    // A budget of two leaves room for /public only if /private is not counted
    let config = CrawlerConfig {
        max_pages: 2,
        ..create_test_config(format!("{}/", base))
    };
    let report = Crawler::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.records.len(), 2);
    assert!(report.records.iter().all(|r| !r.url.ends_with("/private")));
    assert!(report.errors.is_empty());
    assert_eq!(report.stats.pages_blocked, 1);
    assert_eq!(report.stats.pages_attempted, 2);
}

#[tokio::test]
async fn test_preloaded_robots_rules_used() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
        .expect(0)
        .mount(&server)
        .await;
    mount_page(&server, "/", html("Home", &["/drafts/one"]), 1).await;
    mount_page(&server, "/drafts/one", html("Draft", &[]), 0).await;

    let mut crawler = Crawler::new(create_test_config(format!("{}/", base))).unwrap();
    crawler.robots_mut().preload(
        base.clone(),
        RobotsRule::Rules(ParsedRobots::from_content("User-agent: *\nDisallow: /drafts/")),
    );
    let report = crawler.run().await.unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.stats.pages_blocked, 1);
}

#[tokio::test]
async fn test_robots_refetched_for_each_run() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: Mozilla\nDisallow: /private"))
        .expect(2)
        .mount(&server)
        .await;
    mount_page(&server, "/", html("Home", &["/private"]), 2).await;
    mount_page(&server, "/private", html("Private", &[]), 0).await;

    let mut crawler = Crawler::new(create_test_config(format!("{}/", base))).unwrap();
    let first = crawler.run().await.unwrap();
    let second = crawler.run().await.unwrap();

    assert_eq!(first.records.len(), 1);
    assert_eq!(second.records.len(), 1);
    assert_eq!(second.stats.pages_blocked, 1);
}

#[tokio::test]
async fn test_depth_limit() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html("Home", &["/level1"]), 1).await;
    mount_page(&server, "/level1", html("Level 1", &["/level2"]), 1).await;
    mount_page(&server, "/level2", html("Level 2", &[]), 0).await;

    let config = CrawlerConfig {
        max_depth: 1,
        ..create_test_config(format!("{}/", base))
    };
    let report = Crawler::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.records.len(), 2);
    assert!(report.records.iter().all(|r| r.depth <= 1));
}

#[tokio::test]
async fn test_page_budget() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html("Home", &["/a", "/b", "/c"]), 1).await;
    mount_page(&server, "/a", html("A", &[]), 1).await;
    mount_page(&server, "/b", html("B", &[]), 0).await;
    mount_page(&server, "/c", html("C", &[]), 0).await;

    let config = CrawlerConfig {
        max_pages: 2,
        ..create_test_config(format!("{}/", base))
    };
    let report = Crawler::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.stats.pages_attempted, 2);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.stats.queue_remaining, 2);
}

#[tokio::test]
async fn test_shared_link_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html("Home", &["/a", "/b", "/a#section"]), 1).await;
    mount_page(&server, "/a", html("A", &["/shared"]), 1).await;
    mount_page(&server, "/b", html("B", &["/shared", "/"]), 1).await;
    mount_page(&server, "/shared", html("Shared", &["/a"]), 1).await;

    let report = Crawler::new(create_test_config(format!("{}/", base)))
        .unwrap()
        .run()
        .await
        .unwrap();

    let shared = format!("{}/shared", base);
    assert_eq!(report.records.iter().filter(|r| r.url == shared).count(), 1);
    assert_eq!(report.records.len(), 4);
}

#[tokio::test]
async fn test_retry_then_success() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    mount_page(&server, "/", html("Eventually", &[]), 1).await;

    let observer = RecordingObserver::default();
    let config = CrawlerConfig {
        retry_attempts: 3,
        ..create_test_config(format!("{}/", base))
    };
    let report = Crawler::new(config)
        .unwrap()
        .with_observer(observer.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].title, "Eventually");
    assert!(report.errors.is_empty());

    let events = observer.events.lock().unwrap();
    let retries: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            CrawlEvent::RetryScheduled { attempt, .. } => Some(*attempt),
            _ => None,
        })
        .collect();
    // Numbered by the attempt about to run
    assert_eq!(retries, vec![2, 3]);
}

#[tokio::test]
async fn test_non_html_recorded_as_error() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html("Home", &["/data.json"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"ok":true}"#, "application/json"),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = CrawlerConfig {
        retry_attempts: 2,
        ..create_test_config(format!("{}/", base))
    };
    let report = Crawler::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].url, format!("{}/data.json", base));
    assert_eq!(report.stats.pages_attempted, 2);
    assert_eq!(report.stats.errors, 1);
}

#[tokio::test]
async fn test_failed_fetch_recorded_after_retries() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html("Home", &["/missing"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let config = CrawlerConfig {
        retry_attempts: 3,
        ..create_test_config(format!("{}/", base))
    };
    let report = Crawler::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].error.contains("404"));
}

#[tokio::test]
async fn test_other_hosts_not_followed() {
    let server = MockServer::start().await;
    let base = server.uri();
    let port = url::Url::parse(&base).unwrap().port().unwrap();

    // Same server, but "localhost" is a different hostname than 127.0.0.1
    let other_host = format!("http://localhost:{}/other", port);
    let subdomain = "http://sub.example.invalid/";
    mount_page(
        &server,
        "/",
        html("Home", &[other_host.as_str(), subdomain, "mailto:someone@example.com"]),
        1,
    )
    .await;
    mount_page(&server, "/other", html("Other", &[]), 0).await;

    let report = Crawler::new(create_test_config(format!("{}/", base)))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].links.len(), 3);
    assert_eq!(report.stats.queue_remaining, 0);
}

#[tokio::test]
async fn test_observer_receives_lifecycle_events() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html("Home", &["/next"]), 1).await;
    mount_page(&server, "/next", html("Next", &[]), 1).await;

    let observer = RecordingObserver::default();
    let report = Crawler::new(create_test_config(format!("{}/", base)))
        .unwrap()
        .with_observer(observer.clone())
        .run()
        .await
        .unwrap();

    let events = observer.events.lock().unwrap();
    assert!(matches!(events.first(), Some(CrawlEvent::Started { .. })));
    assert_eq!(
        events.last(),
        Some(&CrawlEvent::Finished {
            stats: report.stats.clone()
        })
    );

    let indexed: Vec<(String, usize)> = events
        .iter()
        .filter_map(|e| match e {
            CrawlEvent::PageIndexed {
                title,
                links_queued,
                ..
            } => Some((title.clone(), *links_queued)),
            _ => None,
        })
        .collect();
    assert_eq!(
        indexed,
        vec![("Home".to_string(), 1), ("Next".to_string(), 0)]
    );
}

#[tokio::test]
async fn test_crawl_save_and_search() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html("Rust Home", &["/guide"]), 1).await;
    mount_page(
        &server,
        "/guide",
        r#"<html><head><title>Guide</title>
        <meta name="description" content="Learning rust step by step"></head>
        <body><h1>Rust basics</h1><p>Ownership is what makes rust memory safe.</p></body></html>"#
            .to_string(),
        1,
    )
    .await;

    let report = Crawler::new(create_test_config(format!("{}/", base)))
        .unwrap()
        .run()
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let index_path = dir.path().join("index.json");
    save_index(&report.into_index(), &index_path).unwrap();

    let index = load_index(&index_path).unwrap().into_index();
    let results = index.search("rust");

    // Guide: description 5 + heading 3 + paragraph 1; Home: title 10 only
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Rust Home");
    assert_eq!(results[0].relevance, 10);
    assert_eq!(results[1].title, "Guide");
    assert_eq!(results[1].relevance, 9);
}

#[tokio::test]
async fn test_service_start_crawl_and_search() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html("Service Home", &["/about"]), 1).await;
    mount_page(&server, "/about", html("About", &[]), 1).await;

    let mut service = CrawlService::new(create_test_config(String::new()));
    assert!(service.search("service").is_empty());

    let stats = service
        .start_crawl(StartCrawlRequest {
            start_url: format!("{}/", base),
            max_pages: Some(5),
            max_depth: None,
            timeout: None,
        })
        .await
        .unwrap();

    assert_eq!(stats.pages_indexed, 2);
    assert_eq!(service.stats(), Some(&stats));
    assert_eq!(service.results().len(), 2);

    let results = service.search("service");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, format!("{}/", base));
}
