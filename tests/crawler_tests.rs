use std::collections::HashMap;

use tempfile::tempdir;
use webdex::{Crawler, Searcher};

fn stub_site() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("www.a.com", "I like spam and I hate gogiberries"),
        ("www.b.com", "spam spam spam wonderful spam"),
    ])
}

#[test]
fn crawl_incorporates_fetched_pages() {
    let site = stub_site();
    let mut fetch = |url: &str| site.get(url).map(|page| page.to_string());

    let mut crawler = Crawler::new();
    crawler.add_url("www.a.com");
    crawler.add_url("www.b.com");
    assert_eq!(crawler.url_count(), 2);

    let mut completed = Vec::new();
    crawler
        .crawl(&mut fetch, |url, success| {
            completed.push((url.to_string(), success))
        })
        .unwrap();

    // One callback per added URL, in FIFO order.
    assert_eq!(
        completed,
        vec![
            ("www.a.com".to_string(), true),
            ("www.b.com".to_string(), true)
        ]
    );
    assert_eq!(crawler.index().document_count(), 2);

    let spam = crawler.index().lookup("spam");
    assert_eq!(spam.len(), 2);
    assert_eq!(spam[0].url, "www.a.com");
    assert_eq!(spam[0].count, 1);
    assert_eq!(spam[1].url, "www.b.com");
    assert_eq!(spam[1].count, 4);
}

#[test]
fn failed_fetches_report_failure_and_skip_the_index() {
    let site = stub_site();
    let mut fetch = |url: &str| site.get(url).map(|page| page.to_string());

    let mut crawler = Crawler::new();
    crawler.add_url("www.down.com");
    crawler.add_url("www.a.com");

    let mut completed = Vec::new();
    crawler
        .crawl(&mut fetch, |url, success| {
            completed.push((url.to_string(), success))
        })
        .unwrap();

    assert_eq!(
        completed,
        vec![
            ("www.down.com".to_string(), false),
            ("www.a.com".to_string(), true)
        ]
    );
    assert_eq!(crawler.index().document_count(), 1);
    assert!(!crawler.index().contains_url("www.down.com"));
}

#[test]
fn crawl_drains_the_queue() {
    let mut fetch = |_: &str| Some("page".to_string());
    let mut crawler = Crawler::new();
    crawler.add_url("www.a.com");
    crawler.crawl(&mut fetch, |_, _| {}).unwrap();

    // Nothing pending; a second crawl performs no fetches.
    let mut fetches = 0;
    let mut counting_fetch = |_: &str| {
        fetches += 1;
        Some("page".to_string())
    };
    crawler.crawl(&mut counting_fetch, |_, _| {}).unwrap();
    assert_eq!(fetches, 0);
    // Lifetime total is unchanged by crawling.
    assert_eq!(crawler.url_count(), 1);
}

#[test]
fn fatal_incorporate_error_still_reports_completion() {
    let mut fetch = |url: &str| Some(format!("page about {url}"));

    let mut crawler = Crawler::with_index(webdex::Index::with_url_capacity(1));
    crawler.add_url("www.a.com");
    crawler.add_url("www.b.com");

    let mut completed = Vec::new();
    let err = crawler
        .crawl(&mut fetch, |url, success| {
            completed.push((url.to_string(), success))
        })
        .unwrap_err();
    assert!(matches!(err, webdex::Error::CapacityExceeded { capacity: 1 }));

    // The URL that hit the full table still got its completion callback.
    assert_eq!(
        completed,
        vec![
            ("www.a.com".to_string(), true),
            ("www.b.com".to_string(), false)
        ]
    );
    assert_eq!(crawler.index().document_count(), 1);
}

#[test]
fn crawler_persists_through_its_index() {
    let dir = tempdir().unwrap();
    let site = stub_site();
    let mut fetch = |url: &str| site.get(url).map(|page| page.to_string());

    let mut crawler = Crawler::new();
    crawler.add_url("www.a.com");
    crawler.add_url("www.b.com");
    crawler.crawl(&mut fetch, |_, _| {}).unwrap();
    crawler.save(dir.path()).unwrap();

    let mut searcher = Searcher::new();
    searcher.load(dir.path()).unwrap();
    assert_eq!(
        searcher.search("spam"),
        vec!["www.b.com".to_string(), "www.a.com".to_string()]
    );
}
