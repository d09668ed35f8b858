// tests/list_links.rs
//
// List page link extraction over generated charts of varying size.
//
use imdb_top_scrape::list_page::detail_links;
use scraper::Html;
use url::Url;

fn chart(k: usize) -> String {
    let mut items = String::new();
    for i in 0..k {
        items.push_str(&format!(
            r#"<li><a class="ipc-title-link-wrapper" href="/title/tt{i:07}/?ref_=chttp_t_{n}"><h3>{n}. Movie</h3></a></li>"#,
            n = i + 1
        ));
    }
    format!(
        r#"<html><body><ul class="ipc-metadata-list ipc-metadata-list--dividers-between sc-9d2f6de0-0 iMNUXk compact-list-view ipc-metadata-list--base">{items}</ul></body></html>"#
    )
}

#[test]
fn k_anchors_give_k_absolute_urls() {
    let base = Url::parse("https://www.imdb.com").unwrap();
    for k in [0, 1, 7, 250] {
        let doc = Html::parse_document(&chart(k));
        let urls = detail_links(&doc, &base).unwrap();
        assert_eq!(urls.len(), k);
        for url in &urls {
            assert!(url.starts_with("https://www.imdb.com/title/tt"), "{url}");
        }
    }
}

#[test]
fn urls_follow_chart_order() {
    let base = Url::parse("https://www.imdb.com").unwrap();
    let doc = Html::parse_document(&chart(3));
    let urls = detail_links(&doc, &base).unwrap();
    assert_eq!(
        urls,
        vec![
            "https://www.imdb.com/title/tt0000000/?ref_=chttp_t_1",
            "https://www.imdb.com/title/tt0000001/?ref_=chttp_t_2",
            "https://www.imdb.com/title/tt0000002/?ref_=chttp_t_3",
        ]
    );
}
