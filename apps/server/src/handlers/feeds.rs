//! RSS 2.0 and sitemap feeds for published posts.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use quill_core::domain::Post;

use crate::middleware::error::AppResult;
use crate::state::AppState;

const RSS_LIMIT: u64 = 20;

/// GET /rss.xml
pub async fn rss(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_published(Some(RSS_LIMIT)).await?;
    let xml = render_rss(&state.base_url, &posts);

    Ok(HttpResponse::Ok()
        .content_type("application/rss+xml")
        .body(xml))
}

/// GET /sitemap.xml
pub async fn sitemap(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let mut posts = state.posts.list_published(None).await?;
    posts.sort_by(|a, b| b.updated_on.cmp(&a.updated_on));
    let xml = render_sitemap(&state.base_url, &posts);

    Ok(HttpResponse::Ok()
        .content_type("application/xml")
        .body(xml))
}

fn render_rss(base_url: &str, posts: &[Post]) -> String {
    let mut xml = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<rss version=\"2.0\">\n",
        "<channel>\n",
    ));
    xml.push_str(&format!(
        "<title>Quill</title>\n<link>{}</link>\n<description>Latest posts</description>\n<lastBuildDate>{}</lastBuildDate>\n",
        escape_xml(base_url),
        Utc::now().to_rfc2822(),
    ));

    for post in posts {
        let link = format!("{base_url}/blog/{}", post.slug);
        xml.push_str("<item>\n");
        xml.push_str(&format!("<title>{}</title>\n", escape_xml(&post.title)));
        xml.push_str(&format!("<link>{}</link>\n", escape_xml(&link)));
        xml.push_str(&format!(
            "<guid isPermaLink=\"true\">{}</guid>\n",
            escape_xml(&link)
        ));
        xml.push_str(&format!("<pubDate>{}</pubDate>\n", post.created_on.to_rfc2822()));
        if let Some(excerpt) = post.excerpt.as_deref() {
            xml.push_str(&format!(
                "<description>{}</description>\n",
                escape_xml(excerpt)
            ));
        }
        xml.push_str("</item>\n");
    }

    xml.push_str("</channel>\n</rss>\n");
    xml
}

fn render_sitemap(base_url: &str, posts: &[Post]) -> String {
    let mut xml = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    ));
    xml.push_str(&format!(
        "<url><loc>{}/</loc></url>\n",
        escape_xml(base_url)
    ));

    for post in posts {
        xml.push_str(&format!(
            "<url><loc>{}/blog/{}</loc><lastmod>{}</lastmod></url>\n",
            escape_xml(base_url),
            escape_xml(&post.slug),
            post.updated_on.format("%Y-%m-%d"),
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn published(title: &str, slug: &str) -> Post {
        let mut post = Post::new(Uuid::new_v4(), title.into(), slug.into());
        post.published = true;
        post.excerpt = Some("A <short> & sweet preview".into());
        post
    }

    #[test]
    fn escape_xml_covers_significant_characters() {
        assert_eq!(
            escape_xml(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn rss_contains_items_with_escaped_text() {
        let posts = vec![published("Tips & Tricks", "tips-tricks")];
        let xml = render_rss("http://example.com", &posts);

        assert!(xml.contains("<title>Tips &amp; Tricks</title>"));
        assert!(xml.contains("<link>http://example.com/blog/tips-tricks</link>"));
        assert!(xml.contains("A &lt;short&gt; &amp; sweet preview"));
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.ends_with("</channel>\n</rss>\n"));
    }

    #[test]
    fn sitemap_lists_home_and_posts() {
        let posts = vec![published("One", "one"), published("Two", "two")];
        let xml = render_sitemap("http://example.com", &posts);

        assert!(xml.contains("<loc>http://example.com/</loc>"));
        assert!(xml.contains("<loc>http://example.com/blog/one</loc>"));
        assert!(xml.contains("<loc>http://example.com/blog/two</loc>"));
        assert!(xml.contains("<lastmod>"));
    }
}
