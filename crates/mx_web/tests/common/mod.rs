use chrono::NaiveDate;
use mx_core::Article;

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub fn sample_articles() -> Vec<Article> {
    let article = |id: i64, author: &str, day: &str, tags: &[&str]| Article {
        id,
        title: format!("Article {}", id),
        url: format!("https://medium.com/p/{}", id),
        author: Some(author.to_string()),
        publication_date: Some(date(day)),
        image_url: Some(format!("https://miro.medium.com/{}.png", id)),
        summary: Some("A short summary.".to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        reading_time: Some("5 min read".to_string()),
    };
    vec![
        article(1, "Jane Doe", "2024-02-15", &["Rust"]),
        article(2, "John Roe", "2024-03-01", &["AI"]),
        article(3, "Jane Doe", "2024-03-01", &["Python"]),
    ]
}
