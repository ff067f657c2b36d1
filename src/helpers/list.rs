//! List helpers: tag filtering, search, and tag/category counts

use indexmap::IndexMap;

use crate::content::Post;

/// Posts carrying `tag`, in their original order
pub fn posts_with_tag<'a>(posts: &'a [Post], tag: &str) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|post| post.tags.iter().any(|t| t == tag))
        .collect()
}

/// Case-insensitive search over title, description, excerpt and tags.
///
/// A blank query matches everything.
pub fn search_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let query = query.trim();
    if query.is_empty() {
        return posts.iter().collect();
    }

    let term = query.to_lowercase();
    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&term)
                || post.description.to_lowercase().contains(&term)
                || post.excerpt.to_lowercase().contains(&term)
                || post.tags.iter().any(|t| t.to_lowercase().contains(&term))
        })
        .collect()
}

/// Number of posts per category, most used first (ties by name)
pub fn count_categories(posts: &[Post]) -> Vec<(String, usize)> {
    let mut categories: IndexMap<String, usize> = IndexMap::new();

    for post in posts {
        if post.category.is_empty() {
            continue;
        }
        *categories.entry(post.category.clone()).or_insert(0) += 1;
    }

    sorted_counts(categories)
}

/// Number of posts per tag, most used first (ties by name)
pub fn count_tags(posts: &[Post]) -> Vec<(String, usize)> {
    let mut tags: IndexMap<String, usize> = IndexMap::new();

    for post in posts {
        for tag in &post.tags {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    sorted_counts(tags)
}

fn sorted_counts(counts: IndexMap<String, usize>) -> Vec<(String, usize)> {
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ParsedPost;

    fn post(slug: &str, front: &str) -> Post {
        let raw = format!("---\n{}\n---\nbody of {}\n", front, slug);
        Post::from_parsed(&ParsedPost::parse(slug, &raw), 150)
    }

    fn sample() -> Vec<Post> {
        vec![
            post("vite", "title: React Vite Setup\ncategory: dev\ntags: [react, vite]"),
            post("ts", "title: TypeScript Alternatives\ncategory: dev\ntags: [typescript]"),
            post(
                "daily",
                "title: Daily Reflection\ncategory: life\ndescription: Slow mornings\ntags: [react]",
            ),
        ]
    }

    fn slugs(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    #[test]
    fn test_posts_with_tag() {
        let posts = sample();
        assert_eq!(slugs(&posts_with_tag(&posts, "react")), ["vite", "daily"]);
        assert!(posts_with_tag(&posts, "rust").is_empty());
    }

    #[test]
    fn test_search_fields() {
        let posts = sample();
        assert_eq!(slugs(&search_posts(&posts, "VITE")), ["vite"]);
        assert_eq!(slugs(&search_posts(&posts, "mornings")), ["daily"]);
        assert_eq!(slugs(&search_posts(&posts, "body of ts")), ["ts"]);
        assert_eq!(slugs(&search_posts(&posts, "typescript")), ["ts"]);
        assert!(search_posts(&posts, "nothing here").is_empty());
    }

    #[test]
    fn test_blank_search_returns_all() {
        let posts = sample();
        assert_eq!(search_posts(&posts, "   ").len(), 3);
    }

    #[test]
    fn test_counts() {
        let posts = sample();
        assert_eq!(
            count_categories(&posts),
            vec![("dev".to_string(), 2), ("life".to_string(), 1)]
        );
        assert_eq!(
            count_tags(&posts),
            vec![
                ("react".to_string(), 2),
                ("typescript".to_string(), 1),
                ("vite".to_string(), 1)
            ]
        );
    }
}
