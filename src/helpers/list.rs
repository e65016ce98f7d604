//! Listing order and grouping of posts and pages

use chrono::Datelike;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::content::{Page, Post};

/// Listing order: pinned posts first, then newest first, then by path
pub fn compare_posts(a: &Post, b: &Post) -> Ordering {
    b.pin
        .cmp(&a.pin)
        .then_with(|| b.date.cmp(&a.date))
        .then_with(|| a.source.cmp(&b.source))
}

pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(compare_posts);
}

/// Two pages declaring the same `order`
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTie {
    pub order: i64,
    /// Listed first (smaller path)
    pub first: PathBuf,
    pub second: PathBuf,
}

/// Navigation order: by `order` (pages without one last), then by path
pub fn compare_pages(a: &Page, b: &Page) -> Ordering {
    match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.source.cmp(&b.source))
}

/// Sort pages for navigation and report every `order` shared by two pages
pub fn sort_pages(pages: &mut [Page]) -> Vec<OrderTie> {
    pages.sort_by(compare_pages);

    pages
        .windows(2)
        .filter_map(|pair| match (pair[0].order, pair[1].order) {
            (Some(x), Some(y)) if x == y => Some(OrderTie {
                order: x,
                first: pair[0].source.clone(),
                second: pair[1].source.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Category name -> posts, names sorted, posts in the order given
pub fn group_by_category(posts: &[Post]) -> BTreeMap<&str, Vec<&Post>> {
    let mut groups: BTreeMap<&str, Vec<&Post>> = BTreeMap::new();
    for post in posts {
        for category in &post.categories {
            if category.trim().is_empty() {
                continue;
            }
            let entry = groups.entry(category.as_str()).or_default();
            // `categories: [Go, Go]` lists the post once
            if !entry.iter().any(|p| p.source == post.source) {
                entry.push(post);
            }
        }
    }
    groups
}

/// Tag name -> posts, names sorted, posts in the order given
pub fn group_by_tag(posts: &[Post]) -> BTreeMap<&str, Vec<&Post>> {
    let mut groups: BTreeMap<&str, Vec<&Post>> = BTreeMap::new();
    for post in posts {
        for tag in &post.tags {
            if tag.trim().is_empty() {
                continue;
            }
            groups.entry(tag.as_str()).or_default().push(post);
        }
    }
    groups
}

/// Posts by year, newest year first, each year strictly by date
pub fn archives(posts: &[Post]) -> Vec<(i32, Vec<&Post>)> {
    let mut years: BTreeMap<i32, Vec<&Post>> = BTreeMap::new();
    for post in posts {
        years.entry(post.date.year()).or_default().push(post);
    }

    years
        .into_iter()
        .rev()
        .map(|(year, mut posts)| {
            posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.source.cmp(&b.source)));
            (year, posts)
        })
        .collect()
}
