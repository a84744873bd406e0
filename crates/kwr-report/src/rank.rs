use kwr_core::Post;

/// Select the `n` highest-engagement posts.
///
/// The sort is stable and descending, so posts with equal engagement keep
/// their original relative order; the result never exceeds
/// `min(n, posts.len())` items.
#[must_use]
pub fn rank_top(posts: &[Post], n: usize) -> Vec<Post> {
    let mut ranked = posts.to_vec();
    ranked.sort_by(|a, b| b.engagement.cmp(&a.engagement));
    ranked.truncate(n);
    ranked
}
