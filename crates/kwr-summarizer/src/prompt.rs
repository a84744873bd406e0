use kwr_core::Post;

/// Character budget for the concatenated post text included in a prompt,
/// keeping requests inside upstream input-size limits.
pub(crate) const TEXT_BUDGET: usize = 3000;

/// Build the single-turn summarization prompt for a keyword's posts.
///
/// Post texts are newline-joined and truncated to [`TEXT_BUDGET`]
/// characters before being appended to the fixed instruction template.
#[must_use]
pub fn build_prompt(posts: &[Post], keyword: &str) -> String {
    let blob = posts
        .iter()
        .map(|post| post.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let truncated: String = blob.chars().take(TEXT_BUDGET).collect();

    format!(
        "Summarise the following online posts about \"{keyword}\" over the past 7 days.\n\
         Give a sentiment overview, key talking points, and briefly highlight themes.\n\n\
         {truncated}"
    )
}
