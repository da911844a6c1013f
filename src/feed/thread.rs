use std::collections::{HashMap, HashSet};

use crate::models::post::Comment;

/// A comment with its resolved replies, ready for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub children: Vec<CommentNode>,
}

/// Build the display forest for one post's comments.
///
/// A comment whose `parent_id` doesn't resolve within this set (including a
/// comment naming itself) is placed at the root rather than rejected.
/// Roots are sorted by timestamp; reply lists keep the order the comments
/// arrived in.
pub fn build_thread(comments: &[Comment]) -> Vec<CommentNode> {
    let ids: HashSet<&str> = comments.iter().map(|c| c.id.as_str()).collect();

    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();

    for (i, comment) in comments.iter().enumerate() {
        let parent = comment
            .parent_id
            .as_deref()
            .filter(|p| *p != comment.id && ids.contains(p));
        match parent {
            Some(p) => children.entry(p).or_default().push(i),
            None => roots.push(i),
        }
    }

    roots.sort_by_key(|&i| comments[i].timestamp);

    roots
        .into_iter()
        .map(|i| assemble(i, comments, &children))
        .collect()
}

fn assemble(index: usize, comments: &[Comment], children: &HashMap<&str, Vec<usize>>) -> CommentNode {
    let comment = comments[index].clone();
    let child_nodes = children
        .get(comment.id.as_str())
        .map(|indices| {
            indices
                .iter()
                .map(|&i| assemble(i, comments, children))
                .collect()
        })
        .unwrap_or_default();

    CommentNode {
        comment,
        children: child_nodes,
    }
}
