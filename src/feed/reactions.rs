use crate::models::post::{Post, Reaction, ReactionKind};

/// Apply one user's reaction to a post, returning the updated post.
///
/// Toggle semantics: no existing reaction appends one, re-applying the same
/// kind removes it, a different kind replaces it in place. There is never
/// more than one reaction per user on a post. The cached `likes` count is
/// recomputed from the reaction set on every call rather than nudged up or
/// down, so it can't drift.
///
/// Pure: the caller persists the result and relies on the merge layer's
/// echo suppression when the store pushes the same change back.
pub fn apply_reaction(post: &Post, user_id: &str, kind: ReactionKind) -> Post {
    let mut next = post.clone();

    match next.reactions.iter().position(|r| r.user_id == user_id) {
        Some(i) if next.reactions[i].kind == kind => {
            next.reactions.remove(i);
        }
        Some(i) => {
            next.reactions[i].kind = kind;
        }
        None => {
            next.reactions.push(Reaction {
                post_id: next.id.clone(),
                user_id: user_id.to_string(),
                kind,
            });
        }
    }

    next.likes = next.reactions.len() as u32;
    next
}
