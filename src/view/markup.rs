//! Markup builders for catalog cards, suggestions and chat bubbles

use crate::catalog::Creator;
use crate::markdown;
use crate::search::NO_RESULTS_LABEL;
use crate::state::{ChatMessage, Role};

use super::surface::{Action, Fragment};

/// Assistant avatar label when no creator is selected
const FALLBACK_INITIALS: &str = "AI";

/// Selectable card on the creator grid
pub fn creator_card(creator: &Creator) -> Fragment {
    let html = format!(
        r#"<div class="creator-card" data-creator-id="{id}"><div class="creator-card-header"><div class="creator-card-avatar"><img src="{avatar}" alt="{name}" class="creator-avatar-img"></div><div class="creator-card-info"><h3>{name}</h3><p>{specialty}</p></div></div></div>"#,
        id = creator.id,
        avatar = creator.avatar,
        name = creator.name,
        specialty = creator.specialty,
    );
    Fragment::with_action(html, Action::SelectCreator(creator.id))
}

/// Selectable search suggestion
pub fn suggestion_item(creator: &Creator) -> Fragment {
    Fragment::with_action(
        format!(r#"<div class="suggestion-item">{}</div>"#, creator.name),
        Action::SelectCreator(creator.id),
    )
}

/// Placeholder shown when a search has no matches; not selectable
pub fn no_results_item() -> Fragment {
    Fragment::new(format!(
        r#"<div class="suggestion-item no-results">{}</div>"#,
        NO_RESULTS_LABEL
    ))
}

/// Avatar image for the chat header
pub fn avatar_image(creator: &Creator) -> Fragment {
    Fragment::new(format!(
        r#"<img class="avatar-img" src="{}" alt="{}">"#,
        creator.avatar, creator.name
    ))
}

/// Chat bubble for one turn; assistant turns are rendered from markdown
pub fn chat_message(message: &ChatMessage, creator: Option<&Creator>) -> Fragment {
    let html = match message.role {
        Role::User => format!(
            r#"<div class="message user-message"><div class="message-avatar"><button class="message-avatar-btn">U</button></div><div class="message-content"><p>{}</p></div></div>"#,
            message.content
        ),
        Role::Assistant => {
            let initials = creator
                .map(Creator::initials)
                .unwrap_or_else(|| FALLBACK_INITIALS.to_string());
            format!(
                r#"<div class="message ai-message"><div class="message-avatar"><button class="message-avatar-btn">{}</button></div><div class="message-content"><div class="formatted-content">{}</div></div></div>"#,
                initials,
                markdown::render(&message.content)
            )
        }
    };
    Fragment::new(html)
}
