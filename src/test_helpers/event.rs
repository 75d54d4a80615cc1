use crate::models::WikiEvent;

/// A regular (non-minor) edit of an existing page with revision ids 42/41.
pub fn page_edited_event(user: &str, title: &str) -> WikiEvent {
    WikiEvent::PageEdited {
        user: user.to_string(),
        title: title.to_string(),
        summary: String::new(),
        is_minor: false,
        is_new_page: false,
        revision_id: 42,
        parent_revision_id: 41,
    }
}

/// A page created in the main namespace.
pub fn page_created_event(user: &str, title: &str) -> WikiEvent {
    WikiEvent::PageCreated {
        user: user.to_string(),
        title: title.to_string(),
        namespace: String::new(),
    }
}

/// A page deletion.
pub fn page_deleted_event(user: &str, title: &str, reason: &str) -> WikiEvent {
    WikiEvent::PageDeleted {
        user: user.to_string(),
        title: title.to_string(),
        reason: reason.to_string(),
    }
}

/// A page move without a reason.
pub fn page_moved_event(user: &str, old_title: &str, new_title: &str) -> WikiEvent {
    WikiEvent::PageMoved {
        user: user.to_string(),
        old_title: old_title.to_string(),
        new_title: new_title.to_string(),
        reason: None,
    }
}

/// A newly registered account.
pub fn user_created_event(username: &str) -> WikiEvent {
    WikiEvent::UserCreated { username: username.to_string() }
}

/// A block with an optional reason.
pub fn user_blocked_event(blocking_user: &str, target_user: &str, reason: Option<&str>) -> WikiEvent {
    WikiEvent::UserBlocked {
        blocking_user: blocking_user.to_string(),
        target_user: target_user.to_string(),
        reason: reason.map(str::to_string),
    }
}

/// One reportable event of every supported kind.
pub fn supported_events() -> Vec<WikiEvent> {
    vec![
        page_edited_event("Alice", "Sandbox"),
        page_created_event("Carol", "Roadmap"),
        page_deleted_event("Bob", "OldPage", "spam"),
        page_moved_event("Dave", "Draft", "Final"),
        user_created_event("Newbie"),
        user_blocked_event("Admin", "Spammer", Some("spam")),
    ]
}
