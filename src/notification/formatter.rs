//! # Message Formatter
//!
//! Turns a [`WikiEvent`] into the line of text posted to the chat room. Every
//! kind has one fixed template; titles and user names are plain text and are
//! not escaped for wiki markup.
//!
//! An event may be deliberately left unreported. [`MessageFormatter::render`]
//! says why through a [`SkipReason`], [`MessageFormatter::format`] only says
//! whether there is a message.

use crate::{
    config::{NotificationToggles, WikiConfig},
    models::{EventKind, WikiEvent, event::FILE_NAMESPACE},
};

/// Why an event produced no message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Announcements for this event kind are switched off.
    Disabled(EventKind),
    /// The save created the page; creations are announced separately.
    NewPage,
    /// The save was a minor edit and minor edits are switched off.
    MinorEdit,
    /// The created page is a file description page.
    FileUpload,
    /// The event kind has no message template.
    Unsupported(EventKind),
}

/// Renders events using fixed per-kind templates.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    wiki: WikiConfig,
    toggles: NotificationToggles,
}

impl MessageFormatter {
    /// Creates a formatter that links into `wiki` and honours `toggles`.
    pub fn new(wiki: WikiConfig, toggles: NotificationToggles) -> Self {
        Self { wiki, toggles }
    }

    /// Returns the message for `event`, or `None` when it must not be
    /// reported.
    pub fn format(&self, event: &WikiEvent) -> Option<String> {
        self.render(event).ok()
    }

    /// Returns the message for `event`, or the reason it is skipped.
    pub fn render(&self, event: &WikiEvent) -> Result<String, SkipReason> {
        let kind = event.kind();
        if kind == EventKind::FileUploaded {
            return Err(SkipReason::Unsupported(kind));
        }
        if !self.toggles.is_enabled(kind) {
            return Err(SkipReason::Disabled(kind));
        }

        let message = match event {
            WikiEvent::PageEdited {
                user,
                title,
                summary,
                is_minor,
                is_new_page,
                revision_id,
                parent_revision_id,
            } => {
                if *is_new_page {
                    return Err(SkipReason::NewPage);
                }
                if *is_minor && !self.toggles.edited_minor {
                    return Err(SkipReason::MinorEdit);
                }
                let verb = if *is_minor { "made a minor edit to" } else { "edited" };
                let link = self.wiki.diff_url(title, *revision_id, *parent_revision_id);
                match summary.trim() {
                    "" => format!("{user} {verb} {title} {link}"),
                    summary => format!("{user} {verb} {title} ({summary}) {link}"),
                }
            }
            WikiEvent::PageCreated { user, title, namespace } => {
                if namespace == FILE_NAMESPACE {
                    return Err(SkipReason::FileUpload);
                }
                format!("{user} created {title} {}", self.wiki.page_url(title))
            }
            WikiEvent::PageDeleted { user, title, reason } => {
                format!("{user} deleted {title}. Reason: {reason}")
            }
            WikiEvent::PageMoved { user, old_title, new_title, reason } => {
                let reason = reason.as_deref().unwrap_or_default();
                format!("{user} moved {old_title} to {new_title}. Reason: {reason}")
            }
            WikiEvent::UserCreated { username } => {
                format!("New wiki user created: {username} {}", self.wiki.user_page_url(username))
            }
            WikiEvent::UserBlocked { blocking_user, target_user, reason } => {
                let blocks = self.wiki.block_list_url();
                match reason.as_deref().map(str::trim) {
                    None | Some("") => {
                        format!("{blocking_user} has blocked {target_user}. All blocks: {blocks}")
                    }
                    Some(reason) => format!(
                        "{blocking_user} has blocked {target_user} with reason '{reason}'. All blocks: {blocks}"
                    ),
                }
            }
            WikiEvent::FileUploaded { .. } => return Err(SkipReason::Unsupported(kind)),
        };

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIKI_URL: &str = "https://wiki.example.com/index.php?title=";

    fn formatter() -> MessageFormatter {
        formatter_with(NotificationToggles::default())
    }

    fn formatter_with(toggles: NotificationToggles) -> MessageFormatter {
        let wiki =
            WikiConfig { base_url: "https://wiki.example.com/".to_string(), ..Default::default() };
        MessageFormatter::new(wiki, toggles)
    }

    fn edit(summary: &str, is_minor: bool, is_new_page: bool) -> WikiEvent {
        WikiEvent::PageEdited {
            user: "Alice".to_string(),
            title: "Sandbox".to_string(),
            summary: summary.to_string(),
            is_minor,
            is_new_page,
            revision_id: 42,
            parent_revision_id: 41,
        }
    }

    ////////////////////////////////////////////////////////////
    // page edits
    ////////////////////////////////////////////////////////////

    #[test]
    fn test_minor_edit_with_summary() {
        assert_eq!(
            formatter().format(&edit("typo fix", true, false)).unwrap(),
            format!("Alice made a minor edit to Sandbox (typo fix) {WIKI_URL}Sandbox&diff=42&oldid=41")
        );
    }

    #[test]
    fn test_edit_without_summary_omits_parentheses() {
        let message = formatter().format(&edit("", false, false)).unwrap();
        assert_eq!(message, format!("Alice edited Sandbox {WIKI_URL}Sandbox&diff=42&oldid=41"));
        assert!(!message.contains("()"));
    }

    #[test]
    fn test_edit_summary_is_trimmed() {
        let message = formatter().format(&edit("  cleanup \n", false, false)).unwrap();
        assert!(message.contains("Sandbox (cleanup) https://"));

        let blank = formatter().format(&edit("   ", false, false)).unwrap();
        assert!(!blank.contains('('));
    }

    #[test]
    fn test_edit_of_new_page_is_suppressed() {
        for (summary, is_minor) in [("", false), ("first", true), ("x", false)] {
            assert_eq!(
                formatter().render(&edit(summary, is_minor, true)),
                Err(SkipReason::NewPage)
            );
        }
    }

    #[test]
    fn test_minor_edit_suppressed_when_minor_edits_disabled() {
        let formatter =
            formatter_with(NotificationToggles { edited_minor: false, ..Default::default() });
        assert_eq!(formatter.render(&edit("", true, false)), Err(SkipReason::MinorEdit));
        assert!(formatter.format(&edit("", false, false)).is_some());
    }

    #[test]
    fn test_edit_title_is_url_encoded_in_link_only() {
        let event = WikiEvent::PageEdited {
            user: "Alice".to_string(),
            title: "Help:Getting started".to_string(),
            summary: String::new(),
            is_minor: false,
            is_new_page: false,
            revision_id: 7,
            parent_revision_id: 6,
        };
        assert_eq!(
            formatter().format(&event).unwrap(),
            format!(
                "Alice edited Help:Getting started {WIKI_URL}Help%3AGetting+started&diff=7&oldid=6"
            )
        );
    }

    ////////////////////////////////////////////////////////////
    // other kinds
    ////////////////////////////////////////////////////////////

    #[test]
    fn test_page_created() {
        let event = WikiEvent::PageCreated {
            user: "Carol".to_string(),
            title: "Roadmap".to_string(),
            namespace: String::new(),
        };
        assert_eq!(formatter().format(&event).unwrap(), format!("Carol created Roadmap {WIKI_URL}Roadmap"));
    }

    #[test]
    fn test_page_created_in_file_namespace_is_suppressed() {
        let event = WikiEvent::PageCreated {
            user: "Carol".to_string(),
            title: "File:Logo.png".to_string(),
            namespace: "File".to_string(),
        };
        assert_eq!(formatter().render(&event), Err(SkipReason::FileUpload));
        assert_eq!(formatter().format(&event), None);
    }

    #[test]
    fn test_page_deleted() {
        let event = WikiEvent::PageDeleted {
            user: "Bob".to_string(),
            title: "OldPage".to_string(),
            reason: "spam".to_string(),
        };
        assert_eq!(formatter().format(&event).unwrap(), "Bob deleted OldPage. Reason: spam");
    }

    #[test]
    fn test_page_moved_with_and_without_reason() {
        let mut event = WikiEvent::PageMoved {
            user: "Dave".to_string(),
            old_title: "Draft".to_string(),
            new_title: "Final".to_string(),
            reason: Some("done".to_string()),
        };
        assert_eq!(formatter().format(&event).unwrap(), "Dave moved Draft to Final. Reason: done");

        if let WikiEvent::PageMoved { reason, .. } = &mut event {
            *reason = None;
        }
        assert_eq!(formatter().format(&event).unwrap(), "Dave moved Draft to Final. Reason: ");
    }

    #[test]
    fn test_user_created_links_user_page() {
        let event = WikiEvent::UserCreated { username: "Jane Doe".to_string() };
        assert_eq!(
            formatter().format(&event).unwrap(),
            format!("New wiki user created: Jane Doe {WIKI_URL}User:Jane+Doe")
        );
    }

    #[test]
    fn test_user_blocked_with_reason() {
        let event = WikiEvent::UserBlocked {
            blocking_user: "Admin".to_string(),
            target_user: "Spammer".to_string(),
            reason: Some("link spam".to_string()),
        };
        assert_eq!(
            formatter().format(&event).unwrap(),
            format!(
                "Admin has blocked Spammer with reason 'link spam'. All blocks: {WIKI_URL}Special:BlockList"
            )
        );
    }

    #[test]
    fn test_user_blocked_without_reason_has_no_reason_clause() {
        for reason in [None, Some(String::new())] {
            let event = WikiEvent::UserBlocked {
                blocking_user: "Admin".to_string(),
                target_user: "Spammer".to_string(),
                reason,
            };
            let message = formatter().format(&event).unwrap();
            assert!(!message.contains("with reason"));
            assert_eq!(
                message,
                format!("Admin has blocked Spammer. All blocks: {WIKI_URL}Special:BlockList")
            );
        }
    }

    #[test]
    fn test_file_upload_is_unsupported() {
        let event = WikiEvent::FileUploaded {
            user: "Carol".to_string(),
            file_name: "Logo.png".to_string(),
        };
        assert_eq!(
            formatter().render(&event),
            Err(SkipReason::Unsupported(EventKind::FileUploaded))
        );
    }

    #[test]
    fn test_disabled_kind_yields_nothing() {
        let formatter = formatter_with(NotificationToggles { removed: false, ..Default::default() });
        let event = WikiEvent::PageDeleted {
            user: "Bob".to_string(),
            title: "OldPage".to_string(),
            reason: "spam".to_string(),
        };
        assert_eq!(formatter.render(&event), Err(SkipReason::Disabled(EventKind::PageDeleted)));
    }

    #[test]
    fn test_titles_are_not_escaped() {
        let event = WikiEvent::PageDeleted {
            user: "Bob".to_string(),
            title: "[[Link]] & <b>\"quoted\"</b>".to_string(),
            reason: String::new(),
        };
        assert_eq!(
            formatter().format(&event).unwrap(),
            "Bob deleted [[Link]] & <b>\"quoted\"</b>. Reason: "
        );
    }
}
