use serde::Deserialize;

use crate::models::EventKind;

fn default_true() -> bool {
    true
}

/// Per-event-kind switches. Everything is announced unless turned off.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct NotificationToggles {
    /// Existing pages saved with new content.
    #[serde(default = "default_true")]
    pub edited: bool,

    /// Edits flagged as minor. Has no effect when `edited` is off.
    #[serde(default = "default_true")]
    pub edited_minor: bool,

    /// Newly created pages.
    #[serde(default = "default_true")]
    pub created: bool,

    /// Deleted pages.
    #[serde(default = "default_true")]
    pub removed: bool,

    /// Moved (renamed) pages.
    #[serde(default = "default_true")]
    pub moved: bool,

    /// New user accounts.
    #[serde(default = "default_true")]
    pub new_user: bool,

    /// Blocked users.
    #[serde(default = "default_true")]
    pub user_blocked: bool,
}

impl Default for NotificationToggles {
    fn default() -> Self {
        Self {
            edited: true,
            edited_minor: true,
            created: true,
            removed: true,
            moved: true,
            new_user: true,
            user_blocked: true,
        }
    }
}

impl NotificationToggles {
    /// Whether events of `kind` are announced at all.
    ///
    /// File uploads have no message template and are never enabled.
    pub fn is_enabled(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::PageEdited => self.edited,
            EventKind::PageCreated => self.created,
            EventKind::PageDeleted => self.removed,
            EventKind::PageMoved => self.moved,
            EventKind::UserCreated => self.new_user,
            EventKind::UserBlocked => self.user_blocked,
            EventKind::FileUploaded => false,
        }
    }

    /// Returns toggles with every kind switched off.
    pub fn none() -> Self {
        Self {
            edited: false,
            edited_minor: false,
            created: false,
            removed: false,
            moved: false,
            new_user: false,
            user_blocked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_every_supported_kind() {
        let toggles = NotificationToggles::default();
        for kind in [
            EventKind::PageEdited,
            EventKind::PageCreated,
            EventKind::PageDeleted,
            EventKind::PageMoved,
            EventKind::UserCreated,
            EventKind::UserBlocked,
        ] {
            assert!(toggles.is_enabled(kind), "{kind} should be enabled by default");
        }
        assert!(!toggles.is_enabled(EventKind::FileUploaded));
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let json = r#"{"removed": false, "edited_minor": false}"#;
        let toggles: NotificationToggles = serde_json::from_str(json).unwrap();
        assert!(!toggles.is_enabled(EventKind::PageDeleted));
        assert!(!toggles.edited_minor);
        assert!(toggles.is_enabled(EventKind::PageEdited));
        assert!(toggles.is_enabled(EventKind::UserBlocked));
    }

    #[test]
    fn test_none_disables_everything() {
        let toggles = NotificationToggles::none();
        assert!(!toggles.is_enabled(EventKind::PageEdited));
        assert!(!toggles.is_enabled(EventKind::UserCreated));
    }
}
