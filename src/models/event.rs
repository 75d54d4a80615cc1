//! Wiki lifecycle events as handed over by the host.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Namespace whose page creations are uploads rather than articles.
pub const FILE_NAMESPACE: &str = "File";

/// A single lifecycle occurrence in the wiki.
///
/// Values are built by the host from data it has already validated and are
/// never mutated afterwards. Serialized form is tagged by `kind`, which lets
/// the command line host read events from JSON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WikiEvent {
    /// An existing page was saved with new content.
    PageEdited {
        /// The user who saved the page.
        user: String,
        /// Full title of the page, including its namespace prefix.
        title: String,
        /// The edit summary, possibly empty.
        #[serde(default)]
        summary: String,
        /// Whether the editor flagged the change as minor.
        #[serde(default)]
        is_minor: bool,
        /// Whether this save created the page.
        #[serde(default)]
        is_new_page: bool,
        /// Id of the revision produced by the save.
        revision_id: u64,
        /// Id of the revision the save was based on.
        parent_revision_id: u64,
    },
    /// A new page was inserted.
    PageCreated {
        /// The user who created the page.
        user: String,
        /// Full title of the page.
        title: String,
        /// Namespace text of the page, empty for the main namespace.
        #[serde(default)]
        namespace: String,
    },
    /// A page was deleted.
    PageDeleted {
        /// The user who deleted the page.
        user: String,
        /// Full title of the deleted page.
        title: String,
        /// The deletion reason.
        #[serde(default)]
        reason: String,
    },
    /// A page was renamed.
    PageMoved {
        /// The user who moved the page.
        user: String,
        /// Title before the move.
        old_title: String,
        /// Title after the move.
        new_title: String,
        /// The move reason, if one was given.
        #[serde(default)]
        reason: Option<String>,
    },
    /// A user account was registered.
    UserCreated {
        /// Name of the new account.
        username: String,
    },
    /// A user account or address was blocked.
    UserBlocked {
        /// The administrator who placed the block.
        blocking_user: String,
        /// The blocked account or address.
        target_user: String,
        /// The block reason, if one was given.
        #[serde(default)]
        reason: Option<String>,
    },
    /// A file was uploaded. Modelled so hosts can forward it, but never
    /// turned into a message.
    FileUploaded {
        /// The uploader.
        user: String,
        /// Name of the uploaded file.
        file_name: String,
    },
}

/// The kind of a [`WikiEvent`], used for enablement lookups and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// See [`WikiEvent::PageEdited`].
    PageEdited,
    /// See [`WikiEvent::PageCreated`].
    PageCreated,
    /// See [`WikiEvent::PageDeleted`].
    PageDeleted,
    /// See [`WikiEvent::PageMoved`].
    PageMoved,
    /// See [`WikiEvent::UserCreated`].
    UserCreated,
    /// See [`WikiEvent::UserBlocked`].
    UserBlocked,
    /// See [`WikiEvent::FileUploaded`].
    FileUploaded,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::PageEdited => "page_edited",
            EventKind::PageCreated => "page_created",
            EventKind::PageDeleted => "page_deleted",
            EventKind::PageMoved => "page_moved",
            EventKind::UserCreated => "user_created",
            EventKind::UserBlocked => "user_blocked",
            EventKind::FileUploaded => "file_uploaded",
        };
        f.write_str(name)
    }
}

/// Contract violations detected at the dispatcher boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventValidationError {
    /// A field that names the acting user is empty.
    #[error("{kind} event is missing its acting user ({field})")]
    MissingUser {
        /// Kind of the offending event.
        kind: EventKind,
        /// Name of the empty field.
        field: &'static str,
    },

    /// A field that names a page is empty.
    #[error("{kind} event is missing a title ({field})")]
    MissingTitle {
        /// Kind of the offending event.
        kind: EventKind,
        /// Name of the empty field.
        field: &'static str,
    },
}

impl WikiEvent {
    /// Returns the kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            WikiEvent::PageEdited { .. } => EventKind::PageEdited,
            WikiEvent::PageCreated { .. } => EventKind::PageCreated,
            WikiEvent::PageDeleted { .. } => EventKind::PageDeleted,
            WikiEvent::PageMoved { .. } => EventKind::PageMoved,
            WikiEvent::UserCreated { .. } => EventKind::UserCreated,
            WikiEvent::UserBlocked { .. } => EventKind::UserBlocked,
            WikiEvent::FileUploaded { .. } => EventKind::FileUploaded,
        }
    }

    /// Returns the user responsible for the event.
    pub fn acting_user(&self) -> &str {
        match self {
            WikiEvent::PageEdited { user, .. }
            | WikiEvent::PageCreated { user, .. }
            | WikiEvent::PageDeleted { user, .. }
            | WikiEvent::PageMoved { user, .. }
            | WikiEvent::FileUploaded { user, .. } => user,
            WikiEvent::UserCreated { username } => username,
            WikiEvent::UserBlocked { blocking_user, .. } => blocking_user,
        }
    }

    /// Checks the fields every message relies on.
    ///
    /// Hosts guarantee these in practice, so a failure here points at an
    /// integration bug rather than a runtime condition.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        let kind = self.kind();
        let user_field = match self {
            WikiEvent::UserCreated { .. } => "username",
            WikiEvent::UserBlocked { .. } => "blocking_user",
            _ => "user",
        };
        if self.acting_user().trim().is_empty() {
            return Err(EventValidationError::MissingUser { kind, field: user_field });
        }

        let titles: Vec<(&'static str, &str)> = match self {
            WikiEvent::PageEdited { title, .. }
            | WikiEvent::PageCreated { title, .. }
            | WikiEvent::PageDeleted { title, .. } => vec![("title", title.as_str())],
            WikiEvent::PageMoved { old_title, new_title, .. } =>
                vec![("old_title", old_title.as_str()), ("new_title", new_title.as_str())],
            WikiEvent::UserBlocked { target_user, .. } => {
                if target_user.trim().is_empty() {
                    return Err(EventValidationError::MissingUser { kind, field: "target_user" });
                }
                Vec::new()
            }
            WikiEvent::FileUploaded { file_name, .. } => vec![("file_name", file_name.as_str())],
            WikiEvent::UserCreated { .. } => Vec::new(),
        };
        for (field, value) in titles {
            if value.trim().is_empty() {
                return Err(EventValidationError::MissingTitle { kind, field });
            }
        }

        Ok(())
    }
}
