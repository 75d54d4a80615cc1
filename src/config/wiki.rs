use serde::Deserialize;

fn default_script_path() -> String {
    "index.php?title=".to_string()
}

fn default_user_page_prefix() -> String {
    "User:".to_string()
}

fn default_block_list_page() -> String {
    "Special:BlockList".to_string()
}

/// Where the wiki lives, used to build the links embedded in messages.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WikiConfig {
    /// Root URL of the wiki, including the trailing `/`.
    #[serde(default)]
    pub base_url: String,

    /// Script path and title parameter appended to `base_url`. Installations
    /// with URL rewriting can shorten this (e.g. `wiki/`).
    #[serde(default = "default_script_path")]
    pub script_path: String,

    /// Title prefix of user pages.
    #[serde(default = "default_user_page_prefix")]
    pub user_page_prefix: String,

    /// Title of the special page listing active blocks.
    #[serde(default = "default_block_list_page")]
    pub block_list_page: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            script_path: default_script_path(),
            user_page_prefix: default_user_page_prefix(),
            block_list_page: default_block_list_page(),
        }
    }
}

impl WikiConfig {
    /// Link to the page with the given title. The title is form-encoded.
    pub fn page_url(&self, title: &str) -> String {
        format!("{}{}{}", self.base_url, self.script_path, form_encode(title))
    }

    /// Link to the diff between two revisions of a page.
    pub fn diff_url(&self, title: &str, revision_id: u64, parent_revision_id: u64) -> String {
        format!("{}&diff={}&oldid={}", self.page_url(title), revision_id, parent_revision_id)
    }

    /// Link to a user's page. Only the user name is form-encoded.
    pub fn user_page_url(&self, username: &str) -> String {
        format!(
            "{}{}{}{}",
            self.base_url,
            self.script_path,
            self.user_page_prefix,
            form_encode(username)
        )
    }

    /// Link to the list of all blocks.
    pub fn block_list_url(&self) -> String {
        format!("{}{}{}", self.base_url, self.script_path, self.block_list_page)
    }
}

/// Encodes `text` as a form value, matching the links already posted by
/// deployed bots: spaces become `+` and everything except ASCII
/// alphanumerics and `-_.` is percent-encoded.
fn form_encode(text: &str) -> String {
    urlencoding::encode(text).replace("%20", "+").replace('~', "%7E")
}
