//! Assembly of the live `CLAUDE.md` from per-plugin fragments.

pub fn begin_marker(plugin: &str) -> String {
    format!("<!-- BEGIN PLUGIN: {} -->", plugin)
}

pub fn end_marker(plugin: &str) -> String {
    format!("<!-- END PLUGIN: {} -->", plugin)
}

/// Concatenates documentation fragments, each wrapped in marker comments
/// naming its plugin, in the order they are appended.
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    text: String,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin's fragment. Blank fragments add nothing.
    pub fn append(&mut self, plugin: &str, fragment: &str) {
        if fragment.trim().is_empty() {
            return;
        }
        self.text.push_str("\n\n");
        self.text.push_str(&begin_marker(plugin));
        self.text.push('\n');
        self.text.push_str(fragment);
        self.text.push('\n');
        self.text.push_str(&end_marker(plugin));
        self.text.push('\n');
    }

    pub fn finish(self) -> String {
        self.text.trim().to_string()
    }
}
