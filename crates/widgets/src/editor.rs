//! Rich text editor configuration
//!
//! Toolbar actions and defaults for the content-editable post editor.

use serde::{Deserialize, Serialize};

/// A toolbar action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EditorAction {
    /// An action the editor provides, referenced by name
    Builtin(String),
    /// An action with its own icon and command
    Custom {
        /// Action name
        name: String,
        /// Icon markup
        icon: String,
        /// Tooltip
        title: String,
        /// Editing command run when clicked
        command: String,
    },
}

impl EditorAction {
    /// Action name
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(name) => name,
            Self::Custom { name, .. } => name,
        }
    }

    fn justify(command: &str, icon: &str, title: &str) -> Self {
        Self::Custom {
            name: command.to_string(),
            icon: format!(r#"<i class="fa fa-{icon}"></i>"#),
            title: title.to_string(),
            command: command.to_string(),
        }
    }
}

const BUILTIN_ACTIONS: [&str; 9] = [
    "bold",
    "underline",
    "italic",
    "strikethrough",
    "heading1",
    "heading2",
    "paragraph",
    "olist",
    "ulist",
];

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Element wrapping each paragraph
    #[serde(default = "default_paragraph_separator")]
    pub default_paragraph_separator: String,
    /// Whether formatting is applied as inline styles
    #[serde(default, rename = "styleWithCSS")]
    pub style_with_css: bool,
    /// Toolbar actions, in display order
    #[serde(default = "default_actions")]
    pub actions: Vec<EditorAction>,
}

fn default_paragraph_separator() -> String {
    "p".to_string()
}

fn default_actions() -> Vec<EditorAction> {
    let mut actions: Vec<EditorAction> =
        BUILTIN_ACTIONS.iter().map(|name| EditorAction::Builtin(name.to_string())).collect();
    actions.push(EditorAction::justify("justifyLeft", "align-left", "Venstre juster"));
    actions.push(EditorAction::justify("justifyCenter", "align-center", "Center juster"));
    actions.push(EditorAction::justify("justifyRight", "align-right", "Højre juster"));
    actions.push(EditorAction::Builtin("link".to_string()));
    actions.push(EditorAction::Builtin("image".to_string()));
    actions
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_paragraph_separator: default_paragraph_separator(),
            style_with_css: false,
            actions: default_actions(),
        }
    }
}

impl EditorConfig {
    /// Names of the toolbar actions, in order
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.iter().map(EditorAction::name).collect()
    }

    /// Check if the toolbar has an action
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.iter().any(|a| a.name() == name)
    }

    /// Drop an action from the toolbar
    pub fn without_action(mut self, name: &str) -> Self {
        self.actions.retain(|a| a.name() != name);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_actions_in_order() {
        let config = EditorConfig::default();
        assert_eq!(config.action_names(), vec![
            "bold",
            "underline",
            "italic",
            "strikethrough",
            "heading1",
            "heading2",
            "paragraph",
            "olist",
            "ulist",
            "justifyLeft",
            "justifyCenter",
            "justifyRight",
            "link",
            "image",
        ]);
        assert_eq!(config.default_paragraph_separator, "p");
        assert!(!config.style_with_css);
    }

    #[test]
    fn test_custom_action_shape() {
        let config = EditorConfig::default();
        let center = config.actions.iter().find(|a| a.name() == "justifyCenter").unwrap();
        assert_eq!(center, &EditorAction::Custom {
            name: "justifyCenter".to_string(),
            icon: r#"<i class="fa fa-align-center"></i>"#.to_string(),
            title: "Center juster".to_string(),
            command: "justifyCenter".to_string(),
        });
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(EditorConfig::default()).unwrap();
        assert_eq!(json["defaultParagraphSeparator"], "p");
        assert_eq!(json["styleWithCSS"], false);
        assert_eq!(json["actions"][0], "bold");
        assert_eq!(json["actions"][9]["name"], "justifyLeft");

        let parsed: EditorConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, EditorConfig::default());
    }

    #[test]
    fn test_without_action() {
        let config = EditorConfig::default().without_action("image");
        assert!(!config.has_action("image"));
        assert!(config.has_action("link"));
    }
}
