use crate::state::Route;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub label: String,
    pub route: Route,
}

/// A toast the front end shows once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub variant: NotificationVariant,
    pub title: String,
    pub description: String,
    pub action: Option<NotificationAction>,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: NotificationVariant::Default,
            title: title.into(),
            description: description.into(),
            action: None,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: NotificationVariant::Destructive,
            ..Self::info(title, description)
        }
    }

    pub fn with_action(mut self, label: impl Into<String>, route: Route) -> Self {
        self.action = Some(NotificationAction {
            label: label.into(),
            route,
        });
        self
    }
}
