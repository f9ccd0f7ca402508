use std::sync::Arc;

use crate::config::Config;
use crate::folders::FolderResolver;
use crate::google::drive::DriveClient;
use crate::ledger::LinkLedger;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub drive: Arc<DriveClient>,
    pub ledger: Arc<LinkLedger>,
    pub folders: Arc<FolderResolver>,
}

/// The fixed set of upload buckets. Each maps 1:1 to a Drive folder under the
/// configured parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Category {
    TabOne,
    TabTwo,
    TabThree,
    TabFour,
    TabFive,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::TabOne,
        Category::TabTwo,
        Category::TabThree,
        Category::TabFour,
        Category::TabFive,
    ];

    /// Parse the `tabLabel` form value sent by the frontend.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Tab One" => Some(Category::TabOne),
            "Tab Two" => Some(Category::TabTwo),
            "Tab Three" => Some(Category::TabThree),
            "Tab Four" => Some(Category::TabFour),
            "Tab Five" => Some(Category::TabFive),
            _ => None,
        }
    }

    /// The label doubles as the Drive folder name.
    pub fn label(&self) -> &'static str {
        match self {
            Category::TabOne => "Tab One",
            Category::TabTwo => "Tab Two",
            Category::TabThree => "Tab Three",
            Category::TabFour => "Tab Four",
            Category::TabFive => "Tab Five",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One successfully uploaded file, as returned to the client.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadedFile {
    pub id: String,
    #[serde(rename = "webViewLink")]
    pub web_view_link: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadResponse {
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn unknown_label_rejected() {
        assert_eq!(Category::from_label("Tab Six"), None);
        assert_eq!(Category::from_label("tab one"), None);
    }

    #[test]
    fn uploaded_file_serializes_with_camel_case_link() {
        let file = UploadedFile {
            id: "abc123".to_string(),
            web_view_link: "https://drive.google.com/file/d/abc123/view?usp=drive_link"
                .to_string(),
        };
        let json = serde_json::to_value(&file).unwrap();
        assert!(json.get("webViewLink").is_some());
    }
}
