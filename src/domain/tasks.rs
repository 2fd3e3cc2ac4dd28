// Task tracking domain model
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    pub active_projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_today: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProjectId>,
    pub title: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// Backends send either tracker keys ("KAN-82") or plain numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Text(String),
    Number(serde_json::Number),
}

impl Project {
    /// Identifier shown in the task header, falling back to the title
    /// when the id is missing, empty or zero
    pub fn display_id(&self) -> Cow<'_, str> {
        match &self.id {
            Some(ProjectId::Text(id)) if !id.is_empty() => Cow::Borrowed(id),
            Some(ProjectId::Number(n)) if n.as_f64() != Some(0.0) => Cow::Owned(n.to_string()),
            _ => Cow::Borrowed(&self.title),
        }
    }

    pub fn status_slug(&self) -> String {
        status_slug(&self.status)
    }
}

/// Lower-case the status and collapse whitespace runs into a single '-'
pub fn status_slug(status: &str) -> String {
    let mut slug = String::with_capacity(status.len());
    let mut in_whitespace = false;

    for ch in status.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_slug() {
        assert_eq!(status_slug("In Progress"), "in-progress");
        assert_eq!(status_slug("Waiting for  VWFS"), "waiting-for-vwfs");
        assert_eq!(status_slug("Done"), "done");
        assert_eq!(status_slug(" Phase\t1 "), "-phase-1-");
    }

    #[test]
    fn test_display_id_falls_back_to_title() {
        let mut project: Project =
            serde_json::from_str(r#"{"title":"Build X","status":"In Progress","progress":42}"#)
                .unwrap();
        assert_eq!(project.display_id(), "Build X");
        assert_eq!(project.progress, Some(42.0));

        project.id = Some(ProjectId::Text(String::new()));
        assert_eq!(project.display_id(), "Build X");

        project.id = Some(ProjectId::Text("KAN-82".to_string()));
        assert_eq!(project.display_id(), "KAN-82");
    }

    #[test]
    fn test_decode_numeric_id() {
        let tasks: TaskList = serde_json::from_str(
            r#"{"active_projects":[
                {"id":82,"title":"Build X","status":"New"},
                {"id":0,"title":"Zero","status":"New"},
                {"id":"KAN-82","title":"Keyed","status":"New"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(tasks.active_projects[0].id, Some(ProjectId::Number(82.into())));
        assert_eq!(tasks.active_projects[0].display_id(), "82");
        assert_eq!(tasks.active_projects[1].display_id(), "Zero");
        assert_eq!(tasks.active_projects[2].display_id(), "KAN-82");
    }
}
