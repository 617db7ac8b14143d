use crate::utils::non_blank;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accepted video reference fields, preferred first. Older data sets use
/// the provider-specific names further down the list.
pub const VIDEO_FIELDS: [&str; 8] = [
    "video_url",
    "video",
    "youtube_url",
    "youtube_id",
    "youtube",
    "vimeo_url",
    "vimeo_id",
    "vimeo",
];

/// One entry of the project data set. Every field is optional and blank
/// values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub studio: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub comp_supervisor: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub comp_lead: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub vimeo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub vimeo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub vimeo: Option<String>,
}

/// Strings pass through, numbers and booleans are stringified, anything
/// else is treated as missing.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Animation,
    Vfx,
}

impl ProjectRecord {
    pub fn video_field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "video_url" => &self.video_url,
            "video" => &self.video,
            "youtube_url" => &self.youtube_url,
            "youtube_id" => &self.youtube_id,
            "youtube" => &self.youtube,
            "vimeo_url" => &self.vimeo_url,
            "vimeo_id" => &self.vimeo_id,
            "vimeo" => &self.vimeo,
            _ => return None,
        };
        value.as_deref()
    }

    /// First non-blank video field in [`VIDEO_FIELDS`] order, with its name.
    pub fn video_source(&self) -> Option<(&'static str, &str)> {
        VIDEO_FIELDS
            .iter()
            .find_map(|name| non_blank(self.video_field(name)).map(|value| (*name, value)))
    }

    pub fn explicit_thumbnail(&self) -> Option<&str> {
        non_blank(self.thumb.as_deref()).or_else(|| non_blank(self.thumbnail.as_deref()))
    }

    pub fn category(&self) -> Category {
        match non_blank(self.category.as_deref()) {
            Some(tag) if tag.eq_ignore_ascii_case("animation") => Category::Animation,
            _ => Category::Vfx,
        }
    }

    /// Credit lines shown under the thumbnail, in display order.
    pub fn info_fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("Studio", self.studio.as_deref()),
            ("Comp Supervisor", self.comp_supervisor.as_deref()),
            ("Comp Lead", self.comp_lead.as_deref()),
            ("My role", self.role.as_deref()),
            ("Software", self.software.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_fields() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "title": "Reel",
            "vimeo_id": 76979871,
            "role": {"nested": true},
            "software": null,
            "unknown_field": "ignored"
        }))
        .unwrap();

        assert_eq!(record.title.as_deref(), Some("Reel"));
        assert_eq!(record.vimeo_id.as_deref(), Some("76979871"));
        assert_eq!(record.role, None);
        assert_eq!(record.software, None);
    }

    #[test]
    fn test_video_source_skips_blank_fields() {
        let record = ProjectRecord {
            video_url: Some("   ".to_string()),
            youtube_id: Some(" dQw4w9WgXcQ ".to_string()),
            vimeo_url: Some("https://vimeo.com/76979871".to_string()),
            ..Default::default()
        };

        assert_eq!(record.video_source(), Some(("youtube_id", "dQw4w9WgXcQ")));
        assert_eq!(ProjectRecord::default().video_source(), None);
    }

    #[test]
    fn test_explicit_thumbnail_prefers_thumb() {
        let record = ProjectRecord {
            thumb: Some("a.jpg".to_string()),
            thumbnail: Some("b.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(record.explicit_thumbnail(), Some("a.jpg"));

        let record = ProjectRecord {
            thumb: Some(" ".to_string()),
            thumbnail: Some("b.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(record.explicit_thumbnail(), Some("b.jpg"));
    }

    #[test]
    fn test_category() {
        let mut record = ProjectRecord::default();
        assert_eq!(record.category(), Category::Vfx);
        record.category = Some("Animation".to_string());
        assert_eq!(record.category(), Category::Animation);
        record.category = Some("vfx".to_string());
        assert_eq!(record.category(), Category::Vfx);
    }
}
