//! `Annotations` namespace: notes attached to dates in evolution graphs.

use chrono::NaiveDate;
use serde::Deserialize;
use statkit_core::{DateSpec, Params, Period, SiteSelector};
use statkit_fetch::RequestSink;

use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `Annotations` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "Annotations",
    cli_name: "annotations",
    aliases: &["notes"],
    summary: "Create, edit and list annotations",
    methods: &[
        "add",
        "save",
        "delete",
        "deleteAll",
        "get",
        "getAll",
        "getAnnotationCountForDates",
    ],
};

// ============================================================================
// Types
// ============================================================================

/// Fields to change on an existing annotation. Unset fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationUpdate {
    /// New date.
    pub date: Option<NaiveDate>,
    /// New text.
    pub note: Option<String>,
    /// New starred flag.
    pub starred: Option<bool>,
}

/// Time window for listing annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationWindow {
    /// Period the window is expressed in.
    pub period: Period,
    /// Date (or range) the window ends on.
    pub date: DateSpec,
    /// Number of periods to include, counting back from `date`.
    pub last_n: Option<u32>,
}

/// An annotation as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Annotation {
    /// Annotation id, unique per site.
    #[serde(default)]
    pub idnote: Option<u64>,
    /// Date the annotation is attached to (`YYYY-MM-DD`).
    pub date: String,
    /// Text.
    pub note: String,
    /// Starred flag, sent as `0`/`1`.
    #[serde(default)]
    pub starred: serde_json::Value,
    /// Login of the author.
    #[serde(default)]
    pub user: Option<String>,
    /// Whether the caller may edit it.
    #[serde(default, rename = "canEditOrDelete")]
    pub can_edit: Option<bool>,
}

// ============================================================================
// Adapter
// ============================================================================

/// Adapter for the `Annotations` namespace.
#[derive(Debug, Clone)]
pub struct Annotations<S> {
    sink: S,
}

impl<S: RequestSink> Annotations<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Adds an annotation.
    pub async fn add(&self, site: u32, date: NaiveDate, note: &str, starred: bool) -> S::Output {
        let params = Params::new()
            .with("idSite", site)
            .with("date", date)
            .with("note", note)
            .with("starred", starred);
        self.sink.send("Annotations.add", params).await
    }

    /// Edits an annotation.
    pub async fn save(&self, site: u32, id_note: u64, update: &AnnotationUpdate) -> S::Output {
        let params = Params::new()
            .with("idSite", site)
            .with("idNote", id_note)
            .with_opt("date", update.date)
            .with_opt("note", update.note.as_deref())
            .with_opt("starred", update.starred);
        self.sink.send("Annotations.save", params).await
    }

    /// Deletes one annotation.
    pub async fn delete(&self, site: u32, id_note: u64) -> S::Output {
        let params = Params::new().with("idSite", site).with("idNote", id_note);
        self.sink.send("Annotations.delete", params).await
    }

    /// Deletes every annotation of a site.
    pub async fn delete_all(&self, site: u32) -> S::Output {
        self.sink
            .send("Annotations.deleteAll", Params::new().with("idSite", site))
            .await
    }

    /// Fetches one annotation.
    pub async fn get(&self, site: u32, id_note: u64) -> S::Output {
        let params = Params::new().with("idSite", site).with("idNote", id_note);
        self.sink.send("Annotations.get", params).await
    }

    /// Lists annotations, optionally restricted to a window.
    pub async fn get_all(
        &self,
        sites: &SiteSelector,
        window: Option<&AnnotationWindow>,
    ) -> S::Output {
        let params = Params::new()
            .with("idSite", sites.clone())
            .with_opt("period", window.map(|w| w.period))
            .with_opt("date", window.map(|w| w.date))
            .with_opt("lastN", window.and_then(|w| w.last_n));
        self.sink.send("Annotations.getAll", params).await
    }

    /// Annotation counts per period within a window.
    pub async fn get_annotation_count_for_dates(
        &self,
        sites: &SiteSelector,
        window: &AnnotationWindow,
        include_text: bool,
    ) -> S::Output {
        let params = Params::new()
            .with("idSite", sites.clone())
            .with("date", window.date)
            .with("period", window.period)
            .with_opt("lastN", window.last_n)
            .with("getAnnotationText", include_text);
        self.sink
            .send("Annotations.getAnnotationCountForDates", params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use statkit_core::ParamValue;

    use super::*;
    use crate::testing::{EchoSink, scalars};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_add() {
        let call = Annotations::new(EchoSink)
            .add(1, day("2024-03-01"), "Launch", true)
            .await;

        assert_eq!(call.method(), "Annotations.add");
        assert_eq!(
            scalars(&call),
            vec![
                ("idSite".to_string(), "1".to_string()),
                ("date".to_string(), "2024-03-01".to_string()),
                ("note".to_string(), "Launch".to_string()),
                ("starred".to_string(), "1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_save_sends_only_changed_fields() {
        let update = AnnotationUpdate {
            note: Some("Relaunch".into()),
            ..AnnotationUpdate::default()
        };
        let call = Annotations::new(EchoSink).save(1, 7, &update).await;

        assert_eq!(
            call.params().keys().collect::<Vec<_>>(),
            vec!["idSite", "idNote", "note"]
        );
    }

    #[tokio::test]
    async fn test_get_all_window() {
        let window = AnnotationWindow {
            period: Period::Month,
            date: DateSpec::Today,
            last_n: Some(6),
        };
        let call = Annotations::new(EchoSink)
            .get_all(&SiteSelector::All, Some(&window))
            .await;

        assert_eq!(call.params().get("idSite"), Some(&ParamValue::Str("all".into())));
        assert_eq!(call.params().get("lastN"), Some(&ParamValue::Int(6)));

        let call = Annotations::new(EchoSink)
            .get_all(&SiteSelector::Single(2), None)
            .await;
        assert_eq!(call.params().len(), 1);
    }

    #[test]
    fn test_deserialize_annotation() {
        let json = serde_json::json!({
            "idnote": 3,
            "date": "2024-03-01",
            "note": "Launch",
            "starred": 1,
            "user": "admin",
            "canEditOrDelete": true
        });
        let annotation: Annotation = serde_json::from_value(json).unwrap();
        assert_eq!(annotation.idnote, Some(3));
        assert_eq!(annotation.note, "Launch");
    }
}
