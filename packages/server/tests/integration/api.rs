use serde_json::json;

use crate::common::{TestApp, routes};

mod achievements {
    use super::*;

    #[tokio::test]
    async fn create_returns_the_stored_record() {
        let app = TestApp::spawn().await;
        let res = app
            .post_json(
                routes::ACHIEVEMENTS,
                &json!({
                    "name": "Asha Rao",
                    "usn": "1RV21CS001",
                    "event_type": "Hackathon",
                    "level": "National",
                    "year": 2024,
                    "prize": "First place"
                }),
            )
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["name"], "Asha Rao");
        assert_eq!(res.body["year"], 2024);
        assert_eq!(res.body["prize"], "First place");

        let fetched = app.get(&routes::achievement(res.id())).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body, res.body);
    }

    #[tokio::test]
    async fn blank_required_field_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let res = app
            .post_json(
                routes::ACHIEVEMENTS,
                &json!({
                    "name": "",
                    "usn": "U1",
                    "event_type": "Workshop",
                    "level": "State",
                    "year": 2024
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "Name is required");
    }

    #[tokio::test]
    async fn string_year_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let res = app
            .post_json(
                routes::ACHIEVEMENTS,
                &json!({
                    "name": "Asha",
                    "usn": "U1",
                    "event_type": "Workshop",
                    "level": "State",
                    "year": "twenty"
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let res = app.post_raw_json(routes::ACHIEVEMENTS, "{not json").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::achievement(12345)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn unparsable_id_is_a_validation_error() {
        let app = TestApp::spawn().await;

        for path in ["/api/v1/achievements/abc", "/api/v1/achievements/99999999999"] {
            let res = app.get(path).await;
            assert_eq!(res.status, 400, "{path}");
            assert_eq!(res.content_type.as_deref(), Some("application/json"));
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
            assert!(res.body["message"].is_string());
        }

        let res = app.delete("/api/v1/achievements/abc").await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let res = app
            .put_json(
                "/api/v1/achievements/abc",
                &json!({
                    "name": "Asha",
                    "usn": "U1",
                    "event_type": "Workshop",
                    "level": "State",
                    "year": 2024
                }),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn put_replaces_every_field() {
        let app = TestApp::spawn().await;
        let res = app
            .post_json(
                routes::ACHIEVEMENTS,
                &json!({
                    "name": "Asha",
                    "usn": "U1",
                    "event_type": "Workshop",
                    "level": "State",
                    "year": 2023,
                    "prize": "Gold"
                }),
            )
            .await;
        let id = res.id();

        let res = app
            .put_json(
                &routes::achievement(id),
                &json!({
                    "name": "Asha Rao",
                    "usn": "U1",
                    "event_type": "Seminar",
                    "level": "National",
                    "year": 2024
                }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["event_type"], "Seminar");
        assert!(res.body["prize"].is_null());

        let fetched = app.get(&routes::achievement(id)).await;
        assert_eq!(fetched.body, res.body);
    }

    #[tokio::test]
    async fn put_on_missing_record_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app
            .put_json(
                &routes::achievement(5),
                &json!({
                    "name": "Asha",
                    "usn": "U1",
                    "event_type": "Workshop",
                    "level": "State",
                    "year": 2024
                }),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let app = TestApp::spawn().await;
        let id = app.create_via_api("Asha", "U1", "Workshop", 2024).await;

        assert_eq!(app.delete(&routes::achievement(id)).await.status, 204);
        assert_eq!(app.get(&routes::achievement(id)).await.status, 404);
        assert_eq!(app.delete(&routes::achievement(id)).await.status, 204);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn list_includes_tally_in_first_seen_order() {
        let app = TestApp::spawn().await;
        app.create_via_api("A", "U1", "Workshop", 2024).await;
        app.create_via_api("B", "U2", "Workshop", 2024).await;
        app.create_via_api("C", "U3", "Hackathon", 2023).await;

        let res = app.get(routes::ACHIEVEMENTS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 3);
        assert_eq!(res.body["tally"]["total"], 3);
        assert_eq!(
            res.body["tally"]["counts"],
            json!([
                {"event_type": "Workshop", "count": 2},
                {"event_type": "Hackathon", "count": 1}
            ])
        );
    }

    #[tokio::test]
    async fn filters_combine() {
        let app = TestApp::spawn().await;
        app.create_via_api("A", "U1", "Workshop", 2024).await;
        app.create_via_api("B", "U2", "Hackathon", 2024).await;
        app.create_via_api("C", "U1", "Workshop", 2023).await;

        let res = app
            .get(&format!("{}?year=2024&event=Workshop", routes::ACHIEVEMENTS))
            .await;
        assert_eq!(res.body["tally"]["total"], 1);
        assert_eq!(res.body["data"][0]["name"], "A");

        let res = app
            .get(&format!("{}?usn=U1", routes::ACHIEVEMENTS))
            .await;
        assert_eq!(res.body["tally"]["total"], 2);
    }

    #[tokio::test]
    async fn empty_table_has_zero_tally() {
        let app = TestApp::spawn().await;
        let res = app.get(routes::ACHIEVEMENTS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"], json!([]));
        assert_eq!(res.body["tally"]["total"], 0);
        assert_eq!(res.body["tally"]["counts"], json!([]));
    }

    #[tokio::test]
    async fn bad_year_filter_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app
            .get(&format!("{}?year=recent", routes::ACHIEVEMENTS))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod students {
    use super::*;

    #[tokio::test]
    async fn summary_counts_and_sentence() {
        let app = TestApp::spawn().await;
        app.create_via_api("Asha", "U1", "Workshop", 2023).await;
        app.create_via_api("Asha", "U1", "Workshop", 2024).await;
        app.create_via_api("Asha", "U1", "Hackathon", 2024).await;

        let res = app.get(&routes::student_summary("U1")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["usn"], "U1");
        assert_eq!(res.body["total"], 3);
        assert_eq!(
            res.body["summary"],
            "The student participated in 3 professional activities including 2 Workshop(s), 1 Hackathon(s)."
        );
    }

    #[tokio::test]
    async fn summary_echoes_the_trimmed_usn() {
        let app = TestApp::spawn().await;
        app.create_via_api("Asha", "U1", "Workshop", 2024).await;

        let res = app.get(&routes::student_summary("%20U1%20")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["usn"], "U1");
        assert_eq!(res.body["total"], 1);
    }

    #[tokio::test]
    async fn unknown_student_has_zero_total() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::student_summary("NOBODY")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 0);
        assert_eq!(res.body["counts"], json!([]));
    }
}

#[tokio::test]
async fn openapi_document_lists_the_api() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::OPENAPI).await;

    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().expect("paths object");
    assert!(paths.keys().any(|p| p.starts_with("/api/v1/achievements")));
    assert!(paths.keys().any(|p| p.contains("/summary")));
}

mod spans {
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::Subscriber;
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;

    /// Collects `(span, field, value)` for every span opened.
    #[derive(Clone, Default)]
    struct SpanFields(Arc<Mutex<Vec<(String, String, String)>>>);

    impl SpanFields {
        fn value(&self, span: &str, field: &str) -> Option<String> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .find(|(s, f, _)| s == span && f == field)
                .map(|(_, _, v)| v.clone())
        }
    }

    struct Recorder<'a> {
        span: &'static str,
        out: &'a Mutex<Vec<(String, String, String)>>,
    }

    impl Visit for Recorder<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.out.lock().unwrap().push((
                self.span.to_string(),
                field.name().to_string(),
                format!("{value:?}"),
            ));
        }
    }

    impl<S: Subscriber> Layer<S> for SpanFields {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            let mut recorder = Recorder {
                span: attrs.metadata().name(),
                out: &self.0,
            };
            attrs.record(&mut recorder);
        }
    }

    #[tokio::test]
    async fn handler_spans_record_path_values() {
        let fields = SpanFields::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(fields.clone()));

        let app = TestApp::spawn().await;
        let id = app.create_via_api("Asha", "U1", "Workshop", 2024).await;

        assert_eq!(app.get(&routes::achievement(id)).await.status, 200);
        assert_eq!(app.delete(&routes::achievement(id)).await.status, 204);
        assert_eq!(app.get(&routes::student_summary("U1")).await.status, 200);

        assert_eq!(fields.value("get_achievement", "id"), Some(id.to_string()));
        assert_eq!(fields.value("delete_achievement", "id"), Some(id.to_string()));
        assert_eq!(fields.value("student_summary", "usn"), Some("U1".to_string()));
    }
}
