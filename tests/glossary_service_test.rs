//! Tests for GlossaryService over file-backed and mock term sources

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use glosstree::application::services::GlossaryService;
use glosstree::application::ApplicationError;
use glosstree::config::Settings;
use glosstree::domain::{find_by_id, node_count, DomainError, GlossaryTerm, ListTermsParams};
use glosstree::infrastructure::di::ServiceContainer;
use glosstree::infrastructure::traits::{SearchRequest, TermSource};
use glosstree::util::testing::{init_test_setup, sample_terms};

/// Helper to write a term export into a temp dir
fn create_terms_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write terms file");
    path
}

fn sample_json() -> String {
    serde_json::to_string(&sample_terms()).expect("serialize sample")
}

fn service_for(path: &PathBuf) -> GlossaryService {
    ServiceContainer::new(Settings::default()).glossary_service(path)
}

struct FailingSource;

impl TermSource for FailingSource {
    fn search(&self, _request: &SearchRequest) -> io::Result<Vec<GlossaryTerm>> {
        Err(io::Error::new(io::ErrorKind::ConnectionRefused, "search service down"))
    }
}

/// Records every request it receives.
#[derive(Default)]
struct RecordingSource {
    requests: std::sync::Mutex<Vec<SearchRequest>>,
}

impl TermSource for RecordingSource {
    fn search(&self, request: &SearchRequest) -> io::Result<Vec<GlossaryTerm>> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(sample_terms())
    }
}

#[test]
fn given_json_array_when_loading_forest_then_builds_hierarchy() {
    // Arrange
    init_test_setup();
    let temp = TempDir::new().unwrap();
    let path = create_terms_file(&temp, "terms.json", &sample_json());

    // Act
    let forest = service_for(&path).load_forest().unwrap();

    // Assert
    assert_eq!(forest.len(), 2);
    assert_eq!(node_count(&forest), sample_terms().len());
}

#[test]
fn given_search_response_when_fetching_then_reads_hit_sources() {
    let temp = TempDir::new().unwrap();
    let path = create_terms_file(
        &temp,
        "response.json",
        r#"{"hits": {"hits": [
            {"_source": {"id": "1", "name": "Finance", "fullyQualifiedName": "Finance", "children": [{"id": "2"}]}},
            {"_source": {"id": "2", "name": "Revenue", "fullyQualifiedName": "Finance.Revenue",
                         "parent": {"id": "1", "fullyQualifiedName": "Finance"}}}
        ]}}"#,
    );

    let forest = service_for(&path).load_forest().unwrap();

    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].children.len(), 1);
}

#[test]
fn given_wildcard_query_and_paging_when_searching_then_returns_page() {
    let temp = TempDir::new().unwrap();
    let path = create_terms_file(&temp, "terms.json", &sample_json());
    let service = service_for(&path);

    let first = service.search_terms("Finance*", 1, 2).unwrap();
    let second = service.search_terms("Finance*", 2, 2).unwrap();

    let ids: Vec<_> = first.iter().chain(second.iter()).map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
    assert!(service.search_terms("Finance*", 3, 2).unwrap().is_empty());
}

#[rstest]
#[case(3)]
#[case(usize::MAX)]
fn given_page_past_end_when_searching_then_empty(#[case] page: usize) {
    let temp = TempDir::new().unwrap();
    let path = create_terms_file(&temp, "terms.json", &sample_json());
    let source = ServiceContainer::new(Settings::default()).term_source(&path);

    let terms = source
        .search(&SearchRequest {
            query: "*".into(),
            page,
            page_size: 1000,
            index: "glossary_search_index".into(),
        })
        .unwrap();

    assert!(terms.is_empty());
}

#[test]
fn given_terms_file_when_listing_fqns_then_in_file_order() {
    let temp = TempDir::new().unwrap();
    let path = create_terms_file(&temp, "terms.json", &sample_json());

    let fqns = service_for(&path).term_fqns().unwrap();

    assert_eq!(fqns.first().map(String::as_str), Some("Finance"));
    assert_eq!(fqns.len(), 5);
}

#[test]
fn given_parent_param_when_listing_roots_then_returns_children_level() {
    let temp = TempDir::new().unwrap();
    let path = create_terms_file(&temp, "terms.json", &sample_json());

    let terms = service_for(&path)
        .root_terms(&ListTermsParams::for_parent("1"))
        .unwrap();

    let names: Vec<_> = terms.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Revenue", "Cost"]);
}

#[test]
fn given_query_when_searching_forest_then_prunes() {
    let temp = TempDir::new().unwrap();
    let path = create_terms_file(&temp, "terms.json", &sample_json());

    let forest = service_for(&path).search_forest("cost").unwrap();

    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].children.len(), 1);
}

#[test]
fn given_children_batch_when_expanding_then_attaches_under_term() {
    let temp = TempDir::new().unwrap();
    let path = create_terms_file(&temp, "terms.json", &sample_json());
    let service = service_for(&path);
    let forest = service.load_forest().unwrap();
    let children = vec![GlossaryTerm::new("6", "People.Employee", "Employee")
        .with_parent("5", "People")];

    let outcome = service.expand(forest, &children, "5");

    assert!(outcome.updated);
    let people = find_by_id(&outcome.forest, "5").expect("people");
    assert_eq!(people.children.len(), 1);
}

#[test]
fn given_unknown_term_when_expanding_then_not_updated() {
    let temp = TempDir::new().unwrap();
    let path = create_terms_file(&temp, "terms.json", &sample_json());
    let service = service_for(&path);
    let forest = service.load_forest().unwrap();

    let outcome = service.expand(forest.clone(), &[], "missing");

    assert!(!outcome.updated);
    assert_eq!(outcome.forest, forest);
}

#[test]
fn given_missing_file_when_fetching_then_operation_failed_with_io_source() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.json");

    let err = service_for(&path).fetch_glossary_terms().unwrap_err();

    match err {
        ApplicationError::OperationFailed { source, .. } => {
            let io_err = source
                .downcast_ref::<io::Error>()
                .expect("io error as source");
            assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_invalid_json_when_fetching_then_errors() {
    let temp = TempDir::new().unwrap();
    let path = create_terms_file(&temp, "broken.json", "{not json");

    assert!(service_for(&path).fetch_glossary_terms().is_err());
}

#[test]
fn given_failing_source_when_loading_then_propagates_source_error() {
    let container = ServiceContainer::new(Settings::default());
    let service = container.glossary_service_with(Arc::new(FailingSource));

    let err = service.load_forest().unwrap_err();

    assert!(err.to_string().contains("search glossary terms"));
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
}

#[test]
fn given_settings_when_fetching_then_request_uses_configured_index_and_page_size() {
    let settings = Settings {
        page_size: 25,
        search_index: "custom_index".into(),
        ..Default::default()
    };
    let source = Arc::new(RecordingSource::default());
    let service = GlossaryService::new(source.clone(), Arc::new(settings));

    service.fetch_glossary_terms().unwrap();

    let requests = source.requests.lock().unwrap();
    assert_eq!(
        requests[0],
        SearchRequest {
            query: "*".into(),
            page: 1,
            page_size: 25,
            index: "custom_index".into(),
        }
    );
}

#[test]
fn given_configured_routes_when_building_breadcrumbs_then_uses_them() {
    let settings = Settings {
        route_base: "/catalog/glossary".into(),
        root_label: "All glossaries".into(),
        ..Default::default()
    };
    let service = GlossaryService::new(Arc::new(RecordingSource::default()), Arc::new(settings));

    let crumbs = service.breadcrumbs("Finance.Revenue").unwrap();

    assert_eq!(crumbs[0].name, "All glossaries");
    assert_eq!(crumbs[0].url, "/catalog/glossary");
    assert_eq!(crumbs[2].url, "/catalog/glossary/Finance.Revenue");
}

#[test]
fn given_quoted_segments_when_building_breadcrumbs_then_input_normalized() {
    let service = GlossaryService::new(
        Arc::new(RecordingSource::default()),
        Arc::new(Settings::default()),
    );

    let crumbs = service.breadcrumbs("\"Finance\".\"Net.Sales\"").unwrap();

    let names: Vec<_> = crumbs.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Glossaries", "Finance", "Net.Sales"]);
    assert_eq!(crumbs[1].url, "/glossary/Finance");
}

#[test]
fn given_stray_quote_when_building_breadcrumbs_then_invalid_name() {
    let service = GlossaryService::new(
        Arc::new(RecordingSource::default()),
        Arc::new(Settings::default()),
    );

    let err = service.breadcrumbs("Finance.Net\"Sales").unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidName(_))
    ));
}
